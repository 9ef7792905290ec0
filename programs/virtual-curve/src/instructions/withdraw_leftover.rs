use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::VAULT_AUTHORITY_SEED;
use crate::error::PoolError;
use crate::events::LeftoverWithdrawn;
use crate::state::{PoolConfig, VirtualPool};
use crate::utils::transfer_from_vault;
use crate::vault_authority_seeds;

/// Anyone may crank this; the destination is pinned to the config's receiver
#[derive(Accounts)]
pub struct WithdrawLeftover<'info> {
    pub config: Box<Account<'info, PoolConfig>>,

    #[account(mut, has_one = config, has_one = base_vault)]
    pub pool: Box<Account<'info, VirtualPool>>,

    /// CHECK: PDA owning every vault and mint of the program
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub base_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = leftover_token_account.owner == config.leftover_receiver @ PoolError::Unauthorized,
        constraint = leftover_token_account.mint == pool.base_mint @ PoolError::InvalidMint,
    )]
    pub leftover_token_account: Box<Account<'info, TokenAccount>>,

    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_withdraw_leftover(ctx: Context<WithdrawLeftover>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let amount = pool.withdraw_leftover()?;

    let seeds = vault_authority_seeds!(ctx.bumps.vault_authority);
    transfer_from_vault(
        &ctx.accounts.base_vault,
        &ctx.accounts.leftover_token_account,
        &ctx.accounts.vault_authority.to_account_info(),
        &ctx.accounts.token_program,
        &[&seeds[..]],
        amount,
    )?;

    emit!(LeftoverWithdrawn {
        pool: pool.key(),
        leftover_receiver: ctx.accounts.config.leftover_receiver,
        amount,
    });
    Ok(())
}
