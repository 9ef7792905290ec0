use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::VAULT_AUTHORITY_SEED;
use crate::error::PoolError;
use crate::events::SurplusWithdrawn;
use crate::state::{PoolConfig, VirtualPool};
use crate::utils::transfer_from_vault;
use crate::vault_authority_seeds;

#[derive(Accounts)]
pub struct PartnerWithdrawSurplus<'info> {
    #[account(has_one = fee_claimer @ PoolError::Unauthorized)]
    pub config: Box<Account<'info, PoolConfig>>,

    #[account(mut, has_one = config, has_one = quote_vault)]
    pub pool: Box<Account<'info, VirtualPool>>,

    /// CHECK: PDA owning every vault and mint of the program
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut, constraint = token_quote_account.mint == config.quote_mint @ PoolError::InvalidMint)]
    pub token_quote_account: Box<Account<'info, TokenAccount>>,

    pub fee_claimer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_partner_withdraw_surplus(ctx: Context<PartnerWithdrawSurplus>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let amount = pool.withdraw_partner_surplus()?;

    let seeds = vault_authority_seeds!(ctx.bumps.vault_authority);
    transfer_from_vault(
        &ctx.accounts.quote_vault,
        &ctx.accounts.token_quote_account,
        &ctx.accounts.vault_authority.to_account_info(),
        &ctx.accounts.token_program,
        &[&seeds[..]],
        amount,
    )?;

    emit!(SurplusWithdrawn {
        pool: pool.key(),
        receiver: ctx.accounts.fee_claimer.key(),
        is_partner: true,
        amount,
    });
    Ok(())
}
