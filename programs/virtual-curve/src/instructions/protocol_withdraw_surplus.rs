use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{CLAIM_FEE_OPERATOR_SEED, VAULT_AUTHORITY_SEED};
use crate::error::PoolError;
use crate::events::SurplusWithdrawn;
use crate::state::{ClaimFeeOperator, PoolConfig, VirtualPool};
use crate::utils::transfer_from_vault;
use crate::vault_authority_seeds;

#[derive(Accounts)]
pub struct ProtocolWithdrawSurplus<'info> {
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

    #[account(
        seeds = [CLAIM_FEE_OPERATOR_SEED, operator.key().as_ref()],
        bump,
        has_one = operator @ PoolError::Unauthorized,
    )]
    pub claim_fee_operator: Account<'info, ClaimFeeOperator>,

    pub operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_protocol_withdraw_surplus(ctx: Context<ProtocolWithdrawSurplus>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let amount = pool.withdraw_protocol_surplus()?;

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
        receiver: ctx.accounts.operator.key(),
        is_partner: false,
        amount,
    });
    Ok(())
}
