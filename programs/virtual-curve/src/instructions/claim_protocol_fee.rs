use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{CLAIM_FEE_OPERATOR_SEED, VAULT_AUTHORITY_SEED};
use crate::error::PoolError;
use crate::events::ProtocolFeeClaimed;
use crate::state::{ClaimFeeOperator, PoolConfig, VirtualPool};
use crate::utils::transfer_from_vault;
use crate::vault_authority_seeds;

#[derive(Accounts)]
pub struct ClaimProtocolFee<'info> {
    pub config: Box<Account<'info, PoolConfig>>,

    #[account(mut, has_one = config, has_one = base_vault, has_one = quote_vault)]
    pub pool: Box<Account<'info, VirtualPool>>,

    /// CHECK: PDA owning every vault and mint of the program
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub base_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut, constraint = token_base_account.mint == pool.base_mint @ PoolError::InvalidMint)]
    pub token_base_account: Box<Account<'info, TokenAccount>>,

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

pub fn handle_claim_protocol_fee(ctx: Context<ClaimProtocolFee>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let (base_amount, quote_amount) = pool.claim_protocol_fee();

    let vault_authority = ctx.accounts.vault_authority.to_account_info();
    let seeds = vault_authority_seeds!(ctx.bumps.vault_authority);
    transfer_from_vault(
        &ctx.accounts.base_vault,
        &ctx.accounts.token_base_account,
        &vault_authority,
        &ctx.accounts.token_program,
        &[&seeds[..]],
        base_amount,
    )?;
    transfer_from_vault(
        &ctx.accounts.quote_vault,
        &ctx.accounts.token_quote_account,
        &vault_authority,
        &ctx.accounts.token_program,
        &[&seeds[..]],
        quote_amount,
    )?;

    emit!(ProtocolFeeClaimed {
        pool: pool.key(),
        operator: ctx.accounts.operator.key(),
        base_amount,
        quote_amount,
    });
    Ok(())
}
