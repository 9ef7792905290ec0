use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::VAULT_AUTHORITY_SEED;
use crate::error::PoolError;
use crate::events::CreatorTradingFeeClaimed;
use crate::state::{PoolConfig, VirtualPool};
use crate::utils::transfer_from_vault;
use crate::vault_authority_seeds;

#[derive(Accounts)]
pub struct ClaimCreatorTradingFee<'info> {
    pub config: Box<Account<'info, PoolConfig>>,

    #[account(
        mut,
        has_one = config,
        has_one = creator @ PoolError::Unauthorized,
        has_one = base_vault,
        has_one = quote_vault,
    )]
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

    pub creator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_claim_creator_trading_fee(ctx: Context<ClaimCreatorTradingFee>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    let (base_amount, quote_amount) = pool.claim_creator_trading_fee();

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

    emit!(CreatorTradingFeeClaimed {
        pool: pool.key(),
        creator: ctx.accounts.creator.key(),
        base_amount,
        quote_amount,
    });
    Ok(())
}
