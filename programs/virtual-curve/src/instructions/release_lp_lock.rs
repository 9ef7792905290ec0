use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::PoolError;
use crate::events::LpLockReleased;
use crate::state::{LpLock, VirtualPool};
use crate::utils::{current_timestamp, transfer_from_vault};
use crate::vault_authority_seeds;

#[derive(Accounts)]
pub struct ReleaseLpLock<'info> {
    pub pool: Box<Account<'info, VirtualPool>>,

    #[account(
        mut,
        seeds = [LP_LOCK_SEED, pool.key().as_ref(), lp_lock.role.seed()],
        bump,
        has_one = pool,
        has_one = beneficiary @ PoolError::Unauthorized,
    )]
    pub lp_lock: Box<Account<'info, LpLock>>,

    /// CHECK: PDA owning every vault and mint of the program
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(mut, seeds = [LP_VAULT_SEED, pool.key().as_ref()], bump)]
    pub lp_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = destination.mint == pool.lp_mint @ PoolError::InvalidMint,
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    pub beneficiary: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_release_lp_lock(ctx: Context<ReleaseLpLock>) -> Result<()> {
    let now = current_timestamp()?;
    let lp_lock = &mut ctx.accounts.lp_lock;
    let amount = lp_lock.release(now)?;

    let seeds = vault_authority_seeds!(ctx.bumps.vault_authority);
    transfer_from_vault(
        &ctx.accounts.lp_vault,
        &ctx.accounts.destination,
        &ctx.accounts.vault_authority.to_account_info(),
        &ctx.accounts.token_program,
        &[&seeds[..]],
        amount,
    )?;

    emit!(LpLockReleased {
        pool: lp_lock.pool,
        lp_lock: lp_lock.key(),
        role: lp_lock.role,
        beneficiary: lp_lock.beneficiary,
        amount,
        released_amount: lp_lock.released_amount,
    });
    Ok(())
}
