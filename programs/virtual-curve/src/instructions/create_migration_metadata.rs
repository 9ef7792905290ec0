use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::PoolError;
use crate::events::MigrationPrepared;
use crate::state::{LockRole, LpLock, PoolConfig, PoolStatus, VirtualPool};

/// Creates every account `migrate` writes to, so migration itself never
/// allocates and a retried migration fails on the pool status.
#[derive(Accounts)]
pub struct CreateMigrationMetadata<'info> {
    pub config: Box<Account<'info, PoolConfig>>,

    #[account(mut, has_one = config)]
    pub pool: Box<Account<'info, VirtualPool>>,

    /// CHECK: PDA owning every vault and mint of the program
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        seeds = [LP_MINT_SEED, pool.key().as_ref()],
        bump,
        mint::decimals = LP_MINT_DECIMALS,
        mint::authority = vault_authority,
    )]
    pub lp_mint: Box<Account<'info, Mint>>,

    /// Escrow for LP until beneficiaries release it
    #[account(
        init,
        payer = payer,
        seeds = [LP_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = lp_mint,
        token::authority = vault_authority,
    )]
    pub lp_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = payer,
        seeds = [LP_LOCK_SEED, pool.key().as_ref(), LockRole::Partner.seed()],
        bump,
        space = 8 + LpLock::INIT_SPACE
    )]
    pub partner_lp_lock: Box<Account<'info, LpLock>>,

    #[account(
        init,
        payer = payer,
        seeds = [LP_LOCK_SEED, pool.key().as_ref(), LockRole::Creator.seed()],
        bump,
        space = 8 + LpLock::INIT_SPACE
    )]
    pub creator_lp_lock: Box<Account<'info, LpLock>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handle_create_migration_metadata(ctx: Context<CreateMigrationMetadata>) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let pool = &mut ctx.accounts.pool;
    require!(pool.status == PoolStatus::Active, PoolError::AlreadyMigrated);
    pool.lp_mint = ctx.accounts.lp_mint.key();

    ctx.accounts
        .partner_lp_lock
        .initialize(pool_key, LockRole::Partner, ctx.accounts.config.fee_claimer);
    ctx.accounts
        .creator_lp_lock
        .initialize(pool_key, LockRole::Creator, pool.creator);

    emit!(MigrationPrepared {
        pool: pool_key,
        lp_mint: pool.lp_mint,
        partner_lp_lock: ctx.accounts.partner_lp_lock.key(),
        creator_lp_lock: ctx.accounts.creator_lp_lock.key(),
    });
    Ok(())
}
