use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::PoolError;
use crate::events::MigrationCompleted;
use crate::state::{LockRole, LpLock, PoolConfig, VirtualPool};
use crate::utils::{current_timestamp, mint_with_vault_authority, transfer_from_vault};
use crate::vault_authority_seeds;

/// Permissionless crank moving a completed curve into the external AMM
#[derive(Accounts)]
pub struct Migrate<'info> {
    pub config: Box<Account<'info, PoolConfig>>,

    #[account(
        mut,
        has_one = config,
        has_one = base_vault,
        has_one = quote_vault,
        has_one = lp_mint @ PoolError::MigrationNotPrepared,
    )]
    pub pool: Box<Account<'info, VirtualPool>>,

    /// CHECK: PDA owning every vault and mint of the program
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub base_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub quote_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub lp_mint: Box<Account<'info, Mint>>,

    #[account(mut, seeds = [LP_VAULT_SEED, pool.key().as_ref()], bump)]
    pub lp_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [LP_LOCK_SEED, pool.key().as_ref(), LockRole::Partner.seed()],
        bump,
        has_one = pool,
    )]
    pub partner_lp_lock: Box<Account<'info, LpLock>>,

    #[account(
        mut,
        seeds = [LP_LOCK_SEED, pool.key().as_ref(), LockRole::Creator.seed()],
        bump,
        has_one = pool,
    )]
    pub creator_lp_lock: Box<Account<'info, LpLock>>,

    /// CHECK: pool of the external AMM; its owner must match the config's migration option
    /// and it must own both deposit vaults
    pub amm_pool: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = amm_base_vault.mint == pool.base_mint @ PoolError::InvalidMigrationTarget,
        constraint = amm_base_vault.owner == amm_pool.key() @ PoolError::InvalidMigrationTarget,
    )]
    pub amm_base_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = amm_quote_vault.mint == config.quote_mint @ PoolError::InvalidMigrationTarget,
        constraint = amm_quote_vault.owner == amm_pool.key() @ PoolError::InvalidMigrationTarget,
    )]
    pub amm_quote_vault: Box<Account<'info, TokenAccount>>,

    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handle_migrate(ctx: Context<Migrate>) -> Result<()> {
    let now = current_timestamp()?;
    let config = &ctx.accounts.config;
    let pool = &mut ctx.accounts.pool;
    let outcome = pool.migrate(config, now)?;

    require_keys_eq!(
        *ctx.accounts.amm_pool.owner,
        config.migration_option.program_id(),
        PoolError::InvalidMigrationTarget
    );

    let vault_authority = ctx.accounts.vault_authority.to_account_info();
    let seeds = vault_authority_seeds!(ctx.bumps.vault_authority);
    transfer_from_vault(
        &ctx.accounts.base_vault,
        &ctx.accounts.amm_base_vault,
        &vault_authority,
        &ctx.accounts.token_program,
        &[&seeds[..]],
        outcome.deposit_base,
    )?;
    transfer_from_vault(
        &ctx.accounts.quote_vault,
        &ctx.accounts.amm_quote_vault,
        &vault_authority,
        &ctx.accounts.token_program,
        &[&seeds[..]],
        outcome.deposit_quote,
    )?;
    mint_with_vault_authority(
        &ctx.accounts.lp_mint,
        &ctx.accounts.lp_vault,
        &vault_authority,
        &ctx.accounts.token_program,
        &[&seeds[..]],
        outcome.lp_amount,
    )?;

    let lp = outcome.lp;
    ctx.accounts
        .partner_lp_lock
        .fund(lp.partner_unlocked, lp.partner_locked, config.locked_vesting, now)?;
    ctx.accounts
        .creator_lp_lock
        .fund(lp.creator_unlocked, lp.creator_locked, config.locked_vesting, now)?;

    msg!(
        "Pool {} migrated: {} base, {} quote, {} LP",
        pool.key(),
        outcome.deposit_base,
        outcome.deposit_quote,
        outcome.lp_amount
    );
    emit!(MigrationCompleted {
        pool: pool.key(),
        amm_pool: ctx.accounts.amm_pool.key(),
        deposit_base: outcome.deposit_base,
        deposit_quote: outcome.deposit_quote,
        lp_amount: outcome.lp_amount,
        partner_lp: lp.partner_total(),
        creator_lp: lp.creator_total(),
        retained_lp: lp.retained,
        surplus: outcome.surplus,
        leftover_base: outcome.leftover_base,
        migrated_at: now,
    });
    Ok(())
}
