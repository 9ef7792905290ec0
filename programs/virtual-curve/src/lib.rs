#![allow(deprecated)]
#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod logic;
pub mod macros;
pub mod state;
pub mod utils;
#[cfg(test)]
mod tests;

use instructions::*;
use state::ConfigParameters;

declare_id!("8js2bTpVT9tY33fsif83sRRGGudRSXG8sqt899W3FT4P");

#[program]
pub mod virtual_curve {
    use super::*;

    // Admin
    pub fn create_claim_fee_operator(ctx: Context<CreateClaimFeeOperator>) -> Result<()> {
        instructions::handle_create_claim_fee_operator(ctx)
    }

    pub fn close_claim_fee_operator(ctx: Context<CloseClaimFeeOperator>) -> Result<()> {
        instructions::handle_close_claim_fee_operator(ctx)
    }

    // Partner
    pub fn create_config(ctx: Context<CreateConfig>, params: ConfigParameters) -> Result<()> {
        instructions::handle_create_config(ctx, params)
    }

    pub fn claim_trading_fee(ctx: Context<ClaimTradingFee>) -> Result<()> {
        instructions::handle_claim_trading_fee(ctx)
    }

    pub fn partner_withdraw_surplus(ctx: Context<PartnerWithdrawSurplus>) -> Result<()> {
        instructions::handle_partner_withdraw_surplus(ctx)
    }

    // Creator
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        params: InitializePoolParameters,
    ) -> Result<()> {
        instructions::handle_initialize_pool(ctx, params)
    }

    pub fn claim_creator_trading_fee(ctx: Context<ClaimCreatorTradingFee>) -> Result<()> {
        instructions::handle_claim_creator_trading_fee(ctx)
    }

    // Trading
    pub fn swap(ctx: Context<Swap>, params: SwapParameters) -> Result<()> {
        instructions::handle_swap(ctx, params)
    }

    // Migration
    pub fn create_migration_metadata(ctx: Context<CreateMigrationMetadata>) -> Result<()> {
        instructions::handle_create_migration_metadata(ctx)
    }

    pub fn migrate(ctx: Context<Migrate>) -> Result<()> {
        instructions::handle_migrate(ctx)
    }

    pub fn release_lp_lock(ctx: Context<ReleaseLpLock>) -> Result<()> {
        instructions::handle_release_lp_lock(ctx)
    }

    pub fn withdraw_leftover(ctx: Context<WithdrawLeftover>) -> Result<()> {
        instructions::handle_withdraw_leftover(ctx)
    }

    // Protocol
    pub fn claim_protocol_fee(ctx: Context<ClaimProtocolFee>) -> Result<()> {
        instructions::handle_claim_protocol_fee(ctx)
    }

    pub fn protocol_withdraw_surplus(ctx: Context<ProtocolWithdrawSurplus>) -> Result<()> {
        instructions::handle_protocol_withdraw_surplus(ctx)
    }
}
