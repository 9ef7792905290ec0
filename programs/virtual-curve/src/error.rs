//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    // Math errors
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Config errors
    #[msg("Invalid config")]
    InvalidConfig,

    #[msg("Invalid token metadata")]
    InvalidTokenMetadata,

    // Trade errors
    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Trade exceeds the bounds of the curve")]
    ExceedsCurve,

    #[msg("Swap amount is too far over the migration threshold")]
    SwapAmountIsOverThreshold,

    #[msg("Output is below the minimum amount out")]
    SlippageExceeded,

    #[msg("Invalid token mint")]
    InvalidMint,

    // Lifecycle errors
    #[msg("Pool is no longer trading on the curve")]
    PoolMigrated,

    #[msg("Migration quote threshold not met")]
    ThresholdNotMet,

    #[msg("Pool is already migrated")]
    AlreadyMigrated,

    #[msg("Pool is not migrated")]
    NotMigrated,

    #[msg("Migration accounts have not been prepared")]
    MigrationNotPrepared,

    #[msg("Invalid migration target")]
    InvalidMigrationTarget,

    // Settlement errors
    #[msg("Already claimed")]
    AlreadyClaimed,

    #[msg("Unauthorized")]
    Unauthorized,
}
