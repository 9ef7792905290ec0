use anchor_lang::prelude::*;

/// Identity allowed to claim protocol fees and protocol surplus from any pool
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct ClaimFeeOperator {
    /// Operator wallet that signs claims
    pub operator: Pubkey,
    /// Unix timestamp of registration
    pub created_at: i64,
}
