//! PDA derivation for every account the program owns
//!
//! Off-chain lookups and the instruction tests derive addresses here. The
//! `seeds = [...]` constraints spell out the same constants inline.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::LockRole;

/// Creator component of the base mint derivation.
///
/// Binding the creator into the base mint (and therefore the pool) address means
/// a third party submitting the same config and symbol lands on a different
/// address instead of taking over the intended pool. The
/// `legacy-creator-binding` feature drops the component to reproduce the
/// first-to-land race.
pub fn creator_binding_seed(creator: &Pubkey) -> &[u8] {
    if cfg!(feature = "legacy-creator-binding") {
        &[]
    } else {
        creator.as_ref()
    }
}

pub fn derive_vault_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_AUTHORITY_SEED], program_id)
}

pub fn derive_base_mint(
    config: &Pubkey,
    creator: &Pubkey,
    symbol: &str,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            BASE_MINT_SEED,
            config.as_ref(),
            creator_binding_seed(creator),
            symbol.as_bytes(),
        ],
        program_id,
    )
}

pub fn derive_pool(
    config: &Pubkey,
    base_mint: &Pubkey,
    quote_mint: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            POOL_SEED,
            config.as_ref(),
            base_mint.as_ref(),
            quote_mint.as_ref(),
        ],
        program_id,
    )
}

pub fn derive_token_vault(mint: &Pubkey, pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TOKEN_VAULT_SEED, mint.as_ref(), pool.as_ref()], program_id)
}

pub fn derive_claim_fee_operator(operator: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CLAIM_FEE_OPERATOR_SEED, operator.as_ref()], program_id)
}

pub fn derive_lp_mint(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_MINT_SEED, pool.as_ref()], program_id)
}

pub fn derive_lp_vault(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_VAULT_SEED, pool.as_ref()], program_id)
}

/// Lock records are keyed by role rather than beneficiary so a partner that is
/// also the creator still gets two records.
pub fn derive_lp_lock(pool: &Pubkey, role: LockRole, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_LOCK_SEED, pool.as_ref(), role.seed()], program_id)
}
