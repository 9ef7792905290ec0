//! Signer seed helpers

/// Signer seeds for the vault authority PDA
#[macro_export]
macro_rules! vault_authority_seeds {
    ($bump:expr) => {
        &[$crate::constants::VAULT_AUTHORITY_SEED, &[$bump]]
    };
}
