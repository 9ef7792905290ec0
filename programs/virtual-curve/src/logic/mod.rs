//! Pure pricing, fee, migration and vesting math. Nothing here touches
//! accounts, so every function is unit-testable off-chain.
pub mod curve;
pub mod fee;
pub mod migration;
pub mod swap;
pub mod vesting;

pub use curve::*;
pub use fee::*;
pub use migration::*;
pub use swap::*;
pub use vesting::*;
