//! On-chain account layouts and the enums they carry

pub mod claim_fee_operator;
pub mod config;
pub mod lifecycle;
pub mod lp_lock;
pub mod pool;
pub mod volatility;

pub use claim_fee_operator::*;
pub use config::*;
pub use lifecycle::*;
pub use lp_lock::*;
pub use pool::*;
pub use volatility::*;
