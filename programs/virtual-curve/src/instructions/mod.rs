pub mod claim_creator_trading_fee;
pub mod claim_protocol_fee;
pub mod claim_trading_fee;
pub mod close_claim_fee_operator;
pub mod create_claim_fee_operator;
pub mod create_config;
pub mod create_migration_metadata;
pub mod initialize_pool;
pub mod migrate;
pub mod partner_withdraw_surplus;
pub mod protocol_withdraw_surplus;
pub mod release_lp_lock;
pub mod swap;
pub mod withdraw_leftover;

pub use claim_creator_trading_fee::*;
pub use claim_protocol_fee::*;
pub use claim_trading_fee::*;
pub use close_claim_fee_operator::*;
pub use create_claim_fee_operator::*;
pub use create_config::*;
pub use create_migration_metadata::*;
pub use initialize_pool::*;
pub use migrate::*;
pub use partner_withdraw_surplus::*;
pub use protocol_withdraw_surplus::*;
pub use release_lp_lock::*;
pub use swap::*;
pub use withdraw_leftover::*;
