//! Arithmetic, clock, seed and token transfer helpers shared by instructions.
pub mod clock; // Activation point lookup
pub mod math_safe; // Overflow-safe arithmetic traits
pub mod math_u256; // 256-bit mul-div for Q64.64 products
pub mod seeds; // PDA derivation
pub mod transfers; // Token CPI wrappers

pub use clock::*;
pub use math_safe::*;
pub use math_u256::*;
pub use seeds::*;
pub use transfers::*;
