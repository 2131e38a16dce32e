// API Module
//
// JSON endpoints for the Bitcoin explorer. Each domain (addresses,
// transactions) is in its own submodule.

pub mod types;
pub mod helpers;
pub mod addresses;
pub mod transactions;

// Re-export all public items
pub use types::*;
pub use helpers::*;
pub use addresses::*;
pub use transactions::*;

pub async fn root_handler() -> &'static str {
    "Welcome to the BTC Explorer"
}
