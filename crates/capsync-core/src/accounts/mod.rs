//! Remote accounts and their cached capability fields.

pub mod errors;
pub mod memory;
pub mod persistence;
pub mod traits;
pub mod types;

pub use errors::AccountError;
pub use memory::MemoryAccountStore;
pub use persistence::JsonAccountStore;
pub use traits::AccountStore;
pub use types::{Account, AccountId, AccountsData};
