//! # Drack Store
//!
//! User balance and inventory persistence for Drack Bot.
//!
//! Balances live in a PocketBase collection. Command handlers talk to it
//! through the [`RecordStore`] trait so tests can swap in an in-memory store.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod inventory;
pub mod model;
pub mod pocketbase;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

pub use error::*;
pub use inventory::*;
pub use model::*;
pub use pocketbase::*;
pub use traits::*;

#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryStore;
