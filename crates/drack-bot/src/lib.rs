//! # Drack Bot
//!
//! Discord economy bot: daily and weekly rewards, work shifts, leaderboards
//! and inventories backed by PocketBase.
//!
//! This is the main binary crate. It connects the record store, wires the
//! command framework to the gateway, and keeps the presence rotating.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod events;
pub mod presence;

pub use bot::*;
pub use error::*;
