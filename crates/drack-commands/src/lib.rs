//! # Drack Commands
//!
//! Slash commands for Drack Bot and the dispatch gate that runs them.
//!
//! Every command body goes through [`DispatchGate`], which checks owner,
//! server and permission restrictions, enforces per-user cooldowns, and
//! reports failures to the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cooldown;
pub mod descriptor;
pub mod embeds;
pub mod framework;
pub mod gate;
pub mod invocation;
pub mod registry;
pub mod rewards;

pub mod balance;
pub mod daily;
pub mod help;
pub mod inventory;
pub mod leaderboard;
pub mod ping;
pub mod weekly;
pub mod work;

pub use cooldown::CooldownStore;
pub use descriptor::{Category, CommandDescriptor, DEFAULT_COOLDOWN_SECS};
pub use embeds::{Notice, Tone};
pub use framework::*;
pub use gate::{Dispatch, DispatchGate, Rejection, FAILURE_MESSAGE};
pub use invocation::{guarded, Invocation, PoiseInvocation};
pub use registry::CommandRegistry;
