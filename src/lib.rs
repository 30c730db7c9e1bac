//! DeskPet library.
//!
//! A tick-driven desktop companion: a behavior state machine fed by
//! pointer samples and countdown timers, a small simulated-time scheduler
//! for the tick and one-shot tasks, and port traits that keep every
//! desktop interaction behind an adapter.

#![deny(unused_must_use)]

pub mod adapters;
pub mod animation;
pub mod app;
pub mod config;
pub mod cursor;
pub mod error;
pub mod fsm;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod scheduler;
pub mod timers;

pub use error::{Error, Result};
pub use runtime::PetRuntime;
