//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules for the pet: FSM orchestration, timer
//! handling, homing, and teardown.  All interaction with the desktop
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without a window system.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
