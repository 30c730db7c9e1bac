//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises the pet end to end
//! against mock adapters and simulated time.  No window system required.

mod behavior_tests;
mod homing_tests;
mod lifecycle_tests;
mod mock_desktop;
