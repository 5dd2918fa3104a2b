//! Test utilities shared by the unit tests
//!
//! Feed document factories, record factories and store mocks.

pub mod factories;
pub mod mocks;

pub use factories::*;
pub use mocks::*;
