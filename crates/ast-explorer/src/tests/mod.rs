//! Crate-level tests.

mod behaviour;
