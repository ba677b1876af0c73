//! Shared utilities.
//!
//! Subprocess helpers and, under test, a fake PostgreSQL toolchain.

pub mod command;

#[cfg(test)]
pub mod testutil;
