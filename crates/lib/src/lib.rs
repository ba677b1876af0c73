//! pgdev-lib: instance lifecycle and blueprint orchestration for pgdev.
//!
//! pgdev keeps isolated, source-built PostgreSQL instances side by side:
//! - `scaffold`: create an instance from a template of blueprint scripts
//! - `blueprint`: run the configure/build steps of every component in order
//! - `init`: create the data directory, assign a port, record the version
//! - `control`: drive the server through `pg_ctl`
//!
//! `config` and `manifest` are the two per-instance metadata files, `port`
//! hands out non-conflicting ports and `instance` resolves names to directories.

pub mod blueprint;
pub mod config;
pub mod consts;
pub mod control;
pub mod init;
pub mod instance;
pub mod logs;
pub mod manifest;
pub mod platform;
pub mod port;
pub mod root_lock;
pub mod scaffold;
pub mod util;
