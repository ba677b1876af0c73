//! Filesystem locations used by pgdev.

pub mod paths;
