//! CLI commands

pub mod serve;
pub mod tail;
