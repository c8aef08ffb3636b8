//! Execution-environment adapter core
//!
//! Resolves caller paths across deployment modes, locates the analysis
//! binary, and builds correct process invocations.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod git_root;
pub mod locate;
pub mod mount;
pub mod paths;
pub mod platform;
pub mod truststore;
pub mod worktree;
