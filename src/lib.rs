//! Sexton - a company engagement tracking service with scheduled countdown decay.
//!
//! Companies carry a countdown (`time_stamp`) that a cron-scheduled sweep
//! decrements once per tick. When the countdown runs out, the company is
//! archived into the `"graveyard"` tier and its ownership is released.
//!
//! # Features
//!
//! Sexton uses feature flags to allow you to include only what you need:
//!
//! - `server` - HTTP surface, repository, and SQLite store adapter. Enabled by default.
//! - `background-jobs` - Cron-scheduled decay sweep. Enabled by default.
//!
//! # Example
//!
//! ```toml
//! # Use defaults (server + background-jobs)
//! sexton = { git = "https://github.com/netviper/sexton" }
//!
//! # Core types only (company records and the decay policy)
//! sexton = { git = "https://github.com/netviper/sexton", default-features = false }
//! ```

// Core modules (always available)
pub mod company;
pub mod config;
pub mod decay;
pub mod errors;

// Server-related modules (requires "server" feature)
#[cfg(feature = "server")]
#[path = "server/mod.rs"]
pub mod server;

// Background jobs (requires "background-jobs" feature)
#[cfg(feature = "background-jobs")]
pub mod jobs;
