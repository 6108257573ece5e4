//! # Proxyscope Common
//!
//! Shared vocabulary for every proxyscope crate.
//!
//! * **[`models`]**: address records, insights and batch statistics.
//! * **[`lookup`]** / **[`insights`]**: the outbound ports the core drives.
//! * **[`config`]**: runtime configuration assembled by the CLI.
//!
//! Nothing in here performs IO.

pub mod config;
pub mod insights;
pub mod lookup;
pub mod models;
