//! # Proxyscope Core
//!
//! The classification pipeline behind the `proxyscope` CLI.
//!
//! * **[`classifier`]**: tokenizes input and resolves every address in order.
//! * **[`aggregator`]**: batch statistics and the top-locations histogram.
//! * **[`insights`]**: best-effort natural-language insights for risky addresses.
//! * **[`export`]**: CSV serialization of a batch.
//! * **[`session`]**: the single active batch and its busy flags.
//!
//! Adapters for the outbound ports live in [`lookup`] and [`gemini`].

pub mod aggregator;
pub mod classifier;
pub mod export;
pub mod gemini;
pub mod insights;
pub mod lookup;
pub mod session;
