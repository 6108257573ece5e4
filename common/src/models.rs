//! # Domain Models
//!
//! ## Core Entities
//! * [`record::AddressRecord`]: classification result for a single address.
//! * [`insight::Insight`]: advisory text attached to a risky address.
//!
//! ## Value Objects
//! * [`record::Classification`]: the three-way risk bucket.
//! * [`insight::RiskLevel`]: severity attached to an insight.
//! * [`stats::BatchStats`] / [`stats::LocationCount`]: derived summaries of a batch.

pub mod insight;
pub mod record;
pub mod stats;
