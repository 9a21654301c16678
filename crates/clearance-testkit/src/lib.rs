//! # Clearance Testkit
//!
//! Testing utilities for Clearance.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Scenario vectors**: Fixed access decisions every implementation must reproduce
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A seeded gatekeeper with one persona per tier
//!
//! ## Scenario Vectors
//!
//! ```rust
//! use clearance_testkit::vectors::verify_all_vectors;
//!
//! for (name, passed) in verify_all_vectors() {
//!     assert!(passed, "{}", name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use clearance_core::filter_accessible;
//! use clearance_testkit::generators::AccessParams;
//!
//! proptest! {
//!     #[test]
//!     fn filter_never_grows(params: AccessParams) {
//!         let kept = filter_accessible(&params.grant(), params.items.clone());
//!         prop_assert!(kept.len() <= params.items.len());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use clearance_testkit::fixtures::{TestFixture, SECRET_USER};
//!
//! let fixture = TestFixture::new().await;
//! let session = fixture.login(&SECRET_USER).await;
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{sample_feeds, sample_seed, Persona, TestFixture, PERSONAS};
pub use generators::AccessParams;
pub use vectors::{
    access_vectors, tier_vectors, vectors_json, verify_all_vectors, AccessVector, TierVector,
};
