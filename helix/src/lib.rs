//! Typed, read-only records for the JSON returned by the Twitch Helix API.
//!
//! See [`helix_api`] for the records themselves. This crate does not perform HTTP requests,
//! authentication, pagination or rate limiting; it only maps payloads that something else
//! fetched. The few operations that need the network afterwards go through a
//! [`HelixTransport`] the application supplies.
//!
//! Enable the `mock` feature for `helix_api::mock::MockTransport`, an in-memory transport for
//! tests.

pub mod error;
pub mod helix_api;

pub use error::PayloadError;
pub use helix_api::{HelixHttp, HelixTransport, PartialUser, User, UserRef};
