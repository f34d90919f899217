//! Local persistence layer for the incident-reporting dashboard.
//!
//! Four record collections (incidents, public alerts, regional administrators, prevention
//! guides) are stored as JSON arrays in a synchronous key-value [`kv::KvStore`]. The
//! [`repo::Store`] hands out one repository per collection.

pub mod clock;
pub mod domain;
pub mod error;
pub mod ids;
pub mod kv;
pub mod repo;
pub mod seed;

pub use error::AppError;
pub use repo::Store;

