//! nyay-core – domain layer of the Nyay Sahayak legal assistant.
//!
//! Holds everything the HTTP surface needs but that has no dependency on
//! axum: the persistent conversation / user store, the keyword chat
//! responder, and the two request flows built on top of them (message
//! logging and credential checks).

pub mod entities;
pub mod error;
pub mod responder;
pub mod services;

pub use entities::SqliteStore;
pub use error::CoreError;
pub use responder::{KeywordResponder, KeywordRule, Responder};
