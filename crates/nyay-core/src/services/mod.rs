//! Request flows built on the store traits.
//!
//! Both flows are plain async functions generic over the store so the HTTP
//! layer passes its shared handle in and tests can pass a failing double.

pub mod auth;
pub mod chat_log;
