//! Request / response bodies of the HTTP API.

pub mod auth;
pub mod chat;
