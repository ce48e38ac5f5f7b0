//! HTTP client and wire types for the CineFinn catalog server.
//!
//! All endpoints speak JSON over HTTPS. Authentication is a bearer token,
//! sent as the `auth-token` header on profile requests and as an
//! `auth-token` query parameter everywhere else.

pub mod client;
pub mod error;
pub mod types;

pub use client::CinemaClient;
pub use error::ApiError;
