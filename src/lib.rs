//! Job application tracker backend.
//!
//! Multi-user HTTP service: account registration and login issue signed
//! bearer tokens, and every job record is owned by exactly one user.

pub mod api;
pub mod auth;
pub mod db;
pub mod job;
pub mod user;
