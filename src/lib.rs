//! Mock OAuth 2.0 authorization server library crate.
//!
//! Provides dynamic client registration and Client Credentials token
//! issuance backed by pluggable storage, for exercising OAuth consumers
//! in development and test environments.

pub mod config;
pub mod errors;
pub mod http;
pub mod oauth;
pub mod storage;
