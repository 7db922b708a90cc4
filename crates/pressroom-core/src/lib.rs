//! Core types and trait definitions for the Pressroom back office.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod billing;
pub mod catalog;
pub mod error;
pub mod health;
pub mod material;
pub mod notification;
pub mod settings;
pub mod staff;
pub mod store;
pub mod usage;

pub use error::{Error, ErrorKind, Result, StoreError};
