//! Core types and decision logic for the Ward blacklist lookup.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! decision procedure lives in [`resolve`] and is pure; side effects are
//! described by a [`verdict::ReconciliationAction`] and carried out by
//! [`lookup::check`] against the collaborator traits.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

pub mod error;
pub mod evidence;
pub mod lookup;
pub mod resolve;
pub mod severity;
pub mod store;
pub mod subject;
pub mod verdict;

pub use error::{Error, Result};
pub use resolve::resolve;
