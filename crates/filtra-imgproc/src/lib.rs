#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// filter scan engine with progress reporting and cooperative cancellation.
pub mod engine;

/// image filtering module.
pub mod filter;
