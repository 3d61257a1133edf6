//! # money-api-types
//!
//! Shared API types for the money-api service.
//! This crate is designed to be WASM-compatible and can be used in both
//! backend (Rust) and frontend (WASM/TypeScript via wasm-bindgen) applications.
//!
//! ## Features
//!
//! - Error entry format (ErrorEntry), shared by every 400 response
//! - Response DTOs (PersonResponse, Address)
//!
//! ## Example
//!
//! ```rust
//! use money_api_types::ErrorEntry;
//!
//! let entry = ErrorEntry::new("Invalid message", "expected value at line 1 column 1");
//! assert_eq!(entry.user_message(), "Invalid message");
//! ```

pub mod error;
pub mod responses;

// Re-exports for convenient access
pub use error::ErrorEntry;
pub use responses::*;
