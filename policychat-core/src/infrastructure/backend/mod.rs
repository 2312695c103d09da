//! Backend module
//!
//! # Structure
//! - `error` - DispatchError and its user-facing rendering
//! - `traits` - PolicyBackend trait
//! - `http` - reqwest implementation of the answer and ingestion endpoints

pub mod error;
pub mod http;
pub mod traits;

pub use error::{DispatchError, ValidationIssue};
pub use http::HttpBackend;
pub use traits::PolicyBackend;
