pub mod backend;

pub use backend::{DispatchError, HttpBackend, PolicyBackend, ValidationIssue};
