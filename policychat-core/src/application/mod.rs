pub mod catalogue;
pub mod chat;
pub mod query;
pub mod session;
pub mod upload;

pub use chat::{DispatchOptions, PolicyChat};
pub use session::{SessionState, SharedSession};
pub use upload::{UploadFailure, UploadResult, validate_batch};
