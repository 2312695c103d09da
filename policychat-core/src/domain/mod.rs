pub mod types;

pub use types::{
    ChatMessage, IndexedFile, MessageRole, ModelTier, PDF_CONTENT_TYPE, UploadFile, UploadStatus,
    UploadedFileRecord,
};
