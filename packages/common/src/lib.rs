pub mod clock;
pub mod config;
pub mod content;
pub mod media;
pub mod publish;
pub mod slug;
pub mod storage;
pub mod store;

pub use content::{About, ContentKind, ContentRecord, ImageRef, Project, RecordMeta, RecordStatus};
pub use store::{ContentStore, StoreError, ViewMode};
