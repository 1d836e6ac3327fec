//! # Funnelcraft Workspace
//!
//! Async edge of the system: persistence collaborators, user notifications
//! and the sessions that tie the synchronous editor and pipeline cores to
//! them.

pub mod error;
pub mod file;
pub mod memory;
pub mod notify;
pub mod session;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use notify::{Notification, NotificationLevel, Notifier};
pub use session::{EditorSession, PipelineSession};
pub use store::{OrderStore, PageStore};
