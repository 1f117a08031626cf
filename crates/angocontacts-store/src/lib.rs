//! Persistent collections for AngoContacts.
//!
//! [`CollectionStore`] owns the saved companies, the search history, the
//! saved searches and the notification log. Company collections are cleaned
//! with [`angocontacts_core::dedup_by_name`] and [`angocontacts_core::sanitize`]
//! on load; each collection is persisted under its own key through a
//! [`KeyValueStore`] backend.

pub mod error;
pub mod file;
pub mod kv;
pub mod memory;
pub mod store;
pub mod types;

pub use error::StorageError;
pub use file::FileStore;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use store::CollectionStore;
pub use types::{Collection, StoreEvent};
