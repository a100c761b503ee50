//! [`DocumentStore`](sonar_types::DocumentStore) implementations.

mod json_dir;
mod memory;

pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;

/// Fresh document id.
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
