//! Policy model and storage.
//!
//! - [`Policy`] is the stored record; [`PolicyRecord`] is its preload file format.
//! - [`Repository`] is the keyed-store seam; [`PolicyStore`] the in-memory implementation.
//! - [`load_policy_dir`] seeds a store from a directory at startup.

pub mod error;
pub mod loader;
pub mod model;
pub mod store;


pub use error::{PolicyError, PolicyResult};
#[cfg(any(test, feature = "mock"))]
pub use loader::write_policy_file;
pub use loader::{POLICY_FILE_EXTENSION, load_policy_dir, load_policy_file};
pub use model::{Policy, PolicyRecord};
pub use store::{MemoryRepository, Repository, StoredRecord};

/// In-memory policy store keyed by logical policy id.
pub type PolicyStore = MemoryRepository<Policy>;
