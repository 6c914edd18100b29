//! Infrastructure layer: storage backends for the role catalog and user directory.

pub mod store;

pub use store::{InMemoryRoleCatalog, InMemoryUserDirectory, KeyedStore};
