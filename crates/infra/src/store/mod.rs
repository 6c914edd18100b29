//! Role and user storage implementations.

pub mod keyed;
pub mod role_catalog;
pub mod user_directory;

pub use keyed::KeyedStore;
pub use role_catalog::InMemoryRoleCatalog;
pub use user_directory::InMemoryUserDirectory;
