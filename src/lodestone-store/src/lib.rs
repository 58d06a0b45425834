//! Document store adapters for Lodestone
//!
//! Hubs, provisions and settings live in an external document store keyed by
//! `(collection, id)`. This crate defines that read interface, validates raw
//! documents into the typed records of the `lodestone` crate, and provides
//! the loaders the generator needs.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, used by tests and tooling
//! - `SqliteStore` - SQLite via SQLx (feature `sqlx-sqlite`, default)
//! - [`AnyStore`] - runtime choice between the two
//!
//! # Example
//!
//! ```
//! use lodestone_store::{loaders, MemoryStore, collections};
//! use serde_json::json;
//!
//! # tokio_test_block_on(async {
//! let store = MemoryStore::new();
//! store.insert(collections::RESOURCE_HUBS, "h1", json!({
//!     "name": "Docks",
//!     "minProvisions": 1,
//!     "maxProvisions": 3,
//!     "upperPriceModifier": 10,
//!     "lowerPriceModifier": 10,
//!     "selectedProvisions": []
//! }));
//!
//! let hub = loaders::load_hub(&store, "h1").await.unwrap();
//! assert_eq!(hub.name, "Docks");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     futures::executor::block_on(f)
//! # }
//! ```

pub mod any;
pub mod documents;
pub mod loaders;
pub mod memory;
pub mod repository;
pub mod seed;

#[cfg(feature = "sqlx-sqlite")]
pub mod sqlite;

pub use any::AnyStore;
pub use documents::collections;
pub use memory::MemoryStore;
pub use repository::{AsyncDocumentStore, AsyncDocumentWriter, StoreError, StoreResult};
pub use seed::{import_seed, SeedFile, SeedStats};

#[cfg(feature = "sqlx-sqlite")]
pub use sqlite::SqliteStore;
