//! Collaborators around the DLC conversion core
//!
//! The converter itself is pure row → record logic. Everything it needs from the
//! outside world is behind a narrow trait so runs can be tested without a real
//! host system:
//!
//! ```text
//!            ┌──────────────────┐
//!   rows ───►│  DLC converter   │───► RecordBatch (JSON artifact)
//!            └──────────────────┘
//!               │            │
//!               ▼            ▼
//!      ContainerLookup   RefMinter
//!      (dedup by key)    (fresh URIs)
//! ```

pub mod batch;
pub mod config;
pub mod lookup;
pub mod minter;

pub use batch::{JsonFileBatch, MemoryBatch, RecordBatch};
pub use config::{ImportConfig, DEFAULT_LANGUAGE, DEFAULT_REPOSITORY_ID};
pub use lookup::{ContainerLookup, ExistingContainer, InMemoryContainerStore};
pub use minter::{RandomRefMinter, RefMinter, SequentialRefMinter};
