//! Persistent storage for shop-floor quality records.
//!
//! Each collection is a JSON array in its own file inside a data directory,
//! loaded eagerly on open and rewritten atomically (temp file + rename) on
//! every append. Operator deployments sit behind the [`AssignmentStore`]
//! port so the rotation detector can run against any backend.
//!
//! # Architecture
//!
//! - `port.rs` - The `AssignmentStore` trait and its latest-before lookups
//! - `memory.rs` - Vec-backed store for tests and dry runs
//! - `journal.rs` - JSON journal with atomic writes
//! - `database.rs` - All collections of a data directory
//! - `users.rs` - User registry with Argon2 password hashes
//! - `error.rs` - Error types

mod database;
mod error;
mod journal;
mod memory;
mod port;
mod users;

pub use database::{Collection, Database};
pub use error::{AuthError, Result, StoreError};
pub use journal::{Journal, JournalStore};
pub use memory::MemoryStore;
pub use port::AssignmentStore;
pub use users::{BOOTSTRAP_USERNAME, UserRegistry};
