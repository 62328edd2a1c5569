//! fsb-core: SDK-independent file-storage port
//!
//! This crate defines the contract between a host application and its
//! storage backends:
//! - `FileStorage` and `StorageBridge` traits
//! - The closed error set shared by all adapters
//! - Option-mapping validation and key-prefix handling
//! - A bridge registry for hosts without a DI container
//!
//! Concrete adapters (such as fsb-s3) implement these traits; this crate
//! never depends on a storage SDK, so the port can be mocked in tests.

pub mod error;
pub mod key;
pub mod options;
pub mod registry;
pub mod traits;

pub use error::{BoxedCause, Error, Result};
pub use key::{full_key, Prefix};
pub use options::Options;
pub use registry::BridgeRegistry;
pub use traits::{ContentStream, FileStorage, StorageBridge, StorageConfig, StoredObject};
