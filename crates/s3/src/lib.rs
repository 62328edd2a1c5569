//! fsb-s3: S3 bridge and storage adapter
//!
//! This crate implements the FileStorage port from fsb-core against
//! aws-sdk-s3. It is the only crate that directly depends on the AWS SDK;
//! hosts register [`S3Bridge`] with their bridge registry and resolve
//! adapters by the "s3" driver name.

pub mod bridge;
pub mod storage;

pub use bridge::{DRIVER, S3Bridge};
pub use storage::S3Storage;
