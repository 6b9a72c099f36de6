//! sm-core: Core library for the s3mgr CLI
//!
//! This crate provides the core functionality for the s3mgr CLI, including:
//! - Configuration management
//! - Bucket name and object key validation
//! - ObjectStore trait for storage operations
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod config;
pub mod error;
pub mod naming;
pub mod traits;

pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use naming::{key_from_path, validate_bucket_name, validate_key};
pub use traits::{ListOptions, ListResult, ObjectInfo, ObjectStore};
