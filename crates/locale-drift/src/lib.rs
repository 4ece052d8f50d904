#![doc = include_str!("../README.md")]

pub mod bundle;
pub mod bundler;
pub mod error;
pub mod format;
pub mod manifest;
pub mod parser;
pub mod reconcile;
pub mod request;

pub use bundle::{Bundle, SNAPSHOT_SUFFIX};
pub use bundler::Bundler;
pub use error::DriftError;
pub use format::BundleFormat;
pub use manifest::{Manifest, OutputFormat};
pub use parser::{Entries, ParsedBundle};
pub use reconcile::{DriftReport, FileReport, additions, missing, reconcile_all, reconcile_bundle};
pub use request::TranslationRequests;
