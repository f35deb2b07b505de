//! Profile documents, loaders and exporters.
//!
//! This crate sits between files on disk and `tanzo-core`:
//! - [`document`] mirrors the YAML/JSON profile layout with serde
//! - [`validate`] checks document structure and converts it into a core
//!   [`tanzo_core::Profile`]
//! - [`loaders`] reads profile documents and TOML simulation configs
//! - [`export`] renders simulation results (JSON, YAML, text) and profiles
//!   (shorthand notation)
//!
//! The core never sees an unvalidated document.

pub mod document;
pub mod export;
pub mod validate;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use document::{
    ArchetypeDocument, AttributeDocument, DistributionDocument, ProfileBody, ProfileDocument,
    SimulationSettings, ValueDocument,
};
pub use export::{ExportError, ExportFormat, distribution_shorthand, export_result, profile_shorthand};
pub use validate::{ValidationError, ValidationErrors, build_distribution};

#[cfg(feature = "loaders")]
pub use export::write_result;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, DocumentFormat, LoadResult, LoadedProfile, ProfileLoader};
