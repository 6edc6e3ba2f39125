#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Glassbook - A camera lens specification toolkit
//!
//! Glassbook merges per-manufacturer lens datasets into one normalized catalog,
//! derives optical values the datasets leave out, and answers queries over the
//! result. It can be used as both a command-line application and a library.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | (none) | Optics, catalog, queries, exporters | `serde`, `chrono`, `config` |
//! | `display` | Table formatting with `tabled` | `tabled` |
//! | `cli` | CLI binary (default) | All above + `clap`, `tracing-subscriber` |
//!
//! ```toml
//! # Library only, JSON output
//! glassbook = { version = "0.3", default-features = false }
//!
//! # Library with table output
//! glassbook = { version = "0.3", default-features = false, features = ["display"] }
//! ```
//!
//! # Architecture
//!
//! - **[`optics`]**: Pure formulas for magnification, aperture interpolation,
//!   f-stop rounding, and teleconverter projection
//! - **[`datasets`]**: Raw source datasets and JSON file loading
//! - **[`catalog`]**: Validation, normalization, and the immutable [`Catalog`]
//! - **[`query`]**: [`QueryEngine`] filters, facets, and derived views
//! - **[`export`]**: CSV and JSON exporters
//! - **[`config`]**: Configuration management
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use glassbook::{Catalog, FilterCriteria, QueryEngine};
//! use glassbook::datasets::load_source_file;
//! use std::path::Path;
//!
//! let sources = load_source_file(Path::new("lenses/nikon-z.json"))?;
//! let catalog = Catalog::build(sources)?;
//!
//! let engine = QueryEngine::new(&catalog);
//! let zooms = engine.filter(&FilterCriteria::new().mount("Z"));
//! for lens in zooms {
//!     let max = glassbook::query::get_max_magnification(lens)?;
//!     println!("{} {}: {}x", lens.manufacturer, lens.model, max);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod datasets;
pub mod error;
pub mod export;
pub mod optics;
pub mod query;
pub mod utils;

// =============================================================================
// Configuration
// =============================================================================

pub use config::GlassbookConfig;

// =============================================================================
// Errors
// =============================================================================

pub use error::{CatalogError, DomainError};

// =============================================================================
// Catalog
// =============================================================================

pub use catalog::{
    Catalog, CatalogBuilder, CatalogQuality, FormatClass, Lens, LensSpecification,
    SharedCatalog, SpecValue, UnresolvedEntry, UnresolvedField,
};
pub use datasets::{LensRecord, SourceDataset};

// =============================================================================
// Queries and output
// =============================================================================

pub use export::ExportFormat;
pub use query::{Comparison, FilterCriteria, QueryEngine};
pub use utils::OutputFormat;
