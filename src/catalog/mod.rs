//! Normalized lens catalog
//!
//! The catalog is built once from an ordered list of source datasets and is
//! read-only afterwards. Building:
//!
//! 1. validates every dataset (duplicate ids, missing fields, invalid values),
//! 2. tags each lens with its dataset's manufacturer and mount,
//! 3. resolves derivable magnification and aperture values,
//! 4. sorts lenses by (min focal length, max focal length).
//!
//! Values that cannot be derived stay [`SpecValue::Derive`] and are listed in
//! the catalog's [`CatalogQuality`] report.
//!
//! # Example
//!
//! ```rust,ignore
//! use glassbook::catalog::CatalogBuilder;
//!
//! let catalog = CatalogBuilder::new()
//!     .load_file("sources/nikon-z.json")?
//!     .load_file("sources/canon-rf.json")?
//!     .build()?;
//!
//! if catalog.has_unresolved() {
//!     for entry in catalog.quality().unresolved() {
//!         println!("lens {} @ {}mm: {} unknown", entry.lens_id, entry.focal_length, entry.field);
//!     }
//! }
//! ```

mod normalize;
mod shared;
mod types;

pub use shared::SharedCatalog;
pub use types::{FormatClass, Lens, LensSpecification, SpecValue, DERIVE_SENTINEL};

use crate::datasets::{load_source_file, SourceDataset};
use crate::error::CatalogError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// Which value of a specification row is unresolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedField {
    Magnification,
    Aperture,
}

impl fmt::Display for UnresolvedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedField::Magnification => write!(f, "magnification"),
            UnresolvedField::Aperture => write!(f, "aperture"),
        }
    }
}

/// One value that normalization could not derive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedEntry {
    pub lens_id: u32,
    pub model: String,
    pub focal_length: f64,
    pub field: UnresolvedField,
}

/// Data-quality report produced alongside the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogQuality {
    unresolved: Vec<UnresolvedEntry>,
}

impl CatalogQuality {
    fn collect(lenses: &[Lens]) -> Self {
        let mut unresolved = Vec::new();
        for lens in lenses {
            for spec in &lens.data {
                if spec.magnification.is_derive() {
                    unresolved.push(UnresolvedEntry {
                        lens_id: lens.id,
                        model: lens.model.clone(),
                        focal_length: spec.focal_length,
                        field: UnresolvedField::Magnification,
                    });
                }
                if spec.aperture.is_derive() {
                    unresolved.push(UnresolvedEntry {
                        lens_id: lens.id,
                        model: lens.model.clone(),
                        focal_length: spec.focal_length,
                        field: UnresolvedField::Aperture,
                    });
                }
            }
        }
        Self { unresolved }
    }

    pub fn unresolved(&self) -> &[UnresolvedEntry] {
        &self.unresolved
    }

    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Ids of lenses with at least one unresolved value, in catalog order
    pub fn affected_lens_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = Vec::new();
        for entry in &self.unresolved {
            if !ids.contains(&entry.lens_id) {
                ids.push(entry.lens_id);
            }
        }
        ids
    }
}

/// The immutable, sorted collection of normalized lenses
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    lenses: Vec<Lens>,
    #[serde(skip)]
    quality: CatalogQuality,
}

impl Catalog {
    /// Build a catalog from source datasets
    ///
    /// Fails without producing a catalog when any dataset is invalid.
    pub fn build(sources: Vec<SourceDataset>) -> Result<Self, CatalogError> {
        normalize::validate_sources(&sources)?;

        let source_count = sources.len();
        let mut lenses: Vec<Lens> = Vec::new();
        for source in sources {
            let SourceDataset {
                manufacturer,
                mount,
                lenses: records,
            } = source;
            let tag = SourceDataset::new(manufacturer, mount, Vec::new());
            lenses.extend(
                records
                    .into_iter()
                    .map(|record| normalize::tag_record(&tag, record)),
            );
        }

        for lens in lenses.iter_mut() {
            normalize::resolve_lens(lens);
        }

        // stable, so equal ranges keep source order
        lenses.sort_by(catalog_order);

        let quality = CatalogQuality::collect(&lenses);
        info!(
            "built lens catalog: {} lenses from {} source(s)",
            lenses.len(),
            source_count
        );
        if !quality.is_clean() {
            warn!(
                "{} value(s) across {} lens(es) could not be derived",
                quality.unresolved().len(),
                quality.affected_lens_ids().len()
            );
        }

        Ok(Self { lenses, quality })
    }

    pub fn lenses(&self) -> &[Lens] {
        &self.lenses
    }

    pub fn len(&self) -> usize {
        self.lenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lenses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lens> {
        self.lenses.iter()
    }

    pub fn quality(&self) -> &CatalogQuality {
        &self.quality
    }

    pub fn has_unresolved(&self) -> bool {
        !self.quality.is_clean()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Lens;
    type IntoIter = std::slice::Iter<'a, Lens>;

    fn into_iter(self) -> Self::IntoIter {
        self.lenses.iter()
    }
}

/// Canonical catalog order: min focal length, then max focal length
///
/// Lenses without any specification rows sort last.
pub fn catalog_order(a: &Lens, b: &Lens) -> Ordering {
    let key = |lens: &Lens| {
        (
            lens.min_focal_length().unwrap_or(f64::INFINITY),
            lens.max_focal_length().unwrap_or(f64::INFINITY),
        )
    };
    let (a_min, a_max) = key(a);
    let (b_min, b_max) = key(b);
    a_min.total_cmp(&b_min).then(a_max.total_cmp(&b_max))
}

/// Accumulates source datasets before building a [`Catalog`]
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    sources: Vec<SourceDataset>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(mut self, source: SourceDataset) -> Self {
        self.sources.push(source);
        self
    }

    pub fn add_sources(mut self, sources: impl IntoIterator<Item = SourceDataset>) -> Self {
        self.sources.extend(sources);
        self
    }

    /// Append every dataset found in a JSON file
    pub fn load_file(mut self, path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let datasets = load_source_file(path).map_err(|e| CatalogError::Malformed {
            source_name: path.display().to_string(),
            reason: format!("{:#}", e),
        })?;
        self.sources.extend(datasets);
        Ok(self)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn build(self) -> Result<Catalog, CatalogError> {
        Catalog::build(self.sources)
    }
}
