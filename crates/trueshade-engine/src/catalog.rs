//! Product catalog snapshots.
//!
//! The catalog collaborator is modeled by [`CatalogSource`], which yields raw
//! [`CatalogRow`]s. Rows are validated into an immutable [`CatalogSnapshot`]
//! and published through a [`CatalogStore`].
//!
//! # Refresh model
//!
//! ```text
//! reload():  source.fetch() -> build + validate
//!                                   |
//!                              ok?  +--> atomic pointer swap (newer versions only)
//!                                   |
//!                              err  +--> keep prior snapshot, warn, return Err
//! ```
//!
//! Readers load the current `Arc` without taking a lock and then match
//! against their own snapshot. A reload never blocks readers, never exposes
//! a half-built catalog, and an in-flight request keeps the snapshot it
//! started with.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use trueshade_color::{format_hex, parse_hex, rgb_to_lab};
use trueshade_core::{Error, LabColor, Result, ShadeRecord, Undertone};

/// Response keys a brand name must not shadow.
pub const RESERVED_KEYS: &[&str] = &["skinLAB", "undertone", "pantone_family", "colors"];

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// One row as delivered by a catalog source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Brand key, also used as the response key
    pub brand: String,
    /// Product line; defaults to `"<brand> Foundation"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_line: Option<String>,
    /// Shade name
    pub shade_name: String,
    /// `#RRGGBB` display color
    pub hex_color: String,
    /// Precomputed lightness; derived from `hex_color` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_l: Option<f32>,
    /// Precomputed green-red axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_a: Option<f32>,
    /// Precomputed blue-yellow axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_b: Option<f32>,
    /// `warm`, `cool` or `neutral`; neutral when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undertone: Option<String>,
}

impl CatalogRow {
    /// Creates a row with only the required fields.
    pub fn new(
        brand: impl Into<String>,
        shade_name: impl Into<String>,
        hex_color: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            shade_name: shade_name.into(),
            hex_color: hex_color.into(),
            ..Default::default()
        }
    }

    /// Sets the undertone.
    pub fn with_undertone(mut self, undertone: impl Into<String>) -> Self {
        self.undertone = Some(undertone.into());
        self
    }

    /// Sets a precomputed LAB value.
    pub fn with_lab(mut self, lab: LabColor) -> Self {
        self.lab_l = Some(lab.l);
        self.lab_a = Some(lab.a);
        self.lab_b = Some(lab.b);
        self
    }

    fn into_record(self, index: usize) -> Result<ShadeRecord> {
        let brand = self.brand.trim().to_string();
        if brand.is_empty() {
            return Err(Error::invalid_record(index, "brand is empty"));
        }
        if RESERVED_KEYS.contains(&brand.as_str()) {
            return Err(Error::invalid_record(
                index,
                format!("brand '{brand}' collides with a response key"),
            ));
        }
        let shade_name = self.shade_name.trim().to_string();
        if shade_name.is_empty() {
            return Err(Error::invalid_record(index, "shade name is empty"));
        }
        let rgb = parse_hex(&self.hex_color)
            .map_err(|e| Error::invalid_record(index, e.to_string()))?;

        let lab = match (self.lab_l, self.lab_a, self.lab_b) {
            (Some(l), Some(a), Some(b)) => LabColor::new(l, a, b),
            (None, None, None) => rgb_to_lab(rgb),
            _ => {
                return Err(Error::invalid_record(
                    index,
                    "lab_l, lab_a and lab_b must be given together",
                ));
            }
        };

        let undertone = match self.undertone.as_deref().map(str::trim) {
            None | Some("") => Undertone::Neutral,
            Some(s) => s
                .parse::<Undertone>()
                .map_err(|e| Error::invalid_record(index, e.to_string()))?,
        };

        let product_line = match self.product_line {
            Some(p) if !p.trim().is_empty() => p.trim().to_string(),
            _ => format!("{brand} Foundation"),
        };

        Ok(ShadeRecord {
            brand,
            product_line,
            shade_name,
            hex: format_hex(rgb),
            lab,
            undertone,
        })
    }
}

/// External provider of catalog rows.
pub trait CatalogSource: Send + Sync {
    /// Human readable source name for logs and summaries.
    fn name(&self) -> &str;

    /// Fetches every row. Called on load and on each reload.
    fn fetch(&self) -> Result<Vec<CatalogRow>>;
}

/// Reads rows from a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    /// Creates a source for `path`. The file is read on every fetch.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<CatalogRow>> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| Error::catalog_source(&self.name, e.to_string()))?;
        parse_rows(&text).map_err(|e| Error::catalog_source(&self.name, e.to_string()))
    }
}

/// Rows held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    rows: Vec<CatalogRow>,
}

impl StaticSource {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<String>, rows: Vec<CatalogRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl CatalogSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<CatalogRow>> {
        Ok(self.rows.clone())
    }
}

/// Catalog compiled into the binary: Fenty, NARS and Too Faced foundations.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl CatalogSource for BuiltinSource {
    fn name(&self) -> &str {
        "builtin"
    }

    fn fetch(&self) -> Result<Vec<CatalogRow>> {
        parse_rows(BUILTIN_CATALOG)
    }
}

fn parse_rows(text: &str) -> Result<Vec<CatalogRow>> {
    serde_json::from_str(text).map_err(|e| Error::parse(e.to_string()))
}

/// Immutable, validated view of the catalog.
///
/// Brands iterate in name order; records within a brand keep source order,
/// which is the tie-break order for matching.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    brands: BTreeMap<String, Vec<ShadeRecord>>,
    version: u64,
    source: String,
}

impl CatalogSnapshot {
    /// Validates rows and builds a snapshot.
    ///
    /// Rejects invalid rows with [`Error::InvalidRecord`] and an empty row
    /// set with [`Error::EmptyCatalog`].
    pub fn build(rows: Vec<CatalogRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::empty_catalog());
        }
        let mut brands: BTreeMap<String, Vec<ShadeRecord>> = BTreeMap::new();
        for (index, row) in rows.into_iter().enumerate() {
            let record = row.into_record(index)?;
            brands.entry(record.brand.clone()).or_default().push(record);
        }
        Ok(Self {
            brands,
            version: 0,
            source: "inline".to_string(),
        })
    }

    fn stamped(mut self, source: &str, version: u64) -> Self {
        self.source = source.to_string();
        self.version = version;
        self
    }

    /// Publication counter, increasing with every successful load.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Name of the source that produced this snapshot.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Brands with their records, in brand order.
    pub fn brands(&self) -> impl Iterator<Item = (&str, &[ShadeRecord])> {
        self.brands.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Brand names in order.
    pub fn brand_names(&self) -> impl Iterator<Item = &str> {
        self.brands.keys().map(String::as_str)
    }

    /// Records of one brand. Exact match first, then ASCII case-insensitive.
    pub fn brand(&self, name: &str) -> Option<&[ShadeRecord]> {
        self.brands
            .get(name)
            .or_else(|| {
                self.brands
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v)
            })
            .map(Vec::as_slice)
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.brands.values().map(Vec::len).sum()
    }

    /// `true` if there are no records. Never the case for built snapshots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of brands.
    pub fn brand_count(&self) -> usize {
        self.brands.len()
    }
}

/// Holder of the current snapshot with atomic reload.
pub struct CatalogStore {
    source: Box<dyn CatalogSource>,
    current: ArcSwap<CatalogSnapshot>,
    versions: AtomicU64,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("source", &self.source.name())
            .field("version", &self.current().version())
            .finish()
    }
}

impl CatalogStore {
    /// Loads the first snapshot from `source`.
    ///
    /// Fails if the source errors or produces an invalid or empty catalog.
    pub fn load(source: impl CatalogSource + 'static) -> Result<Self> {
        let source: Box<dyn CatalogSource> = Box::new(source);
        let snapshot = fetch_snapshot(source.as_ref(), 1)?;
        info!(
            source = snapshot.source(),
            version = snapshot.version(),
            brands = snapshot.brand_count(),
            shades = snapshot.len(),
            "catalog loaded"
        );
        Ok(Self {
            source,
            current: ArcSwap::from_pointee(snapshot),
            versions: AtomicU64::new(1),
        })
    }

    /// Loads the built-in catalog.
    pub fn builtin() -> Result<Self> {
        Self::load(BuiltinSource)
    }

    /// Latest successfully published snapshot.
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        self.current.load_full()
    }

    /// Fetches and publishes a fresh snapshot.
    ///
    /// Returns the snapshot that is current afterwards. That is the one just
    /// built, unless a concurrent reload already published a newer version.
    /// On failure the previous snapshot stays current and the error is
    /// returned.
    pub fn reload(&self) -> Result<Arc<CatalogSnapshot>> {
        let version = self.versions.fetch_add(1, Ordering::SeqCst) + 1;
        match fetch_snapshot(self.source.as_ref(), version) {
            Ok(snapshot) => Ok(self.publish(Arc::new(snapshot))),
            Err(err) => {
                let kept = self.current();
                warn!(
                    source = self.source.name(),
                    kept_version = kept.version(),
                    error = %err,
                    "catalog reload failed, keeping previous snapshot"
                );
                Err(err)
            }
        }
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Swaps `snapshot` in unless the current one is at least as new.
    fn publish(&self, snapshot: Arc<CatalogSnapshot>) -> Arc<CatalogSnapshot> {
        let version = snapshot.version();
        let previous = self.current.rcu(|cur| {
            if cur.version() < version {
                Arc::clone(&snapshot)
            } else {
                Arc::clone(cur)
            }
        });
        if previous.version() >= version {
            debug!(
                version,
                current = previous.version(),
                "catalog snapshot superseded by a newer reload"
            );
            return self.current();
        }
        info!(
            source = snapshot.source(),
            version,
            brands = snapshot.brand_count(),
            shades = snapshot.len(),
            "catalog reloaded"
        );
        snapshot
    }
}

fn fetch_snapshot(source: &dyn CatalogSource, version: u64) -> Result<CatalogSnapshot> {
    let rows = source.fetch()?;
    debug!(source = source.name(), rows = rows.len(), "fetched catalog rows");
    Ok(CatalogSnapshot::build(rows)?.stamped(source.name(), version))
}
