//! Collection point catalog.
//!
//! Catalog entries arrive in the wire form
//! `{id, name, address, materials: [string], lat, lng}`, either from a
//! JSON array, a TOML file with `[[points]]` tables, or the built-in demo set.

use crate::{GeoCoordinate, GeoError, MaterialType, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Stable identifier of a collection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed physical location accepting specific materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPoint {
    /// Unique id within the catalog
    pub id: PointId,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Accepted materials, never empty once in a catalog
    pub materials: BTreeSet<MaterialType>,
    /// Location, flattened to `lat`/`lng` on the wire
    #[serde(flatten)]
    pub coordinate: GeoCoordinate,
}

impl CollectionPoint {
    /// Returns true if this point accepts the given material.
    #[inline]
    pub fn accepts(&self, material: MaterialType) -> bool {
        self.materials.contains(&material)
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    points: Vec<CollectionPoint>,
}

/// Read-only, insertion-ordered set of collection points.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    points: Vec<CollectionPoint>,
}

impl Catalog {
    /// Builds a catalog, checking id uniqueness and non-empty materials.
    pub fn new(points: Vec<CollectionPoint>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(points.len());
        for point in &points {
            if !seen.insert(point.id) {
                return Err(GeoError::DuplicatePointId(point.id));
            }
            if point.materials.is_empty() {
                return Err(GeoError::EmptyMaterials(point.id));
            }
        }
        debug!(count = points.len(), "Catalog loaded");
        Ok(Self { points })
    }

    /// Parses a JSON array of points.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let points: Vec<CollectionPoint> = serde_json::from_str(json)?;
        Self::new(points)
    }

    /// Parses a TOML document of `[[points]]` tables.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(toml)?;
        Self::new(file.points)
    }

    /// Loads a catalog file; `.toml` files are read as TOML, anything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Reading catalog file");

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// The three São Paulo collection points used as demo data.
    pub fn demo() -> Self {
        use MaterialType::{Electronic, Glass, Metal, Organic, Paper, Plastic};

        let point = |id, name: &str, address: &str, materials: &[MaterialType], lat, lng| {
            CollectionPoint {
                id: PointId(id),
                name: name.to_string(),
                address: address.to_string(),
                materials: materials.iter().copied().collect(),
                coordinate: GeoCoordinate { latitude: lat, longitude: lng },
            }
        };

        Self {
            points: vec![
                point(
                    1,
                    "Posto de Coleta Vila Madalena",
                    "Rua Harmonia, 123 - Vila Madalena",
                    &[Plastic, Glass, Paper, Metal],
                    -23.5505,
                    -46.6833,
                ),
                point(
                    2,
                    "Ecoponto Pinheiros",
                    "Av. Faria Lima, 456 - Pinheiros",
                    &[Electronic, Plastic, Paper],
                    -23.5489,
                    -46.6388,
                ),
                point(
                    3,
                    "Centro de Reciclagem Itaim",
                    "Rua Joaquim Floriano, 789 - Itaim Bibi",
                    &[Plastic, Glass, Metal, Organic],
                    -23.5505,
                    -46.6794,
                ),
            ],
        }
    }

    /// All points in insertion order.
    #[inline]
    pub fn all(&self) -> &[CollectionPoint] {
        &self.points
    }

    /// Looks up a point by id.
    pub fn get(&self, id: PointId) -> Option<&CollectionPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Points accepting `material`, insertion order preserved.
    pub fn accepting(&self, material: MaterialType) -> Vec<CollectionPoint> {
        self.points
            .iter()
            .filter(|p| p.accepts(material))
            .cloned()
            .collect()
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the catalog has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
