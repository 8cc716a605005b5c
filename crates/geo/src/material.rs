//! Material types accepted at collection points and logged in discards.

use crate::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recyclable material classification.
///
/// Declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MaterialType {
    /// Plastic packaging, bottles, bags
    Plastic,
    /// Glass bottles and jars
    Glass,
    /// Paper and cardboard
    Paper,
    /// Cans and scrap metal
    Metal,
    /// Electronic waste
    Electronic,
    /// Compostable organic waste
    Organic,
    /// Anything else
    Other,
}

impl MaterialType {
    /// All material types in canonical order.
    pub const fn all() -> [MaterialType; 7] {
        [
            Self::Plastic,
            Self::Glass,
            Self::Paper,
            Self::Metal,
            Self::Electronic,
            Self::Organic,
            Self::Other,
        ]
    }

    /// Wire tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plastic => "plastic",
            Self::Glass => "glass",
            Self::Paper => "paper",
            Self::Metal => "metal",
            Self::Electronic => "electronic",
            Self::Organic => "organic",
            Self::Other => "other",
        }
    }

    /// Human readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Plastic => "Plastic",
            Self::Glass => "Glass",
            Self::Paper => "Paper",
            Self::Metal => "Metal",
            Self::Electronic => "Electronic",
            Self::Organic => "Organic",
            Self::Other => "Other",
        }
    }
}

impl FromStr for MaterialType {
    type Err = GeoError;

    /// Accepts English tags and the Portuguese tags logged by the web
    /// frontend, case-insensitive, with or without accents.
    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_lowercase();
        let material = match tag.as_str() {
            "plastic" | "plástico" | "plastico" => Self::Plastic,
            "glass" | "vidro" => Self::Glass,
            "paper" | "papel" => Self::Paper,
            "metal" => Self::Metal,
            "electronic" | "e-waste" | "eletrônico" | "eletronico" => Self::Electronic,
            "organic" | "orgânico" | "organico" => Self::Organic,
            "other" | "outros" | "outro" => Self::Other,
            _ => return Err(GeoError::UnknownMaterial(s.to_string())),
        };
        Ok(material)
    }
}

impl TryFrom<String> for MaterialType {
    type Error = GeoError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_english_tags() {
        for material in MaterialType::all() {
            assert_eq!(material.as_str().parse::<MaterialType>().unwrap(), material);
        }
    }

    #[test]
    fn test_parse_portuguese_tags() {
        assert_eq!("plástico".parse::<MaterialType>().unwrap(), MaterialType::Plastic);
        assert_eq!("Eletrônico".parse::<MaterialType>().unwrap(), MaterialType::Electronic);
        assert_eq!("organico".parse::<MaterialType>().unwrap(), MaterialType::Organic);
        assert_eq!("outros".parse::<MaterialType>().unwrap(), MaterialType::Other);
    }

    #[test]
    fn test_unknown_tag() {
        let err = "uranium".parse::<MaterialType>().unwrap_err();
        assert!(matches!(err, GeoError::UnknownMaterial(ref t) if t == "uranium"));
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&MaterialType::Electronic).unwrap();
        assert_eq!(json, "\"electronic\"");

        let parsed: Vec<MaterialType> = serde_json::from_str(r#"["vidro", "metal"]"#).unwrap();
        assert_eq!(parsed, vec![MaterialType::Glass, MaterialType::Metal]);
    }

    #[test]
    fn test_canonical_order() {
        let mut shuffled = vec![MaterialType::Other, MaterialType::Plastic, MaterialType::Metal];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![MaterialType::Plastic, MaterialType::Metal, MaterialType::Other]
        );
    }
}
