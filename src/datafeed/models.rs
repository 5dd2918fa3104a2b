//! Wire shapes of the USGS GeoJSON feed.
//!
//! Only the members the mapper reads are declared; everything else in the
//! document is ignored.

use serde::{Deserialize, Deserializer};

/// Top-level GeoJSON `FeatureCollection`
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// One seismic event
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    /// Upstream event identifier, e.g. "us7000abcd"
    pub id: String,
    pub properties: Properties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Properties {
    /// Origin time in epoch milliseconds
    pub time: i64,

    /// The key must be present, its value may be null.
    #[serde(deserialize_with = "required_nullable")]
    pub mag: Option<f64>,

    /// Missing and null both map to `None`.
    #[serde(default)]
    pub place: Option<String>,

    /// Canonical event detail page
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude, depth]`
    pub coordinates: Vec<f64>,
}

// Without a `default` attribute serde reports a missing key as an error,
// while `null` still deserializes to `None`.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)
}
