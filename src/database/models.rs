use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A flattened earthquake event as stored in the collection
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct QuakeRecord {
    /// Upstream event id, unique across the collection
    pub usgs_id: String,

    /// UTC date of the event, `YYYY-MM-DD`
    pub date: String,

    /// UTC time of day of the event, `HH:MM:SS`
    pub time: String,

    /// WGS84 longitude in degrees
    pub longitude: f64,

    /// WGS84 latitude in degrees
    pub latitude: f64,

    /// Magnitude, null when the feed reports none
    pub magnitude: Option<f64>,

    /// Free-text location, null when the feed omits it
    pub place: Option<String>,

    /// Event detail page on the USGS site
    pub event_url: String,
}
