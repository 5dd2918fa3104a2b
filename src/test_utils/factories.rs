//! Test data factories for feed documents and records

use crate::database::models::QuakeRecord;
use serde_json::{json, Value};

/// Factory for USGS GeoJSON feed documents
pub struct FeedDocumentFactory;

impl FeedDocumentFactory {
    /// A complete feature as the USGS feed emits it
    pub fn feature(id: &str, time_ms: i64, coordinates: [f64; 2], mag: Option<f64>) -> Value {
        json!({
            "type": "Feature",
            "id": id,
            "properties": {
                "mag": mag,
                "place": format!("10 km N of {id}"),
                "time": time_ms,
                "updated": time_ms + 60_000,
                "url": format!("https://earthquake.usgs.gov/earthquakes/eventpage/{id}"),
                "type": "earthquake"
            },
            "geometry": {
                "type": "Point",
                "coordinates": [coordinates[0], coordinates[1], 10.0]
            }
        })
    }

    /// A feature whose properties carry no `place` key at all
    pub fn feature_without_place(id: &str, time_ms: i64) -> Value {
        let mut feature = Self::feature(id, time_ms, [0.0, 0.0], Some(1.0));
        if let Some(props) = feature["properties"].as_object_mut() {
            props.remove("place");
        }
        feature
    }

    /// Wraps features in a FeatureCollection
    pub fn collection(features: Vec<Value>) -> Value {
        json!({
            "type": "FeatureCollection",
            "metadata": {
                "generated": 1700000060000i64,
                "title": "USGS Earthquakes",
                "status": 200,
                "count": features.len()
            },
            "features": features
        })
    }
}

/// Factory for store-ready records
pub struct RecordFactory;

impl RecordFactory {
    pub fn record(usgs_id: &str, magnitude: Option<f64>) -> QuakeRecord {
        QuakeRecord {
            usgs_id: usgs_id.to_string(),
            date: "2023-11-14".to_string(),
            time: "22:13:20".to_string(),
            longitude: 10.0,
            latitude: 20.0,
            magnitude,
            place: Some("Somewhere".to_string()),
            event_url: format!("https://earthquake.usgs.gov/earthquakes/eventpage/{usgs_id}"),
        }
    }
}
