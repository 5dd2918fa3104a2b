use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::models::{Feature, FeatureCollection};
use crate::constants::time::{DATE_FORMAT, TIME_FORMAT};
use crate::database::models::QuakeRecord;

/// Errors raised while turning feed features into records
#[derive(Debug, Error)]
pub enum MapError {
    #[error("Malformed feed document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Feature '{id}' has no coordinate at index {index}")]
    MissingCoordinate { id: String, index: usize },

    #[error("Feature '{id}' has out-of-range timestamp {millis}ms")]
    InvalidTimestamp { id: String, millis: i64 },
}

/// Converts raw feed documents into store-ready records
pub struct RecordMapper;

impl RecordMapper {
    /// Maps every feature of `document` to a record, preserving feed order.
    ///
    /// The first malformed feature aborts the whole batch.
    pub fn map(document: &Value) -> Result<Vec<QuakeRecord>, MapError> {
        let collection = FeatureCollection::deserialize(document)?;

        let records = collection
            .features
            .iter()
            .map(Self::map_feature)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Mapped {} features into records", records.len());
        Ok(records)
    }

    /// Flattens a single feature
    pub fn map_feature(feature: &Feature) -> Result<QuakeRecord, MapError> {
        let (date, time) = split_timestamp(&feature.id, feature.properties.time)?;

        Ok(QuakeRecord {
            usgs_id: feature.id.clone(),
            date,
            time,
            longitude: coordinate(feature, 0)?,
            latitude: coordinate(feature, 1)?,
            magnitude: feature.properties.mag,
            place: feature.properties.place.clone(),
            event_url: feature.properties.url.clone(),
        })
    }
}

/// Splits epoch milliseconds into UTC `(date, time)` strings.
/// Sub-second precision is dropped.
fn split_timestamp(id: &str, millis: i64) -> Result<(String, String), MapError> {
    let instant = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        MapError::InvalidTimestamp {
            id: id.to_string(),
            millis,
        }
    })?;

    Ok((
        instant.format(DATE_FORMAT).to_string(),
        instant.format(TIME_FORMAT).to_string(),
    ))
}

fn coordinate(feature: &Feature, index: usize) -> Result<f64, MapError> {
    feature
        .geometry
        .coordinates
        .get(index)
        .copied()
        .ok_or_else(|| MapError::MissingCoordinate {
            id: feature.id.clone(),
            index,
        })
}
