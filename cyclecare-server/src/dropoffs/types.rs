//! GeoJSON wire types for the station data source.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Coordinate, Station, StationId};

fn collection_type() -> String {
    "FeatureCollection".to_string()
}

fn feature_type() -> String {
    "Feature".to_string()
}

fn point_type() -> String {
    "Point".to_string()
}

/// A GeoJSON feature collection of repair stations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    pub geometry: Geometry,
    pub properties: Properties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    /// GeoJSON order: `[longitude, latitude]`.
    pub coordinates: Vec<f64>,
}

/// Station attributes as the source names them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Properties {
    #[serde(rename = "OBJECTID")]
    pub object_id: u64,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Owner", default)]
    pub owner: Option<String>,
    #[serde(rename = "File_Path", default)]
    pub file_path: Option<String>,
}

/// Convert source features into validated stations.
///
/// Features with malformed or out-of-range geometry are skipped with a
/// warning; one bad record must not take down the whole set.
pub fn into_stations(collection: FeatureCollection) -> Vec<Arc<Station>> {
    collection
        .features
        .into_iter()
        .filter_map(|feature| {
            let object_id = feature.properties.object_id;
            match feature_to_station(feature) {
                Some(station) => Some(Arc::new(station)),
                None => {
                    warn!(object_id, "skipping station with malformed geometry");
                    None
                }
            }
        })
        .collect()
}

fn feature_to_station(feature: Feature) -> Option<Station> {
    // Some sources append elevation as a third component; only the
    // first two matter.
    let coords = &feature.geometry.coordinates;
    if coords.len() < 2 {
        return None;
    }
    let coordinate = Coordinate::new(coords[1], coords[0]).ok()?;

    Some(Station {
        id: StationId(feature.properties.object_id),
        coordinate,
        description: feature.properties.description.unwrap_or_default(),
        owner: feature.properties.owner.unwrap_or_default(),
        image_path: feature.properties.file_path.unwrap_or_default(),
    })
}

/// Rebuild a feature collection from validated stations, for serving
/// `/data/dropoffs` to the frontend.
pub fn to_collection(stations: &[Arc<Station>]) -> FeatureCollection {
    FeatureCollection {
        kind: collection_type(),
        features: stations
            .iter()
            .map(|station| Feature {
                kind: feature_type(),
                geometry: Geometry {
                    kind: point_type(),
                    coordinates: vec![station.coordinate.lng(), station.coordinate.lat()],
                },
                properties: Properties {
                    object_id: station.id.0,
                    description: Some(station.description.clone()),
                    owner: Some(station.owner.clone()),
                    file_path: Some(station.image_path.clone()),
                },
            })
            .collect(),
    }
}
