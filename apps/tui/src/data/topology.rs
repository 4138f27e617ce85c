use geojson::{GeoJson, Value};
use std::path::Path;

use crate::data::loader::DataError;

/// Exterior ring of one state boundary feature, in geographic coordinates.
pub type Outline = Vec<(f64, f64)>;

/// Fetches the state boundary collection. Failure leaves the base map
/// absent; the markers render regardless.
pub async fn load_outlines(path: &Path) -> Result<Vec<Outline>, DataError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;
    decode_outlines(&text)
}

/// Converts the feature collection into renderable outline rings. Interior
/// rings (lakes, enclaves) are dropped; only the silhouette is drawn.
pub fn decode_outlines(text: &str) -> Result<Vec<Outline>, DataError> {
    let geojson = text.parse::<GeoJson>()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(DataError::NotAFeatureCollection);
    };

    let mut outlines = Vec::new();
    for feature in collection.features {
        let Some(geometry) = feature.geometry else {
            continue;
        };
        match geometry.value {
            Value::Polygon(rings) => push_exterior(&mut outlines, &rings),
            Value::MultiPolygon(polygons) => {
                for rings in &polygons {
                    push_exterior(&mut outlines, rings);
                }
            }
            _ => {}
        }
    }

    Ok(outlines)
}

fn push_exterior(outlines: &mut Vec<Outline>, rings: &[Vec<Vec<f64>>]) {
    let Some(exterior) = rings.first() else {
        return;
    };
    let ring: Outline = exterior
        .iter()
        .filter(|position| position.len() >= 2)
        .map(|position| (position[0], position[1]))
        .collect();
    if ring.len() >= 2 {
        outlines.push(ring);
    }
}
