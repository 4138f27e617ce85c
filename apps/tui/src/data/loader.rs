use csv::ReaderBuilder;
use std::path::Path;
use thiserror::Error;

use crate::data::models::{coerce_number, Station};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode station csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to decode map geometry: {0}")]
    Geometry(#[from] geojson::Error),
    #[error("map geometry is not a feature collection")]
    NotAFeatureCollection,
}

/// Result of a dataset load: the placeable stations plus how many rows were
/// dropped for unusable coordinates.
#[derive(Debug, Default)]
pub struct LoadedStations {
    pub stations: Vec<Station>,
    pub skipped: usize,
}

/// Fetches the station dataset. Fire-and-forget from the caller's side: the
/// event loop applies the result whenever it arrives.
pub async fn load_stations(path: &Path) -> Result<LoadedStations, DataError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    decode_stations(&bytes)
}

/// Decodes the CSV. Column positions come from the header row, so extra or
/// reordered columns are fine; rows whose coordinates don't parse are
/// counted and skipped rather than failing the whole load.
pub fn decode_stations(bytes: &[u8]) -> Result<LoadedStations, DataError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|header| header == name);

    let name_col = column("name");
    let longitude_col = column("longitude");
    let latitude_col = column("latitude");
    let tsr_col = column("TSR");
    let products_col = column("total products");
    let product_names_col = column("product names");
    let core_publisher_col = column("Core Publisher");
    let composer_pro_col = column("Composer Pro");
    let springboard_col = column("Springboard Donation Forms");

    let mut loaded = LoadedStations::default();

    for result in reader.records() {
        let record = result?;
        let field = |col: Option<usize>| col.and_then(|index| record.get(index));

        let longitude = field(longitude_col).map_or(f64::NAN, coerce_number);
        let latitude = field(latitude_col).map_or(f64::NAN, coerce_number);
        if !longitude.is_finite() || !latitude.is_finite() {
            loaded.skipped += 1;
            continue;
        }

        loaded.stations.push(Station {
            name: field(name_col).unwrap_or_default().to_string(),
            longitude,
            latitude,
            tsr: field(tsr_col).map_or(f64::NAN, coerce_number),
            total_products: field(products_col).map_or(f64::NAN, coerce_number),
            product_names: field(product_names_col).unwrap_or_default().to_string(),
            core_publisher: field(core_publisher_col).map(coerce_number),
            composer_pro: field(composer_pro_col).map(coerce_number),
            springboard: field(springboard_col).map(coerce_number),
        });
    }

    Ok(loaded)
}
