//! Model artifact loading

use crate::error::{ForecastError, Result};
use crate::model::{PretrainedModel, PriceModel};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Fixed relative path of the serialized model artifact
pub const DEFAULT_ARTIFACT_PATH: &str = "modelo_prophet.json";

/// Load the pre-trained model from its serialized JSON artifact.
///
/// Called once per process; the returned model is read-only for the rest of
/// the process lifetime.
pub fn load<P: AsRef<Path>>(path: P) -> Result<PriceModel> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ForecastError::ArtifactNotFound(path.display().to_string())
        } else {
            ForecastError::Io(err)
        }
    })?;

    let model: PriceModel = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| ForecastError::Deserialization(err.to_string()))?;
    model.validate()?;

    info!(
        "Loaded model '{}' from {} (history through {})",
        model.name(),
        path.display(),
        model.last_history_date()
    );
    Ok(model)
}

/// Load the model from the default artifact path
pub fn load_default() -> Result<PriceModel> {
    load(DEFAULT_ARTIFACT_PATH)
}
