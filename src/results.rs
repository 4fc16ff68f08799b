use crate::comparator::Comparison;
use crate::config::ModelVariant;
use crate::image_classifier::interface::Prediction;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub variant: ModelVariant,
    pub pred_layered_label: String,
    pub pred_layered_score: f32,
    /// Seconds.
    pub inference_time_layered: f64,
    pub pred_frozen_label: String,
    pub pred_frozen_score: f32,
    pub inference_time_frozen: f64,
    pub preds_agree: bool,
    pub max_vector_difference: f32,
}

impl ResultRecord {
    pub fn new(
        variant: ModelVariant,
        layered: &Prediction,
        frozen: &Prediction,
        comparison: &Comparison,
    ) -> Self {
        Self {
            variant,
            pred_layered_label: comparison.layered.label.clone(),
            pred_layered_score: comparison.layered.score,
            inference_time_layered: layered.latency.as_secs_f64(),
            pred_frozen_label: comparison.frozen.label.clone(),
            pred_frozen_score: comparison.frozen.score,
            inference_time_frozen: frozen.latency.as_secs_f64(),
            preds_agree: comparison.preds_agree(),
            max_vector_difference: comparison.max_vector_difference,
        }
    }
}

pub fn write_results(
    path: &Path,
    records: &[ResultRecord],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
pub fn read_results(
    path: &Path,
) -> Result<Vec<ResultRecord>, Box<dyn std::error::Error + Send + Sync>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(alpha: f32, rows: u32) -> ResultRecord {
        ResultRecord {
            variant: ModelVariant::new(alpha, rows),
            pred_layered_label: "giant panda".to_string(),
            pred_layered_score: 0.875,
            inference_time_layered: 0.25,
            pred_frozen_label: "giant panda".to_string(),
            pred_frozen_score: 0.75,
            inference_time_frozen: 0.125,
            preds_agree: true,
            max_vector_difference: 0.125,
        }
    }

    #[test]
    fn test_write_then_read_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_results.p");
        let records = vec![record(1.0, 224), record(0.35, 96)];

        write_results(&path, &records).unwrap();

        assert_eq!(read_results(&path).unwrap(), records);
    }

    #[test]
    fn test_record_serializes_nine_fields() {
        let value = serde_json::to_value(record(1.0, 224)).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 9);
        assert_eq!(object["variant"]["rows"], 224);
        assert!(object["pred_layered_label"].is_string());
        assert!(object["pred_frozen_score"].is_f64());
        assert!(object["inference_time_frozen"].is_f64());
        assert!(object["preds_agree"].is_boolean());
        assert!(object["max_vector_difference"].is_number());
    }

    #[test]
    fn test_read_results_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_results(&dir.path().join("missing.json")).is_err());
    }
}
