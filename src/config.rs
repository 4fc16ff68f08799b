use chrono::{Offset, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CHECKPOINT_BASE_URL: &str = "https://storage.googleapis.com/mobilenet_v2/checkpoints";
const PANDA_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/f/fe/Giant_Panda_in_Beijing_Zoo_1.JPG";
const SLIM_DATASETS_URL: &str =
    "https://raw.githubusercontent.com/tensorflow/models/master/research/slim/datasets";

/// One published MobileNetV2 checkpoint: width multiplier and input resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelVariant {
    pub alpha: f32,
    pub rows: u32,
}

impl ModelVariant {
    pub fn new(alpha: f32, rows: u32) -> Self {
        Self { alpha, rows }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleImageConfig {
    pub url: String,
    pub file_name: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelsConfig {
    pub synsets_url: String,
    pub metadata_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    pub rtol: f32,
    pub atol: f32,
    /// Added to each arg-max so indices line up with a label map whose entry 0 is background.
    pub label_offset: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub variants: Vec<ModelVariant>,
    pub models_dir: PathBuf,
    pub checkpoint_base_url: String,
    /// Where `mobilenet_v2_{alpha}_{rows}.onnx` exports can be fetched from.
    /// When unset the export has to be placed under `models_dir/layered` by hand.
    pub layered_model_base_url: Option<String>,
    pub sample_image: SampleImageConfig,
    pub labels: LabelsConfig,
    pub comparison: ComparisonConfig,
    pub results_path: PathBuf,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            rtol: 0.5,
            atol: 1e-8,
            label_offset: 1,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variants: vec![ModelVariant::new(1.0, 224)],
            models_dir: PathBuf::from("models"),
            checkpoint_base_url: CHECKPOINT_BASE_URL.to_string(),
            layered_model_base_url: None,
            sample_image: SampleImageConfig {
                url: PANDA_URL.to_string(),
                file_name: PathBuf::from("panda.jpg"),
            },
            labels: LabelsConfig {
                synsets_url: format!("{}/imagenet_lsvrc_2015_synsets.txt", SLIM_DATASETS_URL),
                metadata_url: format!("{}/imagenet_metadata.txt", SLIM_DATASETS_URL),
            },
            comparison: ComparisonConfig::default(),
            results_path: PathBuf::from("test_results.p"),
            logger_timezone: Utc.fix(),
        }
    }
}
