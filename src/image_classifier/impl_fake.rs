use crate::assets::store::Checkpoint;
use crate::config::ModelVariant;
use crate::image_classifier::interface::{ImageClassifier, ImageClassifierLoader, Prediction};
use crate::image_classifier::postprocess::ClassConvention;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tract_onnx::prelude::Tensor;

pub struct ImageClassifierFake {
    raw_scores: Vec<f32>,
    class_convention: ClassConvention,
    latency: Duration,
}

impl ImageClassifier for ImageClassifierFake {
    fn predict(
        &self,
        _input: &Tensor,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Prediction {
            scores: self.class_convention.apply(self.raw_scores.clone())?,
            latency: self.latency,
        })
    }
}

/// Hands out classifiers that always answer with the same raw scores.
/// Clones share the record of loaded variants.
#[derive(Clone)]
pub struct ImageClassifierLoaderFake {
    name: String,
    raw_scores: Vec<f32>,
    class_convention: ClassConvention,
    latency: Duration,
    loaded: Arc<Mutex<Vec<ModelVariant>>>,
}

impl ImageClassifierLoaderFake {
    pub fn new(name: &str, raw_scores: Vec<f32>, class_convention: ClassConvention) -> Self {
        Self {
            name: name.to_string(),
            raw_scores,
            class_convention,
            latency: Duration::from_millis(12),
            loaded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn loaded(&self) -> Vec<ModelVariant> {
        self.loaded.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl ImageClassifierLoader for ImageClassifierLoaderFake {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(
        &self,
        variant: &ModelVariant,
        _checkpoint: &Checkpoint,
    ) -> Result<Box<dyn ImageClassifier>, Box<dyn std::error::Error + Send + Sync>> {
        self.loaded.lock().map_err(|e| e.to_string())?.push(*variant);

        Ok(Box::new(ImageClassifierFake {
            raw_scores: self.raw_scores.clone(),
            class_convention: self.class_convention,
            latency: self.latency,
        }))
    }
}
