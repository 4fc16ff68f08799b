use crate::assets::store::Checkpoint;
use crate::config::ModelVariant;
use std::time::Duration;
use tract_onnx::prelude::Tensor;

#[derive(Debug, Clone)]
pub struct Prediction {
    /// One score per class, already in the classifier's comparable layout.
    pub scores: Vec<f32>,
    pub latency: Duration,
}

pub trait ImageClassifier {
    fn predict(&self, input: &Tensor)
        -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>>;
}

/// Builds a classifier for one checkpoint variant. Loading happens per call.
pub trait ImageClassifierLoader {
    fn name(&self) -> &str;
    fn load(
        &self,
        variant: &ModelVariant,
        checkpoint: &Checkpoint,
    ) -> Result<Box<dyn ImageClassifier>, Box<dyn std::error::Error + Send + Sync>>;
}
