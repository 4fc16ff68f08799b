use crate::assets::store::{checkpoint_id, AssetStore, Checkpoint};
use crate::config::ModelVariant;
use crate::image_classifier::interface::{ImageClassifier, ImageClassifierLoader, Prediction};
use crate::image_classifier::model_config::ModelConfig;
use crate::image_classifier::postprocess::ClassConvention;
use crate::library::logger::interface::Logger;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tract_onnx::prelude::*;

/// The layered (Keras-style) MobileNetV2, exported to ONNX with NHWC input.
pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let model = tract_onnx::onnx()
            .model_for_path(&config.model_path)?
            .with_input_fact(0, f32::fact(config.input_dims()).into())?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model, config })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn predict(
        &self,
        input: &Tensor,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        if input.shape() != self.config.input_dims() {
            return Err(format!(
                "input shape {:?} does not match model input {:?}",
                input.shape(),
                self.config.input_dims()
            )
            .into());
        }

        let started = Instant::now();
        let outputs = self.model.run(tvec!(input.clone().into_tvalue()))?;
        let raw: Vec<f32> = outputs[0].to_array_view::<f32>()?.iter().copied().collect();
        let scores = self.config.class_convention.apply(raw)?;

        Ok(Prediction {
            scores,
            latency: started.elapsed(),
        })
    }
}

pub fn layered_model_path(models_dir: &Path, variant: &ModelVariant) -> PathBuf {
    models_dir
        .join("layered")
        .join(format!("{}.onnx", checkpoint_id(variant)))
}

/// Resolves the ONNX export for a variant, downloading it on first use when a
/// base URL is configured.
pub struct LayeredModelLoader {
    store: Arc<AssetStore>,
    base_url: Option<String>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl LayeredModelLoader {
    pub fn new(
        store: Arc<AssetStore>,
        base_url: Option<String>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            store,
            base_url,
            logger: logger.with_namespace("layered"),
        }
    }

    fn resolve(
        &self,
        variant: &ModelVariant,
    ) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        let path = layered_model_path(self.store.models_dir(), variant);
        if path.is_file() {
            return Ok(path);
        }

        match &self.base_url {
            Some(base_url) => {
                let url = format!(
                    "{}/{}.onnx",
                    base_url.trim_end_matches('/'),
                    checkpoint_id(variant)
                );
                self.store.fetch_cached(&url, &path)
            }
            None => Err(format!(
                "no layered model at {}: export the Keras MobileNetV2 to ONNX with NHWC input \
                 (e.g. `python -m tf2onnx.convert --keras`) and place it there, \
                 or set layered_model_base_url",
                path.display()
            )
            .into()),
        }
    }
}

impl ImageClassifierLoader for LayeredModelLoader {
    fn name(&self) -> &str {
        "layered"
    }

    fn load(
        &self,
        variant: &ModelVariant,
        _checkpoint: &Checkpoint,
    ) -> Result<Box<dyn ImageClassifier>, Box<dyn std::error::Error + Send + Sync>> {
        let model_path = self.resolve(variant)?;
        self.logger
            .info(&format!("Loading {}", model_path.display()))?;

        let classifier = ImageClassifierTractOnnx::new(ModelConfig {
            model_path,
            input_shape: (variant.rows, variant.rows),
            class_convention: ClassConvention::Plain,
        })?;

        Ok(Box::new(classifier))
    }
}
