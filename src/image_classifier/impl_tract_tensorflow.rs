use crate::assets::store::Checkpoint;
use crate::config::ModelVariant;
use crate::image_classifier::interface::{ImageClassifier, ImageClassifierLoader, Prediction};
use crate::image_classifier::model_config::ModelConfig;
use crate::image_classifier::postprocess::ClassConvention;
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use std::time::Instant;
use tract_tensorflow::prelude::*;

pub const INPUT_NODE: &str = "input";
pub const OUTPUT_NODE: &str = "MobilenetV2/Predictions/Reshape_1";

/// The slim frozen GraphDef. Its softmax output carries a background class at 0.
pub struct ImageClassifierTractTensorflow {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
}

impl ImageClassifierTractTensorflow {
    pub fn new(
        config: ModelConfig,
        input_node: &str,
        output_node: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut model = tract_tensorflow::tensorflow().model_for_path(&config.model_path)?;
        model.set_input_names([input_node])?;
        model.set_output_names([output_node])?;
        model.set_input_fact(0, f32::fact(config.input_dims()).into())?;

        let model = model.into_optimized()?.into_runnable()?;

        Ok(Self { model, config })
    }
}

impl ImageClassifier for ImageClassifierTractTensorflow {
    fn predict(
        &self,
        input: &Tensor,
    ) -> Result<Prediction, Box<dyn std::error::Error + Send + Sync>> {
        if input.shape() != self.config.input_dims() {
            return Err(format!(
                "input shape {:?} does not match graph input {:?}",
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

pub struct FrozenGraphLoader {
    input_node: String,
    output_node: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl FrozenGraphLoader {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            input_node: INPUT_NODE.to_string(),
            output_node: OUTPUT_NODE.to_string(),
            logger: logger.with_namespace("frozen_graph"),
        }
    }
}

impl ImageClassifierLoader for FrozenGraphLoader {
    fn name(&self) -> &str {
        "frozen_graph"
    }

    fn load(
        &self,
        variant: &ModelVariant,
        checkpoint: &Checkpoint,
    ) -> Result<Box<dyn ImageClassifier>, Box<dyn std::error::Error + Send + Sync>> {
        let model_path = checkpoint.frozen_graph_path();
        self.logger.info(&format!(
            "Loading {} ({} -> {})",
            model_path.display(),
            self.input_node,
            self.output_node
        ))?;

        let classifier = ImageClassifierTractTensorflow::new(
            ModelConfig {
                model_path,
                input_shape: (variant.rows, variant.rows),
                class_convention: ClassConvention::LeadingBackground,
            },
            &self.input_node,
            &self.output_node,
        )?;

        Ok(Box::new(classifier))
    }
}
