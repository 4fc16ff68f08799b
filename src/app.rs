use crate::assets::store::{format_alpha, AssetStore};
use crate::comparator::{compare, Comparison};
use crate::config::{Config, ModelVariant};
use crate::image_classifier::interface::{ImageClassifierLoader, Prediction};
use crate::labels::interface::LabelMap;
use crate::library::logger::interface::Logger;
use crate::preprocess::preprocess_image;
use crate::results::ResultRecord;
use std::sync::Arc;

pub struct App {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    store: Arc<AssetStore>,
    labels: Arc<dyn LabelMap + Send + Sync>,
    layered: Box<dyn ImageClassifierLoader>,
    frozen_graph: Box<dyn ImageClassifierLoader>,
}

impl App {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        store: Arc<AssetStore>,
        labels: Arc<dyn LabelMap + Send + Sync>,
        layered: Box<dyn ImageClassifierLoader>,
        frozen_graph: Box<dyn ImageClassifierLoader>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("app"),
            store,
            labels,
            layered,
            frozen_graph,
        }
    }

    /// Runs every configured variant in order. The first failure aborts the run.
    pub fn run(&self) -> Result<Vec<ResultRecord>, Box<dyn std::error::Error + Send + Sync>> {
        self.store.prepare()?;

        let mut results = Vec::with_capacity(self.config.variants.len());
        for variant in &self.config.variants {
            results.push(self.run_variant(variant)?);
        }

        Ok(results)
    }

    fn run_variant(
        &self,
        variant: &ModelVariant,
    ) -> Result<ResultRecord, Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("alpha: {}", format_alpha(variant.alpha)))?;
        self.logger.info(&format!("rows: {}", variant.rows))?;

        let checkpoint = self.store.fetch_checkpoint(variant)?;
        let image = self.store.fetch_sample_image()?;
        let input = preprocess_image(&image, variant.rows)?;

        let layered = self.layered.load(variant, &checkpoint)?.predict(&input)?;
        let frozen = self
            .frozen_graph
            .load(variant, &checkpoint)?
            .predict(&input)?;

        let comparison = compare(
            &layered.scores,
            &frozen.scores,
            self.labels.as_ref(),
            &self.config.comparison,
        )?;

        self.report(variant, &layered, &frozen, &comparison)?;

        comparison.assert_agreement()?;

        Ok(ResultRecord::new(*variant, &layered, &frozen, &comparison))
    }

    fn report(
        &self,
        variant: &ModelVariant,
        layered: &Prediction,
        frozen: &Prediction,
        comparison: &Comparison,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let lines = [
            format!(
                "for model: alpha: {} rows: {}",
                format_alpha(variant.alpha),
                variant.rows
            ),
            format!(
                "prediction {}: {} {} score: {}",
                self.layered.name(),
                comparison.layered.index,
                comparison.layered.label,
                comparison.layered.score
            ),
            format!(
                "prediction {}: {} {} score: {}",
                self.frozen_graph.name(),
                comparison.frozen.index,
                comparison.frozen.label,
                comparison.frozen.score
            ),
            format!(
                "inference time {}: {:.4}s",
                self.layered.name(),
                layered.latency.as_secs_f64()
            ),
            format!(
                "inference time {}: {:.4}s",
                self.frozen_graph.name(),
                frozen.latency.as_secs_f64()
            ),
            format!(
                "outputs within rtol {}: {}",
                self.config.comparison.rtol, comparison.all_close
            ),
            format!("max_vector_difference: {}", comparison.max_vector_difference),
        ];

        for line in &lines {
            self.logger.info(line)?;
        }
        Ok(())
    }
}
