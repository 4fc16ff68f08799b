use crate::asset_fetcher::interface::AssetFetcher;
use crate::assets::archive::extract_tgz;
use crate::config::{Config, ModelVariant, SampleImageConfig};
use crate::library::logger::interface::Logger;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Formats a width multiplier the way the published archives spell it: `1.0`, `0.35`, `1.4`.
pub fn format_alpha(alpha: f32) -> String {
    if alpha.fract() == 0.0 {
        format!("{:.1}", alpha)
    } else {
        alpha.to_string()
    }
}

pub fn checkpoint_id(variant: &ModelVariant) -> String {
    format!("mobilenet_v2_{}_{}", format_alpha(variant.alpha), variant.rows)
}

/// An extracted slim checkpoint. Every file in it shares `base_path` as a prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub id: String,
    pub dir: PathBuf,
    pub base_path: PathBuf,
}

impl Checkpoint {
    pub fn frozen_graph_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_frozen.pb", self.base_path.display()))
    }
}

pub struct AssetStore {
    models_dir: PathBuf,
    checkpoint_base_url: String,
    sample_image: SampleImageConfig,
    fetcher: Arc<dyn AssetFetcher + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl AssetStore {
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn AssetFetcher + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            models_dir: config.models_dir.clone(),
            checkpoint_base_url: config.checkpoint_base_url.clone(),
            sample_image: config.sample_image.clone(),
            fetcher,
            logger: logger.with_namespace("assets"),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn prepare(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.models_dir.is_dir() {
            fs::create_dir_all(&self.models_dir)?;
        }
        Ok(())
    }

    /// Downloads `url` to `dest` unless a file is already there.
    pub fn fetch_cached(
        &self,
        url: &str,
        dest: &Path,
    ) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        if dest.is_file() {
            self.logger
                .info(&format!("Using cached {}", dest.display()))?;
        } else {
            self.fetcher.fetch(url, dest)?;
        }
        Ok(dest.to_path_buf())
    }

    pub fn fetch_checkpoint(
        &self,
        variant: &ModelVariant,
    ) -> Result<Checkpoint, Box<dyn std::error::Error + Send + Sync>> {
        let id = checkpoint_id(variant);
        let dir = self.models_dir.join(&id);
        let checkpoint = Checkpoint {
            base_path: dir.join(&id),
            dir,
            id,
        };

        if checkpoint.frozen_graph_path().is_file() {
            self.logger
                .info(&format!("Checkpoint {} already extracted", checkpoint.id))?;
            return Ok(checkpoint);
        }

        let url = format!(
            "{}/{}.tgz",
            self.checkpoint_base_url.trim_end_matches('/'),
            checkpoint.id
        );
        let archive = self.models_dir.join(format!("{}.tgz", checkpoint.id));

        self.fetch_cached(&url, &archive)?;

        self.logger.info(&format!(
            "Extracting {} into {}",
            archive.display(),
            checkpoint.dir.display()
        ))?;
        extract_tgz(&archive, &checkpoint.dir)?;

        if !checkpoint.frozen_graph_path().is_file() {
            return Err(format!(
                "{} does not contain {}",
                archive.display(),
                checkpoint.frozen_graph_path().display()
            )
            .into());
        }

        Ok(checkpoint)
    }

    pub fn fetch_sample_image(&self) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        let path = self.fetch_cached(&self.sample_image.url, &self.sample_image.file_name)?;
        Ok(fs::read(path)?)
    }
}
