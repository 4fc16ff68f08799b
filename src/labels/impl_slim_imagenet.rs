use crate::assets::store::AssetStore;
use crate::config::LabelsConfig;
use crate::labels::interface::LabelMap;
use std::collections::HashMap;
use std::fs;

pub const BACKGROUND: &str = "background";

/// ImageNet readable names in the slim layout: background at 0, then the
/// 1000 ILSVRC-2015 synsets in file order.
#[derive(Debug, Clone)]
pub struct SlimImagenetLabels {
    names: Vec<String>,
}

impl SlimImagenetLabels {
    pub fn load(
        store: &AssetStore,
        config: &LabelsConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let synsets_path = store.models_dir().join("imagenet_lsvrc_2015_synsets.txt");
        let metadata_path = store.models_dir().join("imagenet_metadata.txt");

        store.fetch_cached(&config.synsets_url, &synsets_path)?;
        store.fetch_cached(&config.metadata_url, &metadata_path)?;

        Self::parse(
            &fs::read_to_string(&synsets_path)?,
            &fs::read_to_string(&metadata_path)?,
        )
    }

    pub fn parse(
        synsets: &str,
        metadata: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let synset_to_human: HashMap<&str, &str> = metadata
            .lines()
            .filter_map(|line| line.split_once('\t'))
            .map(|(synset, human)| (synset.trim(), human.trim()))
            .collect();

        let mut names = vec![BACKGROUND.to_string()];
        for synset in synsets.lines().map(str::trim).filter(|s| !s.is_empty()) {
            let human = synset_to_human
                .get(synset)
                .ok_or_else(|| format!("no readable name for synset {}", synset))?;
            names.push(human.to_string());
        }

        if names.len() == 1 {
            return Err("synset list is empty".into());
        }

        Ok(Self { names })
    }
}

impl LabelMap for SlimImagenetLabels {
    fn label(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}
