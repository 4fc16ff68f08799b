use crate::asset_fetcher::interface::AssetFetcher;
use crate::library::logger::interface::Logger;
use reqwest::blocking::Client;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct AssetFetcherHttp {
    client: Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl AssetFetcherHttp {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // Wikimedia rejects requests without a user agent.
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            logger: logger.with_namespace("http"),
        })
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

impl AssetFetcher for AssetFetcherHttp {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!("Downloading from {}", url))?;

        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut response = self.client.get(url).send()?.error_for_status()?;

        let partial = partial_path(dest);
        let mut file = fs::File::create(&partial)?;
        let written = response.copy_to(&mut file)?;
        drop(file);
        fs::rename(&partial, dest)?;

        self.logger
            .info(&format!("Saved {} bytes to {}", written, dest.display()))?;

        Ok(())
    }
}
