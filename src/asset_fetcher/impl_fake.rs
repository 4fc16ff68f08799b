use crate::asset_fetcher::interface::AssetFetcher;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Serves canned bodies by URL and remembers which URLs were requested.
pub struct AssetFetcherFake {
    bodies: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl AssetFetcherFake {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_body(mut self, url: &str, body: Vec<u8>) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl AssetFetcher for AssetFetcherFake {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.requests
            .lock()
            .map_err(|e| e.to_string())?
            .push(url.to_string());

        let body = self
            .bodies
            .get(url)
            .ok_or_else(|| format!("404 Not Found: {}", url))?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, body)?;
        Ok(())
    }
}
