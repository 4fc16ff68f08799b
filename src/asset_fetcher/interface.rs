use std::path::Path;

pub trait AssetFetcher {
    /// Downloads `url` and stores the body at `dest`, replacing whatever was there.
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
