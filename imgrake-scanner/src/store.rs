use crate::error::{HarvestError, Result};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Flat on-disk store for harvested images, deduplicated by source URL.
///
/// The downloaded set lives exactly as long as the store; nothing is
/// persisted between runs.
pub struct ImageStore {
    dir: PathBuf,
    downloaded: HashSet<String>,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            downloaded: HashSet::new(),
        }
    }

    /// Create the output directory. Runs once at the start of a session;
    /// failure here is the one filesystem error that aborts a run.
    pub async fn prepare(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn saved_count(&self) -> usize {
        self.downloaded.len()
    }

    /// Download one image and write it into the store.
    ///
    /// Returns `Ok(None)` when the URL was already saved this run, without
    /// touching the network. `BadStatus` and `BadContentType` mean the
    /// response was not a usable image; callers are expected to skip those
    /// quietly and log everything else.
    pub async fn save(&mut self, client: &Client, image_url: &Url) -> Result<Option<PathBuf>> {
        if self.downloaded.contains(image_url.as_str()) {
            return Ok(None);
        }

        debug!("Fetching image {}", image_url);
        let response = client.get(image_url.as_str()).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(HarvestError::BadStatus {
                url: image_url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("image") {
            return Err(HarvestError::BadContentType {
                url: image_url.to_string(),
                content_type,
            });
        }

        let bytes = response.bytes().await?;
        let path = self.dir.join(filename_for(image_url));
        tokio::fs::write(&path, &bytes).await?;

        // Recorded only after a successful write, so a failed attempt can be
        // retried when the same URL shows up on a later page.
        self.downloaded.insert(image_url.to_string());
        Ok(Some(path))
    }
}

/// Derive the on-disk filename for an image URL: the basename of the path
/// with any trailing query text stripped, or a hash of the whole URL when the
/// path has no basename. The ".jpg" placeholder extension on hashed names can
/// mislabel non-JPEG content.
pub fn filename_for(url: &Url) -> String {
    let name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    if name.is_empty() {
        let digest = Sha256::digest(url.as_str().as_bytes());
        return format!("{}.jpg", hex::encode(digest));
    }

    name.split('?').next().unwrap_or(name).to_string()
}
