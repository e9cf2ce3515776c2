use crate::error::{HarvestError, Result};
use crate::extract;
use crate::result::{HarvestSummary, SavedImage};
use crate::store::{self, ImageStore};
use reqwest::Client;
use scraper::Html;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

pub type EventCallback = Arc<dyn Fn(HarvestEvent) + Send + Sync>;

/// Progress events emitted while a harvest runs, one per console line in the
/// binary. `BadStatus`/`BadContentType` image rejections are skipped without
/// an event; only real errors surface.
#[derive(Debug, Clone)]
pub enum HarvestEvent {
    PageVisited { url: String, depth: usize },
    PageFailed { url: String, error: String },
    ImageSaved { url: String, filename: String },
    ImageFailed { url: String, error: String },
}

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; ImageCollector/1.0)";
pub const DEFAULT_OUTPUT_DIR: &str = "images";

/// One crawl session. The HTTP client, the visited set and the image store
/// live exactly as long as this value; nothing is shared across runs.
pub struct Crawler {
    client: Client,
    max_depth: usize,
    base_domain: Option<String>,
    store: ImageStore,
    visited: HashSet<String>,
    event_callback: Option<EventCallback>,
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_client(DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }

    pub fn with_client(timeout_secs: u64, user_agent: &str) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_depth: DEFAULT_MAX_DEPTH,
            base_domain: None,
            store: ImageStore::new(DEFAULT_OUTPUT_DIR),
            visited: HashSet::new(),
            event_callback: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Override the string used to decide whether a link is internal. By
    /// default the full start URL is used.
    pub fn with_base_domain(mut self, domain: String) -> Self {
        self.base_domain = Some(domain);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store = ImageStore::new(dir);
        self
    }

    pub fn with_event_callback(mut self, callback: EventCallback) -> Self {
        self.event_callback = Some(callback);
        self
    }

    /// Walk the site depth-first from `start_url`, saving every image found
    /// on the way. Page and image failures are reported through the event
    /// callback and counted in the summary; only an unparseable start URL or
    /// a failure to create the output directory aborts the run.
    pub async fn harvest(&mut self, start_url: &str) -> Result<HarvestSummary> {
        let start = Url::parse(start_url)
            .map_err(|e| HarvestError::InvalidUrl(format!("{}: {}", start_url, e)))?;

        // The "internal link" test is a substring match against the whole
        // start URL, not a host comparison: any link that merely contains it
        // anywhere counts as internal. Kept as-is from the original tool.
        let base_domain = self
            .base_domain
            .clone()
            .unwrap_or_else(|| start_url.to_string());

        info!(
            "Starting harvest of {} (max depth {}, output {})",
            start,
            self.max_depth,
            self.store.dir().display()
        );
        self.store.prepare().await?;

        let mut summary = HarvestSummary::new(start.to_string());

        // Depth-first via an explicit stack; pushing each page's links in
        // reverse keeps the visit order of the recursive original.
        let mut stack: Vec<(Url, usize)> = vec![(start, 0)];

        while let Some((url, depth)) = stack.pop() {
            if self.visited.contains(url.as_str()) || depth > self.max_depth {
                continue;
            }
            self.visited.insert(url.to_string());

            summary.pages_visited += 1;
            self.emit(HarvestEvent::PageVisited {
                url: url.to_string(),
                depth,
            });
            debug!("Crawling {} at depth {}", url, depth);

            let body = match self.fetch_page(&url).await {
                Ok(Some(body)) => body,
                // Non-200: dead end, but the URL stays marked visited.
                Ok(None) => continue,
                Err(e) => {
                    warn!("Error crawling {}: {}", url, e);
                    summary.page_failures += 1;
                    self.emit(HarvestEvent::PageFailed {
                        url: url.to_string(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            // The parsed document is not Send, so it must not live across an
            // await point.
            let (images, links) = {
                let document = Html::parse_document(&body);
                (
                    extract::image_refs(&document, &url),
                    extract::page_links(&document, &url),
                )
            };

            for image_url in images {
                self.save_image(&image_url, &mut summary).await;
            }

            for link in links.into_iter().rev() {
                if link.as_str().contains(&base_domain) && !self.visited.contains(link.as_str()) {
                    stack.push((link, depth + 1));
                }
            }
        }

        info!(
            "Harvest complete: {} pages visited, {} images saved",
            summary.pages_visited, summary.images_saved
        );
        Ok(summary)
    }

    async fn save_image(&mut self, image_url: &Url, summary: &mut HarvestSummary) {
        match self.store.save(&self.client, image_url).await {
            Ok(Some(_)) => {
                let filename = store::filename_for(image_url);
                summary.images_saved += 1;
                summary.saved.push(SavedImage {
                    url: image_url.to_string(),
                    filename: filename.clone(),
                });
                self.emit(HarvestEvent::ImageSaved {
                    url: image_url.to_string(),
                    filename,
                });
            }
            // Already saved earlier in this run.
            Ok(None) => {}
            Err(e @ (HarvestError::BadStatus { .. } | HarvestError::BadContentType { .. })) => {
                // Not a 200, or not actually an image. Skipped without a
                // console line, matching the original tool.
                debug!("Skipping {}: {}", image_url, e);
            }
            Err(e) => {
                warn!("Failed to save {}: {}", image_url, e);
                summary.image_failures += 1;
                self.emit(HarvestEvent::ImageFailed {
                    url: image_url.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    async fn fetch_page(&self, url: &Url) -> Result<Option<String>> {
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            debug!("Skipping {} (status {})", url, status);
            return Ok(None);
        }
        let body = response.text().await?;
        Ok(Some(body))
    }

    fn emit(&self, event: HarvestEvent) {
        if let Some(callback) = &self.event_callback {
            callback(event);
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}
