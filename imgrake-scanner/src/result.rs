use serde::{Deserialize, Serialize};

/// One image written to disk during a harvest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedImage {
    pub url: String,
    pub filename: String,
}

/// Totals for a completed harvest run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestSummary {
    pub start_url: String,
    pub pages_visited: usize,
    pub images_saved: usize,
    pub page_failures: usize,
    pub image_failures: usize,
    pub saved: Vec<SavedImage>,
}

impl HarvestSummary {
    pub fn new(start_url: String) -> Self {
        Self {
            start_url,
            ..Default::default()
        }
    }
}
