pub mod crawler;
pub mod error;
pub mod extract;
pub mod result;
pub mod store;

pub use crawler::{Crawler, EventCallback, HarvestEvent};
pub use error::HarvestError;
pub use result::{HarvestSummary, SavedImage};
pub use store::ImageStore;
