use colored::Colorize;
use imgrake_scanner::{HarvestEvent, HarvestSummary};
use std::path::PathBuf;

/// Expand a user-supplied output directory, resolving a leading tilde.
pub fn expand_output_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// One console line per crawl event.
pub fn print_event(event: &HarvestEvent) {
    match event {
        HarvestEvent::PageVisited { url, depth } => {
            println!("{} [{}] {}", "crawl".cyan(), depth, url);
        }
        HarvestEvent::ImageSaved { filename, .. } => {
            println!("  {} {}", "✓".green(), filename);
        }
        HarvestEvent::PageFailed { url, error } => {
            println!("  {} {} | {}", "✗".red(), url, error);
        }
        HarvestEvent::ImageFailed { url, error } => {
            println!("  {} {} | {}", "✗".red(), url, error);
        }
    }
}

/// Render the final summary in the requested format ("text" or "json").
pub fn render_summary(summary: &HarvestSummary, format: &str) -> String {
    if format == "json" {
        let mut out =
            serde_json::to_string_pretty(summary).expect("summary serializes to JSON");
        out.push('\n');
        return out;
    }

    let mut out = format!(
        "\nDone. Downloaded {} image(s) from {} page(s)\n",
        summary.images_saved, summary.pages_visited
    );
    if summary.page_failures + summary.image_failures > 0 {
        out.push_str(&format!(
            "Failures: {} page(s), {} image(s)\n",
            summary.page_failures, summary.image_failures
        ));
    }
    out
}
