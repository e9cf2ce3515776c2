// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export the pieces tests and the binary both use
pub use handlers::{expand_output_dir, print_event, render_summary};
