use commands::command_argument_builder;
use imgrake::handlers::{expand_output_dir, print_event, render_summary};
use imgrake_scanner::Crawler;
use std::sync::Arc;
use tracing::info;
use url::Url;

mod commands;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    let url = matches.get_one::<Url>("URL").unwrap();
    let depth = *matches.get_one::<usize>("depth").unwrap();
    let output = matches.get_one::<String>("output").unwrap();
    let timeout = *matches.get_one::<u64>("timeout").unwrap();
    let user_agent = matches.get_one::<String>("user-agent").unwrap();
    let format = matches.get_one::<String>("format").unwrap();
    let quiet = matches.get_flag("quiet");

    info!(
        "imgrake starting: url={} depth={} output={}",
        url, depth, output
    );

    let mut crawler = Crawler::with_client(timeout, user_agent)
        .with_max_depth(depth)
        .with_output_dir(expand_output_dir(output));
    if !quiet {
        crawler = crawler.with_event_callback(Arc::new(|event| print_event(&event)));
    }

    match crawler.harvest(url.as_str()).await {
        Ok(summary) => print!("{}", render_summary(&summary, format)),
        Err(e) => {
            eprintln!("✗ Harvest failed: {}", e);
            std::process::exit(1);
        }
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
