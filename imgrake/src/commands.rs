use crate::CLAP_STYLING;
use clap::{arg, command};
use imgrake_scanner::crawler::{DEFAULT_OUTPUT_DIR, DEFAULT_USER_AGENT};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    command!()
        .name("imgrake")
        .bin_name("imgrake")
        .styles(CLAP_STYLING)
        .about("Recursively crawl a website and save every image it references")
        .arg(
            arg!(<URL>)
                .help("The URL to start crawling from; also the substring used to keep the crawl on-site")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-d --"depth" <DEPTH>)
                .required(false)
                .help("Maximum number of link-hops from the start URL")
                .value_parser(clap::value_parser!(usize))
                .default_value("3"),
        )
        .arg(
            arg!(-o --"output" <DIR>)
                .required(false)
                .help("Directory to write images into (flat, created if absent)")
                .default_value(DEFAULT_OUTPUT_DIR),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(-a --"user-agent" <STRING>)
                .required(false)
                .help("User-Agent header sent with every request")
                .default_value(DEFAULT_USER_AGENT),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Final summary format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(arg!(-q --"quiet" "Suppress per-page and per-image progress lines").required(false))
}
