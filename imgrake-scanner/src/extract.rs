use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Collect every image reference in a parsed document, resolved against the
/// URL of the page it came from.
///
/// Two sources are scanned: elements carrying a `src` attribute (with
/// `data-src` as a lazy-loading fallback) and inline `style` attributes that
/// declare a CSS `background-image`. References are resolved but not
/// otherwise validated; garbage that joins cleanly fails later at fetch time.
pub fn image_refs(document: &Html, page_url: &Url) -> Vec<Url> {
    let mut refs = Vec::new();

    let src_selector = Selector::parse("[src], [data-src]").unwrap();
    for element in document.select(&src_selector) {
        let src = element
            .value()
            .attr("src")
            .or_else(|| element.value().attr("data-src"));
        if let Some(src) = src {
            push_resolved(&mut refs, page_url, src);
        }
    }

    let style_selector = Selector::parse("[style]").unwrap();
    for element in document.select(&style_selector) {
        if let Some(style) = element.value().attr("style")
            && style.contains("background-image")
            && let Some(raw) = background_url(style)
        {
            push_resolved(&mut refs, page_url, raw);
        }
    }

    refs
}

/// Collect every anchor `href` in document order, resolved to absolute URLs.
/// Deciding which of these count as internal is the crawler's job.
pub fn page_links(document: &Html, page_url: &Url) -> Vec<Url> {
    let selector = Selector::parse("a[href]").unwrap();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            push_resolved(&mut links, page_url, href);
        }
    }

    links
}

fn push_resolved(out: &mut Vec<Url>, base: &Url, raw: &str) {
    match base.join(raw) {
        Ok(url) => out.push(url),
        Err(e) => debug!("Unresolvable reference {:?} on {}: {}", raw, base, e),
    }
}

/// Inner value of the first `url(...)` token in an inline style, with the
/// surrounding quote characters stripped.
fn background_url(style: &str) -> Option<&str> {
    let start = style.find("url(")? + 4;
    let end = style[start..].find(')')? + start;
    Some(style[start..end].trim().trim_matches(['\'', '"']))
}
