//! Page signal extraction
//!
//! Turns a captured page into a `PageSnapshot`: title and description with
//! their lengths, headings grouped by level with viewport positions, image
//! alt coverage, links partitioned by host, word count, and ranked
//! keywords. Extraction is read-only; it never touches the tree it reads.

pub mod types;

pub use types::{FieldText, Heading, HeadingLevel, ImageInfo, LinkCounts, PageSnapshot};

use std::collections::BTreeMap;

use url::Url;

use crate::dom::PageDocument;
use crate::keywords::{self, RankOptions};

/// Extracts a snapshot with default ranking options
pub fn extract(document: &PageDocument) -> PageSnapshot {
    extract_with(document, &RankOptions::default())
}

/// Extracts a snapshot, ranking keywords with the given options
pub fn extract_with(document: &PageDocument, options: &RankOptions) -> PageSnapshot {
    let base = Url::parse(&document.url).ok();

    let mut headings: BTreeMap<HeadingLevel, Vec<Heading>> = HeadingLevel::ALL
        .into_iter()
        .map(|level| (level, Vec::new()))
        .collect();
    let mut images = Vec::new();
    let mut links = LinkCounts::default();

    document.body.visit_elements(&mut |node| {
        if let Some(level) = node.tag().and_then(HeadingLevel::from_tag) {
            headings.entry(level).or_default().push(Heading {
                text: node.text_content().trim().to_string(),
                position: node.top().unwrap_or(0.0),
            });
        } else if node.is_tag("img") {
            let alt = node.attribute("alt").unwrap_or("");
            images.push(ImageInfo {
                has_alt: !alt.is_empty(),
                alt: alt.to_string(),
            });
        } else if node.is_tag("a") || node.is_tag("area") {
            // only elements with an href are links, same as document.links
            if let Some(href) = node.attribute("href") {
                links.total += 1;
                if is_internal(href, base.as_ref()) {
                    links.internal += 1;
                } else {
                    links.external += 1;
                }
            }
        }
    });

    let text = document.visible_text();
    PageSnapshot {
        title: FieldText::new(document.title.clone()),
        description: FieldText::new(document.description.clone()),
        headings,
        images,
        links,
        word_count: text.split_whitespace().count(),
        keywords: keywords::rank(&text, options),
    }
}

/// A link is internal when it resolves to the document's own host.
/// Links that carry no host (mailto and friends) are external; a relative
/// link that cannot be resolved because the document URL itself does not
/// parse stays on the page and counts as internal.
fn is_internal(href: &str, base: Option<&Url>) -> bool {
    match Url::parse(href) {
        Ok(url) => hosts_match(&url, base),
        Err(_) => match base {
            Some(base) => base
                .join(href)
                .map(|url| hosts_match(&url, Some(base)))
                .unwrap_or(false),
            None => true,
        },
    }
}

fn hosts_match(url: &Url, base: Option<&Url>) -> bool {
    match (url.host_str(), base.and_then(Url::host_str)) {
        (Some(link_host), Some(base_host)) => link_host == base_host,
        _ => false,
    }
}
