//! Analysis and highlighting over in-memory documents, no browser required.

use page_lens::dom::{DomNode, MARK_CLASS, PageDocument, text_nodes};
use page_lens::error::LensError;
use page_lens::highlight::Highlighter;
use page_lens::keywords::{RankOptions, Stopwords, rank};
use page_lens::snapshot;

fn paragraph(text: &str) -> DomNode {
    DomNode::element("p").add_child(DomNode::text(text))
}

fn link(href: &str) -> DomNode {
    DomNode::element("a")
        .with_attribute("href", href)
        .add_child(DomNode::text("link"))
}

fn article() -> PageDocument {
    let body = DomNode::element("body")
        .add_child(
            DomNode::element("h1")
                .with_top(32.0)
                .add_child(DomNode::text("Growing Heirloom Tomatoes")),
        )
        .add_child(paragraph(
            "Tomatoes need sun. Heirloom tomatoes need patience, and TOMATOES reward it.",
        ))
        .add_child(
            DomNode::element("ul")
                .add_child(DomNode::element("li").add_child(DomNode::text("water deeply")))
                .add_child(DomNode::element("li").add_child(DomNode::text("stake early"))),
        )
        .add_child(DomNode::element("script").add_child(DomNode::text("tomatoes();")));
    PageDocument::new("https://garden.example/tomatoes", body)
        .with_title("Heirloom Tomatoes")
        .with_description("Planting and care notes")
}

fn mark_texts(document: &PageDocument) -> Vec<String> {
    let mut texts = Vec::new();
    document.body.visit_elements(&mut |node| {
        if node.has_class(MARK_CLASS) {
            texts.push(node.text_content());
        }
    });
    texts
}

#[test]
fn test_remove_after_apply_restores_text_exactly() {
    let mut document = article();
    let before = document.text_content();
    let mut highlighter = Highlighter::new();

    let outcome = highlighter
        .apply(&mut document, "tomatoes")
        .expect("apply failed");
    // one in the heading, three in the paragraph; the script text is skipped
    assert_eq!(outcome.match_count, 4);
    assert_eq!(outcome.active_keyword.as_deref(), Some("tomatoes"));
    // splicing wraps text in marks without altering the text itself
    assert_eq!(document.text_content(), before);

    let removed = highlighter.remove(&mut document).expect("remove failed");
    assert_eq!(removed.match_count, 4);
    assert_eq!(removed.active_keyword, None);
    assert_eq!(document.text_content(), before);
    assert!(mark_texts(&document).is_empty());
    assert!(highlighter.active_keyword().is_none());
}

#[test]
fn test_switching_keywords_replaces_the_previous_marks() {
    let mut document = article();
    let mut highlighter = Highlighter::new();

    highlighter
        .apply(&mut document, "tomatoes")
        .expect("apply failed");
    let outcome = highlighter
        .apply(&mut document, "water")
        .expect("apply failed");

    assert_eq!(outcome.match_count, 1);
    assert_eq!(highlighter.active_keyword(), Some("water"));
    assert_eq!(mark_texts(&document), vec!["water"]);
}

#[test]
fn test_ranking_is_deterministic() {
    let options = RankOptions {
        min_length: 4,
        top_n: 15,
        stopwords: Stopwords::none(),
    };
    let text = "alpha beta alpha gamma beta alpha";

    let first = rank(text, &options);
    let second = rank(text, &options);
    assert_eq!(first, second);

    let ranked: Vec<(&str, usize)> = first
        .iter()
        .map(|entry| (entry.word.as_str(), entry.count))
        .collect();
    assert_eq!(ranked, vec![("alpha", 3), ("beta", 2), ("gamma", 1)]);
}

#[test]
fn test_matching_is_case_insensitive_and_case_preserving() {
    let body = DomNode::element("body").add_child(paragraph("SEO Seo seo"));
    let mut document = PageDocument::new("https://example.com/", body);
    let before = document.text_content();
    let mut highlighter = Highlighter::new();

    let outcome = highlighter.apply(&mut document, "seo").expect("apply failed");

    assert_eq!(outcome.match_count, 3);
    assert_eq!(mark_texts(&document), vec!["SEO", "Seo", "seo"]);
    assert_eq!(document.text_content(), before);
}

#[test]
fn test_no_match_outcome_leaves_the_document_alone() {
    let mut document = article();
    let before = document.to_json().expect("serialize failed");
    let mut highlighter = Highlighter::new();

    let outcome = highlighter
        .apply(&mut document, "zeppelin")
        .expect("apply failed");

    assert_eq!(outcome.match_count, 0);
    assert!(outcome.active_keyword.is_none());
    assert!(highlighter.active_keyword().is_none());
    assert_eq!(document.to_json().expect("serialize failed"), before);
}

#[test]
fn test_no_match_still_clears_the_previous_keyword() {
    let mut document = article();
    let mut highlighter = Highlighter::new();

    highlighter
        .apply(&mut document, "tomatoes")
        .expect("apply failed");
    let outcome = highlighter
        .apply(&mut document, "zeppelin")
        .expect("apply failed");

    assert_eq!(outcome.match_count, 0);
    assert!(highlighter.active_keyword().is_none());
    assert!(mark_texts(&document).is_empty());
}

#[test]
fn test_malformed_keyword_is_rejected_before_any_mutation() {
    let mut document = article();
    let mut highlighter = Highlighter::new();
    highlighter
        .apply(&mut document, "tomatoes")
        .expect("apply failed");
    let before = document.to_json().expect("serialize failed");

    let err = highlighter.apply(&mut document, "   ").unwrap_err();

    assert!(matches!(err, LensError::MalformedKeyword(_)));
    // the rejected keyword must not have cleared the active one
    assert_eq!(highlighter.active_keyword(), Some("tomatoes"));
    assert_eq!(document.to_json().expect("serialize failed"), before);
}

#[test]
fn test_reapplying_the_same_keyword_does_not_nest_marks() {
    let body = DomNode::element("body").add_child(paragraph("SEO Seo seo"));
    let mut document = PageDocument::new("https://example.com/", body);
    let before = document.text_content();
    let mut highlighter = Highlighter::new();

    highlighter.apply(&mut document, "seo").expect("apply failed");
    let outcome = highlighter.apply(&mut document, "seo").expect("apply failed");

    assert_eq!(outcome.match_count, 3);
    let texts = mark_texts(&document);
    assert_eq!(texts, vec!["SEO", "Seo", "seo"]);
    // a nested mark would show up as a mark whose parent is also a mark
    document.body.visit_elements(&mut |node| {
        if node.has_class(MARK_CLASS) {
            for child in node.children() {
                assert!(!child.has_class(MARK_CLASS));
            }
        }
    });
    assert_eq!(document.text_content(), before);
}

#[test]
fn test_keyword_metacharacters_match_literally() {
    let body = DomNode::element("body").add_child(paragraph("Learn C++ fast. c++ is fun."));
    let mut document = PageDocument::new("https://example.com/", body);
    let mut highlighter = Highlighter::new();

    let outcome = highlighter.apply(&mut document, "c++").expect("apply failed");
    assert_eq!(outcome.match_count, 2);
    assert_eq!(mark_texts(&document), vec!["C++", "c++"]);

    // a dot is a literal dot, not "any character"
    let body = DomNode::element("body").add_child(paragraph("abc a.c"));
    let mut document = PageDocument::new("https://example.com/", body);
    let outcome = highlighter.apply(&mut document, "a.c").expect("apply failed");
    assert_eq!(outcome.match_count, 1);
}

#[test]
fn test_walker_exclusions() {
    let body = DomNode::element("body")
        .add_child(paragraph("visible"))
        .add_child(DomNode::element("script").add_child(DomNode::text("hidden()")))
        .add_child(DomNode::element("style").add_child(DomNode::text("p { color: red }")))
        .add_child(DomNode::element("noscript").add_child(DomNode::text("enable js")))
        .add_child(DomNode::element("template").add_child(DomNode::text("row template")))
        .add_child(
            DomNode::element("span")
                .with_attribute("class", MARK_CLASS)
                .add_child(DomNode::text("already marked")),
        )
        .add_child(DomNode::text(""));

    let texts: Vec<&str> = text_nodes(&body).map(|node| node.text).collect();
    // skipped subtrees never show up; empty text nodes do
    assert_eq!(texts, vec!["visible", ""]);
}

#[test]
fn test_link_partition_matches_host_resolution() {
    let body = DomNode::element("body")
        .add_child(link("https://example.com/a"))
        .add_child(link("http://example.com/b"))
        .add_child(link("/c"))
        .add_child(link("./d"))
        .add_child(link("page.html"))
        .add_child(link("#top"))
        .add_child(link("https://other.org/x"))
        .add_child(link("//cdn.example.net/lib.js"))
        .add_child(link("mailto:team@example.com"))
        .add_child(link("https://sub.example.com/y"));
    let document = PageDocument::new("https://example.com/guide", body);

    let snapshot = snapshot::extract(&document);
    assert_eq!(snapshot.links.total, 10);
    assert_eq!(snapshot.links.internal, 6);
    assert_eq!(snapshot.links.external, 4);
}

#[test]
fn test_analysis_is_unaffected_by_active_highlights() {
    let mut document = article();
    let clean = snapshot::extract(&document);

    let mut highlighter = Highlighter::new();
    highlighter
        .apply(&mut document, "tomatoes")
        .expect("apply failed");
    let highlighted = snapshot::extract(&document);

    assert_eq!(clean, highlighted);
}

#[test]
fn test_missing_description_reads_as_empty() {
    let document = PageDocument::new("https://example.com/", DomNode::element("body"));
    let snapshot = snapshot::extract(&document);
    assert_eq!(snapshot.description.content, "");
    assert_eq!(snapshot.description.length, 0);
}
