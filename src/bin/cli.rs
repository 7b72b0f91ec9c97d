//! Page-lens CLI
//!
//! Navigates a browser to a URL, extracts the page's signal snapshot, and
//! prints it as a readable report or as JSON. Can also highlight a keyword
//! on the live page afterwards, which is mostly useful together with
//! `--headed` and `--hold`.

use clap::Parser;
use page_lens::browser::{LaunchOptions, PageSession};
use page_lens::keywords::{RankOptions, total_count};
use page_lens::snapshot::PageSnapshot;
use page_lens::tools::navigate::normalize_url;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "page-lens")]
#[command(version)]
#[command(about = "Extract page signals and highlight keywords on a live page", long_about = None)]
struct Cli {
    /// URL to analyze (scheme defaults to https://)
    url: String,

    /// Number of top keywords to report
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Minimum token length for the keyword ranker
    #[arg(long, value_name = "N")]
    min_length: Option<usize>,

    /// Extra stopword to exclude from ranking (repeatable)
    #[arg(long = "stopword", value_name = "WORD")]
    stopwords: Vec<String>,

    /// Print the snapshot as JSON instead of a report
    #[arg(long)]
    json: bool,

    /// Highlight this keyword on the page after analysis
    #[arg(long, value_name = "KEYWORD")]
    highlight: Option<String>,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Keep the browser open for this many seconds before exiting
    #[arg(long, value_name = "SECS", default_value = "0")]
    hold: u64,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Disable the Chrome sandbox (needed in some container environments)
    #[arg(long)]
    no_sandbox: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let mut options = LaunchOptions {
        headless: !cli.headed,
        sandbox: !cli.no_sandbox,
        ..Default::default()
    };
    options.chrome_path = cli.chrome_path.clone();

    let mut rank_options = RankOptions::default();
    if let Some(top) = cli.top {
        rank_options.top_n = top;
    }
    if let Some(min_length) = cli.min_length {
        rank_options.min_length = min_length;
    }
    for word in &cli.stopwords {
        rank_options.stopwords.insert(word.as_str());
    }

    let url = normalize_url(&cli.url);

    eprintln!("Analyzing {}", url);

    let session = PageSession::launch(options)?;
    session.navigate(&url)?;
    session.wait_for_navigation()?;

    let snapshot = session.analyze_with(&rank_options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_report(&url, &snapshot);
    }

    if let Some(ref keyword) = cli.highlight {
        let outcome = session.highlight(keyword)?;
        if outcome.match_count == 0 {
            eprintln!("No occurrences of '{}' found", keyword);
        } else {
            eprintln!(
                "Highlighted {} occurrence(s) of '{}'",
                outcome.match_count, keyword
            );
        }
    }

    if cli.hold > 0 {
        eprintln!("Holding the browser open for {}s...", cli.hold);
        std::thread::sleep(Duration::from_secs(cli.hold));
    }

    session.close()?;

    Ok(())
}

fn print_report(url: &str, snapshot: &PageSnapshot) {
    println!("Page signals for {}", url);
    println!();

    let title_ok = (30..=60).contains(&snapshot.title.length);
    println!("Title: {}", field_or_missing(&snapshot.title.content));
    println!(
        "  Length: {}/60 characters {}",
        snapshot.title.length,
        verdict(title_ok)
    );

    let description_ok = (120..=160).contains(&snapshot.description.length);
    println!(
        "Description: {}",
        field_or_missing(&snapshot.description.content)
    );
    println!(
        "  Length: {}/160 characters {}",
        snapshot.description.length,
        verdict(description_ok)
    );
    println!();

    let total_images = snapshot.images.len();
    let missing_alt = snapshot.images.iter().filter(|img| !img.has_alt).count();
    if total_images == 0 {
        println!("Images: none");
    } else {
        let rate = (total_images - missing_alt) as f64 / total_images as f64 * 100.0;
        println!(
            "Images: {} total, {} missing alt text ({:.1}% optimized)",
            total_images, missing_alt, rate
        );
    }

    let links = snapshot.links;
    let internal_share = links.internal as f64 / links.total.max(1) as f64 * 100.0;
    println!(
        "Links: {} total ({} internal, {} external; {:.1}% internal)",
        links.total, links.internal, links.external, internal_share
    );
    println!(
        "Word count: {} {}",
        snapshot.word_count,
        verdict(snapshot.word_count >= 300)
    );
    println!();

    if snapshot.keywords.is_empty() {
        println!("Keywords: none");
    } else {
        println!("Top keywords:");
        let total = total_count(&snapshot.keywords) as f64;
        let widest = snapshot
            .keywords
            .iter()
            .map(|entry| entry.word.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &snapshot.keywords {
            let share = entry.count as f64 / total * 100.0;
            println!(
                "  {:width$}  {:>4}  ({:.1}%)",
                entry.word,
                entry.count,
                share,
                width = widest
            );
        }
    }
    println!();

    println!("Headings:");
    let mut any = false;
    for (level, headings) in &snapshot.headings {
        if headings.is_empty() {
            continue;
        }
        any = true;
        println!("  {} ({})", level.tag().to_uppercase(), headings.len());
        for heading in headings {
            println!(
                "    {}  [{}px from top]",
                heading.text,
                heading.position.round()
            );
        }
    }
    if !any {
        println!("  none");
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok { "(Optimal)" } else { "(Needs Adjustment)" }
}

fn field_or_missing(content: &str) -> &str {
    if content.is_empty() { "(missing)" } else { content }
}
