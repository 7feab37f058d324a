//! Readable-text extraction from raw article HTML.
//!
//! Turns a fetched web page into a clean, bounded plain-text excerpt:
//!
//! 1. Boilerplate elements (scripts, styles, navigation, footers, headers,
//!    asides, noscript, iframes) are excluded entirely; their text never
//!    reaches the output.
//! 2. A single content root is chosen: the first `<article>`, else the first
//!    `<main>`, else `<body>`. Candidates sitting inside an excluded element
//!    are skipped.
//! 3. The root's rendered text is split into lines; lines whose trimmed form
//!    is shorter than 50 characters are dropped (button labels, captions,
//!    bylines).
//! 4. Surviving lines are joined with a blank line and the excerpt is capped
//!    at 15,000 characters.
//!
//! Empty input is not an error: an empty or fully filtered document yields
//! an empty string. Callers enforce their own minimum-length check before
//! analysis (see [`crate::session`]).

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Hard cap on the extracted excerpt, in characters.
pub const MAX_EXCERPT_CHARS: usize = 15_000;

/// Trimmed lines shorter than this never appear in the output.
pub const MIN_LINE_CHARS: usize = 50;

/// Elements whose text never contributes to the excerpt.
const EXCLUDED_TAGS: [&str; 8] = [
    "script", "style", "nav", "footer", "header", "aside", "noscript", "iframe",
];

/// Elements that start a new line in rendered text, mirroring how a browser
/// lays out block-level content.
const BLOCK_TAGS: [&str; 25] = [
    "address", "article", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure", "h1",
    "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p", "pre", "section", "table", "tr",
    "ul",
];

static ARTICLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static MAIN_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("main").unwrap());
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// Extract a bounded plain-text excerpt from raw HTML.
///
/// # Arguments
///
/// * `html` - The raw page HTML as returned by the fetch adapter
///
/// # Returns
///
/// The cleaned excerpt, at most [`MAX_EXCERPT_CHARS`] characters. Empty when
/// the document has no qualifying content.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let Some(root) = content_root(&document) else {
        return String::new();
    };

    let mut raw = String::new();
    collect_text(root, &mut raw);

    let kept: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_LINE_CHARS)
        .collect();

    let excerpt = truncate_chars(kept.join("\n\n"), MAX_EXCERPT_CHARS);
    debug!(
        input_bytes = html.len(),
        kept_lines = kept.len(),
        excerpt_chars = excerpt.chars().count(),
        "Extracted readable text"
    );
    excerpt
}

/// Pick the content root: first `<article>`, else first `<main>`, else
/// `<body>`. First match wins; candidates are never merged. Candidates
/// nested inside an excluded element do not count.
fn content_root(document: &Html) -> Option<ElementRef<'_>> {
    document
        .select(&ARTICLE_SELECTOR)
        .find(|el| !has_excluded_ancestor(*el))
        .or_else(|| {
            document
                .select(&MAIN_SELECTOR)
                .find(|el| !has_excluded_ancestor(*el))
        })
        .or_else(|| document.select(&BODY_SELECTOR).next())
}

fn has_excluded_ancestor(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| EXCLUDED_TAGS.contains(&ancestor.value().name()))
}

/// Walk the subtree, appending text nodes and inserting line breaks around
/// block-level elements. Excluded subtrees are skipped wholesale.
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if EXCLUDED_TAGS.contains(&name) {
        return;
    }

    let breaks_line = name == "br" || BLOCK_TAGS.contains(&name);
    if breaks_line {
        out.push('\n');
    }
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(&text.text);
        }
    }
    if breaks_line {
        out.push('\n');
    }
}

fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}
