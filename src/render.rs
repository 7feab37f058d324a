//! Report rendering: a line-oriented micro-markup interpreter.
//!
//! The analysis service is asked to structure its report with a small
//! markup vocabulary (double-asterisk headers and emphasis, `*`/`-`
//! bullets). This module interprets that vocabulary one line at a time,
//! in order, producing display blocks for the terminal and file writers.
//!
//! Single pass, non-recursive, no error cases: malformed or unmatched
//! markers degrade to literal text. Rendering the same input twice yields
//! identical blocks.

use once_cell::sync::Lazy;
use regex::Regex;

static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// An inline run within a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Literal text.
    Text(String),
    /// Text that was wrapped in a double-asterisk pair.
    Emphasis(String),
}

/// One display block of a rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A section header: the line's trimmed form started and ended with a
    /// double-asterisk marker.
    Header(String),
    /// A bulleted list entry: the line's trimmed form started with `* ` or
    /// `- `.
    ListItem(String),
    /// An empty line; rendered as fixed-height space, never collapsed.
    Spacer,
    /// Anything else, with inline emphasis resolved.
    Paragraph(Vec<Span>),
}

/// Interpret `report` line by line into display blocks, preserving order.
pub fn render(report: &str) -> Vec<Block> {
    report.lines().map(render_line).collect()
}

fn render_line(line: &str) -> Block {
    let trimmed = line.trim();

    if trimmed.starts_with("**") && trimmed.ends_with("**") {
        return Block::Header(trimmed.replace("**", ""));
    }

    if trimmed.starts_with("* ") || trimmed.starts_with("- ") {
        return Block::ListItem(trimmed[2..].to_string());
    }

    if trimmed.is_empty() {
        return Block::Spacer;
    }

    Block::Paragraph(parse_spans(line))
}

/// Split a line into literal and emphasized runs. Pairs are matched left to
/// right, non-greedily; an unpaired trailing marker stays literal.
fn parse_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for captures in EMPHASIS.captures_iter(line) {
        let matched = captures.get(0).expect("whole-match group always present");
        if matched.start() > cursor {
            spans.push(Span::Text(line[cursor..matched.start()].to_string()));
        }
        spans.push(Span::Emphasis(captures[1].to_string()));
        cursor = matched.end();
    }

    if cursor < line.len() {
        spans.push(Span::Text(line[cursor..].to_string()));
    }

    spans
}
