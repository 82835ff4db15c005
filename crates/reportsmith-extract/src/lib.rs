//! Section extraction from LaTeX reports.
//!
//! Given the text of a generated report, the extractor locates each logical
//! section from a fixed alias table ([`SECTION_RULES`]), claims its span with
//! a single forward scan over the document's headings, and reduces the span
//! to either a truncated paragraph or a bounded list of cleaned items. Every
//! failure is per-section: a missing heading or empty span marks that one
//! section and extraction moves on, so a partially structured report still
//! yields usable slide content.

mod clean;
mod rules;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

pub use clean::Cleaner;
pub use rules::{rule, ContentShape, SectionRule, SECTION_RULES};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read report {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Why a section produced no usable content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SectionStatus {
    Found,
    /// No alias matched ahead of the scan cursor.
    NotFound,
    /// An alias matched but the span yielded nothing usable.
    Error(String),
}

/// Reduced content of one claimed span.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SectionContent {
    Text(String),
    Items(Vec<String>),
    Empty,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtractedSection {
    pub status: SectionStatus,
    pub content: SectionContent,
}

impl ExtractedSection {
    fn found(content: SectionContent) -> Self {
        ExtractedSection {
            status: SectionStatus::Found,
            content,
        }
    }

    fn not_found() -> Self {
        ExtractedSection {
            status: SectionStatus::NotFound,
            content: SectionContent::Empty,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        ExtractedSection {
            status: SectionStatus::Error(message.into()),
            content: SectionContent::Empty,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == SectionStatus::Found
    }
}

/// Per-section extraction results, in rule order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtractionReport {
    sections: Vec<(&'static str, ExtractedSection)>,
}

impl ExtractionReport {
    pub fn get(&self, name: &str) -> Option<&ExtractedSection> {
        self.sections
            .iter()
            .find(|(section, _)| *section == name)
            .map(|(_, extracted)| extracted)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ExtractedSection)> {
        self.sections
            .iter()
            .map(|(section, extracted)| (*section, extracted))
    }

    pub fn found_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|(_, extracted)| extracted.is_found())
            .count()
    }
}

struct Heading {
    depth: u8,
    title: String,
    start: usize,
    body_start: usize,
}

fn scan_headings(text: &str, end: usize) -> Vec<Heading> {
    let pattern = Regex::new(r"\\(chapter|section|subsection)\*?\{([^}]*)\}")
        .expect("heading pattern is valid");

    pattern
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            if whole.start() >= end {
                return None;
            }
            let depth = match &captures[1] {
                "chapter" => 1,
                "section" => 2,
                _ => 3,
            };
            Some(Heading {
                depth,
                title: captures[2].trim().to_string(),
                start: whole.start(),
                body_start: whole.end(),
            })
        })
        .collect()
}

fn title_matches(title: &str, alias: &str) -> bool {
    title.eq_ignore_ascii_case(alias)
        || title.to_ascii_lowercase().contains(&alias.to_ascii_lowercase())
}

/// The span claimed by `headings[index]`: from the end of its heading line
/// to the next heading at the same or shallower depth, or `doc_end`.
fn span_end(headings: &[Heading], index: usize, doc_end: usize) -> usize {
    headings[index + 1..]
        .iter()
        .find(|heading| heading.depth <= headings[index].depth)
        .map(|heading| heading.start)
        .unwrap_or(doc_end)
}

fn list_items(span: &str, max_items: usize, cleaner: &Cleaner) -> Vec<String> {
    let mut items = Vec::new();
    for piece in span.split("\\item").skip(1) {
        // Require a delimiter so commands like \itemsep are not split on.
        if !piece.starts_with(|c: char| c.is_whitespace() || c == '[') {
            continue;
        }
        let piece = piece.split("\\end{").next().unwrap_or(piece);
        let cleaned = cleaner.clean(piece);
        if !cleaned.is_empty() {
            items.push(cleaned);
        }
        if items.len() == max_items {
            break;
        }
    }
    items
}

fn first_paragraph(span: &str, max_chars: usize, cleaner: &Cleaner) -> String {
    let heading = Regex::new(r"^\\(chapter|section|subsection)\*?\{[^}]*\}")
        .expect("heading pattern is valid");

    // A chapter span opens with its first nested heading line; skip past
    // leading heading commands to reach prose.
    let mut rest = span.trim_start();
    while let Some(matched) = heading.find(rest) {
        rest = rest[matched.end()..].trim_start();
    }

    // The paragraph runs to the first blank line or nested heading.
    let end = [
        rest.find("\n\n"),
        rest.find("\\chapter"),
        rest.find("\\section"),
        rest.find("\\subsection"),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(rest.len());

    truncate_at_word(cleaner.clean(&rest[..end]), max_chars)
}

fn truncate_at_word(text: String, max_chars: usize) -> String {
    if text.len() <= max_chars {
        return text;
    }
    let mut cut = max_chars;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let head = &text[..cut];
    let head = head.rfind(' ').map(|space| &head[..space]).unwrap_or(head);
    format!("{head}...")
}

fn abstract_environment(text: &str) -> Option<&str> {
    let start = text.find("\\begin{abstract}")? + "\\begin{abstract}".len();
    let end = text[start..].find("\\end{abstract}")? + start;
    Some(&text[start..end])
}

/// Extract every logical section from `text`.
pub fn extract(text: &str) -> ExtractionReport {
    let doc_end = text.find("\\end{document}").unwrap_or(text.len());
    let headings = scan_headings(text, doc_end);
    let cleaner = Cleaner::new();

    let mut report = ExtractionReport::default();
    let mut cursor = 0usize;

    for rule in SECTION_RULES {
        let matched = headings[cursor.min(headings.len())..]
            .iter()
            .position(|heading| {
                rule.aliases
                    .iter()
                    .any(|alias| title_matches(&heading.title, alias))
            })
            .map(|offset| cursor + offset);

        let extracted = match matched {
            Some(index) => {
                cursor = index + 1;
                let span = &text[headings[index].body_start..span_end(&headings, index, doc_end)];
                reduce_span(rule, span, &cleaner)
            }
            None => fallback(rule, text, &cleaner),
        };

        debug!(
            section = rule.name,
            status = ?extracted.status,
            "extracted section"
        );
        report.sections.push((rule.name, extracted));
    }

    report
}

fn reduce_span(rule: &SectionRule, span: &str, cleaner: &Cleaner) -> ExtractedSection {
    match rule.shape {
        ContentShape::Items { max_items } => {
            let items = list_items(span, max_items, cleaner);
            if items.is_empty() {
                ExtractedSection::error("heading matched but no list items found")
            } else {
                ExtractedSection::found(SectionContent::Items(items))
            }
        }
        ContentShape::Paragraph { max_chars } => {
            let paragraph = first_paragraph(span, max_chars, cleaner);
            if paragraph.is_empty() {
                ExtractedSection::error("heading matched but the span is empty")
            } else {
                ExtractedSection::found(SectionContent::Text(paragraph))
            }
        }
    }
}

/// When no heading matched, the motivation section may still be recoverable
/// from an abstract environment.
fn fallback(rule: &SectionRule, text: &str, cleaner: &Cleaner) -> ExtractedSection {
    if rule.name != "motivation" {
        return ExtractedSection::not_found();
    }
    match abstract_environment(text) {
        Some(body) => {
            let max_chars = match rule.shape {
                ContentShape::Paragraph { max_chars } => max_chars,
                ContentShape::Items { .. } => return ExtractedSection::not_found(),
            };
            let paragraph = truncate_at_word(cleaner.clean(body), max_chars);
            if paragraph.is_empty() {
                ExtractedSection::not_found()
            } else {
                ExtractedSection::found(SectionContent::Text(paragraph))
            }
        }
        None => ExtractedSection::not_found(),
    }
}

/// Read a report from disk and extract its sections.
pub fn extract_from_path(path: &Path) -> Result<ExtractionReport, ExtractError> {
    let text = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract(&text))
}
