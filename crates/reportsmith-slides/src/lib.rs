//! Slide-content assembly for derived presentations.
//!
//! Maps extraction results onto the `SLIDE_*` context keys the presentation
//! templates reference. Every slide key always receives a value: found
//! content where extraction succeeded, a placeholder marker everywhere else,
//! with a warning recorded per substituted placeholder so the caller can
//! tell the user which slides need manual authoring. Extraction problems
//! never abort assembly.

use std::fmt;

use reportsmith_context::RenderContext;
use reportsmith_extract::{
    rule, ContentShape, ExtractionReport, SectionContent, SectionStatus,
};
use tracing::warn;

/// Marker substituted wherever extraction produced nothing usable.
pub const PLACEHOLDER: &str = "[TODO: Add content]";

/// Slide context key paired with the logical section that feeds it.
pub static SLIDE_KEYS: &[(&str, &str)] = &[
    ("SLIDE_MOTIVATION", "motivation"),
    ("SLIDE_PROBLEM", "problem-statement"),
    ("SLIDE_OBJECTIVES", "objectives"),
    ("SLIDE_METHODOLOGY", "methodology"),
    ("SLIDE_TECHNOLOGIES", "technologies"),
    ("SLIDE_IMPLEMENTATION", "implementation"),
    ("SLIDE_EVALUATION", "evaluation"),
    ("SLIDE_SUMMARY", "summary"),
    ("SLIDE_FUTURE_WORK", "future-work"),
];

/// One slide that fell back to the placeholder.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtractionWarning {
    pub section: &'static str,
    pub reason: String,
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.section, self.reason)
    }
}

/// Augmented context plus the placeholder substitutions that were made.
#[derive(Debug)]
pub struct SlideBundle {
    pub context: RenderContext,
    pub warnings: Vec<ExtractionWarning>,
}

/// Fill every slide key in a copy of `base`.
///
/// `report` is `None` when extraction was not requested; all slides then get
/// the placeholder without warnings, since there is nothing to warn about.
pub fn assemble(report: Option<&ExtractionReport>, base: &RenderContext) -> SlideBundle {
    let mut context = base.clone();
    let mut warnings = Vec::new();

    for &(key, section) in SLIDE_KEYS {
        let value = match report {
            None => placeholder_for(section),
            Some(report) => match report.get(section) {
                Some(extracted) if extracted.status == SectionStatus::Found => {
                    render_content(&extracted.content)
                }
                Some(extracted) => {
                    let reason = match &extracted.status {
                        SectionStatus::NotFound => "section not found in report".to_string(),
                        SectionStatus::Error(message) => message.clone(),
                        SectionStatus::Found => unreachable!(),
                    };
                    warn!(section, %reason, "slide falls back to placeholder");
                    warnings.push(ExtractionWarning { section, reason });
                    placeholder_for(section)
                }
                None => {
                    let reason = "section missing from extraction report".to_string();
                    warn!(section, %reason, "slide falls back to placeholder");
                    warnings.push(ExtractionWarning { section, reason });
                    placeholder_for(section)
                }
            },
        };
        context.insert(key, value);
    }

    SlideBundle { context, warnings }
}

/// One-line summary of which slides need manual authoring.
pub fn warning_summary(warnings: &[ExtractionWarning]) -> Option<String> {
    if warnings.is_empty() {
        return None;
    }
    let sections: Vec<_> = warnings.iter().map(|w| w.section).collect();
    Some(format!(
        "{} slide(s) need manual content: {}",
        warnings.len(),
        sections.join(", ")
    ))
}

fn render_content(content: &SectionContent) -> String {
    match content {
        SectionContent::Text(text) => text.clone(),
        SectionContent::Items(items) => items
            .iter()
            .map(|item| format!("\\item {item}"))
            .collect::<Vec<_>>()
            .join("\n        "),
        SectionContent::Empty => PLACEHOLDER.to_string(),
    }
}

/// Item-shaped slides sit inside an itemize environment, so their
/// placeholder must still be a list item.
fn placeholder_for(section: &str) -> String {
    match rule(section).map(|r| r.shape) {
        Some(ContentShape::Items { .. }) => format!("\\item {PLACEHOLDER}"),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reportsmith_extract::extract;

    fn base() -> RenderContext {
        let mut context = RenderContext::new();
        context.insert("TITLE", "Sample");
        context
    }

    #[test]
    fn found_items_become_itemize_entries() {
        let report = extract(
            "\\section{Objectives}\n\\begin{itemize}\n\\item One\n\\item Two\n\\end{itemize}\n",
        );
        let bundle = assemble(Some(&report), &base());

        let objectives = bundle.context.get("SLIDE_OBJECTIVES").unwrap();
        assert_eq!(objectives.render(), "\\item One\n        \\item Two");
    }

    #[test]
    fn missing_section_degrades_to_placeholder_with_warning() {
        let report = extract("\\section{Conclusion}\nDone.\n");
        let bundle = assemble(Some(&report), &base());

        let future = bundle.context.get("SLIDE_FUTURE_WORK").unwrap();
        assert_eq!(future.render(), format!("\\item {PLACEHOLDER}"));
        assert!(bundle
            .warnings
            .iter()
            .any(|warning| warning.section == "future-work"));
    }

    #[test]
    fn no_report_fills_every_key_without_warnings() {
        let bundle = assemble(None, &base());

        assert!(bundle.warnings.is_empty());
        for &(key, _) in SLIDE_KEYS {
            assert!(bundle.context.contains(key), "missing {key}");
        }
        assert_eq!(
            bundle.context.get("SLIDE_SUMMARY").unwrap().render(),
            PLACEHOLDER
        );
    }

    #[test]
    fn base_context_keys_survive_assembly() {
        let bundle = assemble(None, &base());
        assert_eq!(bundle.context.get("TITLE").unwrap().render(), "Sample");
    }

    #[test]
    fn summary_names_the_affected_sections() {
        let warnings = vec![
            ExtractionWarning {
                section: "objectives",
                reason: "section not found in report".to_string(),
            },
            ExtractionWarning {
                section: "future-work",
                reason: "section not found in report".to_string(),
            },
        ];

        assert_eq!(
            warning_summary(&warnings).unwrap(),
            "2 slide(s) need manual content: objectives, future-work"
        );
        assert_eq!(warning_summary(&[]), None);
    }
}
