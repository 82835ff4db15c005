//! The fixed table of logical sections recognized in source reports.
//!
//! Each rule names a logical section, the heading spellings that identify it,
//! and the shape its content is reduced to. Rules are ordered the way the
//! sections appear in a conventionally structured report; extraction walks
//! them in this order with a forward-only cursor.

/// How a claimed span is reduced for slide use.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentShape {
    /// First paragraph of the span, truncated to at most `max_chars`.
    Paragraph { max_chars: usize },
    /// List items in the span, at most `max_items` of them.
    Items { max_items: usize },
}

/// One logical section the extractor knows how to locate.
#[derive(Clone, Copy, Debug)]
pub struct SectionRule {
    pub name: &'static str,
    /// Recognized heading titles, matched case-insensitively.
    pub aliases: &'static [&'static str],
    pub shape: ContentShape,
}

const fn paragraph(
    name: &'static str,
    aliases: &'static [&'static str],
    max_chars: usize,
) -> SectionRule {
    SectionRule {
        name,
        aliases,
        shape: ContentShape::Paragraph { max_chars },
    }
}

const fn items(
    name: &'static str,
    aliases: &'static [&'static str],
    max_items: usize,
) -> SectionRule {
    SectionRule {
        name,
        aliases,
        shape: ContentShape::Items { max_items },
    }
}

pub static SECTION_RULES: &[SectionRule] = &[
    paragraph("motivation", &["Motivation", "Introduction", "Overview"], 400),
    paragraph("problem-statement", &["Problem Statement", "Problem"], 300),
    items(
        "objectives",
        &["Objectives", "Research Objectives", "Project Objectives", "Goals"],
        5,
    ),
    paragraph(
        "methodology",
        &["Methodology", "Proposed Solution", "Approach", "Design"],
        400,
    ),
    items("technologies", &["Technologies", "Tools"], 5),
    items("implementation", &["Implementation", "Results", "Experiments"], 4),
    paragraph("evaluation", &["Evaluation", "Results"], 300),
    paragraph("summary", &["Conclusion", "Summary"], 400),
    items("future-work", &["Future Work", "Future Scope"], 4),
];

/// Look up a rule by its logical name.
pub fn rule(name: &str) -> Option<&'static SectionRule> {
    SECTION_RULES.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names_are_unique() {
        for (i, a) in SECTION_RULES.iter().enumerate() {
            for b in &SECTION_RULES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn lookup_finds_declared_rules() {
        assert!(rule("objectives").is_some());
        assert!(rule("future-work").is_some());
        assert!(rule("acknowledgments").is_none());
    }
}
