//! Fixed template manifests per document type.
//!
//! A manifest is the declared, ordered list of template resources that make
//! up a document type. Entries may be gated on an `include_*` context flag;
//! gated entries are skipped entirely when the flag is off, and the root
//! template guards its matching `\input` lines with the same flag so the
//! rendered document never references a skipped file.

use reportsmith_config::DocumentType;

/// One template resource within a document type's manifest.
#[derive(Clone, Copy, Debug)]
pub struct ManifestEntry {
    /// Path relative to the template root, also the output-relative path.
    pub path: &'static str,
    /// Context flag that must be `true` for the entry to be rendered.
    pub gate: Option<&'static str>,
}

const fn entry(path: &'static str) -> ManifestEntry {
    ManifestEntry { path, gate: None }
}

const fn gated(path: &'static str, gate: &'static str) -> ManifestEntry {
    ManifestEntry {
        path,
        gate: Some(gate),
    }
}

const PROPOSAL: &[ManifestEntry] = &[
    entry("proposal.tex"),
    gated("sections/abstract.tex", "INCLUDE_ABSTRACT"),
    entry("sections/introduction.tex"),
    entry("sections/literature-review.tex"),
    entry("sections/objectives.tex"),
    entry("sections/methodology.tex"),
    entry("sections/work-plan.tex"),
    entry("references.bib"),
];

const MAJOR_PROJECT: &[ManifestEntry] = &[
    entry("main.tex"),
    gated("frontmatter/declaration.tex", "INCLUDE_DECLARATION"),
    gated("frontmatter/certificate.tex", "INCLUDE_CERTIFICATE"),
    gated("frontmatter/acknowledgments.tex", "INCLUDE_ACKNOWLEDGMENTS"),
    gated("frontmatter/abstract.tex", "INCLUDE_ABSTRACT"),
    entry("chapters/introduction.tex"),
    entry("chapters/literature-review.tex"),
    entry("chapters/methodology.tex"),
    entry("chapters/implementation.tex"),
    entry("chapters/results.tex"),
    entry("chapters/conclusion.tex"),
    entry("references.bib"),
];

const PRESENTATION: &[ManifestEntry] = &[entry("slides.tex")];

/// Return the manifest for a document type, in declared render order.
pub fn manifest(kind: DocumentType) -> &'static [ManifestEntry] {
    match kind {
        DocumentType::Proposal => PROPOSAL,
        DocumentType::MajorProject => MAJOR_PROJECT,
        DocumentType::Presentation => PRESENTATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_starts_with_its_root_document() {
        assert_eq!(manifest(DocumentType::Proposal)[0].path, "proposal.tex");
        assert_eq!(manifest(DocumentType::MajorProject)[0].path, "main.tex");
        assert_eq!(manifest(DocumentType::Presentation)[0].path, "slides.tex");
    }

    #[test]
    fn gates_only_reference_include_flags() {
        for kind in DocumentType::ALL {
            for entry in manifest(*kind) {
                if let Some(gate) = entry.gate {
                    assert!(gate.starts_with("INCLUDE_"), "unexpected gate {gate}");
                }
            }
        }
    }
}
