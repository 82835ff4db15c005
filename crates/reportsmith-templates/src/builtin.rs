//! Built-in template sets embedded in the binary.
//!
//! Each document type ships a complete default template tree. Callers that
//! want to customise templates materialize a set to disk, edit the copies,
//! and point rendering at the edited directory.

use std::io;
use std::path::Path;

use reportsmith_config::DocumentType;

use crate::output::atomic_write;

/// Relative path plus embedded source for one built-in template file.
pub struct BuiltinFile {
    pub path: &'static str,
    pub source: &'static str,
}

const fn file(path: &'static str, source: &'static str) -> BuiltinFile {
    BuiltinFile { path, source }
}

static PROPOSAL: &[BuiltinFile] = &[
    file("proposal.tex", include_str!("../builtin/proposal/proposal.tex")),
    file(
        "sections/abstract.tex",
        include_str!("../builtin/proposal/sections/abstract.tex"),
    ),
    file(
        "sections/introduction.tex",
        include_str!("../builtin/proposal/sections/introduction.tex"),
    ),
    file(
        "sections/literature-review.tex",
        include_str!("../builtin/proposal/sections/literature-review.tex"),
    ),
    file(
        "sections/objectives.tex",
        include_str!("../builtin/proposal/sections/objectives.tex"),
    ),
    file(
        "sections/methodology.tex",
        include_str!("../builtin/proposal/sections/methodology.tex"),
    ),
    file(
        "sections/work-plan.tex",
        include_str!("../builtin/proposal/sections/work-plan.tex"),
    ),
    file(
        "references.bib",
        include_str!("../builtin/proposal/references.bib"),
    ),
];

static MAJOR_PROJECT: &[BuiltinFile] = &[
    file("main.tex", include_str!("../builtin/major-project/main.tex")),
    file(
        "frontmatter/declaration.tex",
        include_str!("../builtin/major-project/frontmatter/declaration.tex"),
    ),
    file(
        "frontmatter/certificate.tex",
        include_str!("../builtin/major-project/frontmatter/certificate.tex"),
    ),
    file(
        "frontmatter/acknowledgments.tex",
        include_str!("../builtin/major-project/frontmatter/acknowledgments.tex"),
    ),
    file(
        "frontmatter/abstract.tex",
        include_str!("../builtin/major-project/frontmatter/abstract.tex"),
    ),
    file(
        "chapters/introduction.tex",
        include_str!("../builtin/major-project/chapters/introduction.tex"),
    ),
    file(
        "chapters/literature-review.tex",
        include_str!("../builtin/major-project/chapters/literature-review.tex"),
    ),
    file(
        "chapters/methodology.tex",
        include_str!("../builtin/major-project/chapters/methodology.tex"),
    ),
    file(
        "chapters/implementation.tex",
        include_str!("../builtin/major-project/chapters/implementation.tex"),
    ),
    file(
        "chapters/results.tex",
        include_str!("../builtin/major-project/chapters/results.tex"),
    ),
    file(
        "chapters/conclusion.tex",
        include_str!("../builtin/major-project/chapters/conclusion.tex"),
    ),
    file(
        "references.bib",
        include_str!("../builtin/major-project/references.bib"),
    ),
];

static PRESENTATION: &[BuiltinFile] = &[file(
    "slides.tex",
    include_str!("../builtin/presentation/slides.tex"),
)];

/// The embedded template set for `kind`.
pub fn builtin_set(kind: DocumentType) -> &'static [BuiltinFile] {
    match kind {
        DocumentType::Proposal => PROPOSAL,
        DocumentType::MajorProject => MAJOR_PROJECT,
        DocumentType::Presentation => PRESENTATION,
    }
}

/// Look up one embedded template source by its manifest-relative path.
pub fn builtin_source(kind: DocumentType, path: &str) -> Option<&'static str> {
    builtin_set(kind)
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.source)
}

/// Write the embedded template set for `kind` under `dir`, preserving the
/// relative layout the manifest expects.
pub fn materialize_builtin(kind: DocumentType, dir: &Path) -> io::Result<()> {
    for f in builtin_set(kind) {
        atomic_write(&dir.join(f.path), f.source)?;
    }
    Ok(())
}
