//! Manifest-driven LaTeX template rendering.
//!
//! Each document type declares an ordered manifest of template resources.
//! Rendering reads every non-gated resource from a template root on disk,
//! parses it into an instruction stream (cached per content checksum in a
//! [`TemplateCatalog`]), substitutes `\VAR{KEY}` placeholders and evaluates
//! `\BLOCK{if FLAG}` conditionals against a [`RenderContext`], and returns
//! the rendered files in manifest order.
//!
//! Default template sets are embedded in the crate; [`materialize_builtin`]
//! writes one to disk for callers that want to customise it.

mod builtin;
mod catalog;
mod manifest;
mod output;
mod template;

use std::fs;
use std::path::{Path, PathBuf};

use reportsmith_config::DocumentType;
use reportsmith_context::RenderContext;
use tracing::debug;

pub use builtin::{builtin_set, builtin_source, materialize_builtin, BuiltinFile};
pub use catalog::{content_checksum, Checksum, TemplateCatalog};
pub use manifest::{manifest, ManifestEntry};
pub use output::{atomic_write, write_output};
pub use template::{Instruction, Template, TemplateError};

/// One rendered output file, addressed relative to the output directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderedFile {
    pub relative_path: PathBuf,
    pub contents: String,
}

/// Render the full template set for `kind` against `context`.
///
/// Templates are read from `template_root` using the manifest's relative
/// paths. Manifest entries whose gate flag is off in the context are skipped.
/// Fails on the first unreadable or malformed template, or on the first
/// placeholder whose key is absent from the context.
pub fn render(
    kind: DocumentType,
    context: &RenderContext,
    template_root: &Path,
    catalog: &TemplateCatalog,
) -> Result<Vec<RenderedFile>, TemplateError> {
    let mut rendered = Vec::new();

    for entry in manifest(kind) {
        if let Some(gate) = entry.gate {
            if context.flag(gate) != Some(true) {
                debug!(kind = %kind, path = entry.path, gate, "skipping gated template");
                continue;
            }
        }

        let source_path = template_root.join(entry.path);
        let source = fs::read_to_string(&source_path).map_err(|source| TemplateError::Io {
            path: source_path.clone(),
            source,
        })?;

        let template = catalog.parse_cached(kind, entry.path, &source)?;
        let contents = template.render(context)?;

        rendered.push(RenderedFile {
            relative_path: PathBuf::from(entry.path),
            contents,
        });
    }

    debug!(kind = %kind, files = rendered.len(), "rendered template set");
    Ok(rendered)
}

/// Render the embedded template set for `kind`, without touching disk.
pub fn render_builtin(
    kind: DocumentType,
    context: &RenderContext,
    catalog: &TemplateCatalog,
) -> Result<Vec<RenderedFile>, TemplateError> {
    let mut rendered = Vec::new();

    for entry in manifest(kind) {
        if let Some(gate) = entry.gate {
            if context.flag(gate) != Some(true) {
                debug!(kind = %kind, path = entry.path, gate, "skipping gated template");
                continue;
            }
        }

        let source = builtin::builtin_source(kind, entry.path).ok_or_else(|| TemplateError::Io {
            path: PathBuf::from(entry.path),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no embedded template for manifest entry",
            ),
        })?;

        let template = catalog.parse_cached(kind, entry.path, source)?;
        let contents = template.render(context)?;

        rendered.push(RenderedFile {
            relative_path: PathBuf::from(entry.path),
            contents,
        });
    }

    debug!(kind = %kind, files = rendered.len(), "rendered embedded template set");
    Ok(rendered)
}
