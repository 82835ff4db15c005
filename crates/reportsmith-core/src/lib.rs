//! End-to-end generation pipeline.
//!
//! Ties the stages together: validated configuration → render context →
//! (for presentations) report extraction and slide assembly → template
//! rendering → output emission. Validation and rendering failures abort the
//! run before anything is written; extraction failures never do — they
//! degrade to placeholders and are reported back as warnings.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use reportsmith_config::{Config, ConfigError, DocumentType};
use reportsmith_context::{slugify, RenderContext};
use reportsmith_slides::{assemble, ExtractionWarning, SlideBundle};
use reportsmith_templates::{render, render_builtin, TemplateCatalog, TemplateError};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to write output under {path}: {source}")]
    Output { path: PathBuf, source: io::Error },
}

/// Knobs for one generation run.
#[derive(Debug, Default)]
pub struct GenerateOptions {
    /// Destination directory. Defaults to `output/<title-slug>`.
    pub output_dir: Option<PathBuf>,
    /// Directory holding a customised template set. Defaults to the
    /// embedded templates.
    pub template_root: Option<PathBuf>,
}

/// What a generation run produced.
#[derive(Debug)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub written: Vec<PathBuf>,
    /// Slides that fell back to placeholder content.
    pub warnings: Vec<ExtractionWarning>,
}

/// Generate the full output tree for a validated configuration.
pub fn generate(
    config: &Config,
    options: &GenerateOptions,
    catalog: &TemplateCatalog,
) -> Result<GenerateReport, GenerateError> {
    let base = reportsmith_context::build(config);
    let kind = config.project.kind;

    let (context, warnings) = match kind {
        DocumentType::Presentation => {
            let SlideBundle { context, warnings } = presentation_context(config, &base);
            (context, warnings)
        }
        _ => (base, Vec::new()),
    };

    let rendered = match &options.template_root {
        Some(root) => render(kind, &context, root, catalog)?,
        None => render_builtin(kind, &context, catalog)?,
    };

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| Path::new("output").join(slugify(&config.project.title)));

    let written = reportsmith_templates::write_output(&rendered, &output_dir).map_err(|source| {
        GenerateError::Output {
            path: output_dir.clone(),
            source,
        }
    })?;

    if let Some(summary) = reportsmith_slides::warning_summary(&warnings) {
        warn!(%summary, "extraction left placeholder slides");
    }
    info!(
        kind = %kind,
        output = %output_dir.display(),
        files = written.len(),
        "generation complete"
    );

    Ok(GenerateReport {
        output_dir,
        written,
        warnings,
    })
}

/// Load, validate, and generate from a configuration file.
pub fn generate_from_path(
    config_path: &Path,
    options: &GenerateOptions,
    catalog: &TemplateCatalog,
) -> Result<GenerateReport, GenerateError> {
    let config = Config::load(config_path)?;
    generate(&config, options, catalog)
}

/// Build the slide context, extracting from the source report when asked.
/// A missing or unreadable report is downgraded to placeholder slides.
fn presentation_context(config: &Config, base: &RenderContext) -> SlideBundle {
    if !config.presentation.extract_from_report {
        return assemble(None, base);
    }

    // Validation guarantees the path when extraction is on.
    let Some(report_path) = config.presentation.report_path.as_deref() else {
        return assemble(None, base);
    };

    match reportsmith_extract::extract_from_path(report_path) {
        Ok(report) => assemble(Some(&report), base),
        Err(err) => {
            warn!(
                report = %report_path.display(),
                error = %err,
                "report unreadable, slides fall back to placeholders"
            );
            let mut bundle = assemble(None, base);
            bundle.warnings.push(ExtractionWarning {
                section: "report",
                reason: err.to_string(),
            });
            bundle
        }
    }
}
