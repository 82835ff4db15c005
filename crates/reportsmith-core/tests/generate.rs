use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use reportsmith_core::{generate, generate_from_path, GenerateError, GenerateOptions};
use reportsmith_templates::TemplateCatalog;
use reportsmith_test_support::{baseline_config, baseline_config_with, config_toml, SAMPLE_REPORT};

fn options(output_dir: PathBuf) -> GenerateOptions {
    GenerateOptions {
        output_dir: Some(output_dir),
        template_root: None,
    }
}

#[test]
fn proposal_end_to_end_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let catalog = TemplateCatalog::new();

    let report = generate(&baseline_config("proposal"), &options(out.clone()), &catalog).unwrap();

    assert_eq!(report.output_dir, out);
    assert!(report.warnings.is_empty());

    let expected: Vec<_> = [
        "proposal.tex",
        "sections/abstract.tex",
        "sections/introduction.tex",
        "sections/literature-review.tex",
        "sections/objectives.tex",
        "sections/methodology.tex",
        "sections/work-plan.tex",
        "references.bib",
    ]
    .iter()
    .map(|path| out.join(path))
    .collect();
    assert_eq!(report.written, expected);

    let main = fs::read_to_string(out.join("proposal.tex")).unwrap();
    assert!(main.contains("Test X"));
    assert!(main.contains("\\documentclass[12pt,a4paper]"));
    assert!(main.contains("\\setstretch{1.5}"));
    assert!(main.contains("\\bibliographystyle{IEEE}"));
    assert!(!main.contains("\\VAR{"));

    let abstract_file = fs::read_to_string(out.join("sections/abstract.tex")).unwrap();
    assert!(abstract_file.contains("[TODO"));
}

#[test]
fn disabled_content_flags_shrink_the_file_set() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let catalog = TemplateCatalog::new();

    let config = baseline_config_with("proposal", "[content]\ninclude_abstract = false");
    let report = generate(&config, &options(out.clone()), &catalog).unwrap();

    assert!(!out.join("sections/abstract.tex").exists());
    assert!(report
        .written
        .iter()
        .all(|path| !path.ends_with("abstract.tex")));
}

#[test]
fn presentation_extracts_slides_from_a_report() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("main.tex");
    fs::write(&report_path, SAMPLE_REPORT).unwrap();

    let out = dir.path().join("out");
    let catalog = TemplateCatalog::new();
    let config = baseline_config_with(
        "presentation",
        &format!(
            "[presentation]\nextract_from_report = true\nreport_path = \"{}\"",
            report_path.display()
        ),
    );

    let report = generate(&config, &options(out.clone()), &catalog).unwrap();

    let slides = fs::read_to_string(out.join("slides.tex")).unwrap();
    assert!(slides.contains("Reuse report content in slides"));
    assert!(slides.contains("Test X addresses a gap"));
    assert!(slides.contains("[TODO: Add content]"));

    // The sample report has no technologies or future-work sections.
    let flagged: Vec<_> = report.warnings.iter().map(|w| w.section).collect();
    assert!(flagged.contains(&"technologies"));
    assert!(flagged.contains(&"future-work"));
}

#[test]
fn unreadable_report_degrades_to_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let catalog = TemplateCatalog::new();
    let config = baseline_config_with(
        "presentation",
        &format!(
            "[presentation]\nextract_from_report = true\nreport_path = \"{}\"",
            dir.path().join("missing.tex").display()
        ),
    );

    let report = generate(&config, &options(out.clone()), &catalog).unwrap();

    let slides = fs::read_to_string(out.join("slides.tex")).unwrap();
    assert!(slides.contains("[TODO: Add content]"));
    assert!(report.warnings.iter().any(|w| w.section == "report"));
}

#[test]
fn generation_is_idempotent_across_output_locations() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = TemplateCatalog::new();
    let config = baseline_config("major-project");

    let first = generate(&config, &options(dir.path().join("a")), &catalog).unwrap();
    let second = generate(&config, &options(dir.path().join("b")), &catalog).unwrap();

    assert_eq!(first.written.len(), second.written.len());
    for (a, b) in first.written.iter().zip(&second.written) {
        assert_eq!(
            fs::read_to_string(a).unwrap(),
            fs::read_to_string(b).unwrap(),
            "{} differs from {}",
            a.display(),
            b.display()
        );
    }
}

#[test]
fn invalid_config_file_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, config_toml("proposal", "").replace("title = \"Test X\"\n", ""))
        .unwrap();

    let out = dir.path().join("out");
    let catalog = TemplateCatalog::new();
    let err = generate_from_path(&config_path, &options(out.clone()), &catalog).unwrap_err();

    assert!(matches!(err, GenerateError::Config(_)));
    assert!(err.to_string().contains("project.title"));
    assert!(!out.exists(), "output written despite validation failure");
}

#[test]
fn custom_template_root_overrides_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("templates");
    reportsmith_templates::materialize_builtin(
        reportsmith_config::DocumentType::Presentation,
        &templates,
    )
    .unwrap();
    fs::write(
        templates.join("slides.tex"),
        "\\title{\\VAR{TITLE}}\n\\VAR{SLIDE_SUMMARY}\n",
    )
    .unwrap();

    let out = dir.path().join("out");
    let catalog = TemplateCatalog::new();
    let config = baseline_config("presentation");
    let opts = GenerateOptions {
        output_dir: Some(out.clone()),
        template_root: Some(templates),
    };

    generate(&config, &opts, &catalog).unwrap();

    let slides = fs::read_to_string(out.join("slides.tex")).unwrap();
    assert_eq!(slides, "\\title{Test X}\n[TODO: Add content]\n");
}
