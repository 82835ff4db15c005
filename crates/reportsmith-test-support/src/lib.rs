//! Shared fixtures for reportsmith crates.

use reportsmith_config::{Config, RawConfig};

/// A complete, valid configuration TOML for the given document type, with
/// `extra` appended for per-test overrides.
pub fn config_toml(document_type: &str, extra: &str) -> String {
    format!(
        r#"
[project]
title = "Test X"
type = "{document_type}"

[author]
name = "A B"
roll_number = "R1"

[academic]
supervisor = "Dr. S"
supervisor_designation = "Associate Professor"
supervisor_department = "Computer Science and Engineering"
department = "Computer Science and Engineering"
university = "Indian Institute of Technology Jodhpur"
degree = "M.Tech."
session = "2024-25"

[dates]
submission_date = "May 2025"

{extra}
"#
    )
}

/// Returns a validated baseline configuration for tests.
pub fn baseline_config(document_type: &str) -> Config {
    baseline_config_with(document_type, "")
}

/// Baseline configuration with extra TOML appended before validation.
pub fn baseline_config_with(document_type: &str, extra: &str) -> Config {
    RawConfig::from_str(&config_toml(document_type, extra))
        .expect("baseline config parses")
        .validate()
        .expect("baseline config validates")
}

/// A small but structurally complete LaTeX report, suitable for exercising
/// section extraction end to end.
pub const SAMPLE_REPORT: &str = r"\documentclass{report}
\begin{document}

\chapter{Introduction}

\section{Motivation}
Test X addresses a gap in automated reporting.

\section{Problem Statement}
Manual slide authoring duplicates report content.

\section{Objectives}
\begin{itemize}
    \item Reuse report content in slides
    \item Keep slides terse
    \item Warn about gaps
\end{itemize}

\chapter{Methodology}
Sections are located by heading aliases and reduced to slide-sized text.

\chapter{Conclusion}
Extraction makes derived presentations cheap.

\end{document}
";
