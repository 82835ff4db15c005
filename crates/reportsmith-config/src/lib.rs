//! Configuration primitives and validation for the reportsmith generator.
//!
//! A project description arrives as a nested TOML document (groups `project`,
//! `author`, `academic`, `dates`, plus optional `formatting`, `content`,
//! `assets`, `presentation`). Parsing produces an all-optional raw mirror;
//! `validate` checks the full schema in one pass, collecting every violation
//! so callers can present all problems together, and finalizes the raw input
//! into typed settings with documented defaults applied.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
const DATE_PATTERN: &str = r"^[A-Z][a-z]+\s+\d{4}$";

pub const DEFAULT_FONT_SIZE: u8 = 12;
pub const DEFAULT_LINE_SPACING: f64 = 1.5;
pub const DEFAULT_SUPERVISOR_DESIGNATION: &str = "Professor";
pub const DEFAULT_THEME: &str = "Madrid";
pub const DEFAULT_COLOR_SCHEME: &str = "blue";
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

/// Kind of document the generator should produce. Selects the template
/// manifest downstream.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DocumentType {
    Proposal,
    MajorProject,
    Presentation,
}

impl DocumentType {
    pub const ALL: &'static [DocumentType] = &[
        DocumentType::Proposal,
        DocumentType::MajorProject,
        DocumentType::Presentation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Proposal => "proposal",
            DocumentType::MajorProject => "major-project",
            DocumentType::Presentation => "presentation",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "proposal" => Ok(DocumentType::Proposal),
            "major-project" => Ok(DocumentType::MajorProject),
            "presentation" => Ok(DocumentType::Presentation),
            _ => Err(()),
        }
    }
}

/// Bibliography style accepted by the generated documents.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BibliographyStyle {
    Ieee,
    Apa,
    Acm,
}

impl BibliographyStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            BibliographyStyle::Ieee => "IEEE",
            BibliographyStyle::Apa => "APA",
            BibliographyStyle::Acm => "ACM",
        }
    }
}

impl fmt::Display for BibliographyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BibliographyStyle {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "IEEE" => Ok(BibliographyStyle::Ieee),
            "APA" => Ok(BibliographyStyle::Apa),
            "ACM" => Ok(BibliographyStyle::Acm),
            _ => Err(()),
        }
    }
}

/// Complete validated configuration with defaults applied.
#[derive(Clone, Debug)]
pub struct Config {
    pub project: ProjectSettings,
    pub author: AuthorSettings,
    pub academic: AcademicSettings,
    pub dates: DateSettings,
    pub formatting: FormattingSettings,
    pub content: ContentSettings,
    pub assets: AssetSettings,
    pub presentation: PresentationSettings,
}

#[derive(Clone, Debug)]
pub struct ProjectSettings {
    pub title: String,
    pub kind: DocumentType,
}

#[derive(Clone, Debug)]
pub struct AuthorSettings {
    pub name: String,
    pub roll_number: String,
    pub email: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AcademicSettings {
    pub supervisor: String,
    pub co_supervisor: Option<String>,
    pub supervisor_designation: String,
    pub supervisor_department: String,
    pub department: String,
    pub university: String,
    pub degree: String,
    pub session: String,
}

#[derive(Clone, Debug)]
pub struct DateSettings {
    pub submission_date: String,
}

#[derive(Clone, Debug)]
pub struct FormattingSettings {
    pub font_size: u8,
    pub line_spacing: f64,
    pub bibliography_style: BibliographyStyle,
}

#[derive(Clone, Debug)]
pub struct ContentSettings {
    pub include_declaration: bool,
    pub include_certificate: bool,
    pub include_acknowledgments: bool,
    pub include_abstract: bool,
}

#[derive(Clone, Debug, Default)]
pub struct AssetSettings {
    pub logo_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct PresentationSettings {
    pub theme: String,
    pub color_scheme: String,
    pub aspect_ratio: String,
    pub presentation_date: Option<String>,
    pub extract_from_report: bool,
    pub report_path: Option<PathBuf>,
}

/// Errors surfaced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ValidationErrors),
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

/// Single validation failure tied to a schema field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raw configuration as parsed from TOML. Every group and field is optional;
/// `validate` decides what is actually required.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub project: Option<RawProject>,
    #[serde(default)]
    pub author: Option<RawAuthor>,
    #[serde(default)]
    pub academic: Option<RawAcademic>,
    #[serde(default)]
    pub dates: Option<RawDates>,
    #[serde(default)]
    pub formatting: Option<RawFormatting>,
    #[serde(default)]
    pub content: Option<RawContent>,
    #[serde(default)]
    pub assets: Option<RawAssets>,
    #[serde(default)]
    pub presentation: Option<RawPresentation>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawProject {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawAcademic {
    #[serde(default)]
    pub supervisor: Option<String>,
    #[serde(default)]
    pub co_supervisor: Option<String>,
    #[serde(default)]
    pub supervisor_designation: Option<String>,
    #[serde(default)]
    pub supervisor_department: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawDates {
    #[serde(default)]
    pub submission_date: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawFormatting {
    #[serde(default)]
    pub font_size: Option<u8>,
    #[serde(default)]
    pub line_spacing: Option<f64>,
    #[serde(default)]
    pub bibliography_style: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawContent {
    #[serde(default)]
    pub include_declaration: Option<bool>,
    #[serde(default)]
    pub include_certificate: Option<bool>,
    #[serde(default)]
    pub include_acknowledgments: Option<bool>,
    #[serde(default)]
    pub include_abstract: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawAssets {
    #[serde(default)]
    pub logo_path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPresentation {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub color_scheme: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub presentation_date: Option<String>,
    #[serde(default)]
    pub extract_from_report: Option<bool>,
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

impl RawConfig {
    /// Parse a raw configuration from TOML text.
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a raw configuration from a file on disk.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&contents)
    }

    /// Validate the raw configuration against the schema and finalize it into
    /// typed settings.
    ///
    /// Violations are collected, never short-circuited: a config missing
    /// three fields reports exactly three errors, in schema order. The input
    /// is not mutated.
    pub fn validate(&self) -> Result<Config, ValidationErrors> {
        let mut errors = Vec::new();

        let project = self.project.clone().unwrap_or_default();
        let title = require(&project.title, "project.title", &mut errors);
        let kind = match require(&project.kind, "project.type", &mut errors) {
            Some(value) => match value.parse::<DocumentType>() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    errors.push(ValidationError::new(
                        "project.type",
                        format!(
                            "unknown document type '{value}' (expected one of: {})",
                            DocumentType::ALL
                                .iter()
                                .map(|kind| kind.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    ));
                    None
                }
            },
            None => None,
        };

        let author = self.author.clone().unwrap_or_default();
        let author_name = require(&author.name, "author.name", &mut errors);
        let roll_number = require(&author.roll_number, "author.roll_number", &mut errors);
        let email = optional(&author.email);
        if let Some(value) = &email {
            if !is_valid_email(value) {
                errors.push(ValidationError::new(
                    "author.email",
                    format!("invalid email address '{value}'"),
                ));
            }
        }

        let academic = self.academic.clone().unwrap_or_default();
        let supervisor = require(&academic.supervisor, "academic.supervisor", &mut errors);
        let department = require(&academic.department, "academic.department", &mut errors);
        let university = require(&academic.university, "academic.university", &mut errors);
        let degree = require(&academic.degree, "academic.degree", &mut errors);
        let session = require(&academic.session, "academic.session", &mut errors);

        // Certificate pages for the full report name the supervisor's post and
        // department; other document types fall back to defaults.
        let supervisor_designation;
        let supervisor_department;
        if kind == Some(DocumentType::MajorProject) {
            supervisor_designation = require(
                &academic.supervisor_designation,
                "academic.supervisor_designation",
                &mut errors,
            );
            supervisor_department = require(
                &academic.supervisor_department,
                "academic.supervisor_department",
                &mut errors,
            );
        } else {
            supervisor_designation = optional(&academic.supervisor_designation)
                .or_else(|| Some(DEFAULT_SUPERVISOR_DESIGNATION.to_string()));
            supervisor_department =
                optional(&academic.supervisor_department).or_else(|| department.clone());
        }

        let dates = self.dates.clone().unwrap_or_default();
        let submission_date = require(&dates.submission_date, "dates.submission_date", &mut errors);
        if let Some(value) = &submission_date {
            if !is_valid_month_year(value) {
                errors.push(ValidationError::new(
                    "dates.submission_date",
                    format!("expected 'Month Year' (e.g. 'November 2024'), got '{value}'"),
                ));
            }
        }

        let formatting = self.formatting.clone().unwrap_or_default();
        let font_size = formatting.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        if !matches!(font_size, 10 | 11 | 12) {
            errors.push(ValidationError::new(
                "formatting.font_size",
                format!("must be 10, 11 or 12 (received {font_size})"),
            ));
        }
        let line_spacing = formatting.line_spacing.unwrap_or(DEFAULT_LINE_SPACING);
        if ![1.0, 1.5, 2.0].contains(&line_spacing) {
            errors.push(ValidationError::new(
                "formatting.line_spacing",
                format!("must be 1.0, 1.5 or 2.0 (received {line_spacing})"),
            ));
        }
        let bibliography_style = match optional(&formatting.bibliography_style) {
            Some(value) => match value.parse::<BibliographyStyle>() {
                Ok(style) => style,
                Err(_) => {
                    errors.push(ValidationError::new(
                        "formatting.bibliography_style",
                        format!("must be IEEE, APA or ACM (received '{value}')"),
                    ));
                    BibliographyStyle::Ieee
                }
            },
            None => BibliographyStyle::Ieee,
        };

        let content = self.content.clone().unwrap_or_default();
        let assets = self.assets.clone().unwrap_or_default();
        let logo_path = assets
            .logo_path
            .filter(|path| !path.as_os_str().is_empty());
        if let Some(path) = &logo_path {
            if !path.is_file() {
                errors.push(ValidationError::new(
                    "assets.logo_path",
                    format!("logo file not found: {}", path.display()),
                ));
            }
        }

        let presentation = self.presentation.clone().unwrap_or_default();
        let extract_from_report = presentation.extract_from_report.unwrap_or(false);
        let report_path = presentation
            .report_path
            .clone()
            .filter(|path| !path.as_os_str().is_empty());
        if extract_from_report && report_path.is_none() {
            errors.push(ValidationError::new(
                "presentation.report_path",
                "required when presentation.extract_from_report is true",
            ));
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        // All `require` results are Some once the error list is empty.
        let fallback = String::new;
        Ok(Config {
            project: ProjectSettings {
                title: title.unwrap_or_else(fallback),
                kind: kind.unwrap_or(DocumentType::Proposal),
            },
            author: AuthorSettings {
                name: author_name.unwrap_or_else(fallback),
                roll_number: roll_number.unwrap_or_else(fallback),
                email,
            },
            academic: AcademicSettings {
                supervisor: supervisor.unwrap_or_else(fallback),
                co_supervisor: optional(&academic.co_supervisor),
                supervisor_designation: supervisor_designation.unwrap_or_else(fallback),
                supervisor_department: supervisor_department.unwrap_or_else(fallback),
                department: department.unwrap_or_else(fallback),
                university: university.unwrap_or_else(fallback),
                degree: degree.unwrap_or_else(fallback),
                session: session.unwrap_or_else(fallback),
            },
            dates: DateSettings {
                submission_date: submission_date.unwrap_or_else(fallback),
            },
            formatting: FormattingSettings {
                font_size,
                line_spacing,
                bibliography_style,
            },
            content: ContentSettings {
                include_declaration: content.include_declaration.unwrap_or(true),
                include_certificate: content.include_certificate.unwrap_or(true),
                include_acknowledgments: content.include_acknowledgments.unwrap_or(true),
                include_abstract: content.include_abstract.unwrap_or(true),
            },
            assets: AssetSettings { logo_path },
            presentation: PresentationSettings {
                theme: optional(&presentation.theme)
                    .unwrap_or_else(|| DEFAULT_THEME.to_string()),
                color_scheme: optional(&presentation.color_scheme)
                    .unwrap_or_else(|| DEFAULT_COLOR_SCHEME.to_string()),
                aspect_ratio: optional(&presentation.aspect_ratio)
                    .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string()),
                presentation_date: optional(&presentation.presentation_date),
                extract_from_report,
                report_path,
            },
        })
    }
}

impl Config {
    /// Load, parse and validate a configuration file in one step.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = RawConfig::from_path(path)?;
        raw.validate().map_err(ConfigError::Validation)
    }
}

fn require(
    value: &Option<String>,
    field: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match optional(value) {
        Some(value) => Some(value),
        None => {
            errors.push(ValidationError::new(field, "missing required field"));
            None
        }
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn is_valid_email(value: &str) -> bool {
    Regex::new(EMAIL_PATTERN)
        .expect("email pattern is a valid regex")
        .is_match(value)
}

fn is_valid_month_year(value: &str) -> bool {
    Regex::new(DATE_PATTERN)
        .expect("date pattern is a valid regex")
        .is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_email_shapes() {
        assert!(is_valid_email("a.b@iitj.ac.in"));
        assert!(is_valid_email("student+tag@example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn month_year_requires_capitalised_month() {
        assert!(is_valid_month_year("November 2024"));
        assert!(is_valid_month_year("May 2025"));
        assert!(!is_valid_month_year("november 2024"));
        assert!(!is_valid_month_year("2024-11"));
    }

    #[test]
    fn document_type_round_trips() {
        for kind in DocumentType::ALL {
            assert_eq!(kind.as_str().parse::<DocumentType>(), Ok(*kind));
        }
        assert!("thesis".parse::<DocumentType>().is_err());
    }
}
