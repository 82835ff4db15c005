//! Flattens a validated configuration into the render context consumed by the
//! template engine.
//!
//! The mapping is pure and deterministic: the same configuration always
//! produces the same ordered key set, with documented defaults standing in
//! for omitted optional fields so no template placeholder is ever undefined.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use reportsmith_config::Config;

/// Value bound to a context key.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Flag(bool),
    Number(f64),
}

impl Value {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Render the value as template output text.
    pub fn render(&self) -> String {
        match self {
            Value::Text(text) => text.clone(),
            Value::Flag(flag) => flag.to_string(),
            Value::Number(number) if number.fract() == 0.0 => format!("{}", *number as i64),
            Value::Number(number) => number.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Flag(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

/// Flat symbolic-name → value mapping handed to the renderer.
///
/// Backed by an ordered map so iteration (and therefore any derived output)
/// is deterministic across runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderContext {
    entries: BTreeMap<String, Value>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.entries.get(key).and_then(Value::as_flag)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }
}

/// Build the render context for a validated configuration.
pub fn build(config: &Config) -> RenderContext {
    let mut context = RenderContext::new();

    context.insert("TITLE", latex_escape(&config.project.title));
    context.insert("TITLE_SLUG", slugify(&config.project.title));
    context.insert("PROJECT_TYPE", config.project.kind.as_str());

    context.insert("AUTHOR_NAME", latex_escape(&config.author.name));
    context.insert("ROLL_NUMBER", latex_escape(&config.author.roll_number));
    context.insert(
        "EMAIL",
        latex_escape(config.author.email.as_deref().unwrap_or_default()),
    );

    let academic = &config.academic;
    context.insert("SUPERVISOR", latex_escape(&academic.supervisor));
    let co_supervisor = academic.co_supervisor.as_deref().unwrap_or_default();
    context.insert("CO_SUPERVISOR", latex_escape(co_supervisor));
    context.insert("HAS_CO_SUPERVISOR", !co_supervisor.is_empty());
    context.insert(
        "SUPERVISOR_DESIGNATION",
        latex_escape(&academic.supervisor_designation),
    );
    context.insert(
        "SUPERVISOR_DEPARTMENT",
        latex_escape(&academic.supervisor_department),
    );
    context.insert("DEPARTMENT", latex_escape(&academic.department));
    context.insert("UNIVERSITY", latex_escape(&academic.university));
    context.insert("DEGREE", latex_escape(&academic.degree));
    context.insert("SESSION", latex_escape(&academic.session));

    context.insert(
        "SUBMISSION_DATE",
        latex_escape(&config.dates.submission_date),
    );

    context.insert("FONT_SIZE", f64::from(config.formatting.font_size));
    context.insert("LINE_SPACING", config.formatting.line_spacing);
    context.insert(
        "BIBLIOGRAPHY_STYLE",
        config.formatting.bibliography_style.as_str(),
    );

    context.insert("INCLUDE_DECLARATION", config.content.include_declaration);
    context.insert("INCLUDE_CERTIFICATE", config.content.include_certificate);
    context.insert(
        "INCLUDE_ACKNOWLEDGMENTS",
        config.content.include_acknowledgments,
    );
    context.insert("INCLUDE_ABSTRACT", config.content.include_abstract);

    let logo_path = config
        .assets
        .logo_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    context.insert("HAS_LOGO", !logo_path.is_empty());
    context.insert("LOGO_PATH", logo_path);

    let presentation = &config.presentation;
    context.insert("THEME", latex_escape(&presentation.theme));
    context.insert("COLOR_SCHEME", latex_escape(&presentation.color_scheme));
    context.insert("ASPECT_RATIO", latex_escape(&presentation.aspect_ratio));
    // Beamer wants "169", not "16:9".
    context.insert(
        "ASPECT_RATIO_CODE",
        presentation.aspect_ratio.replace(':', ""),
    );
    context.insert(
        "PRESENTATION_DATE",
        latex_escape(
            presentation
                .presentation_date
                .as_deref()
                .unwrap_or(&config.dates.submission_date),
        ),
    );

    context
}

/// Escape LaTeX special characters in free-form text.
pub fn latex_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '&' => escaped.push_str("\\&"),
            '%' => escaped.push_str("\\%"),
            '$' => escaped.push_str("\\$"),
            '#' => escaped.push_str("\\#"),
            '_' => escaped.push_str("\\_"),
            '{' => escaped.push_str("\\{"),
            '}' => escaped.push_str("\\}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Derive a filesystem-safe slug from a project title: lowercase, runs of
/// non-alphanumeric characters collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut last_was_hyphen = false;

    for ch in title.chars().flat_map(|c| c.to_lowercase()) {
        if ch.is_alphanumeric() {
            slug.push(ch);
            last_was_hyphen = false;
        } else if !slug.is_empty() && !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_collapse_punctuation_runs() {
        assert_eq!(slugify("Test X"), "test-x");
        assert_eq!(slugify("  C++ & Rust: A Study!  "), "c-rust-a-study");
        assert_eq!(slugify("Already-Slugged"), "already-slugged");
    }

    #[test]
    fn escape_handles_every_special() {
        assert_eq!(latex_escape("A & B"), "A \\& B");
        assert_eq!(latex_escape("50%_done"), "50\\%\\_done");
        assert_eq!(latex_escape("x^2 ~ {y}"), "x\\textasciicircum{}2 \\textasciitilde{} \\{y\\}");
        assert_eq!(latex_escape("a\\b"), "a\\textbackslash{}b");
    }

    #[test]
    fn numbers_render_without_spurious_decimals() {
        assert_eq!(Value::Number(12.0).render(), "12");
        assert_eq!(Value::Number(1.5).render(), "1.5");
    }
}
