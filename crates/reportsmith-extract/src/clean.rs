//! LaTeX-to-prose cleaning for extracted spans.

use regex::Regex;

/// Compiled cleaning patterns. Build one per extraction run and reuse it for
/// every span.
pub struct Cleaner {
    citations: Regex,
    cross_refs: Regex,
    emphasis: Regex,
    hyperlinks: Regex,
    bare_urls: Regex,
    comments: Regex,
    graphics: Regex,
    floats: Regex,
    whitespace: Regex,
}

impl Cleaner {
    pub fn new() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("cleaning pattern is valid");
        Cleaner {
            citations: compile(r"\\citep?\{[^}]*\}"),
            cross_refs: compile(r"\\(?:ref|label)\{[^}]*\}"),
            emphasis: compile(r"\\(?:textbf|textit|emph|texttt)\{([^}]*)\}"),
            hyperlinks: compile(r"\\href\{[^}]*\}\{([^}]*)\}"),
            bare_urls: compile(r"\\url\{[^}]*\}"),
            comments: compile(r"(?m)(^|[^\\])%.*$"),
            graphics: compile(r"\\includegraphics[^{]*\{[^}]*\}"),
            floats: compile(r"(?s)\\begin\{(figure|table)\}.*?\\end\{(figure|table)\}"),
            whitespace: compile(r"\s+"),
        }
    }

    /// Strip markup from `text`, leaving plain prose with collapsed
    /// whitespace.
    pub fn clean(&self, text: &str) -> String {
        let text = self.floats.replace_all(text, "");
        let text = self.graphics.replace_all(&text, "");
        let text = self.comments.replace_all(&text, "$1");
        let text = self.citations.replace_all(&text, "");
        let text = self.cross_refs.replace_all(&text, "");
        let text = self.hyperlinks.replace_all(&text, "$1");
        let text = self.emphasis.replace_all(&text, "$1");
        let text = self.bare_urls.replace_all(&text, "");
        self.whitespace.replace_all(&text, " ").trim().to_string()
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_citations_and_labels() {
        let cleaner = Cleaner::new();
        assert_eq!(
            cleaner.clean("Caches help \\cite{smith2020}.\\label{sec:intro}"),
            "Caches help ."
        );
    }

    #[test]
    fn unwraps_emphasis_and_links() {
        let cleaner = Cleaner::new();
        assert_eq!(
            cleaner.clean("\\textbf{fast} lookups via \\href{https://x.test}{the index}"),
            "fast lookups via the index"
        );
    }

    #[test]
    fn drops_floats_comments_and_collapses_whitespace() {
        let cleaner = Cleaner::new();
        let text = "before % trailing note\n\\begin{figure}\nstuff\n\\end{figure}\n  after";
        assert_eq!(cleaner.clean(text), "before after");
    }
}
