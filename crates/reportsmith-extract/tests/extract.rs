use pretty_assertions::assert_eq;

use reportsmith_extract::{
    extract, extract_from_path, ExtractError, SectionContent, SectionStatus,
};

const REPORT: &str = r"\documentclass{report}
\begin{document}

\chapter{Introduction}

\section{Motivation}
Modern storage engines spend most of their time waiting on cache
misses \cite{smith2020}. Better replacement policies directly reduce
tail latency.

\section{Problem Statement}
Existing policies assume uniform access costs, which does not hold for
tiered storage.

\section{Objectives}
\begin{itemize}
    \item Design a cost-aware replacement policy
    \item Implement it inside an embedded key-value store
    \item Evaluate against LRU and ARC baselines
\end{itemize}

\chapter{Methodology}
The policy tracks per-block fetch cost alongside recency and evicts by
expected refetch cost rather than age alone.

\subsection{Technologies}
\begin{itemize}
    \item \textbf{Rust} for the storage engine
    \item RocksDB as the comparison baseline
\end{itemize}

\chapter{Results}

\subsection{Implementation}
\begin{itemize}
    \item Cost tracking with constant-space sketches
    \item Pluggable eviction interface
    \item Replay harness for production traces
    \item Metrics exporter
    \item Extra item beyond the slide budget
\end{itemize}

\subsection{Evaluation}
On production traces the policy cuts p99 latency by 31\% relative to
LRU. See Figure~\ref{fig:p99}.

\chapter{Conclusion}
Cost-aware eviction is practical and measurably better on tiered
storage.

\end{document}
";

#[test]
fn objectives_round_trip_in_source_order() {
    let report = extract(REPORT);
    let objectives = report.get("objectives").unwrap();

    assert_eq!(objectives.status, SectionStatus::Found);
    assert_eq!(
        objectives.content,
        SectionContent::Items(vec![
            "Design a cost-aware replacement policy".to_string(),
            "Implement it inside an embedded key-value store".to_string(),
            "Evaluate against LRU and ARC baselines".to_string(),
        ])
    );
}

#[test]
fn paragraphs_are_cleaned_of_markup() {
    let report = extract(REPORT);

    let motivation = report.get("motivation").unwrap();
    match &motivation.content {
        SectionContent::Text(text) => {
            assert!(text.starts_with("Modern storage engines"));
            assert!(!text.contains("\\cite"), "citation survived cleaning");
        }
        other => panic!("expected paragraph, got {other:?}"),
    }

    let evaluation = report.get("evaluation").unwrap();
    match &evaluation.content {
        SectionContent::Text(text) => {
            assert!(!text.contains("\\ref"), "cross-reference survived cleaning")
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn item_lists_respect_per_section_limits() {
    let report = extract(REPORT);
    let implementation = report.get("implementation").unwrap();

    match &implementation.content {
        SectionContent::Items(items) => {
            assert_eq!(items.len(), 4);
            assert!(!items.iter().any(|item| item.contains("Extra item")));
        }
        other => panic!("expected items, got {other:?}"),
    }
}

#[test]
fn missing_section_is_reported_not_found() {
    let report = extract(REPORT);
    let future_work = report.get("future-work").unwrap();

    assert_eq!(future_work.status, SectionStatus::NotFound);
    assert_eq!(future_work.content, SectionContent::Empty);
}

#[test]
fn emphasis_is_unwrapped_in_items() {
    let report = extract(REPORT);
    let technologies = report.get("technologies").unwrap();

    match &technologies.content {
        SectionContent::Items(items) => {
            assert_eq!(items[0], "Rust for the storage engine");
        }
        other => panic!("expected items, got {other:?}"),
    }
}

#[test]
fn abstract_substitutes_for_a_missing_motivation_heading() {
    let text = r"\begin{document}
\begin{abstract}
We study cost-aware cache eviction for tiered storage.
\end{abstract}
\end{document}
";
    let report = extract(text);
    let motivation = report.get("motivation").unwrap();

    assert_eq!(motivation.status, SectionStatus::Found);
    assert_eq!(
        motivation.content,
        SectionContent::Text("We study cost-aware cache eviction for tiered storage.".to_string())
    );
}

#[test]
fn matched_heading_with_no_items_is_an_error_not_a_panic() {
    let text = r"\section{Objectives}
Prose instead of a list.
\section{Next}
";
    let report = extract(text);
    let objectives = report.get("objectives").unwrap();

    assert!(matches!(objectives.status, SectionStatus::Error(_)));
    assert_eq!(objectives.content, SectionContent::Empty);
}

#[test]
fn extraction_is_a_single_forward_pass() {
    // "Results" appears once; the implementation rule claims it first, so
    // the later evaluation rule cannot re-claim the same heading.
    let text = r"\section{Results}
\begin{itemize}
\item Shipped the prototype
\end{itemize}
\section{Conclusion}
Done.
";
    let report = extract(text);

    assert_eq!(
        report.get("implementation").unwrap().status,
        SectionStatus::Found
    );
    assert_eq!(
        report.get("evaluation").unwrap().status,
        SectionStatus::NotFound
    );
    assert_eq!(report.get("summary").unwrap().status, SectionStatus::Found);
}

#[test]
fn text_after_end_document_is_ignored() {
    let text = "\\section{Conclusion}\nReal summary.\n\\end{document}\n\\section{Objectives}\n\\begin{itemize}\\item ghost\\end{itemize}\n";
    let report = extract(text);

    assert_eq!(report.get("summary").unwrap().status, SectionStatus::Found);
    assert_eq!(
        report.get("objectives").unwrap().status,
        SectionStatus::NotFound
    );
}

#[test]
fn unreadable_report_surfaces_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-report.tex");

    let err = extract_from_path(&missing).unwrap_err();
    let ExtractError::Io { path, .. } = err;
    assert_eq!(path, missing);
}
