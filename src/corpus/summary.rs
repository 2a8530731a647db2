//! Human-written reference summaries used for labeling.

use std::{fmt, path::Path};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    corpus::{
        parser::{list_files, read_text},
        Corpus,
    },
    error::Result,
};

/// One model summary, a list of raw (trimmed) lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSummary {
    pub id: String,
    pub sentences: Vec<String>,
}

impl ReferenceSummary {
    pub fn new<T: AsRef<str>>(id: impl Into<String>, lines: &[T]) -> Self {
        Self {
            id: id.into(),
            sentences: lines.iter().map(|l| l.as_ref().trim().to_string()).collect(),
        }
    }
}

/// Load every file in `dir` whose name starts with `prefix` (case-insensitive).
pub fn load_summaries<P: AsRef<Path>>(dir: P, prefix: &str) -> Result<Vec<ReferenceSummary>> {
    let dir = dir.as_ref();
    let prefix = prefix.to_lowercase();
    let mut summaries = Vec::new();
    for path in list_files(dir)? {
        let matches = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase().starts_with(&prefix))
            .unwrap_or(false);
        if !matches {
            continue;
        }
        let content = read_text(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        summaries.push(ReferenceSummary::new(path.display().to_string(), &lines));
    }
    info!(dir = %dir.display(), prefix = %prefix, summaries = summaries.len(), "loaded reference summaries");
    Ok(summaries)
}

/// Every reference line of a topic, normalized for case-insensitive lookup.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    lines: IndexSet<String>,
}

impl ReferenceSet {
    pub fn new(summaries: &[ReferenceSummary]) -> Self {
        let lines = summaries
            .iter()
            .flat_map(|s| s.sentences.iter())
            .map(|l| normalize(l))
            .collect();
        Self { lines }
    }

    /// exact match after trim, ignoring case
    #[inline]
    pub fn contains(&self, text: &str) -> bool {
        self.lines.contains(&normalize(text))
    }

    /// 0/1 label
    #[inline]
    pub fn label(&self, text: &str) -> f64 {
        if self.contains(text) { 1.0 } else { 0.0 }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Where one summary line was found in the topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMatch {
    pub line: String,
    /// `(document id, sentence id)` of the first matching sentence
    pub found: Option<(String, i64)>,
}

/// Alignment of each summary line against the source sentences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub doc_num: usize,
    pub summaries: Vec<(String, Vec<LineMatch>)>,
}

impl SummaryReport {
    pub fn matched_num(&self) -> usize {
        self.summaries
            .iter()
            .flat_map(|(_, lines)| lines.iter())
            .filter(|m| m.found.is_some())
            .count()
    }
}

/// Cross-check summary lines against every sentence of the corpus (title included).
pub fn describe_summaries(corpus: &Corpus, summaries: &[ReferenceSummary]) -> SummaryReport {
    let summaries = summaries
        .iter()
        .map(|summary| {
            let lines = summary
                .sentences
                .iter()
                .map(|line| {
                    let wanted = normalize(line);
                    let found = corpus.documents.iter().find_map(|doc| {
                        doc.sentences()
                            .iter()
                            .find(|s| normalize(&s.text) == wanted)
                            .map(|s| (doc.id.clone(), s.id))
                    });
                    LineMatch {
                        line: line.clone(),
                        found,
                    }
                })
                .collect();
            (summary.id.clone(), lines)
        })
        .collect();
    SummaryReport {
        doc_num: corpus.doc_num(),
        summaries,
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "docs: {} summary: {}", self.doc_num, self.summaries.len())?;
        for (id, lines) in &self.summaries {
            writeln!(f, "=============> {id}")?;
            for m in lines {
                match &m.found {
                    Some((doc, sentence)) => writeln!(f, "{doc}: {sentence}")?,
                    None => writeln!(f, "notfound")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::test_util::document;

    #[test]
    fn reference_set_matches_case_insensitively() {
        let summaries = vec![
            ReferenceSummary::new("A", &["  The Storm Hit.  ", "other"]),
            ReferenceSummary::new("B", &["Rain fell"]),
        ];
        let set = ReferenceSet::new(&summaries);
        assert_eq!(set.len(), 3);
        assert!(set.contains("the storm hit."));
        assert!(set.contains("RAIN FELL  "));
        assert!(!set.contains("the storm"));
        assert_eq!(set.label("Other"), 1.0);
        assert_eq!(set.label("nothing"), 0.0);
    }

    #[test]
    fn describe_reports_first_match() {
        let corpus = Corpus::new(vec![
            document("d1", &["title one", "storm coast", "rain fell"]),
            document("d2", &["title two", "rain fell"]),
        ]);
        let summaries = vec![ReferenceSummary::new("S1", &["Rain Fell", "missing line"])];
        let report = describe_summaries(&corpus, &summaries);
        assert_eq!(report.doc_num, 2);
        let (_, lines) = &report.summaries[0];
        assert_eq!(lines[0].found, Some(("d1".to_string(), 2)));
        assert_eq!(lines[1].found, None);
        assert_eq!(report.matched_num(), 1);

        let printed = report.to_string();
        assert!(printed.starts_with("docs: 2 summary: 1\n=============> S1\nd1: 2\nnotfound\n"));
    }
}
