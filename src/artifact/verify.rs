//! Consistency checks over a loaded artifact pair.

use super::ArtifactSet;
use crate::embedding::{is_unit_norm, l2_norm};
use crate::index::tokenize;
use std::collections::HashSet;

/// Problems beyond this count are tallied but not listed.
const MAX_LISTED_PROBLEMS: usize = 20;

/// Outcome of [`ArtifactSet::verify`].
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Number of vector records.
    pub records: usize,
    /// Number of distinct index tokens.
    pub tokens: usize,
    /// Total posting entries in the index.
    pub postings: usize,
    /// Embedding dimensions of the first record.
    pub dimensions: Option<usize>,
    /// Human-readable problem descriptions, capped.
    pub problems: Vec<String>,
    /// Total number of problems found.
    pub problem_count: usize,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.problem_count == 0
    }

    fn problem(&mut self, message: String) {
        self.problem_count += 1;
        if self.problems.len() < MAX_LISTED_PROBLEMS {
            self.problems.push(message);
        }
    }

    pub(super) fn check(set: &ArtifactSet) -> Self {
        let mut report = VerifyReport {
            records: set.records.len(),
            tokens: set.index.len(),
            postings: set.index.iter().map(|(_, ids)| ids.len()).sum(),
            dimensions: set.records.first().map(|r| r.embedding.len()),
            ..Default::default()
        };

        let dimensions = report.dimensions;

        // Record-side invariants.
        let mut record_tokens: Vec<HashSet<String>> = Vec::with_capacity(set.records.len());
        for (position, record) in set.records.iter().enumerate() {
            if record.info.id as usize != position {
                report.problem(format!(
                    "record at position {} has id {}",
                    position, record.info.id
                ));
            }
            if Some(record.embedding.len()) != dimensions {
                report.problem(format!(
                    "record {} has {} dimensions, expected {}",
                    position,
                    record.embedding.len(),
                    dimensions.unwrap_or_default()
                ));
            }
            if !is_unit_norm(&record.embedding) {
                report.problem(format!(
                    "record {} has embedding norm {:.6}",
                    position,
                    l2_norm(&record.embedding)
                ));
            }
            record_tokens.push(tokenize(&record.info.text).into_iter().collect());
        }

        // Every posting must point at a record whose text has the token.
        let mut indexed: HashSet<(&str, u32)> = HashSet::new();
        for (token, ids) in set.index.iter() {
            for &id in ids {
                indexed.insert((token, id));
                match record_tokens.get(id as usize) {
                    None => report.problem(format!(
                        "token '{}' points at missing record {}",
                        token, id
                    )),
                    Some(tokens) if !tokens.contains(token) => report.problem(format!(
                        "token '{}' points at record {} which does not contain it",
                        token, id
                    )),
                    Some(_) => {}
                }
            }
        }

        // Every token of every record must be indexed.
        for (position, tokens) in record_tokens.iter().enumerate() {
            for token in tokens {
                if !indexed.contains(&(token.as_str(), position as u32)) {
                    report.problem(format!(
                        "token '{}' of record {} is not indexed",
                        token, position
                    ));
                }
            }
        }

        report
    }
}
