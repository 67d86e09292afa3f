//! Ranking lookup: maps sentiment labels to their numeric rank.
//!
//! Used twice by the review workflow: once to list the labels a classifier
//! may choose from, and once to turn the label it returned back into a rank.

use crate::models::movie::{MovieRanking, Ranking, UNRANKED_VALUE};

/// Rank assigned to a label that matches no stored ranking.
pub const UNMATCHED_RANKING_VALUE: i32 = 0;

/// A snapshot of the stored rankings, in stored (insertion) order.
#[derive(Debug, Clone, Default)]
pub struct RankingLookup {
    rankings: Vec<Ranking>,
}

impl RankingLookup {
    pub fn new(rankings: Vec<Ranking>) -> Self {
        Self { rankings }
    }

    /// Names a classifier may answer with. Entries flagged unranked or
    /// carrying the sentinel value are skipped; stored order is kept.
    pub fn active_names(&self) -> Vec<&str> {
        self.rankings
            .iter()
            .filter(|r| !r.unranked && r.ranking_value != UNRANKED_VALUE)
            .map(|r| r.ranking_name.as_str())
            .collect()
    }

    /// Resolve a label to its rank. Matching is exact and case-sensitive.
    ///
    /// Never fails: a label with no stored ranking keeps its name and gets
    /// [`UNMATCHED_RANKING_VALUE`].
    pub fn resolve(&self, name: &str) -> MovieRanking {
        let value = self
            .rankings
            .iter()
            .find(|r| r.ranking_name == name)
            .map(|r| r.ranking_value)
            .unwrap_or(UNMATCHED_RANKING_VALUE);
        MovieRanking {
            ranking_name: name.to_string(),
            ranking_value: value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}
