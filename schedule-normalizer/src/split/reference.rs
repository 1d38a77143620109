//! Reference stop sequences and their match tokens.

use serde::{Deserialize, Serialize};

use crate::domain::StopId;

/// How a reference stop takes part in classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Only trips of this direction visit the stop; used to classify.
    Exclusive,
    /// Trips of both directions may visit the stop; used only for ordering.
    Shared,
}

/// One stop of a reference sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchToken {
    pub stop_id: StopId,
    pub kind: TokenKind,
}

impl MatchToken {
    /// A stop only this direction visits.
    pub fn exclusive(stop_id: impl Into<StopId>) -> Self {
        Self {
            stop_id: stop_id.into(),
            kind: TokenKind::Exclusive,
        }
    }

    /// A stop both directions may visit.
    pub fn shared(stop_id: impl Into<StopId>) -> Self {
        Self {
            stop_id: stop_id.into(),
            kind: TokenKind::Shared,
        }
    }

    /// Returns true if this token classifies trips.
    pub fn is_exclusive(&self) -> bool {
        self.kind == TokenKind::Exclusive
    }
}

/// The ordered reference stops of one direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceSequence {
    tokens: Vec<MatchToken>,
}

impl ReferenceSequence {
    /// Creates a sequence from tokens in travel order.
    pub fn new(tokens: Vec<MatchToken>) -> Self {
        Self { tokens }
    }

    /// All tokens in travel order.
    pub fn tokens(&self) -> &[MatchToken] {
        &self.tokens
    }

    /// Stop ids of the exclusive tokens, in travel order.
    pub fn exclusive_stops(&self) -> impl Iterator<Item = &StopId> {
        self.tokens
            .iter()
            .filter(|t| t.is_exclusive())
            .map(|t| &t.stop_id)
    }

    /// Index of the first token for this stop, of either kind.
    pub fn position(&self, stop_id: &StopId) -> Option<usize> {
        self.tokens.iter().position(|t| &t.stop_id == stop_id)
    }

    /// Length of the longest run of this sequence's exclusive stops that
    /// appears, in order but not necessarily contiguously, in `stops`.
    pub fn exclusive_score(&self, stops: &[StopId]) -> usize {
        let exclusive: Vec<&StopId> = self.exclusive_stops().collect();
        longest_common_subsequence(&exclusive, stops)
    }
}

/// Length of the longest common subsequence of two stop lists.
fn longest_common_subsequence(reference: &[&StopId], stops: &[StopId]) -> usize {
    // One row of the DP table is enough: row[j] is the answer for the
    // reference prefix processed so far against stops[..j].
    let mut row = vec![0usize; stops.len() + 1];
    for reference_stop in reference {
        let mut diagonal = 0;
        for (j, stop) in stops.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if *reference_stop == stop {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[stops.len()]
}
