//! User-facing visit positions.
//!
//! The repository addresses visits by 0-based index. People count from one,
//! so every UI shows and accepts 1-based positions, and the API converts them
//! at the boundary. Like repository indexes, a position is only meaningful
//! until the next mutation.

use crate::error::{PlanError, Result};
use crate::model::Visit;
use std::fmt;
use std::str::FromStr;

/// A 1-based position in the visit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisitPosition(pub usize);

impl VisitPosition {
    pub fn from_index(index: usize) -> Self {
        VisitPosition(index + 1)
    }

    /// The 0-based repository index. Position 0 does not exist and is
    /// reported as an out-of-range index.
    pub fn to_index(self, len: usize) -> Result<usize> {
        self.0
            .checked_sub(1)
            .ok_or(PlanError::Index { index: 0, len })
    }
}

impl fmt::Display for VisitPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VisitPosition {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .trim_end_matches('.')
            .parse()
            .map(VisitPosition)
            .map_err(|_| PlanError::validation(format!("invalid visit position: {}", s)))
    }
}

/// A visit paired with the position it is listed under.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayVisit {
    pub position: VisitPosition,
    pub visit: Visit,
}

/// Assigns display positions to the visits, in storage order.
pub fn index_visits(visits: &[Visit]) -> Vec<DisplayVisit> {
    visits
        .iter()
        .enumerate()
        .map(|(i, visit)| DisplayVisit {
            position: VisitPosition::from_index(i),
            visit: visit.clone(),
        })
        .collect()
}
