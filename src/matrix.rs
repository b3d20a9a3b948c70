//! Pairwise travel-time matrix keyed by place id.

use std::collections::HashMap;

use crate::error::PlanError;
use crate::place::PlaceId;

/// Directed travel times in minutes between places.
///
/// Entries may be missing; a missing entry means the pair is unreachable and
/// is never read as zero. The diagonal is always zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelTimeMatrix {
    ids: Vec<PlaceId>,
    index: HashMap<PlaceId, usize>,
    durations: Vec<Vec<Option<f64>>>,
}

impl TravelTimeMatrix {
    /// Create a matrix over `ids` with every off-diagonal entry missing.
    pub fn new<I>(ids: I) -> Result<Self, PlanError>
    where
        I: IntoIterator<Item = PlaceId>,
    {
        let mut matrix = Self::default();
        for id in ids {
            if matrix.index.contains_key(&id) {
                return Err(PlanError::DuplicatePlace(id));
            }
            matrix.index.insert(id.clone(), matrix.ids.len());
            matrix.ids.push(id);
        }
        let n = matrix.ids.len();
        matrix.durations = vec![vec![None; n]; n];
        for i in 0..n {
            matrix.durations[i][i] = Some(0.0);
        }
        Ok(matrix)
    }

    /// Build from dense rows indexed in `ids` order. `None` cells stay missing.
    pub fn from_rows(ids: Vec<PlaceId>, rows: Vec<Vec<Option<f64>>>) -> Result<Self, PlanError> {
        let n = ids.len();
        if rows.len() != n || rows.iter().any(|row| row.len() != n) {
            return Err(PlanError::InvalidMatrix(format!(
                "expected a {n}x{n} matrix"
            )));
        }

        let mut matrix = Self::new(ids)?;
        for (i, row) in rows.into_iter().enumerate() {
            for (j, cell) in row.into_iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(minutes) = cell {
                    matrix.set_index(i, j, minutes)?;
                }
            }
        }
        Ok(matrix)
    }

    /// Record a directed travel time.
    pub fn set(&mut self, from: &PlaceId, to: &PlaceId, minutes: f64) -> Result<(), PlanError> {
        let i = self.require_index(from)?;
        let j = self.require_index(to)?;
        if i == j {
            return Err(PlanError::InvalidMatrix(format!(
                "diagonal entry for {from} is fixed at zero"
            )));
        }
        self.set_index(i, j, minutes)
    }

    /// Record the same travel time in both directions.
    pub fn set_symmetric(&mut self, a: &PlaceId, b: &PlaceId, minutes: f64) -> Result<(), PlanError> {
        self.set(a, b, minutes)?;
        self.set(b, a, minutes)
    }

    fn set_index(&mut self, i: usize, j: usize, minutes: f64) -> Result<(), PlanError> {
        if !minutes.is_finite() || minutes < 0.0 {
            return Err(PlanError::InvalidMatrix(format!(
                "travel time {} -> {} must be a non-negative number, got {minutes}",
                self.ids[i], self.ids[j]
            )));
        }
        self.durations[i][j] = Some(minutes);
        Ok(())
    }

    fn require_index(&self, id: &PlaceId) -> Result<usize, PlanError> {
        self.index.get(id).copied().ok_or_else(|| {
            PlanError::InvalidMatrix(format!("place {id} is not part of the matrix"))
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[PlaceId] {
        &self.ids
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.index.contains_key(id)
    }

    /// Travel time from `from` to `to`, or `None` if unknown.
    pub fn get(&self, from: &PlaceId, to: &PlaceId) -> Option<f64> {
        let i = *self.index.get(from)?;
        let j = *self.index.get(to)?;
        self.durations[i][j]
    }

    /// Travel time from `from` to `to`, failing if the entry is missing.
    pub fn require(&self, from: &PlaceId, to: &PlaceId) -> Result<f64, PlanError> {
        self.get(from, to).ok_or_else(|| PlanError::IncompleteMatrix {
            from: from.clone(),
            to: to.clone(),
        })
    }

    /// Fail on the first missing ordered pair among `ids`, scanning in order.
    pub fn ensure_complete_for<'a, I>(&self, ids: I) -> Result<(), PlanError>
    where
        I: IntoIterator<Item = &'a PlaceId>,
        I::IntoIter: Clone,
    {
        let ids = ids.into_iter();
        for from in ids.clone() {
            for to in ids.clone() {
                self.require(from, to)?;
            }
        }
        Ok(())
    }
}
