//! The station-to-station transit cost matrix.

use railsim_core::StationId;

use crate::error::NetworkError;

/// Dense `n × n` matrix of transit ticks. Asymmetric costs are allowed;
/// a cost of `0` means there is no link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkCosts {
    n: usize,
    costs: Vec<u32>,
}

impl LinkCosts {
    /// Build from row-major rows, each of which must have `rows.len()`
    /// entries.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, NetworkError> {
        let n = rows.len();
        let mut costs = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(NetworkError::CostMatrixShape {
                    expected: n,
                    row: Some(i),
                    found: row.len(),
                });
            }
            costs.extend(row);
        }
        Ok(Self { n, costs })
    }

    /// Matrix dimension.
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Cost from `from` to `to`, or `None` if out of range or zero.
    pub fn get(&self, from: StationId, to: StationId) -> Option<u32> {
        let (i, j) = (from.0 as usize, to.0 as usize);
        if i >= self.n || j >= self.n {
            return None;
        }
        match self.costs[i * self.n + j] {
            0 => None,
            c => Some(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asymmetric_costs() {
        let m = LinkCosts::from_rows(vec![vec![0, 3], vec![5, 0]]).unwrap();
        assert_eq!(m.get(StationId(0), StationId(1)), Some(3));
        assert_eq!(m.get(StationId(1), StationId(0)), Some(5));
        assert_eq!(m.get(StationId(0), StationId(0)), None);
        assert_eq!(m.get(StationId(0), StationId(2)), None);
    }

    #[test]
    fn ragged_row_rejected() {
        let err = LinkCosts::from_rows(vec![vec![0, 3], vec![5]]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::CostMatrixShape {
                expected: 2,
                row: Some(1),
                found: 1
            }
        );
    }
}
