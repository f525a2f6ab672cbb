//! Serpentine (boustrophedon) sweep order.
//!
//! Odd rows run west to east (`x = 1..=L`), even rows east to west
//! (`x = L..=1`), so consecutive rows join at the same edge.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepDirection {
    /// Ascending columns (odd rows)
    Forward,
    /// Descending columns (even rows)
    Backward,
}

impl SweepDirection {
    pub fn for_row(y: u32) -> Self {
        if y % 2 == 1 {
            SweepDirection::Forward
        } else {
            SweepDirection::Backward
        }
    }

    /// Column of the `k`-th cell (1-based) visited in a row of `length` cells.
    pub fn column_at(self, k: u32, length: u32) -> u32 {
        match self {
            SweepDirection::Forward => k,
            SweepDirection::Backward => length - k + 1,
        }
    }

    /// Columns of a row in visiting order.
    pub fn columns(self, length: u32) -> impl Iterator<Item = u32> {
        (1..=length).map(move |k| self.column_at(k, length))
    }

    /// Column visited after `x`, or `None` at the row boundary.
    pub fn advance(self, x: u32, length: u32) -> Option<u32> {
        match self {
            SweepDirection::Forward => (x < length).then(|| x + 1),
            SweepDirection::Backward => (x > 1).then(|| x - 1),
        }
    }

    /// Last column visited in a row.
    pub fn last_column(self, length: u32) -> u32 {
        self.column_at(length, length)
    }
}
