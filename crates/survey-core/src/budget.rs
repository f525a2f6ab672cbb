//! Flight-distance budget and the early-termination predicate.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Caller-supplied maximum flight distance.
///
/// Only positive values limit the sweep; zero and negative budgets mean
/// "no limit".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(i64);

impl Budget {
    pub const UNLIMITED: Budget = Budget(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parse a raw query value. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidBudget(raw.to_string()))
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// The active limit, if this budget constrains the sweep at all.
    pub fn limit(self) -> Option<u64> {
        u64::try_from(self.0).ok().filter(|&limit| limit > 0)
    }
}

impl FromStr for Budget {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `budget > 0 && total > budget`.
pub fn exceeded(total: u64, budget: Budget) -> bool {
    budget.limit().is_some_and(|limit| total > limit)
}
