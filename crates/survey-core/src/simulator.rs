//! Path-cost simulation of a serpentine survey sweep.
//!
//! The drone visits every cell of the plot once, row by row, alternating
//! direction. Each cell is charged by looking at where the drone goes next:
//! the neighbouring cell of the same row, or the row boundary for the last
//! cell of a row. The very first cell is the takeoff.

use crate::budget::{self, Budget};
use crate::error::CoreError;
use crate::grid::GridIndex;
use crate::models::{Plot, Position, SurveyPlan, TreeRecord};
use crate::sweep::SweepDirection;

/// Cost of one horizontal move between adjacent cells.
pub const HORIZONTAL_UNIT: u64 = 10;

/// Cost of one ascent unit (takeoff, first climb onto a canopy, row change).
pub const ASCENT_UNIT: u64 = 1;

/// Build the grid and run the sweep for one plan request.
pub fn plan_survey(
    plot: Plot,
    trees: &[TreeRecord],
    budget: Budget,
) -> Result<SurveyPlan, CoreError> {
    let grid = GridIndex::build(plot, trees)?;
    Ok(PathCostSimulator::new(&grid, budget).run())
}

/// Total distance for a plot without any trees.
///
/// `21W - 20` for single-column plots (row 1 is the takeoff alone) and
/// `10WL + 11W - 9` otherwise.
pub fn bare_plot_distance(plot: Plot) -> u64 {
    let width = u64::from(plot.width);
    let length = u64::from(plot.length);
    let row_end = 2 * HORIZONTAL_UNIT + ASCENT_UNIT;
    if length == 1 {
        ASCENT_UNIT + (width - 1) * row_end
    } else {
        // Takeoff, one row end per row, plain moves everywhere else
        ASCENT_UNIT + width * row_end + (width * length - width - 1) * HORIZONTAL_UNIT
    }
}

/// Raised by the first increment that pushes the running total past the budget.
#[derive(Debug, Clone, Copy)]
struct BudgetExceeded {
    limit: u64,
    at: Position,
}

/// Mutable progress of one sweep.
#[derive(Debug)]
struct TraversalState {
    cell: Position,
    total: u64,
    climbed: bool,
    budget: Budget,
}

impl TraversalState {
    fn new(budget: Budget) -> Self {
        Self {
            cell: Position::ORIGIN,
            total: 0,
            climbed: false,
            budget,
        }
    }

    fn charge(&mut self, amount: u64) -> Result<(), BudgetExceeded> {
        self.total += amount;
        match self.budget.limit() {
            Some(limit) if budget::exceeded(self.total, self.budget) => Err(BudgetExceeded {
                limit,
                at: self.cell,
            }),
            _ => Ok(()),
        }
    }
}

/// Drives the serpentine sweep over a [`GridIndex`].
#[derive(Debug, Clone, Copy)]
pub struct PathCostSimulator<'a> {
    grid: &'a GridIndex,
    budget: Budget,
}

impl<'a> PathCostSimulator<'a> {
    pub fn new(grid: &'a GridIndex, budget: Budget) -> Self {
        Self { grid, budget }
    }

    /// Run the sweep to completion or until the budget is exceeded.
    pub fn run(&self) -> SurveyPlan {
        let mut state = TraversalState::new(self.budget);
        match self.sweep(&mut state) {
            Ok(()) => SurveyPlan::Full {
                total_distance: state.total,
            },
            Err(exceeded) => SurveyPlan::Truncated {
                budget: exceeded.limit,
                stopped_at: exceeded.at,
            },
        }
    }

    fn sweep(&self, state: &mut TraversalState) -> Result<(), BudgetExceeded> {
        let plot = self.grid.plot();
        for y in 1..=plot.width {
            let direction = SweepDirection::for_row(y);
            if y > 1 && !self.grid.row_has_trees(y) {
                self.cross_bare_row(state, direction, y)?;
                continue;
            }
            for x in direction.columns(plot.length) {
                state.cell = Position::new(x, y);
                let destination = direction
                    .advance(x, plot.length)
                    .map(|next| Position::new(next, y));
                self.step(state, destination)?;
            }
        }
        Ok(())
    }

    /// Charge the current cell given its destination (`None` = row boundary).
    fn step(
        &self,
        state: &mut TraversalState,
        destination: Option<Position>,
    ) -> Result<(), BudgetExceeded> {
        if state.cell == Position::ORIGIN {
            return self.takeoff(state, destination);
        }

        let here = self.grid.height_at(state.cell);
        state.charge(HORIZONTAL_UNIT)?;

        let Some(destination) = destination else {
            return Self::row_end(state, here);
        };

        match (here, self.grid.height_at(destination)) {
            // Canopy to canopy: only the height difference
            (Some(current), Some(next)) => state.charge(u64::from(current.abs_diff(next))),
            (None, Some(next)) => {
                if !state.climbed {
                    state.charge(ASCENT_UNIT)?;
                    state.climbed = true;
                }
                state.charge(u64::from(next))
            }
            // Descend to baseline
            (Some(current), None) => state.charge(u64::from(current)),
            (None, None) => Ok(()),
        }
    }

    fn takeoff(
        &self,
        state: &mut TraversalState,
        destination: Option<Position>,
    ) -> Result<(), BudgetExceeded> {
        state.charge(ASCENT_UNIT)?;
        if let Some(height) = destination.and_then(|d| self.grid.height_at(d)) {
            state.climbed = true;
            state.charge(u64::from(height))?;
        }
        Ok(())
    }

    fn row_end(state: &mut TraversalState, here: Option<u32>) -> Result<(), BudgetExceeded> {
        state.charge(HORIZONTAL_UNIT)?;
        if let Some(height) = here {
            state.charge(u64::from(height))?;
        }
        state.charge(ASCENT_UNIT)
    }

    /// Charge a tree-free row in one go.
    ///
    /// Every cell but the last costs one horizontal unit; the last one is a
    /// row end without descent. When the budget runs out inside the row the
    /// stopping cell is derived from the remaining budget.
    fn cross_bare_row(
        &self,
        state: &mut TraversalState,
        direction: SweepDirection,
        y: u32,
    ) -> Result<(), BudgetExceeded> {
        let length = self.grid.plot().length;
        let row_cost = HORIZONTAL_UNIT * u64::from(length) + HORIZONTAL_UNIT + ASCENT_UNIT;

        if let Some(limit) = self.budget.limit() {
            if budget::exceeded(state.total + row_cost, self.budget) {
                // total <= limit holds here, every earlier increment was checked
                let k = (limit - state.total) / HORIZONTAL_UNIT + 1;
                let k = if k < u64::from(length) { k as u32 } else { length };
                state.cell = Position::new(direction.column_at(k, length), y);
                return Err(BudgetExceeded {
                    limit,
                    at: state.cell,
                });
            }
        }

        state.total += row_cost;
        state.cell = Position::new(direction.last_column(length), y);
        Ok(())
    }
}
