//! Position to canopy-height lookup over a bounded plot.

use std::collections::{HashMap, HashSet};

use crate::error::CoreError;
use crate::models::{Plot, Position, TreeRecord};

/// Immutable tree lookup built once per plan computation.
#[derive(Debug, Clone)]
pub struct GridIndex {
    plot: Plot,
    heights: HashMap<Position, u32>,
    tree_rows: HashSet<u32>,
}

impl GridIndex {
    /// Normalize a sparse tree list into an O(1) lookup.
    ///
    /// Trees may arrive in any order. Positions must be unique and inside
    /// the plot, and heights positive.
    pub fn build(plot: Plot, trees: &[TreeRecord]) -> Result<Self, CoreError> {
        plot.validate()?;

        let mut heights = HashMap::with_capacity(trees.len());
        let mut tree_rows = HashSet::new();
        for tree in trees {
            let position = tree.position();
            if !plot.contains(position) {
                return Err(CoreError::TreeOutOfBounds {
                    x: i64::from(tree.x),
                    y: i64::from(tree.y),
                    width: plot.width,
                    length: plot.length,
                });
            }
            if tree.height == 0 {
                return Err(CoreError::InvalidHeight(0));
            }
            if heights.insert(position, tree.height).is_some() {
                return Err(CoreError::DuplicatePosition {
                    x: tree.x,
                    y: tree.y,
                });
            }
            tree_rows.insert(tree.y);
        }

        Ok(Self {
            plot,
            heights,
            tree_rows,
        })
    }

    pub fn plot(&self) -> Plot {
        self.plot
    }

    /// Height of the tree at `(x, y)`, if any.
    pub fn lookup(&self, x: u32, y: u32) -> Option<u32> {
        self.height_at(Position::new(x, y))
    }

    pub fn height_at(&self, position: Position) -> Option<u32> {
        self.heights.get(&position).copied()
    }

    pub fn row_has_trees(&self, y: u32) -> bool {
        self.tree_rows.contains(&y)
    }

    pub fn tree_count(&self) -> usize {
        self.heights.len()
    }
}
