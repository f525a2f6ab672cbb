//! Tree height statistics for an estate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightStats {
    pub tree_count: usize,
    pub max_height: u32,
    pub min_height: u32,
    /// Middle height; the floor of the mean of the two middle values for an
    /// even count.
    pub median_height: u32,
}

impl HeightStats {
    /// Summarize tree heights. Returns `None` for an estate without trees.
    pub fn from_heights(heights: impl IntoIterator<Item = u32>) -> Option<Self> {
        let mut heights: Vec<u32> = heights.into_iter().collect();
        if heights.is_empty() {
            return None;
        }
        heights.sort_unstable();

        let n = heights.len();
        let median_height = if n % 2 == 1 {
            heights[n / 2]
        } else {
            // Sorted, so the upper middle is never below the lower one
            let (low, high) = (heights[n / 2 - 1], heights[n / 2]);
            low + (high - low) / 2
        };

        Some(Self {
            tree_count: n,
            max_height: heights[n - 1],
            min_height: heights[0],
            median_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_estate_has_no_stats() {
        assert_eq!(HeightStats::from_heights(Vec::new()), None);
    }

    #[test]
    fn test_odd_count() {
        let stats = HeightStats::from_heights([12, 3, 30]).unwrap();
        assert_eq!(
            stats,
            HeightStats {
                tree_count: 3,
                max_height: 30,
                min_height: 3,
                median_height: 12,
            }
        );
    }

    #[test]
    fn test_even_count_rounds_down() {
        let stats = HeightStats::from_heights([4, 1, 7, 2]).unwrap();
        assert_eq!(stats.median_height, 3);
        assert_eq!(stats.min_height, 1);
        assert_eq!(stats.max_height, 7);
    }

    #[test]
    fn test_median_of_large_heights() {
        let stats = HeightStats::from_heights([4_000_000_000, 4_000_000_000]).unwrap();
        assert_eq!(stats.median_height, 4_000_000_000);

        let stats = HeightStats::from_heights([u32::MAX, u32::MAX - 3]).unwrap();
        assert_eq!(stats.median_height, u32::MAX - 2);
        assert_eq!(stats.min_height, u32::MAX - 3);
    }
}
