pub mod budget;
pub mod error;
pub mod grid;
pub mod models;
pub mod simulator;
pub mod stats;
pub mod sweep;

pub use budget::Budget;
pub use error::CoreError;
pub use grid::GridIndex;
pub use models::{Plot, Position, SurveyPlan, TreeRecord, MAX_PLOT_DIMENSION, MAX_TREE_HEIGHT};
pub use simulator::{bare_plot_distance, plan_survey, PathCostSimulator};
pub use stats::HeightStats;
pub use sweep::SweepDirection;
