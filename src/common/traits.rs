//! Common traits defining interfaces for planning algorithms

use crate::common::error::DubinsError;
use crate::common::types::Configuration;

/// Trait for planners that connect two oriented configurations
pub trait PathPlanner {
    /// Path type produced by this planner
    type Path;

    /// Plan a path from start to goal
    fn plan(&self, start: Configuration, goal: Configuration) -> Result<Self::Path, DubinsError>;
}
