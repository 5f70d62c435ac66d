//! dubins_routing - Dubins shortest-path planning between oriented points
//!
//! This crate computes the shortest path between two oriented 2D
//! configurations (position + heading) for a vehicle or waveguide that
//! cannot turn tighter than a given minimum radius. The result is an
//! ordered triple of motion primitives (left arc, right arc, straight
//! segment) drawn from the six classical Dubins families.

// Core modules
pub mod common;

// Algorithm modules
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Configuration, Pose2D};
pub use common::PathPlanner;
pub use common::{DubinsError, DubinsResult};
pub use path_planning::{
    plan_path, plan_path_traced, DubinsPath, DubinsPlanner, FamilyResult, NormalizedProblem,
    PathFamily, PathSegment, PlanningTrace, SegmentKind,
};
