// Dubins Path Planner
//
// Shortest path between two oriented configurations for a vehicle (or
// waveguide) with a minimum turning radius and no reverse motion. The
// path is an ordered triple of motion primitives drawn from the six
// classical families (LSL, RSR, LSR, RSL, RLR, LRL).

use itertools::Itertools;
use nalgebra::{Rotation2, Vector2};
use ordered_float::OrderedFloat;
use std::f64::consts::PI;
use std::fmt;

use crate::common::{Configuration, DubinsError, DubinsResult, PathPlanner, Pose2D};

const TWO_PI: f64 = 2.0 * PI;

/// Reduce an angle to the range [0, 2*pi).
fn mod2pi(angle: f64) -> f64 {
    angle - TWO_PI * (angle / TWO_PI).floor()
}

/// The three motion primitives a Dubins path is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Counterclockwise arc at the turning radius
    Left,
    /// Clockwise arc at the turning radius
    Right,
    /// Straight line
    Straight,
}

/// The six candidate path families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathFamily {
    LSL,
    RSR,
    LSR,
    RSL,
    RLR,
    LRL,
}

/// Fixed evaluation order of the families. The selector keeps the first
/// family that achieves the minimum cost, so this order also decides
/// ties between equal-cost candidates.
pub const EVALUATION_ORDER: [PathFamily; 6] = [
    PathFamily::LSL,
    PathFamily::RSR,
    PathFamily::LSR,
    PathFamily::RSL,
    PathFamily::RLR,
    PathFamily::LRL,
];

impl PathFamily {
    /// Three-letter family code.
    pub fn code(&self) -> &'static str {
        match self {
            PathFamily::LSL => "LSL",
            PathFamily::RSR => "RSR",
            PathFamily::LSR => "LSR",
            PathFamily::RSL => "RSL",
            PathFamily::RLR => "RLR",
            PathFamily::LRL => "LRL",
        }
    }

    /// Segment kinds in traversal order.
    pub fn segment_kinds(&self) -> [SegmentKind; 3] {
        use SegmentKind::{Left, Right, Straight};
        match self {
            PathFamily::LSL => [Left, Straight, Left],
            PathFamily::RSR => [Right, Straight, Right],
            PathFamily::LSR => [Left, Straight, Right],
            PathFamily::RSL => [Right, Straight, Left],
            PathFamily::RLR => [Right, Left, Right],
            PathFamily::LRL => [Left, Right, Left],
        }
    }

    /// Per-segment reflection flags. A flagged turn segment has its
    /// measure m replaced by 2*pi - m after the family formula runs.
    /// All six canonical families are unreflected; the table exists so
    /// reflected variants stay a data change, not a code change.
    pub fn reflected(&self) -> [bool; 3] {
        [false, false, false]
    }
}

impl fmt::Display for PathFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Dimensionless local problem: start translated to the origin, start
/// heading rotated to zero, distances divided by the turning radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedProblem {
    /// Tangent direction at the start, in [0, 2*pi)
    pub alpha: f64,
    /// Tangent direction at the end, in [0, 2*pi)
    pub beta: f64,
    /// Start-to-end distance divided by the turning radius
    pub d: f64,
}

impl NormalizedProblem {
    /// Build the normalized problem from two poses and a radius.
    ///
    /// Coincident positions make the local bearing `atan2(0, 0)`, which
    /// evaluates to 0; the input is degenerate but still produces a
    /// well-defined (zero-distance) problem.
    pub fn from_poses(start: &Pose2D, goal: &Pose2D, radius: f64) -> Self {
        let delta = goal.position() - start.position();
        let local = Rotation2::new(-start.yaw) * Vector2::new(delta.x, delta.y);
        let d = local.norm() / radius;
        let theta = mod2pi(local.y.atan2(local.x));
        let alpha = mod2pi(-theta);
        let beta = mod2pi((goal.yaw - start.yaw) - theta);
        NormalizedProblem { alpha, beta, d }
    }
}

/// Trigonometric intermediates shared by all six family formulas.
struct Trig {
    sa: f64,
    sb: f64,
    ca: f64,
    cb: f64,
    c_ab: f64,
}

impl Trig {
    fn new(problem: &NormalizedProblem) -> Self {
        Trig {
            sa: problem.alpha.sin(),
            sb: problem.beta.sin(),
            ca: problem.alpha.cos(),
            cb: problem.beta.cos(),
            c_ab: (problem.alpha - problem.beta).cos(),
        }
    }
}

// One closed-form evaluator per family. Each returns the raw segment
// measures (t, p, q) in normalized units, or None when the family is
// infeasible for this problem. Infeasibility is expected control flow,
// not an error.

fn lsl(n: &NormalizedProblem, trig: &Trig) -> Option<(f64, f64, f64)> {
    let p_squared = 2.0 + n.d * n.d - 2.0 * trig.c_ab + 2.0 * n.d * (trig.sa - trig.sb);
    if p_squared < 0.0 {
        return None;
    }
    let tmp = (trig.cb - trig.ca).atan2(n.d + trig.sa - trig.sb);
    let t = mod2pi(-n.alpha + tmp);
    let p = p_squared.sqrt();
    let q = mod2pi(n.beta - tmp);
    Some((t, p, q))
}

fn rsr(n: &NormalizedProblem, trig: &Trig) -> Option<(f64, f64, f64)> {
    let p_squared = 2.0 + n.d * n.d - 2.0 * trig.c_ab + 2.0 * n.d * (trig.sb - trig.sa);
    if p_squared < 0.0 {
        return None;
    }
    let tmp = (trig.ca - trig.cb).atan2(n.d - trig.sa + trig.sb);
    let t = mod2pi(n.alpha - tmp);
    let p = p_squared.sqrt();
    let q = mod2pi(-n.beta + tmp);
    Some((t, p, q))
}

fn lsr(n: &NormalizedProblem, trig: &Trig) -> Option<(f64, f64, f64)> {
    let p_squared = -2.0 + n.d * n.d + 2.0 * trig.c_ab + 2.0 * n.d * (trig.sa + trig.sb);
    if p_squared < 0.0 {
        return None;
    }
    let p = p_squared.sqrt();
    let tmp = (-trig.ca - trig.cb).atan2(n.d + trig.sa + trig.sb) - (-2.0f64).atan2(p);
    let t = mod2pi(-n.alpha + tmp);
    let q = mod2pi(-mod2pi(n.beta) + tmp);
    Some((t, p, q))
}

fn rsl(n: &NormalizedProblem, trig: &Trig) -> Option<(f64, f64, f64)> {
    let p_squared = n.d * n.d - 2.0 + 2.0 * trig.c_ab - 2.0 * n.d * (trig.sa + trig.sb);
    if p_squared < 0.0 {
        return None;
    }
    let p = p_squared.sqrt();
    let tmp = (trig.ca + trig.cb).atan2(n.d - trig.sa - trig.sb) - 2.0f64.atan2(p);
    let t = mod2pi(n.alpha - tmp);
    let q = mod2pi(n.beta - tmp);
    Some((t, p, q))
}

fn rlr(n: &NormalizedProblem, trig: &Trig) -> Option<(f64, f64, f64)> {
    let tmp = (6.0 - n.d * n.d + 2.0 * trig.c_ab + 2.0 * n.d * (trig.sa - trig.sb)) / 8.0;
    if tmp.abs() > 1.0 {
        return None;
    }
    let p = mod2pi(TWO_PI - tmp.acos());
    let t = mod2pi(
        n.alpha - (trig.ca - trig.cb).atan2(n.d - trig.sa + trig.sb) + mod2pi(p / 2.0),
    );
    let q = mod2pi(n.alpha - n.beta - t + mod2pi(p));
    Some((t, p, q))
}

fn lrl(n: &NormalizedProblem, trig: &Trig) -> Option<(f64, f64, f64)> {
    let tmp = (6.0 - n.d * n.d + 2.0 * trig.c_ab + 2.0 * n.d * (trig.sb - trig.sa)) / 8.0;
    if tmp.abs() > 1.0 {
        return None;
    }
    let p = mod2pi(TWO_PI - tmp.acos());
    let t = mod2pi(-n.alpha - (trig.ca - trig.cb).atan2(n.d + trig.sa - trig.sb) + p / 2.0);
    let q = mod2pi(mod2pi(n.beta) - n.alpha - t + mod2pi(p));
    Some((t, p, q))
}

/// Feasible candidate for one family, in normalized units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamilyResult {
    pub family: PathFamily,
    pub t: f64,
    pub p: f64,
    pub q: f64,
    /// Total normalized length, t + p + q
    pub cost: f64,
}

/// Evaluate one family and apply its reflection flags.
fn solve_family(
    family: PathFamily,
    problem: &NormalizedProblem,
    trig: &Trig,
) -> Option<FamilyResult> {
    let evaluator = match family {
        PathFamily::LSL => lsl,
        PathFamily::RSR => rsr,
        PathFamily::LSR => lsr,
        PathFamily::RSL => rsl,
        PathFamily::RLR => rlr,
        PathFamily::LRL => lrl,
    };
    let (t, p, q) = evaluator(problem, trig)?;

    let mut measures = [t, p, q];
    for (measure, flag) in measures.iter_mut().zip(family.reflected().iter()) {
        if *flag {
            *measure = TWO_PI - *measure;
        }
    }

    let [t, p, q] = measures;
    // Measures are already reduced non-negative; the absolute values
    // guard against tiny negative rounding residue.
    let cost = t.abs() + p.abs() + q.abs();
    Some(FamilyResult { family, t, p, q, cost })
}

/// One motion primitive of a materialized path, in physical units.
///
/// `radius` is the planning radius; it is carried for straight segments
/// too but has no geometric meaning there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub kind: SegmentKind,
    pub length: f64,
    pub radius: f64,
}

impl PathSegment {
    pub fn new(kind: SegmentKind, length: f64, radius: f64) -> Self {
        Self { kind, length, radius }
    }

    /// Pose reached by traversing this segment from `start`.
    ///
    /// Zero-length segments return `start` unchanged.
    pub fn end_pose(&self, start: &Pose2D) -> Pose2D {
        match self.kind {
            SegmentKind::Straight => Pose2D::new(
                start.x + self.length * start.yaw.cos(),
                start.y + self.length * start.yaw.sin(),
                start.yaw,
            ),
            SegmentKind::Left => {
                let phi = self.length / self.radius;
                Pose2D::new(
                    start.x + self.radius * ((start.yaw + phi).sin() - start.yaw.sin()),
                    start.y + self.radius * (start.yaw.cos() - (start.yaw + phi).cos()),
                    start.yaw + phi,
                )
            }
            SegmentKind::Right => {
                let phi = self.length / self.radius;
                Pose2D::new(
                    start.x + self.radius * (start.yaw.sin() - (start.yaw - phi).sin()),
                    start.y + self.radius * ((start.yaw - phi).cos() - start.yaw.cos()),
                    start.yaw - phi,
                )
            }
        }
    }
}

/// A planned Dubins path: the winning family and its three segments in
/// traversal order. Segment lengths are physical (normalized measures
/// times the radius); some may be zero at family boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DubinsPath {
    pub family: PathFamily,
    pub segments: [PathSegment; 3],
}

impl DubinsPath {
    /// Total physical path length.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }

    /// Pose reached by traversing all three segments from `start`.
    ///
    /// Placement is a fold: each segment starts at the previous
    /// segment's end pose. Consumers that render the path into concrete
    /// geometry follow the same fold.
    pub fn end_pose(&self, start: &Pose2D) -> Pose2D {
        self.segments
            .iter()
            .fold(*start, |pose, segment| segment.end_pose(&pose))
    }
}

/// Intermediate values of one planning call, for inspection and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningTrace {
    pub problem: NormalizedProblem,
    /// Feasible candidates, in evaluation order
    pub candidates: Vec<FamilyResult>,
    pub selected: PathFamily,
}

fn materialize(result: &FamilyResult, radius: f64) -> DubinsPath {
    let kinds = result.family.segment_kinds();
    DubinsPath {
        family: result.family,
        segments: [
            PathSegment::new(kinds[0], result.t * radius, radius),
            PathSegment::new(kinds[1], result.p * radius, radius),
            PathSegment::new(kinds[2], result.q * radius, radius),
        ],
    }
}

/// Plan the shortest Dubins path and return the intermediate values
/// alongside it.
///
/// Families are evaluated in [`EVALUATION_ORDER`]; among equal-cost
/// candidates the earliest one wins, which keeps the selected family
/// deterministic for symmetric configurations.
pub fn plan_path_traced(
    start: Configuration,
    end: Configuration,
    radius: f64,
) -> DubinsResult<(DubinsPath, PlanningTrace)> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(DubinsError::InvalidRadius(radius));
    }
    if !start.is_finite() {
        return Err(DubinsError::InvalidConfiguration(format!(
            "non-finite start configuration: {:?}",
            start
        )));
    }
    if !end.is_finite() {
        return Err(DubinsError::InvalidConfiguration(format!(
            "non-finite end configuration: {:?}",
            end
        )));
    }

    let problem = NormalizedProblem::from_poses(&start.to_pose(), &end.to_pose(), radius);
    let trig = Trig::new(&problem);

    let candidates: Vec<FamilyResult> = EVALUATION_ORDER
        .iter()
        .filter_map(|&family| solve_family(family, &problem, &trig))
        .collect();

    let best_index = candidates
        .iter()
        .position_min_by_key(|candidate| OrderedFloat(candidate.cost))
        .ok_or_else(|| {
            DubinsError::Planning(format!(
                "all six families infeasible (alpha: {}, beta: {}, d: {})",
                problem.alpha, problem.beta, problem.d
            ))
        })?;

    let best = candidates[best_index];
    let path = materialize(&best, radius);
    let trace = PlanningTrace { problem, candidates, selected: best.family };
    Ok((path, trace))
}

/// Plan the shortest Dubins path from `start` to `end` for the given
/// turning radius. Headings are in degrees.
pub fn plan_path(
    start: Configuration,
    end: Configuration,
    radius: f64,
) -> DubinsResult<DubinsPath> {
    plan_path_traced(start, end, radius).map(|(path, _)| path)
}

/// Planner with a fixed turning radius.
#[derive(Debug, Clone, Copy)]
pub struct DubinsPlanner {
    pub radius: f64,
}

impl DubinsPlanner {
    pub fn new(radius: f64) -> Self {
        DubinsPlanner { radius }
    }
}

impl PathPlanner for DubinsPlanner {
    type Path = DubinsPath;

    fn plan(&self, start: Configuration, goal: Configuration) -> DubinsResult<DubinsPath> {
        plan_path(start, goal, self.radius)
    }
}
