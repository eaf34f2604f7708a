//! Egress library entry points.
//!
//! This crate models a building floor during a fire as an occupancy grid,
//! prices every cell by its smoke and fire proximity, and searches for the
//! lowest-risk route from a person to an exit. Higher-level consumers (the
//! CLI) should only depend on the items exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod explain;
pub mod grid;
pub mod hazard;
pub mod path;
pub mod routing;

pub use error::{Error, Result};
pub use explain::{
    analyze_exit, evaluate_exits, explain, measure_exposure, ExitAnalysis, ExitReport,
    ReportRenderMode,
};
pub use grid::{Cell, Grid, GridSpec, Position};
pub use hazard::{Cost, HazardWeights, RiskModel, TraversalCost};
pub use path::PathResult;
pub use routing::{
    plan_evacuation, resolve_start, EvacuationPlan, EvacuationRequest, Planner, Route,
    RouteAlgorithm,
};
