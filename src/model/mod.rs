//! Decision model: formulation, solver-neutral program, and interpretation.

pub mod builder;
pub mod interpret;
pub mod program;
pub mod window;

pub use builder::{DecisionModel, PlantParams, build};
pub use interpret::{PlanOutcome, SELECTION_THRESHOLD, Solution, interpret};
pub use program::{BinaryProgram, VarId};
pub use window::{MaintenanceWindow, Strategy, WindowKind};
