//! Training time - Rates, simulation and the time calculator

mod calculator;
pub mod rate;
mod simulation;

pub use calculator::TrainingTimeCalculator;
pub use rate::{hours_to_duration, sp_per_hour, time_for_points, TrainingRate};
pub use simulation::{TrainingSimulation, TrainingStep};
