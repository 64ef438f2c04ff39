//! Rule-based signal models.
//!
//! Models expose their intermediate series through `transform` and a
//! decision series through `predict`.

pub mod ma_crossover;

pub use ma_crossover::{position_signal, CrossoverParams, CrossoverSignalModel, CrossoverState};
