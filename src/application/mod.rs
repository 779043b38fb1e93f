//! Application layer: the per-turn coordination logic over the domain and
//! the capability ports.

mod process_turn;

pub use process_turn::{ProcessTurnCommand, ProcessTurnHandler, TurnOutcome};
