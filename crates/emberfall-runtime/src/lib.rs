//! Game loop orchestration for Emberfall: status machine, frame driving,
//! delayed tasks and persistence.

pub mod game;
pub mod scheduler;

pub use game::{FrameReport, Game, GameError};
pub use scheduler::{Scheduler, TaskKind};
