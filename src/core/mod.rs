//! Core modules for repcount

pub mod counter;
pub mod shared;
pub mod workout;
pub mod session;
pub mod feed;
pub mod api;

pub use counter::RepetitionCounter;
pub use shared::SharedCounter;
pub use workout::{SetRecord, WorkoutLog};
pub use session::{SessionController, SessionStatus};
pub use feed::{parse_sample_line, parse_sample_list, read_samples};
pub use api::{create_router, run_server};
