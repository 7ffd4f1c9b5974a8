pub mod config;
pub mod engine;
pub mod factors;
pub mod flags;
pub mod validation;

pub use config::*;
pub use engine::{score, FactorContribution, ScoreBreakdown, ScoreResult};
pub use factors::RangeOp;
pub use flags::{detect_flags, join_flags, Flag};
pub use validation::validate_scoring;
