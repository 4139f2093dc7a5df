pub mod history;
pub mod outcome;
pub mod patterns;

pub use history::{SpinHistory, SpinRecord};
pub use outcome::{Color, Half, OUTCOME_COUNT, Outcome, Parity};
pub use patterns::{Pattern, PatternReport};
