pub mod review;

pub use review::{ReviewInput, ReviewSurface, TerminalReview};
