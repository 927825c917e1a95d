//! Vitals analysis engine.
//!
//! Pure, synchronous functions: score, trend, interpretation, bedside
//! status flags, and the dashboard aggregation that composes them.
//! Nothing here performs I/O or holds state between calls.

pub mod aggregate;
pub mod interpret;
pub mod score;
pub mod status;
pub mod trend;

pub use aggregate::{aggregate, AnalysisResult, Dashboard};
pub use interpret::{interpret, Interpretation};
pub use score::{breakdown, score, score_reading, ScoreBreakdown};
pub use trend::{trend, trends};
