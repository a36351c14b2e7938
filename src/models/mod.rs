//! Core data models for the league dashboard.

mod dataset;
mod diagnostics;
mod fixture;
mod ids;
mod lineup;
mod side;
mod standings;

pub use dataset::*;
pub use diagnostics::*;
pub use fixture::*;
pub use ids::*;
pub use lineup::*;
pub use side::*;
pub use standings::*;
