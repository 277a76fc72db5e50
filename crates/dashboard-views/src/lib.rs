//! HTML rendering for the dashboard.
//!
//! Pages are built from typed view models; every piece of dynamic text goes
//! through [`escape_html`] before it reaches the markup.

pub mod cards;
pub mod charts;
pub mod comparison;
pub mod html;
pub mod listings;
pub mod pages;

pub use cards::{AdvancedGrid, CompanyCard, ErrorPanel, QuickStats, ScoreCard};
pub use charts::{ChartKind, ChartSpec};
pub use comparison::ComparisonTable;
pub use html::escape_html;
pub use pages::{AnalysisPage, ComparePage};
