//! Classification of a date's matches into template render jobs.

/// Date planning and template selection.
pub mod planner;
/// The label -> text mapping consumed by substitution.
pub mod replacements;
