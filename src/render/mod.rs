//! Output generation: the per-date driver and the external rasterizer.

/// Date-by-date generation and the run report.
pub mod pipeline;
/// SVG -> PNG through an external converter.
pub mod rasterize;
