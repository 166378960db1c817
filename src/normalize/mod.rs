/// Team and competition-level display names.
pub mod names;
