//! Labelled SVG templates: the owned tree, text substitution and logo embedding.

/// Logo catalog and image-slot embedding.
pub mod logo;
/// Label-keyed text substitution.
pub mod substitute;
/// Owned, mutable SVG element tree.
pub mod tree;
