/// Static lookup tables and directory defaults.
pub mod config;
/// Error taxonomy shared by every stage.
pub mod error;
