pub mod error;
pub mod log;
pub mod misc;
pub mod variant;
