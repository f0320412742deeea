pub mod analyzer;
pub mod metrics;
pub mod providers;

pub use analyzer::FaceAnalyzer;
