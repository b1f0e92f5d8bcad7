use std::sync::Arc;
use nd_core::{Analyzer, Error, Result};
use tracing::info;

pub mod annotations;

pub use annotations::AnnotationAnalyzer;

pub const AVAILABLE_ANALYZERS: &[&str] = &["annotations"];

pub fn create_analyzer(name: &str) -> Result<Arc<dyn Analyzer>> {
    let analyzer: Arc<dyn Analyzer> = match name {
        "annotations" | "static" => Arc::new(AnnotationAnalyzer::new()),
        other => {
            return Err(Error::Config(format!(
                "Unknown analyzer: {} (available: {})",
                other,
                AVAILABLE_ANALYZERS.join(", ")
            )))
        }
    };
    info!("🧠 Analyzer initialized (using {})", analyzer.name());
    Ok(analyzer)
}
