pub mod extract;
pub mod result;

pub use extract::{extract_json_object, parse_fenced_json, ExtractError};
pub use result::{Analysis, AnalysisRequest, AnalysisResult};
