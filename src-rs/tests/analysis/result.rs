use crate::analysis::{AnalysisRequest, AnalysisResult};
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_is_kept_verbatim_when_not_blank() {
        let req: AnalysisRequest = serde_json::from_value(json!({ "topic": "  учить Rust " })).unwrap();
        assert_eq!(req.topic(), Some("  учить Rust "));
    }

    #[test]
    fn blank_or_missing_topic_is_rejected() {
        for body in [json!({}), json!({ "topic": "" }), json!({ "topic": " \n\t" }), json!({ "topic": null })] {
            let req: AnalysisRequest = serde_json::from_value(body.clone()).unwrap();
            assert_eq!(req.topic(), None, "body {}", body);
        }
    }

    #[test]
    fn analysis_lists_default_to_empty() {
        let res: AnalysisResult =
            serde_json::from_value(json!({ "analysis": { "pros": null } })).unwrap();
        assert!(res.analysis.pros.is_empty());
        assert!(res.analysis.cons.is_empty());
    }

    #[test]
    fn missing_analysis_key_is_rejected() {
        assert!(serde_json::from_value::<AnalysisResult>(json!({ "pros": [], "cons": [] })).is_err());
    }
}
