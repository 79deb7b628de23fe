use crate::client::{ResultsView, StreamAccumulator};
use crate::analysis::ExtractError;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fills_lists_in_order_and_shows_panel() {
        let mut view = ResultsView::new();
        view.render(&json!({ "analysis": { "pros": ["A", "B"], "cons": ["C"] } }))
            .unwrap();
        assert!(view.visible);
        assert_eq!(view.pros, vec!["A", "B"]);
        assert_eq!(view.cons, vec!["C"]);
        assert_eq!(view.to_string(), "Pros:\n  + A\n  + B\nCons:\n  - C\n");
    }

    #[test]
    fn render_replaces_previous_results() {
        let mut view = ResultsView::new();
        view.render(&json!({ "analysis": { "pros": ["old"], "cons": ["old"] } }))
            .unwrap();
        view.render(&json!({ "analysis": { "pros": ["new"], "cons": [] } }))
            .unwrap();
        assert_eq!(view.pros, vec!["new"]);
        assert!(view.cons.is_empty());
    }

    #[test]
    fn null_or_missing_lists_render_empty() {
        let mut view = ResultsView::new();
        view.render(&json!({ "analysis": { "pros": null } })).unwrap();
        assert!(view.visible);
        assert!(view.pros.is_empty());
        assert!(view.cons.is_empty());
        assert_eq!(view.to_string(), "Pros:\nCons:\n");
    }

    #[test]
    fn missing_analysis_key_is_an_error() {
        let mut view = ResultsView::new();
        assert!(view.render(&json!({ "pros": ["A"] })).is_err());
        assert!(!view.visible);
        assert_eq!(view.to_string(), "");
    }

    #[test]
    fn accumulator_rebuilds_object_split_across_chunks() {
        let mut acc = StreamAccumulator::new();
        acc.push(br#"{"analysis":"#);
        acc.push(br#"{"pros":[],"cons":[]}}"#);
        assert_eq!(acc.chunks(), 2);
        let value = acc.finish().unwrap();
        assert_eq!(value, json!({ "analysis": { "pros": [], "cons": [] } }));
    }

    #[test]
    fn accumulator_joins_multibyte_text_split_mid_character() {
        let bytes = "{\"analysis\":{\"pros\":[\"Дёшево\"],\"cons\":[]}}".as_bytes();
        // 'Д' starts at byte 22 and is two bytes long
        let (head, tail) = bytes.split_at(23);
        let mut acc = StreamAccumulator::new();
        acc.push(head);
        acc.push(tail);

        let mut view = ResultsView::new();
        view.render(&acc.finish().unwrap()).unwrap();
        assert_eq!(view.pros, vec!["Дёшево"]);
    }

    #[test]
    fn accumulator_without_object_fails() {
        let mut acc = StreamAccumulator::new();
        acc.push(b"I cannot answer that.");
        assert!(matches!(acc.finish(), Err(ExtractError::NoObject)));
    }
}
