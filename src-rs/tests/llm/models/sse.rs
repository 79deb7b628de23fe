use crate::llm::models::sse::{delta_content_from_line, delta_stream, SseLineDecoder};
use tokio_stream::StreamExt;

#[cfg(test)]
mod tests {
    use super::*;

    fn event(content: &str) -> String {
        format!(
            "data: {}",
            serde_json::json!({ "choices": [{ "delta": { "content": content } }] })
        )
    }

    #[test]
    fn decoder_carries_partial_line_to_next_push() {
        let mut decoder = SseLineDecoder::new();
        let line = event("hi");
        let (a, b) = line.as_bytes().split_at(10);

        assert!(decoder.push(a).is_empty());
        assert_eq!(decoder.pending(), 10);
        let mut rest = b.to_vec();
        rest.extend_from_slice(b"\n\n");
        assert_eq!(decoder.push(&rest), vec![line.clone(), String::new()]);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn decoder_strips_crlf() {
        let mut decoder = SseLineDecoder::new();
        assert_eq!(decoder.push(b"data: 1\r\n\r\ndata: 2\r\n"), vec!["data: 1", "", "data: 2"]);
    }

    #[test]
    fn decoder_reassembles_split_multibyte_chars() {
        let mut decoder = SseLineDecoder::new();
        let bytes = "data: привет\n".as_bytes();
        // split inside the two-byte "п"
        assert!(decoder.push(&bytes[..7]).is_empty());
        assert_eq!(decoder.push(&bytes[7..]), vec!["data: привет"]);
    }

    #[test]
    fn finish_returns_trailing_unterminated_line() {
        let mut decoder = SseLineDecoder::new();
        assert!(decoder.push(b"data: [DONE]").is_empty());
        assert_eq!(decoder.finish().as_deref(), Some("data: [DONE]"));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn delta_content_ignores_noise() {
        assert_eq!(delta_content_from_line(&event("abc")).as_deref(), Some("abc"));
        assert_eq!(delta_content_from_line("data:{\"choices\":[{\"delta\":{\"content\":\"x\"}}]}").as_deref(), Some("x"));
        assert_eq!(delta_content_from_line(""), None);
        assert_eq!(delta_content_from_line("data: [DONE]"), None);
        assert_eq!(delta_content_from_line(": keep-alive"), None);
        assert_eq!(delta_content_from_line("event: message"), None);
        assert_eq!(delta_content_from_line("data: {\"choices\":[{\"delta\":"), None);
        assert_eq!(delta_content_from_line(&event("")), None);
        assert_eq!(delta_content_from_line("data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}"), None);
    }

    #[tokio::test]
    async fn delta_stream_forwards_deltas_across_split_reads() {
        let body = format!("{}\n\n{}\n\ndata: [DONE]\n\n", event("{\"analysis\":"), event("{}}"));
        let (a, b) = body.as_bytes().split_at(body.len() / 2);
        let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![Ok(a.to_vec()), Ok(b.to_vec())];

        let out: Vec<String> = delta_stream(tokio_stream::iter(chunks))
            .map(|r| r.unwrap())
            .collect()
            .await;
        assert_eq!(out, vec!["{\"analysis\":", "{}}"]);
    }

    #[tokio::test]
    async fn delta_stream_flushes_last_line_without_newline() {
        let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![Ok(event("tail").into_bytes())];
        let out: Vec<String> = delta_stream(tokio_stream::iter(chunks))
            .map(|r| r.unwrap())
            .collect()
            .await;
        assert_eq!(out, vec!["tail"]);
    }

    #[tokio::test]
    async fn delta_stream_ends_with_error_when_upstream_fails() {
        let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
            Ok(format!("{}\n", event("a")).into_bytes()),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
            Ok(format!("{}\n", event("never")).into_bytes()),
        ];
        let out: Vec<Result<String, anyhow::Error>> =
            delta_stream(tokio_stream::iter(chunks)).collect().await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_ref().unwrap(), "a");
        assert!(out[1].is_err());
    }
}
