//! Payloads exchanged with the `generateContent` endpoint.

use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Part {
    pub text: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
    #[serde(rename = "topP")]
    pub top_p: f32,
}

/// JSON pointer to the answer text inside a `generateContent` response.
pub const CANDIDATE_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Text of the first part of the first candidate, if the response has that
/// shape.
pub fn first_candidate_text(response: &Value) -> Option<&str> {
    response.pointer(CANDIDATE_TEXT_POINTER)?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_config() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                max_output_tokens: 10,
                top_p: 0.25,
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "contents": [{ "parts": [{ "text": "hi" }] }],
                "generationConfig": { "temperature": 0.5, "maxOutputTokens": 10, "topP": 0.25 }
            })
        );
    }

    #[test]
    fn candidate_text_walks_the_expected_shape() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"answer"},{"text":"ignored"}]}}]}"#;
        let response: Value = serde_json::from_str(body).unwrap();
        assert_eq!(first_candidate_text(&response), Some("answer"));
    }

    #[test]
    fn candidate_text_is_none_for_unexpected_shapes() {
        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{}]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#,
            r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#,
            r#"{"candidates":"none"}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":42}]}}]}"#,
            r#"[]"#,
        ] {
            let response: Value = serde_json::from_str(body).unwrap();
            assert_eq!(first_candidate_text(&response), None, "body: {body}");
        }
    }
}
