use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAppResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub context: ResponseContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default = "default_assistant_role")]
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseContext {
    #[serde(default)]
    pub data_points: Value,
    #[serde(default)]
    pub thoughts: Vec<ThoughtStep>,
    #[serde(default)]
    pub followup_questions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThoughtStep {
    pub title: String,
    #[serde(default)]
    pub description: Value,
    #[serde(default)]
    pub props: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationRecord {
    pub doc_id: i64,
    pub title: String,
    pub url: String,
}

impl CitationRecord {
    pub fn from_value(value: &Value) -> Option<Self> {
        let doc_id = value.get("doc_id")?.as_i64()?;
        let title = value.get("title")?.as_str()?.to_string();
        let url = value.get("url")?.as_str()?.to_string();
        Some(Self { doc_id, title, url })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub overrides: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub answer_text: String,
    #[serde(default)]
    pub is_partial: bool,
    #[serde(default)]
    pub records: Vec<CitationRecord>,
    #[serde(default)]
    pub followup_questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedAnswer {
    pub answer_html: String,
    pub fragment_html: String,
    pub cited_markers: Vec<String>,
    pub citations: Vec<CitationRecord>,
    pub followup_questions: Vec<String>,
    pub is_partial: bool,
    pub rendered_at: DateTime<Utc>,
    pub latency_ms: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamplesResponse {
    pub examples: Vec<String>,
}

fn default_assistant_role() -> String {
    "assistant".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_upstream_response_shape() {
        let raw = serde_json::json!({
            "choices": [{
                "message": { "role": "assistant", "content": "Fees are due in week 3 [1]." },
                "context": {
                    "data_points": { "text": ["[1]: Name:Fees Description:... Type:pdf"] },
                    "thoughts": [
                        { "title": "Whether RAG functionalities are used", "description": true, "props": { "RAG": true } },
                        { "title": "Search results", "description": [
                            { "doc_id": 1, "title": "Fee Schedule", "url": "https://example.edu/fees.pdf" }
                        ]}
                    ],
                    "followup_questions": ["When is week 3?"]
                }
            }]
        });

        let response: ChatAppResponse =
            serde_json::from_value(raw).expect("expected upstream shape to decode");
        let choice = &response.choices[0];
        assert_eq!(choice.message.content, "Fees are due in week 3 [1].");
        assert_eq!(choice.context.thoughts.len(), 2);
        assert_eq!(
            choice.context.followup_questions.as_deref(),
            Some(&["When is week 3?".to_string()][..])
        );
    }

    #[test]
    fn decodes_response_without_context() {
        let raw = serde_json::json!({
            "choices": [{ "message": { "content": "Hello." } }]
        });

        let response: ChatAppResponse =
            serde_json::from_value(raw).expect("expected minimal shape to decode");
        let choice = &response.choices[0];
        assert_eq!(choice.message.role, "assistant");
        assert!(choice.context.thoughts.is_empty());
        assert!(choice.context.followup_questions.is_none());
    }

    #[test]
    fn citation_record_requires_all_fields() {
        let complete =
            serde_json::json!({ "doc_id": 7, "title": "Handbook", "url": "https://example.edu/h.pdf" });
        let record = CitationRecord::from_value(&complete).expect("expected record");
        assert_eq!(record.doc_id, 7);
        assert_eq!(record.title, "Handbook");

        let missing_url = serde_json::json!({ "doc_id": 7, "title": "Handbook" });
        assert!(CitationRecord::from_value(&missing_url).is_none());

        let string_id = serde_json::json!({ "doc_id": "seven", "title": "Handbook", "url": "x" });
        assert!(CitationRecord::from_value(&string_id).is_none());
    }
}
