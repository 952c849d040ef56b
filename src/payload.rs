use serde::Serialize;
use serde_json::Value;

use crate::mode::Mode;

/// Chat model the upstream uses to post-process image and video searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatModel {
    pub provider: String,
    pub model: String,
}

impl Default for ChatModel {
    fn default() -> Self {
        ChatModel {
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash-preview-05-20".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPayload {
    pub query: String,
    pub focus_mode: &'static str,
    pub optimization_mode: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPayload {
    pub query: String,
    pub chat_model: ChatModel,
    pub chat_history: Vec<Value>,
}

/// Request body sent upstream, one variant per payload shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SearchPayload {
    Web(WebPayload),
    Media(MediaPayload),
}

impl Mode {
    pub fn payload(&self, query: &str, chat_model: &ChatModel) -> SearchPayload {
        match self {
            Mode::Web => SearchPayload::Web(WebPayload {
                query: query.to_string(),
                focus_mode: "webSearch",
                optimization_mode: "speed",
            }),
            Mode::Images | Mode::Videos => SearchPayload::Media(MediaPayload {
                query: query.to_string(),
                chat_model: chat_model.clone(),
                chat_history: Vec::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_payload_shape() {
        let payload = Mode::Web.payload("rust", &ChatModel::default());
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "query": "rust",
                "focusMode": "webSearch",
                "optimizationMode": "speed"
            })
        );
    }

    #[test]
    fn test_media_payload_shape() {
        let chat_model = ChatModel {
            provider: "ollama".into(),
            model: "llama3".into(),
        };
        for mode in [Mode::Images, Mode::Videos] {
            let payload = mode.payload("ferris", &chat_model);
            assert_eq!(
                serde_json::to_value(&payload).unwrap(),
                json!({
                    "query": "ferris",
                    "chatModel": {"provider": "ollama", "model": "llama3"},
                    "chatHistory": []
                })
            );
        }
    }
}
