//! Gemini `generateContent` adapter for [`TextGenerationService`].

use platform_host::{GenerationRequest, TextGenerationFuture, TextGenerationService};
use serde_json::{json, Value};

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

#[derive(Debug, Clone, Copy, Default)]
/// Browser `fetch` client for the Gemini REST API.
pub struct GeminiTextGenerationService;

fn narrator_prompt(player_name: &str) -> String {
    let player_name = if player_name.trim().is_empty() {
        "User"
    } else {
        player_name
    };
    format!(
        "System: You are a Dungeon Master for a text adventure game. The player's name is \
         {player_name}. Keep responses short (under 100 words) and engaging. Be creative."
    )
}

/// Builds the request body: narrator prompt, mapped history, then the new input.
pub fn build_request_body(request: &GenerationRequest) -> Value {
    let mut contents = Vec::with_capacity(request.history.len() + 2);
    contents.push(json!({
        "role": "user",
        "parts": [{"text": narrator_prompt(&request.player_name)}],
    }));
    contents.extend(request.history.iter().map(|turn| {
        json!({
            "role": turn.role.wire_role(),
            "parts": [{"text": turn.text}],
        })
    }));
    contents.push(json!({
        "role": "user",
        "parts": [{"text": request.input}],
    }));
    json!({ "contents": contents })
}

/// Extracts the first candidate's text. Missing pieces yield an empty string.
pub fn extract_reply_text(response: &Value) -> String {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(target_arch = "wasm32")]
fn request_url(api_key: &str) -> String {
    let key = String::from(js_sys::encode_uri_component(api_key));
    format!("{GEMINI_ENDPOINT}?key={key}")
}

impl TextGenerationService for GeminiTextGenerationService {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> TextGenerationFuture<'a, Result<String, String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use wasm_bindgen::JsCast;
                use wasm_bindgen_futures::JsFuture;

                let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
                let body = build_request_body(request).to_string();

                let init = web_sys::RequestInit::new();
                init.set_method("POST");
                init.set_body(&wasm_bindgen::JsValue::from_str(&body));
                let http_request =
                    web_sys::Request::new_with_str_and_init(&request_url(&request.api_key), &init)
                        .map_err(|e| format!("request build failed: {e:?}"))?;
                http_request
                    .headers()
                    .set("Content-Type", "application/json")
                    .map_err(|e| format!("request header failed: {e:?}"))?;

                let response = JsFuture::from(window.fetch_with_request(&http_request))
                    .await
                    .map_err(|e| format!("fetch failed: {e:?}"))?
                    .dyn_into::<web_sys::Response>()
                    .map_err(|_| "fetch returned a non-response value".to_string())?;
                let text_promise = response
                    .text()
                    .map_err(|e| format!("response body unavailable: {e:?}"))?;
                let raw = JsFuture::from(text_promise)
                    .await
                    .map_err(|e| format!("response body read failed: {e:?}"))?
                    .as_string()
                    .unwrap_or_default();
                let parsed: Value = serde_json::from_str(&raw)
                    .map_err(|e| format!("response is not JSON (status {}): {e}", response.status()))?;
                Ok(extract_reply_text(&parsed))
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (request, GEMINI_ENDPOINT);
                Err("Gemini requests require a browser host".to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use platform_host::{ChatRole, ChatTurn};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn request_body_prefixes_narrator_and_maps_roles() {
        let request = GenerationRequest {
            api_key: "k".into(),
            player_name: "Ash".into(),
            history: vec![
                ChatTurn {
                    role: ChatRole::System,
                    text: "Welcome.".into(),
                },
                ChatTurn {
                    role: ChatRole::Model,
                    text: "A wolf appears.".into(),
                },
            ],
            input: "run".into(),
        };

        let body = build_request_body(&request);
        let contents = body["contents"].as_array().expect("contents array");
        assert_eq!(contents.len(), 4);
        assert!(contents[0]["parts"][0]["text"]
            .as_str()
            .expect("prompt")
            .contains("The player's name is Ash."));
        assert_eq!(contents[1]["role"], "user");
        assert_eq!(contents[2]["role"], "model");
        assert_eq!(contents[3], json!({"role": "user", "parts": [{"text": "run"}]}));
    }

    #[test]
    fn blank_player_name_falls_back_to_user() {
        assert!(narrator_prompt(" ").contains("The player's name is User."));
    }

    #[test]
    fn reply_text_comes_from_first_candidate() {
        let response = json!({
            "candidates": [{"content": {"parts": [{"text": "You find a key."}]}}]
        });
        assert_eq!(extract_reply_text(&response), "You find a key.");
        assert_eq!(extract_reply_text(&json!({"error": {"code": 400}})), "");
    }
}
