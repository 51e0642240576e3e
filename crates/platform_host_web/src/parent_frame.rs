//! `window.parent` postMessage transport for the host bridge.

use platform_host::{HostChannel, HostMessage, HostMessageHandler, HostSubscription, ShellMessage};
use serde_json::Value;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, Default)]
/// Host channel that talks to the embedding frame through `postMessage`.
///
/// Outbound messages target origin `*` because the chat host serves the panel from an origin the
/// shell cannot know in advance.
pub struct ParentFrameChannel;

/// Decodes the `data` of an inbound message event.
///
/// Bare strings are kept as JSON strings so the host's plain `TOGGLE_WINDOW` token still matches.
pub fn decode_message_data(data: &JsValue) -> Option<HostMessage> {
    let value = match data.as_string() {
        Some(text) => Value::String(text),
        None => serde_wasm_bindgen::from_value::<Value>(data.clone()).ok()?,
    };
    HostMessage::decode(&value)
}

/// Returns whether the page runs inside another frame.
pub fn is_embedded_frame() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return false;
        };
        match window.parent() {
            Ok(Some(parent)) => !js_sys::Object::is(parent.as_ref(), window.as_ref()),
            _ => false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

impl HostChannel for ParentFrameChannel {
    fn post(&self, message: &ShellMessage) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use serde::Serialize;

            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            let parent = window
                .parent()
                .map_err(|e| format!("parent frame inaccessible: {e:?}"))?
                .ok_or_else(|| "no parent frame".to_string())?;
            let payload = message
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(|e| format!("bridge message encode failed: {e}"))?;
            parent
                .post_message(&payload, "*")
                .map_err(|e| format!("postMessage failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = message;
            Ok(())
        }
    }

    fn subscribe(&self, handler: HostMessageHandler) -> Result<HostSubscription, String> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::{closure::Closure, JsCast};

            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            let listener =
                Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |event: web_sys::MessageEvent| {
                    if let Some(message) = decode_message_data(&event.data()) {
                        handler(message);
                    }
                });
            window
                .add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())
                .map_err(|e| format!("message listener attach failed: {e:?}"))?;

            Ok(HostSubscription::new(move || {
                if let Some(window) = web_sys::window() {
                    let _ = window.remove_event_listener_with_callback(
                        "message",
                        listener.as_ref().unchecked_ref(),
                    );
                }
                drop(listener);
            }))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = handler;
            Ok(HostSubscription::detached())
        }
    }
}
