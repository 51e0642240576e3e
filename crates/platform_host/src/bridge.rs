//! Parent-frame messaging protocol between the embedded arcade shell and its chat host.
//!
//! Both directions are explicit enums. Outbound [`ShellMessage`] values serialize to the
//! `{type, payload}` object shape the host listens for; inbound payloads are decoded leniently by
//! [`HostMessage::decode`] so a malformed field never invalidates the rest of the message.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw token the host launcher sends (as a bare string or as `{type}`) to flip visibility.
pub const TOGGLE_WINDOW_TOKEN: &str = "TOGGLE_WINDOW";
/// Message type carrying host theme variables and identity names.
pub const SYNC_DATA_TYPE: &str = "TK_SYNC_DATA";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload")]
/// Messages the shell posts to the parent frame.
pub enum ShellMessage {
    /// The panel became visible and should receive pointer input.
    #[serde(rename = "ST_MAKE_INTERACTIVE")]
    BecameInteractive,
    /// The panel was hidden and should let pointer input pass through.
    #[serde(rename = "ST_MAKE_INACTIVE")]
    BecameInactive,
    /// Ask the host to push its current theme and identity.
    #[serde(rename = "TK_REQUEST_SYNC")]
    RequestSync,
    /// Ask the host to run a chat command on the shell's behalf.
    #[serde(rename = "TK_EXECUTE_COMMAND")]
    ExecuteCommand(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Theme variables published by the host. Every field is optional; gaps resolve to defaults.
pub struct HostThemeColors {
    /// Base background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_base: Option<String>,
    /// Header background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_header: Option<String>,
    /// Main text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_main: Option<String>,
    /// Dimmed text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    /// Border.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    /// Primary / accent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    /// Panel background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<String>,
}

impl HostThemeColors {
    fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let field = |name: &str| {
            object
                .get(name)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .map(str::to_string)
        };
        Some(Self {
            bg_base: field("bgBase"),
            bg_header: field("bgHeader"),
            text_main: field("textMain"),
            text_dim: field("textDim"),
            border: field("border"),
            primary: field("primary"),
            panel: field("panel"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Decoded `TK_SYNC_DATA` payload. Absent or ill-typed fields are `None`.
pub struct HostSync {
    /// Replacement host palette, when the payload carried a `colors` object.
    pub colors: Option<HostThemeColors>,
    /// Player display name, when non-empty.
    pub user_name: Option<String>,
    /// Character display name, when non-empty.
    pub char_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Messages the parent frame sends to the shell.
pub enum HostMessage {
    /// Flip shell visibility.
    Toggle,
    /// Theme and identity synchronization.
    Sync(HostSync),
}

impl HostMessage {
    /// Decodes an inbound message event payload.
    ///
    /// Returns `None` for anything that is not a recognized message. Recognized messages keep
    /// every well-formed field and drop the rest.
    pub fn decode(value: &Value) -> Option<Self> {
        if value.as_str() == Some(TOGGLE_WINDOW_TOKEN) {
            return Some(Self::Toggle);
        }

        let object = value.as_object()?;
        match object.get("type").and_then(Value::as_str)? {
            TOGGLE_WINDOW_TOKEN => Some(Self::Toggle),
            SYNC_DATA_TYPE => {
                let payload = object.get("payload")?.as_object()?;
                let name = |key: &str| {
                    payload
                        .get(key)
                        .and_then(Value::as_str)
                        .filter(|raw| !raw.trim().is_empty())
                        .map(str::to_string)
                };
                Some(Self::Sync(HostSync {
                    colors: payload.get("colors").and_then(HostThemeColors::from_json),
                    user_name: name("userName"),
                    char_name: name("charName"),
                }))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity token understood by the host's `/echo` command.
pub enum ToastSeverity {
    /// Neutral information.
    Info,
    /// Positive confirmation.
    Success,
    /// Recoverable problem.
    Warning,
    /// Failure.
    Error,
}

impl ToastSeverity {
    /// Returns the host command token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Builds the host command that shows a toast. `|` is the host's pipe separator and is escaped.
pub fn toast_command(text: &str, severity: ToastSeverity) -> String {
    format!("/echo severity={} {}", severity.as_str(), text.replace('|', "\\|"))
}

/// Builds the host command that posts `text` as a comment into the chat log.
pub fn share_command(text: &str) -> String {
    format!("/comment {text}")
}

/// Callback receiving decoded inbound host messages.
pub type HostMessageHandler = Rc<dyn Fn(HostMessage)>;

/// Live inbound subscription. Dropping it detaches the listener.
pub struct HostSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl HostSubscription {
    /// Wraps the routine that detaches the listener.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Subscription with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for HostSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for HostSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostSubscription")
            .field("attached", &self.release.is_some())
            .finish()
    }
}

/// Two-way channel to the parent frame.
pub trait HostChannel {
    /// Posts one message. Delivery is fire-and-forget; no reply is awaited.
    ///
    /// # Errors
    ///
    /// Returns an error when the message cannot be serialized or the frame rejects it.
    fn post(&self, message: &ShellMessage) -> Result<(), String>;

    /// Starts delivering decoded inbound messages to `handler` until the subscription drops.
    ///
    /// # Errors
    ///
    /// Returns an error when the listener cannot be attached.
    fn subscribe(&self, handler: HostMessageHandler) -> Result<HostSubscription, String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Channel used when the shell runs outside an embedding frame.
pub struct NoopHostChannel;

impl HostChannel for NoopHostChannel {
    fn post(&self, _message: &ShellMessage) -> Result<(), String> {
        Ok(())
    }

    fn subscribe(&self, _handler: HostMessageHandler) -> Result<HostSubscription, String> {
        Ok(HostSubscription::detached())
    }
}

#[derive(Clone, Default)]
/// In-memory channel that records posted messages and lets callers inject inbound ones.
pub struct RecordingHostChannel {
    sent: Rc<RefCell<Vec<ShellMessage>>>,
    handlers: Rc<RefCell<Vec<(u64, HostMessageHandler)>>>,
    next_handler_id: Rc<std::cell::Cell<u64>>,
}

impl RecordingHostChannel {
    /// Returns the messages posted so far, oldest first.
    pub fn sent(&self) -> Vec<ShellMessage> {
        self.sent.borrow().clone()
    }

    /// Delivers an inbound message to every live subscriber.
    pub fn deliver(&self, message: HostMessage) {
        let handlers: Vec<HostMessageHandler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(message.clone());
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl std::fmt::Debug for RecordingHostChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingHostChannel")
            .field("sent", &self.sent.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl HostChannel for RecordingHostChannel {
    fn post(&self, message: &ShellMessage) -> Result<(), String> {
        self.sent.borrow_mut().push(message.clone());
        Ok(())
    }

    fn subscribe(&self, handler: HostMessageHandler) -> Result<HostSubscription, String> {
        let id = self.next_handler_id.get();
        self.next_handler_id.set(id + 1);
        self.handlers.borrow_mut().push((id, handler));
        let handlers = self.handlers.clone();
        Ok(HostSubscription::new(move || {
            handlers.borrow_mut().retain(|(existing, _)| *existing != id);
        }))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn outbound_messages_use_host_wire_shape() {
        assert_eq!(
            serde_json::to_value(ShellMessage::BecameInteractive).expect("serialize"),
            json!({"type": "ST_MAKE_INTERACTIVE"})
        );
        assert_eq!(
            serde_json::to_value(ShellMessage::RequestSync).expect("serialize"),
            json!({"type": "TK_REQUEST_SYNC"})
        );
        assert_eq!(
            serde_json::to_value(ShellMessage::ExecuteCommand("/echo hi".into()))
                .expect("serialize"),
            json!({"type": "TK_EXECUTE_COMMAND", "payload": "/echo hi"})
        );
    }

    #[test]
    fn toggle_is_accepted_as_bare_string_or_typed_object() {
        assert_eq!(
            HostMessage::decode(&json!("TOGGLE_WINDOW")),
            Some(HostMessage::Toggle)
        );
        assert_eq!(
            HostMessage::decode(&json!({"type": "TOGGLE_WINDOW"})),
            Some(HostMessage::Toggle)
        );
        assert_eq!(HostMessage::decode(&json!("toggle")), None);
        assert_eq!(HostMessage::decode(&json!(42)), None);
    }

    #[test]
    fn sync_keeps_well_formed_fields_and_drops_the_rest() {
        let decoded = HostMessage::decode(&json!({
            "type": "TK_SYNC_DATA",
            "payload": {
                "colors": {"bgBase": "#101010", "primary": 7, "border": ""},
                "userName": "Mira",
                "charName": 12
            }
        }));

        assert_eq!(
            decoded,
            Some(HostMessage::Sync(HostSync {
                colors: Some(HostThemeColors {
                    bg_base: Some("#101010".into()),
                    ..HostThemeColors::default()
                }),
                user_name: Some("Mira".into()),
                char_name: None,
            }))
        );
    }

    #[test]
    fn sync_without_payload_object_is_ignored() {
        assert_eq!(HostMessage::decode(&json!({"type": "TK_SYNC_DATA"})), None);
        assert_eq!(
            HostMessage::decode(&json!({"type": "TK_SYNC_DATA", "payload": "x"})),
            None
        );
        assert_eq!(HostMessage::decode(&json!({"kind": "TK_SYNC_DATA"})), None);
    }

    #[test]
    fn sync_with_non_object_colors_leaves_palette_untouched() {
        let decoded = HostMessage::decode(&json!({
            "type": "TK_SYNC_DATA",
            "payload": {"colors": "dark", "userName": "  "}
        }));
        assert_eq!(decoded, Some(HostMessage::Sync(HostSync::default())));
    }

    #[test]
    fn toast_command_escapes_pipes() {
        assert_eq!(
            toast_command("a|b", ToastSeverity::Success),
            "/echo severity=success a\\|b"
        );
        assert_eq!(share_command("hello"), "/comment hello");
    }

    #[test]
    fn recording_channel_keeps_post_order() {
        let channel = RecordingHostChannel::default();
        let channel_obj: &dyn HostChannel = &channel;
        channel_obj.post(&ShellMessage::RequestSync).expect("post");
        channel_obj
            .post(&ShellMessage::BecameInactive)
            .expect("post");
        assert_eq!(
            channel.sent(),
            vec![ShellMessage::RequestSync, ShellMessage::BecameInactive]
        );
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let channel = RecordingHostChannel::default();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        let subscription = channel
            .subscribe(Rc::new(move |message| sink.borrow_mut().push(message)))
            .expect("subscribe");

        channel.deliver(HostMessage::Toggle);
        drop(subscription);
        channel.deliver(HostMessage::Toggle);

        assert_eq!(*received.borrow(), vec![HostMessage::Toggle]);
        assert_eq!(channel.subscriber_count(), 0);
    }
}
