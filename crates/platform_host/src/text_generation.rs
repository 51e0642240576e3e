//! Remote text-generation contracts used by the text adventure.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`TextGenerationService`].
pub type TextGenerationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Reply shown when no API key is configured. No request is made in that case.
pub const MISSING_API_KEY_REPLY: &str =
    "Add a Gemini API key under Settings > API & Misc to enable AI features.";
/// Reply shown when the service answered with no text.
pub const EMPTY_REPLY: &str = "The AI did not respond... check that your API key is correct.";
/// Reply shown when the request could not be completed.
pub const CONNECTION_FAILED_REPLY: &str = "Connection failed... check your network connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Author of one chat turn.
pub enum ChatRole {
    /// The player.
    User,
    /// The generator.
    Model,
    /// Shell-authored narration.
    System,
}

impl ChatRole {
    /// Role token sent to the generation endpoint. Only model turns keep their role.
    pub const fn wire_role(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::User | Self::System => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One turn of conversation history.
pub struct ChatTurn {
    /// Author of the turn.
    pub role: ChatRole,
    /// Turn text.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Input for one generation call.
pub struct GenerationRequest {
    /// Credential for the remote service.
    pub api_key: String,
    /// Player display name used in the narrator prompt.
    pub player_name: String,
    /// Prior turns, oldest first.
    pub history: Vec<ChatTurn>,
    /// The new player input.
    pub input: String,
}

/// Host service that turns a conversation into the next narrator reply.
pub trait TextGenerationService {
    /// Generates one reply.
    ///
    /// `Ok` may carry an empty string when the remote answered without text.
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> TextGenerationFuture<'a, Result<String, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Generation service for hosts without network access. Every call fails.
pub struct NoopTextGenerationService;

impl TextGenerationService for NoopTextGenerationService {
    fn generate<'a>(
        &'a self,
        _request: &'a GenerationRequest,
    ) -> TextGenerationFuture<'a, Result<String, String>> {
        Box::pin(async { Err("text generation unavailable on this host".to_string()) })
    }
}

#[derive(Debug, Clone)]
/// Generation service returning a fixed outcome and recording the requests it received.
pub struct ScriptedTextGenerationService {
    outcome: Result<String, String>,
    requests: Rc<RefCell<Vec<GenerationRequest>>>,
}

impl ScriptedTextGenerationService {
    /// Creates a service that always yields `outcome`.
    pub fn new(outcome: Result<String, String>) -> Self {
        Self {
            outcome,
            requests: Rc::default(),
        }
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.borrow().clone()
    }
}

impl TextGenerationService for ScriptedTextGenerationService {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> TextGenerationFuture<'a, Result<String, String>> {
        Box::pin(async move {
            self.requests.borrow_mut().push(request.clone());
            self.outcome.clone()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Display text for one generation call plus the underlying failure, if any.
pub struct GeneratedReply {
    /// Text to append to the conversation.
    pub text: String,
    /// Transport error behind a fallback reply, for logging.
    pub failure: Option<String>,
}

impl GeneratedReply {
    fn fallback(text: &str, failure: Option<String>) -> Self {
        Self {
            text: text.to_string(),
            failure,
        }
    }
}

/// Runs one generation call and folds every failure mode into display text.
///
/// A blank API key short-circuits to [`MISSING_API_KEY_REPLY`] without touching the service.
pub async fn generate_reply_with<S: TextGenerationService + ?Sized>(
    service: &S,
    request: &GenerationRequest,
) -> GeneratedReply {
    if request.api_key.trim().is_empty() {
        return GeneratedReply::fallback(MISSING_API_KEY_REPLY, None);
    }

    match service.generate(request).await {
        Ok(text) if !text.trim().is_empty() => GeneratedReply {
            text,
            failure: None,
        },
        Ok(_) => GeneratedReply::fallback(EMPTY_REPLY, None),
        Err(err) => GeneratedReply::fallback(CONNECTION_FAILED_REPLY, Some(err)),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn request(api_key: &str) -> GenerationRequest {
        GenerationRequest {
            api_key: api_key.to_string(),
            player_name: "Ash".to_string(),
            history: vec![ChatTurn {
                role: ChatRole::System,
                text: "You wake up at the forest entrance.".to_string(),
            }],
            input: "look around".to_string(),
        }
    }

    #[test]
    fn blank_api_key_returns_guidance_without_calling_service() {
        let service = ScriptedTextGenerationService::new(Ok("unused".into()));
        let reply = block_on(generate_reply_with(&service, &request("   ")));
        assert_eq!(reply.text, MISSING_API_KEY_REPLY);
        assert_eq!(reply.failure, None);
        assert!(service.requests().is_empty());
    }

    #[test]
    fn successful_reply_is_passed_through() {
        let service = ScriptedTextGenerationService::new(Ok("A path opens.".into()));
        let reply = block_on(generate_reply_with(&service, &request("key")));
        assert_eq!(reply.text, "A path opens.");
        assert_eq!(service.requests().len(), 1);
        assert_eq!(service.requests()[0].input, "look around");
    }

    #[test]
    fn empty_and_failed_replies_become_in_band_messages() {
        let empty = ScriptedTextGenerationService::new(Ok("  ".into()));
        assert_eq!(
            block_on(generate_reply_with(&empty, &request("key"))).text,
            EMPTY_REPLY
        );

        let failing = NoopTextGenerationService;
        let reply = block_on(generate_reply_with(&failing, &request("key")));
        assert_eq!(reply.text, CONNECTION_FAILED_REPLY);
        assert!(reply.failure.is_some());
    }

    #[test]
    fn only_model_turns_keep_model_wire_role() {
        assert_eq!(ChatRole::Model.wire_role(), "model");
        assert_eq!(ChatRole::User.wire_role(), "user");
        assert_eq!(ChatRole::System.wire_role(), "user");
    }
}
