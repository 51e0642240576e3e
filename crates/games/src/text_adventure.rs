//! AI text adventure narrated by the remote text-generation service.

use std::future::Future;

use arcade_game_contract::{GameId, GameMountContext, GameServices};
use leptos::*;
use platform_host::{
    generate_reply_with, unix_time_ms_now, ChatRole, ChatTurn, GenerationRequest, SoundCue,
};
use serde::{Deserialize, Serialize};

use crate::{surface::GameFrame, GameRng, GameSlot, GameState, TypedSlot};

const WELCOME: &str = "Welcome to the text adventure! You wake up at the entrance of a mysterious \
                       forest. What do you do?";
const SHARE_PREFIX: &str = "[AI Adventure]";
const SHARE_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One line of the adventure log.
pub struct AdventureMessage {
    /// Author.
    pub role: ChatRole,
    /// Message text.
    pub text: String,
    /// Unix ms when the message was added.
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Adventure log and character sheet.
pub struct TextAdventureState {
    /// Log, oldest first; the first entry is the welcome narration.
    pub messages: Vec<AdventureMessage>,
    /// A reply is pending. Never restored from a save: the request died with the old page.
    #[serde(skip_deserializing)]
    pub is_loading: bool,
    /// Carried items.
    pub inventory: Vec<String>,
    /// Hit points.
    pub health: u32,
    /// Current place name.
    pub location: String,
}

impl TextAdventureState {
    fn welcome(now: u64) -> Self {
        Self {
            messages: vec![AdventureMessage {
                role: ChatRole::System,
                text: WELCOME.to_string(),
                timestamp: now,
            }],
            is_loading: false,
            inventory: Vec::new(),
            health: 100,
            location: "Forest Entrance".to_string(),
        }
    }

    /// Appends the player's input and marks a reply as pending.
    ///
    /// Returns the history that precedes the input, or `None` when the input is blank or a reply
    /// is already pending.
    pub fn begin_turn(&mut self, input: &str, now: u64) -> Option<Vec<ChatTurn>> {
        if self.is_loading || input.trim().is_empty() {
            return None;
        }
        let history = self
            .messages
            .iter()
            .map(|message| ChatTurn {
                role: message.role,
                text: message.text.clone(),
            })
            .collect();
        self.messages.push(AdventureMessage {
            role: ChatRole::User,
            text: input.to_string(),
            timestamp: now,
        });
        self.is_loading = true;
        Some(history)
    }

    /// Appends the narrator's reply and clears the pending flag.
    pub fn finish_turn(&mut self, reply: String, now: u64) {
        self.messages.push(AdventureMessage {
            role: ChatRole::Model,
            text: reply,
            timestamp: now,
        });
        self.is_loading = false;
    }

    /// Chat-log excerpt of the latest message, once the adventure has started.
    pub fn share_excerpt(&self) -> Option<String> {
        if self.messages.len() <= 1 {
            return None;
        }
        let last = self.messages.last()?;
        let excerpt: String = last.text.chars().take(SHARE_LIMIT).collect();
        let ellipsis = if last.text.chars().count() > SHARE_LIMIT {
            "..."
        } else {
            ""
        };
        Some(format!("{SHARE_PREFIX} {excerpt}{ellipsis}"))
    }
}

impl GameState for TextAdventureState {
    const GAME: GameId = GameId::TextAdventure;

    fn new_game(_rng: &mut GameRng) -> Self {
        Self::welcome(unix_time_ms_now())
    }

    fn status_line(&self) -> String {
        if self.is_loading {
            "The narrator is thinking...".to_string()
        } else {
            format!("{} | HP {}", self.location, self.health)
        }
    }
}

/// Records `input` as the player's turn and returns the pending narrator reply.
///
/// Returns `None` when the turn is rejected (blank input or a reply already pending). The future
/// touches only the slot handle and the services, so it completes even if the view is gone.
pub fn start_turn(
    slot: TypedSlot<TextAdventureState>,
    services: &GameServices,
    input: &str,
) -> Option<impl Future<Output = ()> + 'static> {
    let history = slot
        .update(|state| state.begin_turn(input, unix_time_ms_now()))
        .flatten()?;
    services.play(SoundCue::Click);
    let profile = services.profile.get_untracked();
    let request = GenerationRequest {
        api_key: profile.api_key,
        player_name: profile.user_name,
        history,
        input: input.to_string(),
    };
    let services = services.clone();
    Some(async move {
        let reply = generate_reply_with(services.text_generation.as_ref(), &request).await;
        if let Some(failure) = &reply.failure {
            logging::warn!("adventure reply failed: {failure}");
        }
        slot.update(|state| state.finish_turn(reply.text, unix_time_ms_now()));
        services.play(SoundCue::Pop);
    })
}

/// Mounts the text adventure surface.
pub fn mount(context: GameMountContext<GameSlot>) -> View {
    let slot = TypedSlot::<TextAdventureState>::new(context.slot);
    slot.ensure();
    let services = store_value(context.services);
    let input = create_rw_signal(String::new());

    let send = move || {
        let text = input.get_untracked();
        let Some(reply) = services.with_value(|services| start_turn(slot, services, &text)) else {
            return;
        };
        input.set(String::new());
        spawn_local(reply);
    };

    let share = move |_| {
        let Some(excerpt) = slot.current().and_then(|state| state.share_excerpt()) else {
            return;
        };
        services.with_value(|services| {
            services.share_to_chat(excerpt);
            services.play(SoundCue::Success);
        });
    };

    view! {
        <GameFrame game="text-adventure" status=slot.status() on_new_game=move |_| slot.reset()>
            <div class="adventure-log" aria-live="polite">
                {move || {
                    slot.state()
                        .get()
                        .map(|state| state.messages)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|message| {
                            let role = match message.role {
                                ChatRole::User => "user",
                                ChatRole::Model => "model",
                                ChatRole::System => "system",
                            };
                            view! { <p class="adventure-line" data-role=role>{message.text}</p> }
                        })
                        .collect_view()
                }}
                <Show when=move || slot.state().get().is_some_and(|state| state.is_loading) fallback=|| ()>
                    <p class="adventure-line thinking">"Thinking..."</p>
                </Show>
            </div>
            <div class="adventure-input">
                <input
                    class="no-drag"
                    type="text"
                    placeholder="What do you do?"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            send();
                        }
                    }
                />
                <button type="button" class="no-drag" on:click=move |_| send()>"Send"</button>
                <button type="button" class="no-drag" title="Share to chat" on:click=share>"Share"</button>
            </div>
        </GameFrame>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use arcade_game_contract::{GameCommand, PlayerProfile, SlotHandle};
    use futures::{
        channel::oneshot,
        executor::{block_on, LocalPool},
        task::LocalSpawnExt,
    };
    use platform_host::{
        ScriptedTextGenerationService, TextGenerationFuture, TextGenerationService,
        MISSING_API_KEY_REPLY,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    /// Generation service whose reply arrives only when the test sends it.
    struct DeferredGeneration {
        reply: RefCell<Option<oneshot::Receiver<String>>>,
    }

    impl TextGenerationService for DeferredGeneration {
        fn generate<'a>(
            &'a self,
            _request: &'a GenerationRequest,
        ) -> TextGenerationFuture<'a, Result<String, String>> {
            let reply = self.reply.borrow_mut().take();
            Box::pin(async move {
                match reply {
                    Some(reply) => reply.await.map_err(|_| "reply dropped".to_string()),
                    None => Err("no reply scripted".to_string()),
                }
            })
        }
    }

    fn stored_adventure(stored: RwSignal<Option<GameSlot>>) -> TextAdventureState {
        stored.with_untracked(|slot| match slot {
            Some(GameSlot::TextAdventure(state)) => state.clone(),
            other => panic!("unexpected slot {other:?}"),
        })
    }

    #[test]
    fn reply_lands_after_the_game_view_is_disposed() {
        let runtime = create_runtime();
        // Shell-owned slot storage, outliving the view like the runtime's slot handles do.
        let stored = create_rw_signal(None::<GameSlot>);
        let handle = SlotHandle::new(
            Signal::derive(move || stored.get()),
            Callback::new(move |slot: GameSlot| stored.set(Some(slot))),
        );
        let sent = Rc::new(RefCell::new(Vec::new()));
        let commands = {
            let sent = Rc::clone(&sent);
            Callback::new(move |command: GameCommand| sent.borrow_mut().push(command))
        };
        let (reply_tx, reply_rx) = oneshot::channel();
        let services = GameServices::new(
            commands,
            Signal::derive(|| PlayerProfile {
                user_name: "Ash".into(),
                api_key: "key".into(),
                ..PlayerProfile::default()
            }),
            Rc::new(DeferredGeneration {
                reply: RefCell::new(Some(reply_rx)),
            }),
        );

        let mount_view = as_child_of_current_owner(move |_: ()| {
            let slot = TypedSlot::<TextAdventureState>::new(handle);
            slot.ensure();
            start_turn(slot, &services, "open the gate")
        });
        let (pending, view_owner) = mount_view(());
        let pending = pending.expect("turn starts");

        let mut pool = LocalPool::new();
        pool.spawner().spawn_local(pending).expect("spawn reply");
        pool.run_until_stalled();
        assert!(stored_adventure(stored).is_loading);

        drop(view_owner);
        reply_tx
            .send("The gate creaks open.".to_string())
            .expect("reply receiver alive");
        pool.run();

        let state = stored_adventure(stored);
        assert!(!state.is_loading);
        assert_eq!(state.messages.len(), 3);
        assert_eq!(state.messages[2].role, ChatRole::Model);
        assert_eq!(state.messages[2].text, "The gate creaks open.");
        assert_eq!(
            *sent.borrow(),
            vec![
                GameCommand::PlaySound(SoundCue::Click),
                GameCommand::PlaySound(SoundCue::Pop)
            ]
        );
        runtime.dispose();
    }

    #[test]
    fn pending_flag_is_not_restored_from_a_save() {
        let mut state = TextAdventureState::welcome(1);
        state.begin_turn("look", 2).expect("turn starts");
        let json = serde_json::to_value(&state).expect("encode");
        assert_eq!(json["isLoading"], serde_json::Value::Bool(true));

        let restored: TextAdventureState = serde_json::from_value(json).expect("decode");
        assert!(!restored.is_loading);
        assert_eq!(restored.messages, state.messages);
    }

    #[test]
    fn adventure_opens_with_system_welcome() {
        let state = TextAdventureState::new_game(&mut GameRng::new(0));
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].role, ChatRole::System);
        assert_eq!(state.health, 100);
        assert_eq!(state.location, "Forest Entrance");
        assert_eq!(state.share_excerpt(), None);
    }

    #[test]
    fn only_one_turn_is_in_flight() {
        let mut state = TextAdventureState::welcome(1);
        assert_eq!(state.begin_turn("   ", 2), None);

        let history = state.begin_turn("open the gate", 2).expect("turn starts");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, ChatRole::System);
        assert!(state.is_loading);
        assert_eq!(state.begin_turn("run", 3), None);

        state.finish_turn("The gate creaks open.".into(), 4);
        assert!(!state.is_loading);
        assert_eq!(state.messages.len(), 3);
        assert_eq!(state.messages[2].role, ChatRole::Model);
    }

    #[test]
    fn missing_key_reply_lands_in_the_log_without_a_request() {
        let service = ScriptedTextGenerationService::new(Ok("unused".into()));
        let mut state = TextAdventureState::welcome(1);
        let history = state.begin_turn("look", 2).expect("turn starts");
        let request = GenerationRequest {
            api_key: String::new(),
            player_name: "Ash".into(),
            history,
            input: "look".into(),
        };
        let reply = block_on(generate_reply_with(&service, &request));
        state.finish_turn(reply.text, 3);

        assert!(service.requests().is_empty());
        assert_eq!(state.messages.last().map(|m| m.text.as_str()), Some(MISSING_API_KEY_REPLY));
        assert!(!state.is_loading);
    }

    #[test]
    fn share_excerpt_truncates_long_replies() {
        let mut state = TextAdventureState::welcome(1);
        state.begin_turn("go", 2);
        state.finish_turn("x".repeat(120), 3);
        let excerpt = state.share_excerpt().expect("excerpt");
        assert_eq!(excerpt, format!("[AI Adventure] {}...", "x".repeat(100)));

        state.begin_turn("stop", 4);
        state.finish_turn("Done.".into(), 5);
        assert_eq!(state.share_excerpt().as_deref(), Some("[AI Adventure] Done."));
    }
}
