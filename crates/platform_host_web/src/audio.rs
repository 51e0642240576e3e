//! Web Audio oscillator tones for [`SoundCue`] playback.

use platform_host::{SoundCue, SoundService};

#[derive(Debug, Clone, Copy, Default)]
/// Sound service that synthesizes each cue with a short sine tone.
pub struct WebSoundService;

impl SoundService for WebSoundService {
    fn play(&self, cue: SoundCue) {
        #[cfg(target_arch = "wasm32")]
        {
            // Autoplay policies reject tones before the first user gesture; that is not an error.
            let _ = play_tone(cue);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = cue;
        }
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static AUDIO_CONTEXT: std::cell::RefCell<Option<web_sys::AudioContext>> =
        const { std::cell::RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
fn shared_context() -> Result<web_sys::AudioContext, wasm_bindgen::JsValue> {
    AUDIO_CONTEXT.with(|slot| {
        if let Some(context) = slot.borrow().as_ref() {
            return Ok(context.clone());
        }
        let context = web_sys::AudioContext::new()?;
        *slot.borrow_mut() = Some(context.clone());
        Ok(context)
    })
}

#[cfg(target_arch = "wasm32")]
fn play_tone(cue: SoundCue) -> Result<(), wasm_bindgen::JsValue> {
    let context = shared_context()?;
    let oscillator = context.create_oscillator()?;
    let gain = context.create_gain()?;

    oscillator.set_type(web_sys::OscillatorType::Sine);
    oscillator.frequency().set_value(cue.frequency_hz());
    gain.gain().set_value(0.1);

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&context.destination())?;

    let now = context.current_time();
    oscillator.start()?;
    oscillator.stop_with_when(now + cue.duration_secs())?;
    Ok(())
}
