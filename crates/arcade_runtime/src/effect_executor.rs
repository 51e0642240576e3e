//! Effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::runtime_context::ArcadeRuntimeContext;

/// Installs the executor that drains queued runtime effects in emission order.
pub fn install(runtime: ArcadeRuntimeContext) {
    create_effect(move |_| {
        if runtime.effects.with(Vec::is_empty) {
            return;
        }
        // Taking the batch first lets effects that dispatch again queue a fresh one.
        let batch = runtime
            .effects
            .try_update(std::mem::take)
            .unwrap_or_default();
        let host = runtime.host.get_value();
        for effect in batch {
            host.run_runtime_effect(runtime, effect);
        }
    });
}
