use std::rc::Rc;

use leptos::{create_effect, logging, spawn_local, Callable, Callback};
use platform_host::{HostMessage, HostSubscription, ShellMessage};

use crate::{
    host::ArcadeHostContext,
    persistence,
    reducer::{LoadOrigin, ShellAction},
};

pub(super) fn install_boot_hydration(
    host: ArcadeHostContext,
    dispatch: Callback<ShellAction>,
) -> Option<HostSubscription> {
    let subscription = match host
        .bridge()
        .subscribe(Rc::new(move |message: HostMessage| {
            dispatch.call(ShellAction::Host(message));
        })) {
        Ok(subscription) => Some(subscription),
        Err(err) => {
            logging::warn!("host bridge subscribe failed: {err}");
            None
        }
    };

    // Fire-and-forget; a host that misses this simply never syncs.
    host.post(&ShellMessage::RequestSync);

    create_effect(move |_| {
        let host = host.clone();
        spawn_local(async move {
            let snapshot = persistence::load_snapshot(host.storage().as_ref()).await;
            dispatch.call(ShellAction::HydrateSnapshot {
                snapshot,
                origin: LoadOrigin::Boot,
            });
        });
    });

    subscription
}
