//! Repeating timers tied to the owning component.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Arena slot that lives exactly as long as the current owner.
fn lifetime_token() -> StoredValue<()> {
    StoredValue::new(())
}

fn still_alive(token: StoredValue<()>) -> bool {
    token.try_get_value().is_some()
}

/// Calls `tick` every `interval_ms` until the current owner is disposed.
/// An interval of zero disables the timer.
pub fn every(interval_ms: u32, tick: impl Fn() + 'static) {
    if interval_ms == 0 {
        return;
    }
    let token = lifetime_token();
    spawn_local(async move {
        loop {
            TimeoutFuture::new(interval_ms).await;
            if !still_alive(token) {
                break;
            }
            tick();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_dies_with_its_owner() {
        let owner = Owner::new();
        let token = owner.with(lifetime_token);
        assert!(still_alive(token));

        owner.cleanup();
        assert!(!still_alive(token));
    }
}
