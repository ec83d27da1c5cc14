//! Single-flight coalescing of token refreshes.
//!
//! The first caller to find the gate idle becomes the leader and runs the
//! refresh. Callers arriving while it is in flight park on a one-shot
//! channel and are released in arrival order with the leader's outcome.

use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;

use super::error::ApiError;

type RefreshOutcome = Result<String, ApiError>;

#[derive(Default)]
enum GateState {
    #[default]
    Idle,
    Refreshing(VecDeque<oneshot::Sender<RefreshOutcome>>),
}

#[derive(Default)]
pub struct RefreshGate {
    state: RefCell<GateState>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(*self.state.borrow(), GateState::Refreshing(_))
    }

    /// Number of callers parked behind the current refresh.
    pub fn waiting(&self) -> usize {
        match &*self.state.borrow() {
            GateState::Refreshing(waiters) => waiters.len(),
            GateState::Idle => 0,
        }
    }

    /// Run `refresh` unless one is already in flight, in which case wait for
    /// that one. Either way, resolve to the shared outcome.
    pub async fn run<F, Fut>(&self, refresh: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome>,
    {
        let parked = {
            let mut state = self.state.borrow_mut();
            match &mut *state {
                GateState::Refreshing(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push_back(tx);
                    Some(rx)
                }
                GateState::Idle => {
                    *state = GateState::Refreshing(VecDeque::new());
                    None
                }
            }
        };

        if let Some(rx) = parked {
            return rx.await.unwrap_or(Err(ApiError::SessionExpired));
        }

        let leader = Leader {
            gate: self,
            released: false,
        };
        let outcome = refresh().await;
        leader.release(outcome.clone());
        outcome
    }

    fn finish(&self, outcome: RefreshOutcome) {
        // Take the waiters before sending so no borrow is held while they wake.
        let waiters = match std::mem::take(&mut *self.state.borrow_mut()) {
            GateState::Refreshing(waiters) => waiters,
            GateState::Idle => VecDeque::new(),
        };
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }
}

/// Releases parked callers even if the leader's future is dropped mid-refresh.
struct Leader<'a> {
    gate: &'a RefreshGate,
    released: bool,
}

impl Leader<'_> {
    fn release(mut self, outcome: RefreshOutcome) {
        self.released = true;
        self.gate.finish(outcome);
    }
}

impl Drop for Leader<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.gate
                .finish(Err(ApiError::Network("token refresh was interrupted".to_string())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn idle_gate_runs_refresh_directly() {
        let gate = RefreshGate::new();
        let outcome =
            futures::executor::block_on(gate.run(|| async { Ok("fresh".to_string()) }));
        assert_eq!(outcome, Ok("fresh".to_string()));
        assert!(!gate.is_refreshing());
    }

    #[test]
    fn concurrent_callers_share_one_refresh_in_fifo_order() {
        let gate = Rc::new(RefreshGate::new());
        let calls = Rc::new(Cell::new(0));
        let order = Rc::new(RefCell::new(Vec::new()));
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let release_rx = Rc::new(RefCell::new(Some(release_rx)));

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for i in 0..5 {
            let gate = gate.clone();
            let calls = calls.clone();
            let order = order.clone();
            let release_rx = release_rx.clone();
            spawner
                .spawn_local(async move {
                    let outcome = gate
                        .run(|| async move {
                            calls.set(calls.get() + 1);
                            let rx = release_rx.borrow_mut().take();
                            if let Some(rx) = rx {
                                let _ = rx.await;
                            }
                            Ok("token-2".to_string())
                        })
                        .await;
                    order.borrow_mut().push((i, outcome));
                })
                .unwrap();
        }

        pool.run_until_stalled();
        assert!(gate.is_refreshing());
        assert_eq!(gate.waiting(), 4);
        assert_eq!(calls.get(), 1);

        release_tx.send(()).unwrap();
        pool.run();

        let order = order.borrow();
        assert_eq!(calls.get(), 1);
        assert_eq!(order.len(), 5);
        assert!(order.iter().all(|(_, o)| o == &Ok("token-2".to_string())));
        let ids: Vec<_> = order.iter().map(|(i, _)| *i).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert!(!gate.is_refreshing());
    }

    #[test]
    fn failure_is_broadcast_to_every_waiter() {
        let gate = Rc::new(RefreshGate::new());
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let release_rx = Rc::new(RefCell::new(Some(release_rx)));
        let results = Rc::new(RefCell::new(Vec::new()));

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..3 {
            let gate = gate.clone();
            let release_rx = release_rx.clone();
            let results = results.clone();
            spawner
                .spawn_local(async move {
                    let outcome = gate
                        .run(|| async move {
                            let rx = release_rx.borrow_mut().take();
                            if let Some(rx) = rx {
                                let _ = rx.await;
                            }
                            Err(ApiError::SessionExpired)
                        })
                        .await;
                    results.borrow_mut().push(outcome);
                })
                .unwrap();
        }

        pool.run_until_stalled();
        release_tx.send(()).unwrap();
        pool.run();

        let results = results.borrow();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r == &Err(ApiError::SessionExpired)));
    }

    #[test]
    fn dropped_leader_releases_waiters() {
        let gate = Rc::new(RefreshGate::new());
        let results = Rc::new(RefCell::new(Vec::new()));
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        let leader = {
            let gate = gate.clone();
            spawner
                .spawn_local_with_handle(async move {
                    gate.run(|| futures::future::pending::<RefreshOutcome>()).await
                })
                .unwrap()
        };
        {
            let gate = gate.clone();
            let results = results.clone();
            spawner
                .spawn_local(async move {
                    let outcome = gate.run(|| async { Ok("unused".to_string()) }).await;
                    results.borrow_mut().push(outcome);
                })
                .unwrap();
        }

        pool.run_until_stalled();
        assert_eq!(gate.waiting(), 1);

        drop(leader);
        pool.run_until_stalled();

        assert!(!gate.is_refreshing());
        assert!(matches!(results.borrow()[0], Err(ApiError::Network(_))));
    }
}
