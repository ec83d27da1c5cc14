use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;

/// Width of the modal surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Wide,
}

impl ModalSize {
    fn class(self) -> &'static str {
        match self {
            ModalSize::Small => "modal--small",
            ModalSize::Medium => "modal--medium",
            ModalSize::Wide => "modal--wide",
        }
    }
}

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    size: ModalSize,
    builder: ModalBuilder,
}

/// Lets a form close the modal it lives in.
#[derive(Clone, Copy)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

/// Stack of open modals. A details form may open a picker on top of itself;
/// Escape only closes the topmost one.
#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: StoredValue<u64>,
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn is_open(&self) -> bool {
        !self.stack.get().is_empty()
    }

    pub fn push<F>(&self, size: ModalSize, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        let builder: ModalBuilder = Arc::new(builder);
        self.stack.update(|s| s.push(ModalEntry { id, size, builder }));
        ModalHandle { id, svc: *self }
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    /// Removing a modal during its own click dispatch would drop the handler
    /// that is still running, so removal waits for the next tick.
    pub fn close_deferred(&self, id: u64) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            svc.close(id);
        });
    }

    fn pop_deferred(&self) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            svc.stack.update(|s| {
                s.pop();
            });
        });
    }

    pub fn clear(&self) {
        self.stack.set(Vec::new());
    }
}

pub fn use_modals() -> ModalStackService {
    use_context::<ModalStackService>().expect("ModalStackService not provided in context")
}

/// Mounted once at the application root.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_modals();

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                if key.key() == "Escape" && svc.stack.with_untracked(|s| !s.is_empty()) {
                    svc.pop_deferred();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // Lives as long as the page.
            closure.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each={move || svc.stack.get().into_iter().enumerate().collect::<Vec<_>>()}
                key={|item: &(usize, ModalEntry)| item.1.id}
                children=move |item: (usize, ModalEntry)| {
                    let (depth, entry) = item;
                    let id = entry.id;
                    let handle = ModalHandle { id, svc };
                    view! {
                        <ModalFrame
                            z_index=1000 + depth as i32
                            modal_class=entry.size.class().to_string()
                            on_close=Callback::new(move |_| svc.close_deferred(id))
                        >
                            {(entry.builder)(handle)}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}
