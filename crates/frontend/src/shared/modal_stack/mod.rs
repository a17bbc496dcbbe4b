use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;
type CloseGuard = Arc<dyn Fn() -> bool + Send + Sync>;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    builder: ModalBuilder,
    modal_class: Option<String>,
    can_close: Option<CloseGuard>,
}

impl ModalEntry {
    fn may_close(&self) -> bool {
        self.can_close.as_ref().map(|f| f()).unwrap_or(true)
    }
}

/// Returned by [`ModalStackService::push`]; lets a modal close itself.
#[derive(Clone)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

/// Stack of open modals: detail panels, upload dialogs, alerts on top.
///
/// Escape closes only the topmost modal (handled by `ModalHost`).
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

    fn defer(&self, f: impl FnOnce(ModalStackService) + 'static) {
        let svc = *self;
        spawn_local(async move {
            // next tick: the modal may be removed while its own click is still dispatching
            TimeoutFuture::new(0).await;
            f(svc);
        });
    }

    pub fn is_open(&self) -> bool {
        !self.stack.with(Vec::is_empty)
    }

    fn push_entry(
        &self,
        modal_class: Option<String>,
        can_close: Option<CloseGuard>,
        builder: ModalBuilder,
    ) -> ModalHandle {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                builder,
                modal_class,
                can_close,
            })
        });

        ModalHandle { id, svc: *self }
    }

    /// Push a new modal; `builder` receives the handle to close it.
    pub fn push<F>(&self, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_entry(None, None, Arc::new(builder))
    }

    /// Push with an extra class on the modal surface (e.g. `modal--wide`).
    pub fn push_with_class<F>(&self, modal_class: &str, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_entry(Some(modal_class.to_string()), None, Arc::new(builder))
    }

    /// Push a modal that refuses overlay-click and Escape while `can_close`
    /// returns false (e.g. during an upload).
    pub fn push_guarded<F, G>(&self, modal_class: &str, can_close: G, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.push_entry(
            Some(modal_class.to_string()),
            Some(Arc::new(can_close)),
            Arc::new(builder),
        )
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    pub fn close_deferred(&self, id: u64) {
        self.defer(move |svc| svc.close(id));
    }

    /// Close the topmost modal unless its guard objects.
    fn pop_if_allowed(&self) {
        let allowed = self
            .stack
            .with_untracked(|s| s.last().map(ModalEntry::may_close).unwrap_or(false));
        if allowed {
            self.defer(|svc| {
                svc.stack.update(|s| {
                    s.pop();
                })
            });
        }
    }

    pub fn clear(&self) {
        self.stack.set(Vec::new());
    }
}

/// Renders the modal stack at the application root. Mount exactly once.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)");

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" && svc.is_open() {
                    svc.pop_if_allowed();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // host lives as long as the app
            closure.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each=move || {
                    svc.stack
                        .get()
                        .into_iter()
                        .enumerate()
                        .collect::<Vec<(usize, ModalEntry)>>()
                }
                key=|(_, entry)| entry.id
                children=move |(idx, entry)| {
                    let z_index = 1000 + idx as i32;
                    let on_close = {
                        let entry = entry.clone();
                        Callback::new(move |_| {
                            if entry.may_close() {
                                svc.close_deferred(entry.id);
                            }
                        })
                    };

                    let view = (entry.builder)(ModalHandle { id: entry.id, svc });

                    view! {
                        <ModalFrame
                            z_index=z_index
                            on_close=on_close
                            modal_class=entry.modal_class.clone().unwrap_or_default()
                        >
                            {view}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}
