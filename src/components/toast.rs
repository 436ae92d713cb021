use std::time::Duration;

use leptos::*;
use wasm_bindgen_futures::spawn_local;

const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Transient notification queue. The only feedback channel the review widgets
/// use; nothing structured survives past the message string.
#[derive(Debug, Clone, Copy)]
pub struct Toasts {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Toasts {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message.into());
    }

    fn push(&self, level: ToastLevel, message: String) {
        let id = self.next_id.get_untracked() + 1;
        self.next_id.set(id);
        self.toasts.update(|toasts| {
            toasts.push(Toast { id, level, message });
        });

        let toasts = self.toasts;
        spawn_local(async move {
            gloo_timers::future::sleep(TOAST_LIFETIME).await;
            toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
        });
    }
}

pub fn provide_toasts() -> Toasts {
    let toasts = Toasts {
        toasts: create_rw_signal(Vec::new()),
        next_id: create_rw_signal(0),
    };
    provide_context(toasts);
    toasts
}

pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-host">
            {move || {
                toasts
                    .toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let level_class = match toast.level {
                            ToastLevel::Success => "toast toast-success",
                            ToastLevel::Error => "toast toast-error",
                            ToastLevel::Info => "toast toast-info",
                        };
                        view! { <div class=level_class>{toast.message}</div> }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
