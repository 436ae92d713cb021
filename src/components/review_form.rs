use leptos::ev::SubmitEvent;
use leptos::*;

use crate::models::review::MAX_COMMENT_LEN;

/// Bounded comment input. The text signal is owned by the parent so the edit
/// flow can pre-fill and reset it; this component only enforces the length
/// bound and the submitting guard. An empty comment is a valid submission.
#[component]
pub fn ReviewForm(
    text: RwSignal<String>,
    #[prop(into)] editing: Signal<bool>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] on_submit: Callback<()>,
    #[prop(optional)] on_cancel_edit: Option<Callback<()>>,
) -> impl IntoView {
    let remaining = move || MAX_COMMENT_LEN as i64 - text.get().chars().count() as i64;
    let over_limit = move || remaining() < 0;
    let blocked = move || submitting.get() || over_limit();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if blocked() {
            return;
        }
        on_submit.call(());
    };

    view! {
        <form class="review-form" on:submit=handle_submit>
            <label class="review-form-label" for="review-text">
                "Write your review"
            </label>
            <div class="review-form-field">
                <textarea
                    id="review-text"
                    class="review-textarea"
                    placeholder="Share your experience with this product (optional)"
                    prop:value=move || text.get()
                    on:input=move |ev| text.set(event_target_value(&ev))
                    disabled=move || submitting.get()
                ></textarea>
                <span
                    class="char-counter"
                    class:char-counter-warn=move || (0..50).contains(&remaining())
                    class:char-counter-over=over_limit
                >
                    {remaining}
                </span>
            </div>
            {move || {
                over_limit()
                    .then(|| {
                        view! {
                            <p class="review-form-error">
                                {format!(
                                    "The comment is too long ({MAX_COMMENT_LEN} characters max).",
                                )}
                            </p>
                        }
                    })
            }}
            <div class="review-form-actions">
                <button type="submit" class="submit-button" disabled=blocked>
                    {move || {
                        if submitting.get() {
                            "Publishing..."
                        } else if editing.get() {
                            "Update review"
                        } else {
                            "Publish review"
                        }
                    }}
                </button>
                {move || {
                    (editing.get() && on_cancel_edit.is_some())
                        .then(|| {
                            view! {
                                <button
                                    type="button"
                                    class="cancel-button"
                                    disabled=move || submitting.get()
                                    on:click=move |_| {
                                        if let Some(on_cancel_edit) = on_cancel_edit {
                                            on_cancel_edit.call(());
                                        }
                                    }
                                >
                                    "Cancel edit"
                                </button>
                            }
                        })
                }}
            </div>
        </form>
    }
}
