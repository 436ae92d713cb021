use leptos::logging::error;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::review_form::ReviewForm;
use crate::components::review_helpful::ReviewHelpful;
use crate::components::star_rating::StarRating;
use crate::components::toast::use_toasts;
use crate::models::identity::use_identity;
use crate::models::review::{
    validate_comment, validate_rating, RatingSummary, Review, VoteChoice,
};
use crate::ratings::{
    DeletePayload, RatePayload, RatingsClient, RatingsConfig, RatingsError, VotePayload,
    DEFAULT_PAGE_SIZE,
};

/// Load lifecycle of the panel. Mutations do not leave `Loaded` on their own;
/// they flip the separate `submitting` flag and then go back through
/// `Loading` via the full reload.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Error(String),
}

async fn load_panel(
    client: &RatingsClient,
    product_id: i64,
) -> Result<(RatingSummary, Vec<Review>), RatingsError> {
    let summary = client.get_average(product_id).await?;
    let page = client
        .list_comments(product_id, DEFAULT_PAGE_SIZE, 0)
        .await?;
    let reviews = page.items.into_iter().map(Review::from_wire).collect();
    Ok((summary, reviews))
}

/// Star-rating and review panel for one product: loads summary + first page
/// of comments on mount, and after every successful mutation reloads both
/// instead of patching local state, so the panel always shows what the server
/// stored.
#[component]
pub fn ProductReview(
    product_id: i64,
    #[prop(into)] product_name: String,
    #[prop(optional)] on_reviews_update: Option<Callback<Vec<Review>>>,
) -> impl IntoView {
    let toasts = use_toasts();
    let identity = store_value(use_identity());
    let config = use_context::<RatingsConfig>().unwrap_or_default();
    let client = store_value(RatingsClient::new(&config));

    let phase = create_rw_signal(LoadPhase::Idle);
    let summary = create_rw_signal(RatingSummary::default());
    let reviews = create_rw_signal(Vec::<Review>::new());

    // form + edit state, owned here so edit/cancel/delete can reset it
    let rating = create_rw_signal(0u8);
    let comment_text = create_rw_signal(String::new());
    let editing_review = create_rw_signal(None::<String>);

    // one mutating call in flight at a time
    let submitting = create_rw_signal(false);

    let load_all = move || {
        let client = client.get_value();
        phase.set(LoadPhase::Loading);
        spawn_local(async move {
            match load_panel(&client, product_id).await {
                Ok((loaded_summary, loaded_reviews)) => {
                    summary.set(loaded_summary);
                    reviews.set(loaded_reviews.clone());
                    phase.set(LoadPhase::Loaded);
                    if let Some(on_reviews_update) = on_reviews_update {
                        on_reviews_update.call(loaded_reviews);
                    }
                }
                Err(e) => {
                    error!("[REVIEWS] load failed for product {}: {}", product_id, e);
                    phase.set(LoadPhase::Error(
                        e.user_message("Could not load the reviews."),
                    ));
                }
            }
        });
    };

    create_effect(move |_| load_all());

    let reset_editor = move || {
        rating.set(0);
        comment_text.set(String::new());
        editing_review.set(None);
    };

    let start_edit = move |review: Review| {
        editing_review.set(Some(review.id.clone()));
        comment_text.set(review.comment.clone());
        rating.set(review.rating);
    };

    let cancel_edit = move |_| reset_editor();

    let handle_submit = move |_| {
        if submitting.get() {
            return;
        }
        let stars = rating.get();
        if let Err(message) = validate_rating(stars) {
            toasts.error(message);
            return;
        }
        let text = comment_text.get();
        if let Err(message) = validate_comment(&text) {
            toasts.error(message);
            return;
        }

        let identity = identity.get_value();
        let trimmed = text.trim().to_string();
        let payload = RatePayload {
            buyer_id: identity.user_id,
            seller_id: identity.seller_id,
            buyer_name: identity.display_name,
            rating: stars,
            comment: (!trimmed.is_empty()).then_some(trimmed),
        };
        let was_editing = editing_review.get().is_some();
        let client = client.get_value();
        submitting.set(true);
        spawn_local(async move {
            match client.rate_product(product_id, &payload).await {
                Ok(_) => {
                    reset_editor();
                    toasts.success(if was_editing {
                        "Review updated!"
                    } else {
                        "Review submitted!"
                    });
                    load_all();
                }
                Err(e) => {
                    error!("[REVIEWS] submit failed for product {}: {}", product_id, e);
                    toasts.error(e.user_message("Could not submit the review."));
                }
            }
            submitting.set(false);
        });
    };

    let handle_vote = move |review_id: String, choice: VoteChoice| {
        if submitting.get() {
            return;
        }
        let client = client.get_value();
        let payload = VotePayload {
            user_id: identity.get_value().user_id,
            vote: choice,
        };
        submitting.set(true);
        spawn_local(async move {
            match client.vote_review(&review_id, &payload).await {
                Ok(()) => load_all(),
                Err(e) => {
                    error!("[REVIEWS] vote failed on review {}: {}", review_id, e);
                    toasts.error(e.user_message("Could not register your vote."));
                }
            }
            submitting.set(false);
        });
    };

    let handle_delete = move |review: Review| {
        if submitting.get() {
            return;
        }
        let confirmed = window()
            .confirm_with_message("Delete your review? This cannot be undone.")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let client = client.get_value();
        let payload = DeletePayload {
            buyer_id: identity.get_value().user_id,
        };
        let review_id = review.id.clone();
        submitting.set(true);
        spawn_local(async move {
            match client.delete_review(&review_id, &payload).await {
                Ok(()) => {
                    if editing_review.get_untracked().as_deref() == Some(review_id.as_str()) {
                        reset_editor();
                    }
                    toasts.success("Review deleted.");
                    load_all();
                }
                Err(e) => {
                    error!("[REVIEWS] delete failed on review {}: {}", review_id, e);
                    toasts.error(e.user_message("Could not delete the review."));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="product-review">
            <div class="product-review-header">
                <h2 class="product-review-title">{product_name}</h2>
                <div class="product-review-average">
                    <StarRating
                        rating=Signal::derive(move || summary.get().average)
                        disabled=true
                        show_label=false
                    />
                    <span class="product-review-average-label">
                        {move || summary.get().label()}
                    </span>
                </div>
            </div>

            <section class="review-editor">
                <h3>"Rate this product"</h3>
                <StarRating
                    rating=Signal::derive(move || f64::from(rating.get()))
                    on_rating_change=Callback::new(move |stars| rating.set(stars))
                    disabled=submitting
                />
                <p class="review-editor-hint">"Comment optional. The stars are mandatory."</p>
                <ReviewForm
                    text=comment_text
                    editing=Signal::derive(move || editing_review.get().is_some())
                    submitting=submitting
                    on_submit=Callback::new(handle_submit)
                    on_cancel_edit=Callback::new(cancel_edit)
                />
            </section>

            {move || match phase.get() {
                LoadPhase::Idle | LoadPhase::Loading => {
                    view! { <p class="review-status">"Loading reviews..."</p> }.into_view()
                }
                LoadPhase::Error(message) => {
                    view! { <p class="review-status review-status-error">{message}</p> }
                        .into_view()
                }
                LoadPhase::Loaded => {
                    let list = reviews.get();
                    if list.is_empty() {
                        view! { <p class="review-status">"No reviews yet."</p> }.into_view()
                    } else {
                        let user_id = identity.get_value().user_id;
                        view! {
                            <section class="review-list">
                                <h3>{format!("Reviews ({})", list.len())}</h3>
                                {list
                                    .into_iter()
                                    .map(|review| {
                                        let is_author = review.authored_by(user_id);
                                        let review_id = review.id.clone();
                                        let review_for_edit = review.clone();
                                        let review_for_delete = review.clone();
                                        view! {
                                            <article class="review-card">
                                                <div class="review-card-header">
                                                    <span class="review-avatar">
                                                        {review
                                                            .author
                                                            .chars()
                                                            .next()
                                                            .map(|c| c.to_uppercase().to_string())
                                                            .unwrap_or_default()}
                                                    </span>
                                                    <span class="review-author">{review.author.clone()}</span>
                                                    <StarRating
                                                        rating=f64::from(review.rating)
                                                        disabled=true
                                                        show_label=false
                                                    />
                                                    <span class="review-date">{review.display_date()}</span>
                                                </div>
                                                <p class="review-comment" class:review-comment-empty=review.comment.is_empty()>
                                                    {if review.comment.is_empty() {
                                                        "no comment".to_string()
                                                    } else {
                                                        review.comment.clone()
                                                    }}
                                                </p>
                                                <div class="review-card-actions">
                                                    <ReviewHelpful
                                                        initial_helpful=review.helpful_count
                                                        initial_not_helpful=review.not_helpful_count
                                                        on_vote=Callback::new(move |choice| {
                                                            handle_vote(review_id.clone(), choice)
                                                        })
                                                        disabled=submitting
                                                    />
                                                    {is_author
                                                        .then(|| {
                                                            view! {
                                                                <div class="review-owner-actions">
                                                                    <button
                                                                        type="button"
                                                                        class="link-button"
                                                                        on:click=move |_| start_edit(review_for_edit.clone())
                                                                    >
                                                                        "Edit"
                                                                    </button>
                                                                    <button
                                                                        type="button"
                                                                        class="link-button link-button-danger"
                                                                        on:click=move |_| handle_delete(review_for_delete.clone())
                                                                    >
                                                                        "Delete"
                                                                    </button>
                                                                </div>
                                                            }
                                                        })}
                                                </div>
                                            </article>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </section>
                        }
                            .into_view()
                    }
                }
            }}
        </div>
    }
}
