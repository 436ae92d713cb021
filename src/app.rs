/// Application shell for the Pulgashop product page. Provides the identity
/// and ratings-service config through context, mounts the toast host, and
/// routes to the product page that hosts the review panel.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::components::product_review::ProductReview;
use crate::components::star_rating::StarRating;
use crate::components::toast::{provide_toasts, use_toasts, ToastHost};
use crate::models::identity::{provide_identity, Identity};
use crate::models::review::{summarize, RatingSummary, Review};
use crate::ratings::RatingsConfig;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_toasts();
    provide_context(RatingsConfig::default());
    // Development identity. An embedding shop provides the real one from its
    // session instead.
    provide_identity(Identity {
        user_id: 10,
        seller_id: 45,
        display_name: "UserTest".to_string(),
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/pulgashop-reviews.css"/>
        <Link rel="icon" href="/favicon.svg"/>
        <Title text="Pulgashop"/>
        <Router>
            <header class="site-header">
                <span class="site-brand">"Pulgashop"</span>
                <span class="site-tagline">"second-hand, first-rate"</span>
            </header>
            <main class="page">
                <Routes>
                    <Route path="" view=ProductPage/>
                    <Route path="/products/:id" view=ProductPage/>
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}

/// Product detail page. The header keeps a local mirror of the aggregate so
/// it stays in sync with the review panel without a second fetch.
#[component]
fn ProductPage() -> impl IntoView {
    let toasts = use_toasts();
    let params = use_params_map();
    let product_id = move || {
        params.with(|p| {
            p.get("id")
                .and_then(|id| id.parse::<i64>().ok())
                .unwrap_or(1)
        })
    };
    let product_name = "Premium Winter Jacket";

    let (header_summary, set_header_summary) = create_signal(RatingSummary::default());
    let on_reviews_update = Callback::new(move |reviews: Vec<Review>| {
        set_header_summary.set(summarize(&reviews));
    });

    let (cart_count, set_cart_count) = create_signal(0u32);
    let (is_liked, set_is_liked) = create_signal(false);

    let add_to_cart = move |_| {
        set_cart_count.update(|count| *count += 1);
        toasts.success("Added to cart!");
    };
    let toggle_like = move |_| {
        set_is_liked.update(|liked| *liked = !*liked);
        if is_liked.get_untracked() {
            toasts.success("Added to your wishlist!");
        } else {
            toasts.info("Removed from your wishlist.");
        }
    };

    view! {
        <nav class="breadcrumb">
            <A href="/">"Listings"</A>
            <span class="breadcrumb-sep">"›"</span>
            <span class="breadcrumb-current">{product_name}</span>
        </nav>

        <section class="product-header">
            <h1>{product_name}</h1>
            <div class="product-header-rating">
                <StarRating
                    rating=Signal::derive(move || header_summary.get().average)
                    disabled=true
                    show_label=false
                />
                <span class="product-header-label">{move || header_summary.get().label()}</span>
            </div>
            <div class="product-header-actions">
                <button type="button" class="cart-button" on:click=add_to_cart>
                    {move || format!("Add to cart ({})", cart_count.get())}
                </button>
                <button
                    type="button"
                    class="like-button"
                    class:like-button-active=move || is_liked.get()
                    on:click=toggle_like
                >
                    "♥"
                </button>
            </div>
        </section>

        {move || {
            view! {
                <ProductReview
                    product_id=product_id()
                    product_name=product_name
                    on_reviews_update=on_reviews_update
                />
            }
        }}
    }
}
