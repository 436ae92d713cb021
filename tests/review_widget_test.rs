//! Browser tests for the review widgets.
//!
//! Run with: `wasm-pack test --headless --chrome --no-default-features --features wasm-test`
#![cfg(target_arch = "wasm32")]

use std::time::Duration;

use gloo_timers::future::sleep;
use leptos::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

use pulgashop_reviews::components::review_form::ReviewForm;
use pulgashop_reviews::components::review_helpful::ReviewHelpful;
use pulgashop_reviews::components::star_rating::StarRating;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(id: &str, component: impl FnOnce() -> View + 'static) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let container: HtmlElement = document
        .create_element("div")
        .unwrap()
        .dyn_into()
        .unwrap();
    container.set_id(id);
    document.body().unwrap().append_child(&container).unwrap();
    mount_to(container.clone(), component);
    container
}

fn unmount(container: HtmlElement) {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().remove_child(&container).unwrap();
}

fn click_nth(container: &HtmlElement, selector: &str, index: u32) {
    let element: HtmlElement = container
        .query_selector_all(selector)
        .unwrap()
        .item(index)
        .unwrap()
        .dyn_into()
        .unwrap();
    element.click();
}

fn nth_text(container: &HtmlElement, selector: &str, index: u32) -> String {
    container
        .query_selector_all(selector)
        .unwrap()
        .item(index)
        .unwrap()
        .text_content()
        .unwrap_or_default()
}

#[wasm_bindgen_test]
async fn star_click_commits_the_hovered_value() {
    let picked = create_rw_signal(0u8);
    let container = mount("star-commit-test", move || {
        view! {
            <StarRating
                rating=Signal::derive(move || f64::from(picked.get()))
                on_rating_change=Callback::new(move |stars| picked.set(stars))
            />
        }
        .into_view()
    });
    sleep(Duration::from_millis(50)).await;

    // third star commits a 3
    click_nth(&container, ".star-button", 2);
    sleep(Duration::from_millis(50)).await;
    assert_eq!(picked.get_untracked(), 3);

    // a later click overwrites, it does not accumulate
    click_nth(&container, ".star-button", 4);
    sleep(Duration::from_millis(50)).await;
    assert_eq!(picked.get_untracked(), 5);

    unmount(container);
}

#[wasm_bindgen_test]
async fn disabled_star_rating_ignores_clicks() {
    let picked = create_rw_signal(0u8);
    let container = mount("star-disabled-test", move || {
        view! {
            <StarRating
                rating=Signal::derive(move || f64::from(picked.get()))
                on_rating_change=Callback::new(move |stars| picked.set(stars))
                disabled=true
            />
        }
        .into_view()
    });
    sleep(Duration::from_millis(50)).await;

    click_nth(&container, ".star-button", 4);
    sleep(Duration::from_millis(50)).await;
    assert_eq!(picked.get_untracked(), 0);

    unmount(container);
}

#[wasm_bindgen_test]
async fn over_length_comment_disables_submission() {
    let text = create_rw_signal("x".repeat(501));
    let submitted = create_rw_signal(false);
    let container = mount("form-length-test", move || {
        view! {
            <ReviewForm
                text=text
                editing=Signal::derive(|| false)
                submitting=Signal::derive(|| false)
                on_submit=Callback::new(move |_| submitted.set(true))
            />
        }
        .into_view()
    });
    sleep(Duration::from_millis(50)).await;

    let button = container.query_selector(".submit-button").unwrap().unwrap();
    assert!(button.has_attribute("disabled"));

    click_nth(&container, ".submit-button", 0);
    sleep(Duration::from_millis(50)).await;
    assert!(!submitted.get_untracked());

    // trimming back under the bound re-enables submission
    text.set("short enough".to_string());
    sleep(Duration::from_millis(50)).await;
    let button = container.query_selector(".submit-button").unwrap().unwrap();
    assert!(!button.has_attribute("disabled"));

    unmount(container);
}

#[wasm_bindgen_test]
async fn empty_comment_does_not_block_submission() {
    let text = create_rw_signal(String::new());
    let submitted = create_rw_signal(false);
    let container = mount("form-empty-test", move || {
        view! {
            <ReviewForm
                text=text
                editing=Signal::derive(|| false)
                submitting=Signal::derive(|| false)
                on_submit=Callback::new(move |_| submitted.set(true))
            />
        }
        .into_view()
    });
    sleep(Duration::from_millis(50)).await;

    click_nth(&container, ".submit-button", 0);
    sleep(Duration::from_millis(50)).await;
    assert!(submitted.get_untracked());

    unmount(container);
}

#[wasm_bindgen_test]
async fn toggling_the_same_vote_twice_restores_the_count() {
    let container = mount("helpful-toggle-test", move || {
        view! { <ReviewHelpful initial_helpful=23 initial_not_helpful=2/> }.into_view()
    });
    sleep(Duration::from_millis(50)).await;

    assert!(nth_text(&container, ".vote-button", 0).contains("(23)"));

    click_nth(&container, ".vote-button", 0);
    sleep(Duration::from_millis(50)).await;
    assert!(nth_text(&container, ".vote-button", 0).contains("(24)"));

    click_nth(&container, ".vote-button", 0);
    sleep(Duration::from_millis(50)).await;
    assert!(nth_text(&container, ".vote-button", 0).contains("(23)"));

    unmount(container);
}

#[wasm_bindgen_test]
async fn switching_votes_swaps_the_counts() {
    let container = mount("helpful-swap-test", move || {
        view! { <ReviewHelpful initial_helpful=23 initial_not_helpful=2/> }.into_view()
    });
    sleep(Duration::from_millis(50)).await;

    click_nth(&container, ".vote-button", 0);
    sleep(Duration::from_millis(50)).await;
    click_nth(&container, ".vote-button", 1);
    sleep(Duration::from_millis(50)).await;

    assert!(nth_text(&container, ".vote-button", 0).contains("(23)"));
    assert!(nth_text(&container, ".vote-button", 1).contains("(3)"));

    unmount(container);
}
