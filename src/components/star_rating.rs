use leptos::*;

/// Whole-star fill for a possibly fractional value.
pub fn filled_stars(value: f64) -> u8 {
    value.round().clamp(0.0, 5.0) as u8
}

/// Star selector over 1-5. Hovering previews a tentative value without
/// committing, clicking commits through `on_rating_change`. In disabled mode
/// it renders the bound value read-only (used for averages) with no hover
/// preview and no interaction.
#[component]
pub fn StarRating(
    #[prop(into)] rating: MaybeSignal<f64>,
    #[prop(optional)] on_rating_change: Option<Callback<u8>>,
    #[prop(into, default = MaybeSignal::Static(false))] disabled: MaybeSignal<bool>,
    #[prop(default = true)] show_label: bool,
) -> impl IntoView {
    let (hover_rating, set_hover_rating) = create_signal(0u8);

    // Hover wins while the pointer is over the row; otherwise the bound value.
    let current = move || {
        let hover = hover_rating.get();
        if !disabled.get() && hover > 0 {
            hover
        } else {
            filled_stars(rating.get())
        }
    };

    let star_color = move |star: u8| {
        if star <= current() {
            if disabled.get() {
                "#D1D5DB"
            } else {
                "#22c55e"
            }
        } else {
            "#E5E5E5"
        }
    };

    view! {
        <div class="star-rating">
            {show_label.then(|| view! { <label class="star-rating-label">"Your rating:"</label> })}
            <div class="star-rating-row" on:mouseleave=move |_| set_hover_rating.set(0)>
                {(1u8..=5)
                    .map(|star| {
                        view! {
                            <button
                                type="button"
                                class="star-button"
                                disabled=move || disabled.get()
                                aria-label=format!("Rate {} star{}", star, if star > 1 { "s" } else { "" })
                                on:click=move |_| {
                                    if !disabled.get() {
                                        if let Some(on_rating_change) = on_rating_change {
                                            on_rating_change.call(star);
                                        }
                                    }
                                }
                                on:mouseenter=move |_| {
                                    if !disabled.get() {
                                        set_hover_rating.set(star);
                                    }
                                }
                            >
                                <span class="star-glyph" style:color=move || star_color(star)>
                                    "★"
                                </span>
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
            {move || {
                let selected = filled_stars(rating.get());
                (!disabled.get() && selected > 0)
                    .then(|| {
                        view! {
                            <p class="star-rating-feedback">
                                {format!(
                                    "You rated this {} star{}",
                                    selected,
                                    if selected > 1 { "s" } else { "" },
                                )}
                            </p>
                        }
                    })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rounds_to_nearest_star() {
        assert_eq!(filled_stars(0.0), 0);
        assert_eq!(filled_stars(3.4), 3);
        assert_eq!(filled_stars(3.5), 4);
        assert_eq!(filled_stars(4.0), 4);
        assert_eq!(filled_stars(5.0), 5);
    }

    #[test]
    fn fill_is_clamped_to_the_scale() {
        assert_eq!(filled_stars(-1.0), 0);
        assert_eq!(filled_stars(7.3), 5);
    }
}
