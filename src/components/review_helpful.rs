use leptos::*;

use crate::models::review::VoteChoice;

/// Single-vote toggle: picking the active choice retracts it, picking the
/// other one swaps. Counts never go below zero.
pub fn toggle_vote(
    up: u32,
    down: u32,
    current: Option<VoteChoice>,
    choice: VoteChoice,
) -> (u32, u32, Option<VoteChoice>) {
    match current {
        Some(active) if active == choice => match choice {
            VoteChoice::Up => (up.saturating_sub(1), down, None),
            VoteChoice::Down => (up, down.saturating_sub(1), None),
        },
        Some(_) => match choice {
            VoteChoice::Up => (up + 1, down.saturating_sub(1), Some(VoteChoice::Up)),
            VoteChoice::Down => (up.saturating_sub(1), down + 1, Some(VoteChoice::Down)),
        },
        None => match choice {
            VoteChoice::Up => (up + 1, down, Some(VoteChoice::Up)),
            VoteChoice::Down => (up, down + 1, Some(VoteChoice::Down)),
        },
    }
}

/// Per-review helpfulness voter. Standalone it keeps its own toggle state;
/// with `on_vote` wired the parent reloads from the server after each vote
/// and the reloaded totals replace the local ones.
#[component]
pub fn ReviewHelpful(
    #[prop(default = 0)] initial_helpful: u32,
    #[prop(default = 0)] initial_not_helpful: u32,
    #[prop(optional)] on_vote: Option<Callback<VoteChoice>>,
    #[prop(into, default = MaybeSignal::Static(false))] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let (counts, set_counts) = create_signal((initial_helpful, initial_not_helpful));
    let (current_vote, set_current_vote) = create_signal(None::<VoteChoice>);

    let handle_vote = move |choice: VoteChoice| {
        if disabled.get() {
            return;
        }
        let (up, down) = counts.get();
        let (up, down, next) = toggle_vote(up, down, current_vote.get(), choice);
        set_counts.set((up, down));
        set_current_vote.set(next);
        if let Some(on_vote) = on_vote {
            on_vote.call(choice);
        }
    };

    view! {
        <div class="review-helpful">
            <span class="review-helpful-question">"Was this review helpful?"</span>
            <button
                type="button"
                class="vote-button"
                class:vote-button-active=move || current_vote.get() == Some(VoteChoice::Up)
                disabled=move || disabled.get()
                on:click=move |_| handle_vote(VoteChoice::Up)
            >
                {move || format!("👍 Yes ({})", counts.get().0)}
            </button>
            <button
                type="button"
                class="vote-button"
                class:vote-button-active=move || current_vote.get() == Some(VoteChoice::Down)
                disabled=move || disabled.get()
                on:click=move |_| handle_vote(VoteChoice::Down)
            >
                {move || format!("👎 No ({})", counts.get().1)}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_vote_adds_one() {
        assert_eq!(
            toggle_vote(23, 2, None, VoteChoice::Up),
            (24, 2, Some(VoteChoice::Up))
        );
        assert_eq!(
            toggle_vote(23, 2, None, VoteChoice::Down),
            (23, 3, Some(VoteChoice::Down))
        );
    }

    #[test]
    fn repeating_the_same_vote_retracts_it() {
        let (up, down, vote) = toggle_vote(23, 2, None, VoteChoice::Up);
        let (up, down, vote) = toggle_vote(up, down, vote, VoteChoice::Up);
        assert_eq!((up, down), (23, 2));
        assert_eq!(vote, None);
    }

    #[test]
    fn switching_swaps_the_counts() {
        let (up, down, vote) = toggle_vote(23, 2, None, VoteChoice::Up);
        let (up, down, vote) = toggle_vote(up, down, vote, VoteChoice::Down);
        assert_eq!((up, down), (23, 3));
        assert_eq!(vote, Some(VoteChoice::Down));
    }

    #[test]
    fn counts_never_go_negative() {
        // A retraction on a zero count stays at zero instead of underflowing.
        let (up, down, vote) = toggle_vote(0, 0, Some(VoteChoice::Up), VoteChoice::Up);
        assert_eq!((up, down, vote), (0, 0, None));
    }
}
