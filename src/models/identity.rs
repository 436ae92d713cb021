use leptos::*;

/// Who is looking at the page. Supplied by the app shell through context so
/// every widget sees the same identity; components never read it from ambient
/// location state.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: i64,     // buyer id used for submissions, votes and deletes
    pub seller_id: i64,   // seller of the product being viewed
    pub display_name: String,
}

pub fn provide_identity(identity: Identity) {
    provide_context(identity);
}

pub fn use_identity() -> Identity {
    expect_context::<Identity>()
}
