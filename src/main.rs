#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use pulgashop_reviews::api::{
        delete_review, get_average, list_comments, rate_product, vote_review,
    };
    use pulgashop_reviews::app::App;
    use pulgashop_reviews::db::ReviewStore;

    // Initialize the review store for the bundled ratings service
    let store = ReviewStore::new("pulgashop-reviews.db").unwrap();
    store.create_schema().await.unwrap();
    let store = web::Data::new(store);

    // Load configuration
    let conf = get_configuration(None).await.unwrap();
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);
    println!("listening on http://{}", &addr);

    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            .app_data(store.clone())
            // Ratings API registered BEFORE the Leptos catch-all routes.
            // The literal /comments/ routes come first so they are never
            // swallowed by the {product_id} patterns.
            .service(
                web::scope("/ratings")
                    .route("/comments/{id}/vote", web::post().to(vote_review))
                    .route("/comments/{id}", web::delete().to(delete_review))
                    .route("/{product_id}/average", web::get().to(get_average))
                    .route("/{product_id}/comments", web::get().to(list_comments))
                    .route("/{product_id}", web::post().to(rate_product)),
            )
            // Register server functions
            .route("/api/{tail:.*}", leptos_actix::handle_server_fns())
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            .service(favicon)
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), App)
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("/favicon.svg")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.svg"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // unless we want this to work with e.g., Trunk for pure client-side testing
    // see lib.rs for hydration function instead
    // see optional feature `csr` instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // prefer using `cargo leptos serve` instead
    // to run: `trunk serve --open --features csr`
    use pulgashop_reviews::app::App;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
