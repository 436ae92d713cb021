#[cfg(feature = "ssr")]
use actix_web::{web, HttpResponse};
#[cfg(feature = "ssr")]
use leptos::logging::{error, log};
#[cfg(feature = "ssr")]
use serde::Deserialize;
#[cfg(feature = "ssr")]
use serde_json::json;

#[cfg(feature = "ssr")]
use crate::db::{DeleteOutcome, ReviewStore};
#[cfg(feature = "ssr")]
use crate::models::review::{validate_comment, validate_rating};
#[cfg(feature = "ssr")]
use crate::ratings::{DeletePayload, RatePayload, VotePayload};

#[cfg(feature = "ssr")]
#[derive(Deserialize)]
pub struct PageQuery {
    limit: Option<u32>,
    offset: Option<u32>,
}

#[cfg(feature = "ssr")]
pub async fn get_average(store: web::Data<ReviewStore>, path: web::Path<i64>) -> HttpResponse {
    let product_id = path.into_inner();
    match store.average(product_id).await {
        Ok((average, count)) => HttpResponse::Ok().json(json!({
            "productId": product_id,
            "average": average,
            "count": count,
        })),
        Err(err) => {
            error!("[API] average failed for product {}: {:?}", product_id, err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Could not compute the rating average" }))
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn list_comments(
    store: web::Data<ReviewStore>,
    path: web::Path<i64>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let product_id = path.into_inner();
    let limit = query.limit.unwrap_or(10).min(100);
    let offset = query.offset.unwrap_or(0);
    match store.list_comments(product_id, limit, offset).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => {
            error!("[API] listing failed for product {}: {:?}", product_id, err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Could not load the reviews" }))
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn rate_product(
    store: web::Data<ReviewStore>,
    path: web::Path<i64>,
    payload: web::Json<RatePayload>,
) -> HttpResponse {
    let product_id = path.into_inner();
    let payload = payload.into_inner();

    if let Err(message) = validate_rating(payload.rating) {
        return HttpResponse::BadRequest().json(json!({ "message": message }));
    }
    if let Some(comment) = payload.comment.as_deref() {
        if let Err(message) = validate_comment(comment) {
            return HttpResponse::BadRequest().json(json!({ "message": message }));
        }
    }

    match store
        .upsert_review(
            product_id,
            payload.buyer_id,
            payload.seller_id,
            &payload.buyer_name,
            payload.rating,
            payload.comment.as_deref(),
        )
        .await
    {
        Ok((review_id, action)) => {
            log!(
                "[API] buyer {} rated product {} ({:?})",
                payload.buyer_id,
                product_id,
                action
            );
            HttpResponse::Ok().json(json!({ "idResena": review_id, "action": action }))
        }
        Err(err) => {
            error!("[API] rating failed for product {}: {:?}", product_id, err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Could not store the review" }))
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn vote_review(
    store: web::Data<ReviewStore>,
    path: web::Path<String>,
    payload: web::Json<VotePayload>,
) -> HttpResponse {
    let review_id = path.into_inner();
    match store
        .apply_vote(&review_id, payload.user_id, payload.vote)
        .await
    {
        Ok(true) => HttpResponse::Ok().json(json!({ "status": "ok" })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "message": "Review not found" })),
        Err(err) => {
            error!("[API] vote failed on review {}: {:?}", review_id, err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Could not register the vote" }))
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn delete_review(
    store: web::Data<ReviewStore>,
    path: web::Path<String>,
    payload: web::Json<DeletePayload>,
) -> HttpResponse {
    let review_id = path.into_inner();
    match store.delete_review(&review_id, payload.buyer_id).await {
        Ok(DeleteOutcome::Deleted) => HttpResponse::Ok().json(json!({ "status": "deleted" })),
        Ok(DeleteOutcome::NotFound) => {
            HttpResponse::NotFound().json(json!({ "message": "Review not found" }))
        }
        Ok(DeleteOutcome::NotAuthor) => HttpResponse::Forbidden()
            .json(json!({ "message": "Only the author can delete a review" })),
        Err(err) => {
            error!("[API] delete failed on review {}: {:?}", review_id, err);
            HttpResponse::InternalServerError()
                .json(json!({ "message": "Could not delete the review" }))
        }
    }
}
