pub mod product_review;
pub mod review_form;
pub mod review_helpful;
pub mod star_rating;
pub mod toast;
