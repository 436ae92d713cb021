#[cfg(feature = "ssr")]
mod store_impl {
    use chrono::Utc;
    use leptos::logging::log;
    use rusqlite::{params, Connection, Error, OptionalExtension};
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    use crate::models::review::VoteChoice;
    use crate::ratings::{CommentsPage, RateAction, VoteTotals, WireReview};

    /// SQLite-backed store for the bundled ratings service. One review per
    /// (product, buyer), one vote per (review, user).
    #[derive(Debug, Clone)]
    pub struct ReviewStore {
        conn: Arc<Mutex<Connection>>,
    }

    /// What happened to a delete request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DeleteOutcome {
        Deleted,
        NotFound,
        NotAuthor,
    }

    impl ReviewStore {
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            log!("[STORE] database connection established at: {}", db_path);
            Ok(ReviewStore {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    product_id INTEGER NOT NULL,
                    buyer_id INTEGER NOT NULL,
                    seller_id INTEGER NOT NULL,
                    buyer_name TEXT NOT NULL,
                    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                    comment TEXT,
                    created_at TEXT NOT NULL,
                    UNIQUE (product_id, buyer_id)
                );
                CREATE TABLE IF NOT EXISTS votes (
                    review_id TEXT NOT NULL,
                    user_id INTEGER NOT NULL,
                    vote TEXT NOT NULL CHECK (vote IN ('up', 'down')),
                    PRIMARY KEY (review_id, user_id),
                    FOREIGN KEY (review_id) REFERENCES reviews(id) ON DELETE CASCADE
                );",
            )?;
            Ok(())
        }

        /// Aggregate for one product; `(0.0, 0)` when nobody rated it yet.
        pub async fn average(&self, product_id: i64) -> Result<(f64, u32), Error> {
            let conn = self.conn.lock().await;
            conn.query_row(
                "SELECT COALESCE(AVG(rating), 0.0), COUNT(*) FROM reviews WHERE product_id = ?1",
                params![product_id],
                |row| Ok((row.get::<_, f64>(0)?, row.get::<_, u32>(1)?)),
            )
        }

        /// One page of reviews, newest first, with vote totals folded in.
        pub async fn list_comments(
            &self,
            product_id: i64,
            limit: u32,
            offset: u32,
        ) -> Result<CommentsPage, Error> {
            let conn = self.conn.lock().await;
            let total: u32 = conn.query_row(
                "SELECT COUNT(*) FROM reviews WHERE product_id = ?1",
                params![product_id],
                |row| row.get(0),
            )?;

            let mut stmt = conn.prepare(
                "SELECT r.id, r.comment, r.rating, r.created_at, r.buyer_id, r.buyer_name,
                        (SELECT COUNT(*) FROM votes v
                          WHERE v.review_id = r.id AND v.vote = 'up') AS up_votes,
                        (SELECT COUNT(*) FROM votes v
                          WHERE v.review_id = r.id AND v.vote = 'down') AS down_votes
                 FROM reviews r
                 WHERE r.product_id = ?1
                 ORDER BY r.created_at DESC, r.rowid DESC
                 LIMIT ?2 OFFSET ?3",
            )?;
            let rows = stmt.query_map(params![product_id, limit, offset], |row| {
                Ok(WireReview {
                    review_id: row.get(0)?,
                    comment: row.get(1)?,
                    rating: row.get(2)?,
                    date: row.get(3)?,
                    buyer_id: row.get(4)?,
                    buyer_name: row.get(5)?,
                    votes: VoteTotals {
                        up: row.get(6)?,
                        down: row.get(7)?,
                    },
                })
            })?;

            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(CommentsPage {
                items,
                total,
                limit,
                offset,
            })
        }

        /// Create-or-update keyed by (product, buyer). The buyer's previous
        /// review is replaced in place; its id and votes survive the update.
        pub async fn upsert_review(
            &self,
            product_id: i64,
            buyer_id: i64,
            seller_id: i64,
            buyer_name: &str,
            rating: u8,
            comment: Option<&str>,
        ) -> Result<(String, RateAction), Error> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let existing: Option<String> = tx
                .query_row(
                    "SELECT id FROM reviews WHERE product_id = ?1 AND buyer_id = ?2",
                    params![product_id, buyer_id],
                    |row| row.get(0),
                )
                .optional()?;

            let (id, action) = match existing {
                Some(id) => {
                    tx.execute(
                        "UPDATE reviews
                         SET rating = ?1, comment = ?2, buyer_name = ?3, seller_id = ?4
                         WHERE id = ?5",
                        params![rating, comment, buyer_name, seller_id, id],
                    )?;
                    (id, RateAction::Updated)
                }
                None => {
                    let id = Uuid::new_v4().to_string();
                    tx.execute(
                        "INSERT INTO reviews
                         (id, product_id, buyer_id, seller_id, buyer_name, rating, comment, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                        params![
                            id,
                            product_id,
                            buyer_id,
                            seller_id,
                            buyer_name,
                            rating,
                            comment,
                            Utc::now().to_rfc3339()
                        ],
                    )?;
                    (id, RateAction::Created)
                }
            };
            tx.commit()?;
            log!(
                "[STORE] {} review {} for product {}",
                match action {
                    RateAction::Created => "created",
                    RateAction::Updated => "updated",
                },
                id,
                product_id
            );
            Ok((id, action))
        }

        /// Single-vote toggle per (review, user): repeating the active choice
        /// retracts it, the other choice replaces it. Returns false when the
        /// review does not exist.
        pub async fn apply_vote(
            &self,
            review_id: &str,
            user_id: i64,
            vote: VoteChoice,
        ) -> Result<bool, Error> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let exists: Option<String> = tx
                .query_row(
                    "SELECT id FROM reviews WHERE id = ?1",
                    params![review_id],
                    |row| row.get(0),
                )
                .optional()?;
            if exists.is_none() {
                return Ok(false);
            }

            let current: Option<String> = tx
                .query_row(
                    "SELECT vote FROM votes WHERE review_id = ?1 AND user_id = ?2",
                    params![review_id, user_id],
                    |row| row.get(0),
                )
                .optional()?;

            match current {
                Some(active) if active == vote.as_str() => {
                    tx.execute(
                        "DELETE FROM votes WHERE review_id = ?1 AND user_id = ?2",
                        params![review_id, user_id],
                    )?;
                }
                Some(_) => {
                    tx.execute(
                        "UPDATE votes SET vote = ?3 WHERE review_id = ?1 AND user_id = ?2",
                        params![review_id, user_id, vote.as_str()],
                    )?;
                }
                None => {
                    tx.execute(
                        "INSERT INTO votes (review_id, user_id, vote) VALUES (?1, ?2, ?3)",
                        params![review_id, user_id, vote.as_str()],
                    )?;
                }
            }
            tx.commit()?;
            Ok(true)
        }

        /// Delete a review and its votes; only the author may do it.
        pub async fn delete_review(
            &self,
            review_id: &str,
            buyer_id: i64,
        ) -> Result<DeleteOutcome, Error> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let author: Option<i64> = tx
                .query_row(
                    "SELECT buyer_id FROM reviews WHERE id = ?1",
                    params![review_id],
                    |row| row.get(0),
                )
                .optional()?;

            match author {
                None => Ok(DeleteOutcome::NotFound),
                Some(author_id) if author_id != buyer_id => Ok(DeleteOutcome::NotAuthor),
                Some(_) => {
                    tx.execute("DELETE FROM votes WHERE review_id = ?1", params![review_id])?;
                    tx.execute("DELETE FROM reviews WHERE id = ?1", params![review_id])?;
                    tx.commit()?;
                    log!("[STORE] deleted review {}", review_id);
                    Ok(DeleteOutcome::Deleted)
                }
            }
        }
    }

}

#[cfg(feature = "ssr")]
pub use store_impl::{DeleteOutcome, ReviewStore};
