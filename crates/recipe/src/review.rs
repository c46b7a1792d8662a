use async_trait::async_trait;
use recipebox_db::table;
use recipebox_shared::{Id, Result, memory::MemoryTable};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "Id")]
    pub id: Id,
    pub recipe_id: Id,
    pub rating: u8,
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ReviewRow {
    #[serde(rename = "Id", default)]
    pub id: Id,
    #[serde(rename = "Name", default)]
    pub name: String,
    pub recipe_id: Id,
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: String,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.id,
            recipe_id: row.recipe_id,
            rating: row.rating.clamp(0, 5) as u8,
            comment: row.comment,
            created_at: recipebox_shared::timestamp_or_now(&row.created_at),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReview {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

impl NewReview {
    pub(crate) fn into_row(self, recipe_id: Id, created_at: String) -> ReviewRow {
        ReviewRow {
            id: 0,
            name: format!("Review for Recipe {recipe_id}"),
            recipe_id,
            rating: self.rating.into(),
            comment: self.comment,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
}

impl RatingSummary {
    /// Average is 0 when there are no reviews.
    pub fn of(reviews: &[Review]) -> Self {
        let count = reviews.len();
        if count == 0 {
            return Self {
                average: 0.0,
                count,
            };
        }

        let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();

        Self {
            average: f64::from(total) / count as f64,
            count,
        }
    }
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews of one recipe, newest first.
    async fn list_by_recipe(&self, recipe_id: Id) -> Result<Vec<ReviewRow>>;
    async fn create(&self, row: ReviewRow) -> Result<ReviewRow>;
}

#[derive(Clone)]
pub struct SqliteReviewRepository(pub SqlitePool);

#[async_trait]
impl ReviewRepository for SqliteReviewRepository {
    async fn list_by_recipe(&self, recipe_id: Id) -> Result<Vec<ReviewRow>> {
        let statement = Query::select()
            .columns([
                table::Review::Id,
                table::Review::Name,
                table::Review::RecipeId,
                table::Review::Rating,
                table::Review::Comment,
                table::Review::CreatedAt,
            ])
            .from(table::Review::Table)
            .and_where(Expr::col(table::Review::RecipeId).eq(recipe_id))
            .order_by(table::Review::CreatedAt, Order::Desc)
            .order_by(table::Review::Id, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ReviewRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    async fn create(&self, row: ReviewRow) -> Result<ReviewRow> {
        let statement = Query::insert()
            .into_table(table::Review::Table)
            .columns([
                table::Review::Name,
                table::Review::RecipeId,
                table::Review::Rating,
                table::Review::Comment,
                table::Review::CreatedAt,
            ])
            .values_panic([
                row.name.to_owned().into(),
                row.recipe_id.into(),
                row.rating.into(),
                row.comment.to_owned().into(),
                row.created_at.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .last_insert_rowid();

        Ok(ReviewRow { id, ..row })
    }
}

#[derive(Default)]
pub struct MemoryReviewRepository(MemoryTable<ReviewRow>);

impl MemoryReviewRepository {
    pub fn new(rows: Vec<ReviewRow>) -> Self {
        Self(MemoryTable::with_rows(rows.into_iter().map(|r| (r.id, r))))
    }

    pub fn with_fixtures() -> Result<Self> {
        Ok(Self::new(crate::fixtures::reviews()?))
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn list_by_recipe(&self, recipe_id: Id) -> Result<Vec<ReviewRow>> {
        let mut rows = self.0.filter(|r| r.recipe_id == recipe_id).await;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(rows)
    }

    async fn create(&self, row: ReviewRow) -> Result<ReviewRow> {
        Ok(self.0.insert(|id| ReviewRow { id, ..row }).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: Id, rating: u8) -> Review {
        Review {
            id,
            recipe_id: 1,
            rating,
            comment: String::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn summary_without_reviews_is_zero() {
        let summary = RatingSummary::of(&[]);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn summary_averages_ratings() {
        let summary = RatingSummary::of(&[review(1, 5), review(2, 4), review(3, 3)]);
        assert_eq!(summary.average, 4.0);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn rating_outside_range_is_rejected() {
        let input = NewReview {
            rating: 6,
            comment: "great".to_owned(),
        };
        assert!(input.validate().is_err());
    }

    #[tokio::test]
    async fn memory_lists_newest_first() {
        let repo = MemoryReviewRepository::default();
        for (at, recipe_id) in [
            ("2024-01-01T00:00:00Z", 1),
            ("2024-03-01T00:00:00Z", 1),
            ("2024-02-01T00:00:00Z", 2),
        ] {
            let row = NewReview {
                rating: 4,
                comment: String::new(),
            }
            .into_row(recipe_id, at.to_owned());
            repo.create(row).await.unwrap();
        }

        let rows = repo.list_by_recipe(1).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].created_at, "2024-03-01T00:00:00Z");
        assert_eq!(rows[1].name, "Review for Recipe 1");
    }
}
