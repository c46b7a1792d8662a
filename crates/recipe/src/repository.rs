use async_trait::async_trait;
use recipebox_db::table;
use recipebox_shared::{Id, Result, memory::MemoryTable};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{FromRow, SqlitePool};

use crate::RecipeRow;

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<RecipeRow>>;
    async fn find(&self, id: Id) -> Result<Option<RecipeRow>>;
    /// Stores a new row and returns it with its assigned id.
    async fn create(&self, row: RecipeRow) -> Result<RecipeRow>;
    async fn update(&self, row: RecipeRow) -> Result<RecipeRow>;
    async fn delete(&self, id: Id) -> Result<()>;
}

const COLUMNS: [table::Recipe; 17] = [
    table::Recipe::Id,
    table::Recipe::Name,
    table::Recipe::Title,
    table::Recipe::Description,
    table::Recipe::ImageUrl,
    table::Recipe::PrepTime,
    table::Recipe::CookTime,
    table::Recipe::Servings,
    table::Recipe::Difficulty,
    table::Recipe::MealType,
    table::Recipe::DietaryRestrictions,
    table::Recipe::Rating,
    table::Recipe::ReviewCount,
    table::Recipe::Ingredients,
    table::Recipe::Instructions,
    table::Recipe::CreatedBy,
    table::Recipe::CreatedAt,
];

#[derive(Clone)]
pub struct SqliteRecipeRepository(pub SqlitePool);

#[async_trait]
impl RecipeRepository for SqliteRecipeRepository {
    async fn list(&self) -> Result<Vec<RecipeRow>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(table::Recipe::Table)
            .order_by(table::Recipe::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_with(&sql, values).fetch_all(&self.0).await?;

        Ok(rows
            .iter()
            .filter_map(|row| match RecipeRow::from_row(row) {
                Ok(row) => Some(row),
                Err(err) => {
                    tracing::warn!(err = %err, "some recipe records failed to load");
                    None
                }
            })
            .collect())
    }

    async fn find(&self, id: Id) -> Result<Option<RecipeRow>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(table::Recipe::Table)
            .and_where(Expr::col(table::Recipe::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    async fn create(&self, row: RecipeRow) -> Result<RecipeRow> {
        let ingredients = serde_json::to_string(&row.ingredients.0)?;
        let instructions = serde_json::to_string(&row.instructions.0)?;

        let statement = Query::insert()
            .into_table(table::Recipe::Table)
            .columns(COLUMNS[1..].iter().copied())
            .values_panic([
                row.name.to_owned().into(),
                row.title.to_owned().into(),
                row.description.to_owned().into(),
                row.image_url.to_owned().into(),
                row.prep_time.into(),
                row.cook_time.into(),
                row.servings.into(),
                row.difficulty.to_owned().into(),
                row.meal_type.to_owned().into(),
                row.dietary_restrictions.to_owned().into(),
                row.rating.into(),
                row.review_count.into(),
                ingredients.into(),
                instructions.into(),
                row.created_by.to_owned().into(),
                row.created_at.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .last_insert_rowid();

        Ok(RecipeRow { id, ..row })
    }

    async fn update(&self, row: RecipeRow) -> Result<RecipeRow> {
        let ingredients = serde_json::to_string(&row.ingredients.0)?;
        let instructions = serde_json::to_string(&row.instructions.0)?;

        let statement = Query::update()
            .table(table::Recipe::Table)
            .values([
                (table::Recipe::Name, row.name.to_owned().into()),
                (table::Recipe::Title, row.title.to_owned().into()),
                (table::Recipe::Description, row.description.to_owned().into()),
                (table::Recipe::ImageUrl, row.image_url.to_owned().into()),
                (table::Recipe::PrepTime, row.prep_time.into()),
                (table::Recipe::CookTime, row.cook_time.into()),
                (table::Recipe::Servings, row.servings.into()),
                (table::Recipe::Difficulty, row.difficulty.to_owned().into()),
                (table::Recipe::MealType, row.meal_type.to_owned().into()),
                (
                    table::Recipe::DietaryRestrictions,
                    row.dietary_restrictions.to_owned().into(),
                ),
                (table::Recipe::Rating, row.rating.into()),
                (table::Recipe::ReviewCount, row.review_count.into()),
                (table::Recipe::Ingredients, ingredients.into()),
                (table::Recipe::Instructions, instructions.into()),
            ])
            .and_where(Expr::col(table::Recipe::Id).eq(row.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("recipe {}", row.id);
        }

        Ok(row)
    }

    async fn delete(&self, id: Id) -> Result<()> {
        let statement = Query::delete()
            .from_table(table::Recipe::Table)
            .and_where(Expr::col(table::Recipe::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("recipe {id}");
        }

        Ok(())
    }
}

/// Keeps recipe rows in process memory. Used by tests and fixture-backed runs.
#[derive(Default)]
pub struct MemoryRecipeRepository(MemoryTable<RecipeRow>);

impl MemoryRecipeRepository {
    pub fn new(rows: Vec<RecipeRow>) -> Self {
        Self(MemoryTable::with_rows(rows.into_iter().map(|r| (r.id, r))))
    }

    /// Repository seeded with the bundled sample recipes.
    pub fn with_fixtures() -> Result<Self> {
        Ok(Self::new(crate::fixtures::recipes()?))
    }
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn list(&self) -> Result<Vec<RecipeRow>> {
        Ok(self.0.all().await)
    }

    async fn find(&self, id: Id) -> Result<Option<RecipeRow>> {
        Ok(self.0.get(id).await)
    }

    async fn create(&self, row: RecipeRow) -> Result<RecipeRow> {
        Ok(self.0.insert(|id| RecipeRow { id, ..row }).await)
    }

    async fn update(&self, row: RecipeRow) -> Result<RecipeRow> {
        if !self.0.replace(row.id, row.clone()).await {
            recipebox_shared::not_found!("recipe {}", row.id);
        }

        Ok(row)
    }

    async fn delete(&self, id: Id) -> Result<()> {
        if self.0.remove(id).await.is_none() {
            recipebox_shared::not_found!("recipe {id}");
        }

        Ok(())
    }
}
