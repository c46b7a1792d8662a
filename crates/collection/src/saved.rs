use std::sync::Arc;

use async_trait::async_trait;
use recipebox_db::table;
use recipebox_recipe::Recipe;
use recipebox_shared::{Id, Result, memory::MemoryTable};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    #[serde(rename = "Id")]
    pub id: Id,
    pub recipe_id: Id,
    pub folder_id: Option<Id>,
    pub title: String,
    pub image_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub saved_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SavedRecipeRow {
    #[serde(rename = "Id", default)]
    pub id: Id,
    #[serde(rename = "Name", default)]
    pub name: String,
    pub recipe_id: Id,
    #[serde(default)]
    pub folder_id: Option<Id>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub saved_at: String,
}

impl SavedRecipeRow {
    pub(crate) fn from_recipe(recipe: &Recipe, saved_at: String) -> Self {
        Self {
            id: 0,
            name: recipe.title.to_owned(),
            recipe_id: recipe.id,
            folder_id: None,
            title: recipe.title.to_owned(),
            image_url: recipe.image_url.to_owned(),
            saved_at,
        }
    }
}

impl From<SavedRecipeRow> for SavedRecipe {
    fn from(row: SavedRecipeRow) -> Self {
        Self {
            id: row.id,
            recipe_id: row.recipe_id,
            // 0 is how the backend reports an empty lookup
            folder_id: row.folder_id.filter(|id| *id != 0),
            title: row.title,
            image_url: row.image_url,
            saved_at: recipebox_shared::timestamp_or_now(&row.saved_at),
        }
    }
}

/// A saved recipe joined with the full recipe it points to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub saved_id: Id,
    pub folder_id: Option<Id>,
    #[serde(with = "time::serde::rfc3339")]
    pub saved_at: OffsetDateTime,
}

impl SavedRecipeDetail {
    pub fn new(saved: &SavedRecipe, recipe: Recipe) -> Self {
        Self {
            recipe,
            saved_id: saved.id,
            folder_id: saved.folder_id,
            saved_at: saved.saved_at,
        }
    }
}

#[async_trait]
pub trait SavedRecipeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<SavedRecipeRow>>;
    async fn find(&self, id: Id) -> Result<Option<SavedRecipeRow>>;
    async fn find_by_recipe(&self, recipe_id: Id) -> Result<Option<SavedRecipeRow>>;
    async fn create(&self, row: SavedRecipeRow) -> Result<SavedRecipeRow>;
    async fn set_folder(&self, id: Id, folder_id: Option<Id>) -> Result<()>;
    async fn delete(&self, id: Id) -> Result<()>;
}

const COLUMNS: [table::SavedRecipe; 7] = [
    table::SavedRecipe::Id,
    table::SavedRecipe::Name,
    table::SavedRecipe::RecipeId,
    table::SavedRecipe::FolderId,
    table::SavedRecipe::Title,
    table::SavedRecipe::ImageUrl,
    table::SavedRecipe::SavedAt,
];

#[derive(Clone)]
pub struct SqliteSavedRecipeRepository(pub SqlitePool);

#[async_trait]
impl SavedRecipeRepository for SqliteSavedRecipeRepository {
    async fn list(&self) -> Result<Vec<SavedRecipeRow>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(table::SavedRecipe::Table)
            .order_by(table::SavedRecipe::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, SavedRecipeRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    async fn find(&self, id: Id) -> Result<Option<SavedRecipeRow>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(table::SavedRecipe::Table)
            .and_where(Expr::col(table::SavedRecipe::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, SavedRecipeRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    async fn find_by_recipe(&self, recipe_id: Id) -> Result<Option<SavedRecipeRow>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(table::SavedRecipe::Table)
            .and_where(Expr::col(table::SavedRecipe::RecipeId).eq(recipe_id))
            .order_by(table::SavedRecipe::Id, Order::Asc)
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, SavedRecipeRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    async fn create(&self, row: SavedRecipeRow) -> Result<SavedRecipeRow> {
        let statement = Query::insert()
            .into_table(table::SavedRecipe::Table)
            .columns(COLUMNS[1..].iter().copied())
            .values_panic([
                row.name.to_owned().into(),
                row.recipe_id.into(),
                row.folder_id.into(),
                row.title.to_owned().into(),
                row.image_url.to_owned().into(),
                row.saved_at.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .last_insert_rowid();

        Ok(SavedRecipeRow { id, ..row })
    }

    async fn set_folder(&self, id: Id, folder_id: Option<Id>) -> Result<()> {
        let statement = Query::update()
            .table(table::SavedRecipe::Table)
            .values([(table::SavedRecipe::FolderId, folder_id.into())])
            .and_where(Expr::col(table::SavedRecipe::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("saved recipe {id}");
        }

        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<()> {
        let statement = Query::delete()
            .from_table(table::SavedRecipe::Table)
            .and_where(Expr::col(table::SavedRecipe::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("saved recipe {id}");
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySavedRecipeRepository(Arc<MemoryTable<SavedRecipeRow>>);

impl MemorySavedRecipeRepository {
    pub fn new(rows: Vec<SavedRecipeRow>) -> Self {
        Self(Arc::new(MemoryTable::with_rows(
            rows.into_iter().map(|r| (r.id, r)),
        )))
    }

    pub(crate) fn table(&self) -> Arc<MemoryTable<SavedRecipeRow>> {
        self.0.clone()
    }

    pub fn with_fixtures() -> Result<Self> {
        Ok(Self::new(crate::fixtures::saved_recipes()?))
    }
}

#[async_trait]
impl SavedRecipeRepository for MemorySavedRecipeRepository {
    async fn list(&self) -> Result<Vec<SavedRecipeRow>> {
        Ok(self.0.all().await)
    }

    async fn find(&self, id: Id) -> Result<Option<SavedRecipeRow>> {
        Ok(self.0.get(id).await)
    }

    async fn find_by_recipe(&self, recipe_id: Id) -> Result<Option<SavedRecipeRow>> {
        Ok(self
            .0
            .filter(|r| r.recipe_id == recipe_id)
            .await
            .into_iter()
            .next())
    }

    async fn create(&self, row: SavedRecipeRow) -> Result<SavedRecipeRow> {
        Ok(self.0.insert(|id| SavedRecipeRow { id, ..row }).await)
    }

    async fn set_folder(&self, id: Id, folder_id: Option<Id>) -> Result<()> {
        let updated = self
            .0
            .update_where(|r| r.id == id, |r| r.folder_id = folder_id)
            .await;
        if updated == 0 {
            recipebox_shared::not_found!("saved recipe {id}");
        }

        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<()> {
        if self.0.remove(id).await.is_none() {
            recipebox_shared::not_found!("saved recipe {id}");
        }

        Ok(())
    }
}
