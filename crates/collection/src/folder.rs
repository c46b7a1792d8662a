use async_trait::async_trait;
use recipebox_db::table;
use std::sync::Arc;

use recipebox_shared::{Id, Result, memory::MemoryTable};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

use crate::{MemorySavedRecipeRepository, SavedRecipeRow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    #[serde(rename = "Id")]
    pub id: Id,
    pub name: String,
    pub parent_id: Option<Id>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FolderRow {
    #[serde(rename = "Id", default)]
    pub id: Id,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<Id>,
    #[serde(default)]
    pub created_at: String,
}

impl From<FolderRow> for Folder {
    fn from(row: FolderRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id.filter(|id| *id != 0),
            created_at: recipebox_shared::timestamp_or_now(&row.created_at),
        }
    }
}

fn validate_folder_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Folder name is required".into()));
    }

    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFolder {
    #[validate(custom(function = "validate_folder_name"), length(max = 100))]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<Id>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameFolder {
    #[validate(custom(function = "validate_folder_name"), length(max = 100))]
    pub name: String,
}

#[async_trait]
pub trait FolderRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<FolderRow>>;
    async fn find(&self, id: Id) -> Result<Option<FolderRow>>;
    async fn create(&self, row: FolderRow) -> Result<FolderRow>;
    async fn rename(&self, id: Id, name: String) -> Result<()>;
    /// Removes the folder after moving its saved recipes and child folders to
    /// the root, all in one transaction. Returns how many saved recipes moved.
    async fn delete(&self, id: Id) -> Result<u64>;
}

#[derive(Clone)]
pub struct SqliteFolderRepository(pub SqlitePool);

#[async_trait]
impl FolderRepository for SqliteFolderRepository {
    async fn list(&self) -> Result<Vec<FolderRow>> {
        let statement = Query::select()
            .columns([
                table::Folder::Id,
                table::Folder::Name,
                table::Folder::ParentId,
                table::Folder::CreatedAt,
            ])
            .from(table::Folder::Table)
            .order_by(table::Folder::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, FolderRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    async fn find(&self, id: Id) -> Result<Option<FolderRow>> {
        let statement = Query::select()
            .columns([
                table::Folder::Id,
                table::Folder::Name,
                table::Folder::ParentId,
                table::Folder::CreatedAt,
            ])
            .from(table::Folder::Table)
            .and_where(Expr::col(table::Folder::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, FolderRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    async fn create(&self, row: FolderRow) -> Result<FolderRow> {
        let statement = Query::insert()
            .into_table(table::Folder::Table)
            .columns([
                table::Folder::Name,
                table::Folder::ParentId,
                table::Folder::CreatedAt,
            ])
            .values_panic([
                row.name.to_owned().into(),
                row.parent_id.into(),
                row.created_at.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .last_insert_rowid();

        Ok(FolderRow { id, ..row })
    }

    async fn rename(&self, id: Id, name: String) -> Result<()> {
        let statement = Query::update()
            .table(table::Folder::Table)
            .values([(table::Folder::Name, name.into())])
            .and_where(Expr::col(table::Folder::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("folder {id}");
        }

        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<u64> {
        let mut tx = self.0.begin().await?;

        let (sql, values) = Query::update()
            .table(table::SavedRecipe::Table)
            .values([(table::SavedRecipe::FolderId, Option::<Id>::None.into())])
            .and_where(Expr::col(table::SavedRecipe::FolderId).eq(id))
            .build_sqlx(SqliteQueryBuilder);
        let moved = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let (sql, values) = Query::update()
            .table(table::Folder::Table)
            .values([(table::Folder::ParentId, Option::<Id>::None.into())])
            .and_where(Expr::col(table::Folder::ParentId).eq(id))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let (sql, values) = Query::delete()
            .from_table(table::Folder::Table)
            .and_where(Expr::col(table::Folder::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("folder {id}");
        }

        tx.commit().await?;

        Ok(moved)
    }
}

/// In-memory folders. Shares the saved-recipe table so deletes can move
/// members to the root.
pub struct MemoryFolderRepository {
    rows: MemoryTable<FolderRow>,
    saved: Arc<MemoryTable<SavedRecipeRow>>,
}

impl MemoryFolderRepository {
    pub fn new(rows: Vec<FolderRow>, saved: &MemorySavedRecipeRepository) -> Self {
        Self {
            rows: MemoryTable::with_rows(rows.into_iter().map(|r| (r.id, r))),
            saved: saved.table(),
        }
    }

    pub fn with_fixtures(saved: &MemorySavedRecipeRepository) -> Result<Self> {
        Ok(Self::new(crate::fixtures::folders()?, saved))
    }
}

#[async_trait]
impl FolderRepository for MemoryFolderRepository {
    async fn list(&self) -> Result<Vec<FolderRow>> {
        Ok(self.rows.all().await)
    }

    async fn find(&self, id: Id) -> Result<Option<FolderRow>> {
        Ok(self.rows.get(id).await)
    }

    async fn create(&self, row: FolderRow) -> Result<FolderRow> {
        Ok(self.rows.insert(|id| FolderRow { id, ..row }).await)
    }

    async fn rename(&self, id: Id, name: String) -> Result<()> {
        let updated = self
            .rows
            .update_where(|r| r.id == id, |r| r.name = name.to_owned())
            .await;
        if updated == 0 {
            recipebox_shared::not_found!("folder {id}");
        }

        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<u64> {
        if self.rows.get(id).await.is_none() {
            recipebox_shared::not_found!("folder {id}");
        }

        let moved = self
            .saved
            .update_where(|r| r.folder_id == Some(id), |r| r.folder_id = None)
            .await;
        self.rows
            .update_where(|r| r.parent_id == Some(id), |r| r.parent_id = None)
            .await;
        self.rows.remove(id).await;

        Ok(moved as u64)
    }
}
