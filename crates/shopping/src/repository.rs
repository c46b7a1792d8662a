use async_trait::async_trait;
use recipebox_db::table;
use recipebox_shared::{Id, Result, memory::MemoryTable, wire};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;

use crate::GroceryRow;

#[async_trait]
pub trait GroceryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<GroceryRow>>;
    async fn find(&self, id: Id) -> Result<Option<GroceryRow>>;
    async fn create(&self, row: GroceryRow) -> Result<GroceryRow>;
    /// Writes every column except the display name, which keeps its first value.
    async fn update(&self, row: GroceryRow) -> Result<()>;
    async fn delete(&self, id: Id) -> Result<()>;
    async fn delete_checked(&self) -> Result<u64>;
    async fn delete_all(&self) -> Result<u64>;
}

const COLUMNS: [table::GroceryItem; 7] = [
    table::GroceryItem::Id,
    table::GroceryItem::Name,
    table::GroceryItem::Ingredient,
    table::GroceryItem::Quantity,
    table::GroceryItem::Unit,
    table::GroceryItem::RecipeIds,
    table::GroceryItem::Checked,
];

#[derive(Clone)]
pub struct SqliteGroceryRepository(pub SqlitePool);

#[async_trait]
impl GroceryRepository for SqliteGroceryRepository {
    async fn list(&self) -> Result<Vec<GroceryRow>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(table::GroceryItem::Table)
            .order_by(table::GroceryItem::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, GroceryRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    async fn find(&self, id: Id) -> Result<Option<GroceryRow>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(table::GroceryItem::Table)
            .and_where(Expr::col(table::GroceryItem::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, GroceryRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    async fn create(&self, row: GroceryRow) -> Result<GroceryRow> {
        let statement = Query::insert()
            .into_table(table::GroceryItem::Table)
            .columns(COLUMNS[1..].iter().copied())
            .values_panic([
                row.name.to_owned().into(),
                row.ingredient.to_owned().into(),
                row.quantity.into(),
                row.unit.to_owned().into(),
                row.recipe_ids.to_owned().into(),
                row.checked.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .last_insert_rowid();

        Ok(GroceryRow { id, ..row })
    }

    async fn update(&self, row: GroceryRow) -> Result<()> {
        let statement = Query::update()
            .table(table::GroceryItem::Table)
            .values([
                (table::GroceryItem::Ingredient, row.ingredient.into()),
                (table::GroceryItem::Quantity, row.quantity.into()),
                (table::GroceryItem::Unit, row.unit.into()),
                (table::GroceryItem::RecipeIds, row.recipe_ids.into()),
                (table::GroceryItem::Checked, row.checked.into()),
            ])
            .and_where(Expr::col(table::GroceryItem::Id).eq(row.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("grocery item {}", row.id);
        }

        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<()> {
        let statement = Query::delete()
            .from_table(table::GroceryItem::Table)
            .and_where(Expr::col(table::GroceryItem::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("grocery item {id}");
        }

        Ok(())
    }

    async fn delete_checked(&self) -> Result<u64> {
        let statement = Query::delete()
            .from_table(table::GroceryItem::Table)
            .and_where(Expr::cust_with_values(r#"instr("checked", ?) > 0"#, ["true"]))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64> {
        let statement = Query::delete()
            .from_table(table::GroceryItem::Table)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;

        Ok(result.rows_affected())
    }
}

#[derive(Default)]
pub struct MemoryGroceryRepository(MemoryTable<GroceryRow>);

impl MemoryGroceryRepository {
    pub fn new(rows: Vec<GroceryRow>) -> Self {
        Self(MemoryTable::with_rows(rows.into_iter().map(|r| (r.id, r))))
    }

    pub fn with_fixtures() -> Result<Self> {
        Ok(Self::new(crate::fixtures::grocery_items()?))
    }
}

#[async_trait]
impl GroceryRepository for MemoryGroceryRepository {
    async fn list(&self) -> Result<Vec<GroceryRow>> {
        Ok(self.0.all().await)
    }

    async fn find(&self, id: Id) -> Result<Option<GroceryRow>> {
        Ok(self.0.get(id).await)
    }

    async fn create(&self, row: GroceryRow) -> Result<GroceryRow> {
        Ok(self.0.insert(|id| GroceryRow { id, ..row }).await)
    }

    async fn update(&self, row: GroceryRow) -> Result<()> {
        let updated = self
            .0
            .update_where(
                |r| r.id == row.id,
                |r| {
                    r.ingredient = row.ingredient.to_owned();
                    r.quantity = row.quantity;
                    r.unit = row.unit.to_owned();
                    r.recipe_ids = row.recipe_ids.to_owned();
                    r.checked = row.checked.to_owned();
                },
            )
            .await;
        if updated == 0 {
            recipebox_shared::not_found!("grocery item {}", row.id);
        }

        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<()> {
        if self.0.remove(id).await.is_none() {
            recipebox_shared::not_found!("grocery item {id}");
        }

        Ok(())
    }

    async fn delete_checked(&self) -> Result<u64> {
        Ok(self.0.remove_where(|r| wire::parse_flag(&r.checked)).await as u64)
    }

    async fn delete_all(&self) -> Result<u64> {
        Ok(self.0.remove_where(|_| true).await as u64)
    }
}
