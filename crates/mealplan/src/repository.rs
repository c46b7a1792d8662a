use async_trait::async_trait;
use recipebox_db::table;
use recipebox_shared::{Id, Result, memory::MemoryTable};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use time::Date;

use crate::MealPlanRow;

#[async_trait]
pub trait MealPlanRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<MealPlanRow>>;
    /// Entries dated within `start..=end`.
    async fn list_between(&self, start: Date, end: Date) -> Result<Vec<MealPlanRow>>;
    async fn find(&self, id: Id) -> Result<Option<MealPlanRow>>;
    async fn create(&self, row: MealPlanRow) -> Result<MealPlanRow>;
    async fn update(&self, row: MealPlanRow) -> Result<MealPlanRow>;
    async fn delete(&self, id: Id) -> Result<()>;
}

const COLUMNS: [table::MealPlan; 7] = [
    table::MealPlan::Id,
    table::MealPlan::Name,
    table::MealPlan::RecipeId,
    table::MealPlan::Date,
    table::MealPlan::TimeSlot,
    table::MealPlan::Notes,
    table::MealPlan::CreatedAt,
];

#[derive(Clone)]
pub struct SqliteMealPlanRepository(pub SqlitePool);

#[async_trait]
impl MealPlanRepository for SqliteMealPlanRepository {
    async fn list(&self) -> Result<Vec<MealPlanRow>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(table::MealPlan::Table)
            .order_by(table::MealPlan::Date, Order::Asc)
            .order_by(table::MealPlan::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    async fn list_between(&self, start: Date, end: Date) -> Result<Vec<MealPlanRow>> {
        let start = recipebox_shared::format_date(start);
        let end = recipebox_shared::format_date(end);

        let statement = Query::select()
            .columns(COLUMNS)
            .from(table::MealPlan::Table)
            .and_where(Expr::col(table::MealPlan::Date).gte(start))
            .and_where(Expr::col(table::MealPlan::Date).lte(end))
            .order_by(table::MealPlan::Date, Order::Asc)
            .order_by(table::MealPlan::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    async fn find(&self, id: Id) -> Result<Option<MealPlanRow>> {
        let statement = Query::select()
            .columns(COLUMNS)
            .from(table::MealPlan::Table)
            .and_where(Expr::col(table::MealPlan::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    async fn create(&self, row: MealPlanRow) -> Result<MealPlanRow> {
        let statement = Query::insert()
            .into_table(table::MealPlan::Table)
            .columns(COLUMNS[1..].iter().copied())
            .values_panic([
                row.name.to_owned().into(),
                row.recipe_id.into(),
                row.date.to_owned().into(),
                row.time_slot.to_owned().into(),
                row.notes.to_owned().into(),
                row.created_at.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.0)
            .await?
            .last_insert_rowid();

        Ok(MealPlanRow { id, ..row })
    }

    async fn update(&self, row: MealPlanRow) -> Result<MealPlanRow> {
        let statement = Query::update()
            .table(table::MealPlan::Table)
            .values([
                (table::MealPlan::RecipeId, row.recipe_id.into()),
                (table::MealPlan::Date, row.date.to_owned().into()),
                (table::MealPlan::TimeSlot, row.time_slot.to_owned().into()),
                (table::MealPlan::Notes, row.notes.to_owned().into()),
            ])
            .and_where(Expr::col(table::MealPlan::Id).eq(row.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("meal plan {}", row.id);
        }

        Ok(row)
    }

    async fn delete(&self, id: Id) -> Result<()> {
        let statement = Query::delete()
            .from_table(table::MealPlan::Table)
            .and_where(Expr::col(table::MealPlan::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.0).await?;
        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("meal plan {id}");
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryMealPlanRepository(MemoryTable<MealPlanRow>);

impl MemoryMealPlanRepository {
    pub fn new(rows: Vec<MealPlanRow>) -> Self {
        Self(MemoryTable::with_rows(rows.into_iter().map(|r| (r.id, r))))
    }

    pub fn with_fixtures() -> Result<Self> {
        Ok(Self::new(crate::fixtures::meal_plans()?))
    }
}

fn by_date(rows: &mut [MealPlanRow]) {
    rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl MealPlanRepository for MemoryMealPlanRepository {
    async fn list(&self) -> Result<Vec<MealPlanRow>> {
        let mut rows = self.0.all().await;
        by_date(&mut rows);

        Ok(rows)
    }

    async fn list_between(&self, start: Date, end: Date) -> Result<Vec<MealPlanRow>> {
        let mut rows = self
            .0
            .filter(|r| {
                recipebox_shared::parse_date(&r.date)
                    .map(|date| date >= start && date <= end)
                    .unwrap_or(false)
            })
            .await;
        by_date(&mut rows);

        Ok(rows)
    }

    async fn find(&self, id: Id) -> Result<Option<MealPlanRow>> {
        Ok(self.0.get(id).await)
    }

    async fn create(&self, row: MealPlanRow) -> Result<MealPlanRow> {
        Ok(self.0.insert(|id| MealPlanRow { id, ..row }).await)
    }

    async fn update(&self, row: MealPlanRow) -> Result<MealPlanRow> {
        if !self.0.replace(row.id, row.clone()).await {
            recipebox_shared::not_found!("meal plan {}", row.id);
        }

        Ok(row)
    }

    async fn delete(&self, id: Id) -> Result<()> {
        if self.0.remove(id).await.is_none() {
            recipebox_shared::not_found!("meal plan {id}");
        }

        Ok(())
    }
}
