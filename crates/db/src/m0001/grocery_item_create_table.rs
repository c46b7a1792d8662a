use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::GroceryItem;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(GroceryItem::Table)
        .col(
            ColumnDef::new(GroceryItem::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(GroceryItem::Name)
                .string()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(GroceryItem::Ingredient)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(
            ColumnDef::new(GroceryItem::Quantity)
                .double()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(GroceryItem::Unit)
                .string()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(GroceryItem::RecipeIds)
                .string()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(GroceryItem::Checked)
                .string()
                .not_null()
                .default("false"),
        )
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(GroceryItem::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
