use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Review;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Review::Table)
        .col(
            ColumnDef::new(Review::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Review::Name).string().not_null().default(""))
        .col(ColumnDef::new(Review::RecipeId).integer().not_null())
        .col(ColumnDef::new(Review::Rating).integer().not_null())
        .col(
            ColumnDef::new(Review::Comment)
                .string()
                .not_null()
                .string_len(2000)
                .default(""),
        )
        .col(ColumnDef::new(Review::CreatedAt).string().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Review::Table).to_owned()
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
