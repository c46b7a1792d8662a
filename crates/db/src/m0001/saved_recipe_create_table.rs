use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::SavedRecipe;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(SavedRecipe::Table)
        .col(
            ColumnDef::new(SavedRecipe::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(SavedRecipe::Name)
                .string()
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(SavedRecipe::RecipeId).integer().not_null())
        .col(ColumnDef::new(SavedRecipe::FolderId).integer().null())
        .col(
            ColumnDef::new(SavedRecipe::Title)
                .string()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(SavedRecipe::ImageUrl)
                .string()
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(SavedRecipe::SavedAt).string().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(SavedRecipe::Table).to_owned()
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
