use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Folder;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Folder::Table)
        .col(
            ColumnDef::new(Folder::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Folder::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(ColumnDef::new(Folder::ParentId).integer().null())
        .col(ColumnDef::new(Folder::CreatedAt).string().not_null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Folder::Table).to_owned()
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
