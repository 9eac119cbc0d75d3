use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const DEFAULT_YEAR_LEVELS: [(i32, &str); 4] = [
    (1, "First Year"),
    (2, "Second Year"),
    (3, "Third Year"),
    (4, "Fourth Year"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(YearLevels::Table)
            .columns([YearLevels::Level, YearLevels::Name]);
        for (level, name) in DEFAULT_YEAR_LEVELS {
            insert.values_panic([level.into(), name.into()]);
        }

        manager.exec_stmt(insert.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(YearLevels::Table)
            .and_where(Expr::col(YearLevels::Level).is_in(DEFAULT_YEAR_LEVELS.map(|(l, _)| l)))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}

#[derive(DeriveIden)]
enum YearLevels {
    #[sea_orm(iden = "year_levels")]
    Table,
    Level,
    Name,
}
