use super::{SeaOrmStorage, db_error};
use crate::entity::school_years::{ActiveModel, Column, Entity as SchoolYears};
use crate::errors::Result;
use crate::models::school_years::entities::SchoolYear;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_school_year_impl(
        &self,
        name: String,
        start_year: i32,
        end_year: i32,
        is_current: bool,
    ) -> Result<SchoolYear> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        if is_current {
            clear_current_flag(&txn).await?;
        }

        let model = ActiveModel {
            name: Set(name),
            start_year: Set(start_year),
            end_year: Set(end_year),
            is_current: Set(is_current),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model
            .insert(&txn)
            .await
            .map_err(|e| db_error("Failed to create school year", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit school year", e))?;

        Ok(result.into_school_year())
    }

    pub async fn get_school_year_by_id_impl(&self, id: i64) -> Result<Option<SchoolYear>> {
        let result = SchoolYears::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to load school year", e))?;

        Ok(result.map(|m| m.into_school_year()))
    }

    pub async fn get_current_school_year_impl(&self) -> Result<Option<SchoolYear>> {
        let result = SchoolYears::find()
            .filter(Column::IsCurrent.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to load current school year", e))?;

        Ok(result.map(|m| m.into_school_year()))
    }

    pub async fn list_school_years_impl(&self) -> Result<Vec<SchoolYear>> {
        let years = SchoolYears::find()
            .order_by_desc(Column::StartYear)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list school years", e))?;

        Ok(years.into_iter().map(|m| m.into_school_year()).collect())
    }

    pub async fn update_school_year_impl(
        &self,
        id: i64,
        name: String,
        start_year: i32,
        end_year: i32,
    ) -> Result<Option<SchoolYear>> {
        if self.get_school_year_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(name),
            start_year: Set(start_year),
            end_year: Set(end_year),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("Failed to update school year", e))?;

        Ok(Some(updated.into_school_year()))
    }

    pub async fn set_current_school_year_impl(&self, id: i64) -> Result<Option<SchoolYear>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        let Some(existing) = SchoolYears::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| db_error("Failed to load school year", e))?
        else {
            return Ok(None);
        };

        clear_current_flag(&txn).await?;

        let mut model: ActiveModel = existing.into();
        model.is_current = Set(true);
        model.updated_at = Set(chrono::Utc::now().timestamp());
        let updated = model
            .update(&txn)
            .await
            .map_err(|e| db_error("Failed to set current school year", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit current school year", e))?;

        Ok(Some(updated.into_school_year()))
    }

    /// Fails with `Conflict` while grades reference the school year
    pub async fn delete_school_year_impl(&self, id: i64) -> Result<bool> {
        let result = SchoolYears::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete school year", e))?;

        Ok(result.rows_affected > 0)
    }
}

async fn clear_current_flag<C: ConnectionTrait>(conn: &C) -> Result<()> {
    SchoolYears::update_many()
        .col_expr(Column::IsCurrent, Expr::value(false))
        .filter(Column::IsCurrent.eq(true))
        .exec(conn)
        .await
        .map_err(|e| db_error("Failed to clear current school year", e))?;
    Ok(())
}
