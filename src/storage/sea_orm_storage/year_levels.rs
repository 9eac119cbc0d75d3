use super::{SeaOrmStorage, db_error};
use crate::entity::year_levels::{ActiveModel, Column, Entity as YearLevels};
use crate::errors::Result;
use crate::models::year_levels::entities::YearLevel;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn list_year_levels_impl(&self) -> Result<Vec<YearLevel>> {
        let levels = YearLevels::find()
            .order_by_asc(Column::Level)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list year levels", e))?;

        Ok(levels.into_iter().map(|m| m.into_year_level()).collect())
    }

    pub async fn get_year_level_by_id_impl(&self, id: i64) -> Result<Option<YearLevel>> {
        let level = YearLevels::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to load year level", e))?;

        Ok(level.map(|m| m.into_year_level()))
    }

    pub async fn create_year_level_impl(&self, level: i32, name: String) -> Result<YearLevel> {
        let model = ActiveModel {
            level: Set(level),
            name: Set(name),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("Failed to create year level", e))?;

        Ok(result.into_year_level())
    }

    pub async fn delete_year_level_impl(&self, id: i64) -> Result<bool> {
        let result = YearLevels::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete year level", e))?;

        Ok(result.rows_affected > 0)
    }
}
