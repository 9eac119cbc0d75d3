use super::{SeaOrmStorage, db_error};
use crate::entity::professors::{ActiveModel, Column, Entity as Professors};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    professors::{
        entities::Professor,
        requests::{CreateProfessorRequest, ProfessorListQuery, UpdateProfessorRequest},
        responses::ProfessorListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_professor_impl(
        &self,
        professor_code: String,
        req: CreateProfessorRequest,
    ) -> Result<Professor> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            professor_code: Set(professor_code),
            first_name: Set(req.first_name),
            middle_name: Set(req.middle_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            department: Set(req.department),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("Failed to create professor", e))?;

        Ok(result.into_professor())
    }

    pub async fn get_professor_by_id_impl(&self, id: i64) -> Result<Option<Professor>> {
        let result = Professors::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to load professor", e))?;

        Ok(result.map(|m| m.into_professor()))
    }

    pub async fn professor_code_exists_impl(&self, code: &str) -> Result<bool> {
        let count = Professors::find()
            .filter(Column::ProfessorCode.eq(code))
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to check professor code", e))?;

        Ok(count > 0)
    }

    pub async fn list_professors_with_pagination_impl(
        &self,
        query: ProfessorListQuery,
    ) -> Result<ProfessorListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 20);

        let mut select = Professors::find();
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::ProfessorCode.like(like_contains(term)))
                    .add(Column::FirstName.like(like_contains(term)))
                    .add(Column::LastName.like(like_contains(term)))
                    .add(Column::Email.like(like_contains(term))),
            );
        }
        if let Some(ref department) = query.department
            && !department.trim().is_empty()
        {
            select = select.filter(Column::Department.eq(department.trim()));
        }

        let paginator = select
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("Failed to count professors", e))?;
        let professors = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("Failed to list professors", e))?;

        Ok(ProfessorListResponse {
            items: professors.into_iter().map(|m| m.into_professor()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_professor_impl(
        &self,
        id: i64,
        update: UpdateProfessorRequest,
    ) -> Result<Option<Professor>> {
        if self.get_professor_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        // empty strings clear optional fields
        if let Some(middle_name) = update.middle_name {
            model.middle_name = Set(Some(middle_name).filter(|v| !v.is_empty()));
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email).filter(|v| !v.is_empty()));
        }
        if let Some(department) = update.department {
            model.department = Set(Some(department).filter(|v| !v.is_empty()));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("Failed to update professor", e))?;

        Ok(Some(updated.into_professor()))
    }

    /// Grades keep their row; their professor reference is cleared
    pub async fn delete_professor_impl(&self, id: i64) -> Result<bool> {
        let result = Professors::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete professor", e))?;

        Ok(result.rows_affected > 0)
    }
}
