use super::{SeaOrmStorage, db_error};
use crate::entity::academic_programs::{ActiveModel, Column, Entity as AcademicPrograms};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    programs::{
        entities::Program,
        requests::{CreateProgramRequest, ProgramListQuery, UpdateProgramRequest},
        responses::ProgramListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_program_impl(&self, req: CreateProgramRequest) -> Result<Program> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("Failed to create program", e))?;

        Ok(result.into_program())
    }

    pub async fn get_program_by_id_impl(&self, id: i64) -> Result<Option<Program>> {
        let result = AcademicPrograms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to load program", e))?;

        Ok(result.map(|m| m.into_program()))
    }

    pub async fn list_programs_with_pagination_impl(
        &self,
        query: ProgramListQuery,
    ) -> Result<ProgramListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 20);

        let mut select = AcademicPrograms::find();
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Code.like(like_contains(term)))
                    .add(Column::Name.like(like_contains(term))),
            );
        }

        let paginator = select.order_by_asc(Column::Code).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("Failed to count programs", e))?;
        let programs = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("Failed to list programs", e))?;

        Ok(ProgramListResponse {
            items: programs.into_iter().map(|m| m.into_program()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn list_all_programs_impl(&self) -> Result<Vec<Program>> {
        let programs = AcademicPrograms::find()
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list programs", e))?;

        Ok(programs.into_iter().map(|m| m.into_program()).collect())
    }

    pub async fn update_program_impl(
        &self,
        id: i64,
        update: UpdateProgramRequest,
    ) -> Result<Option<Program>> {
        if self.get_program_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description).filter(|d| !d.is_empty()));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("Failed to update program", e))?;

        Ok(Some(updated.into_program()))
    }

    /// Fails with `Conflict` while students or subjects reference the program
    pub async fn delete_program_impl(&self, id: i64) -> Result<bool> {
        let result = AcademicPrograms::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete program", e))?;

        Ok(result.rows_affected > 0)
    }
}
