use super::{SeaOrmStorage, db_error};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code),
            title: Set(req.title),
            units: Set(req.units),
            program_id: Set(req.program_id),
            year_level_id: Set(req.year_level_id),
            semester: Set(req.semester.to_string()),
            prerequisite: Set(req.prerequisite),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("Failed to create subject", e))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to load subject", e))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 20);

        let mut select = Subjects::find();
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Code.like(like_contains(term)))
                    .add(Column::Title.like(like_contains(term))),
            );
        }
        if let Some(program_id) = query.program_id {
            select = select.filter(Column::ProgramId.eq(program_id));
        }
        if let Some(year_level_id) = query.year_level_id {
            select = select.filter(Column::YearLevelId.eq(year_level_id));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester.to_string()));
        }

        let paginator = select
            .order_by_asc(Column::ProgramId)
            .order_by_asc(Column::YearLevelId)
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Code)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("Failed to count subjects", e))?;
        let subjects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("Failed to list subjects", e))?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn list_subject_codes_impl(&self, program_id: i64) -> Result<Vec<String>> {
        Subjects::find()
            .select_only()
            .column(Column::Code)
            .filter(Column::ProgramId.eq(program_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list subject codes", e))
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
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
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(units) = update.units {
            model.units = Set(units);
        }
        if let Some(year_level_id) = update.year_level_id {
            model.year_level_id = Set(year_level_id);
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester.to_string());
        }
        if let Some(prerequisite) = update.prerequisite {
            model.prerequisite = Set(Some(prerequisite).filter(|v| !v.is_empty()));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("Failed to update subject", e))?;

        Ok(Some(updated.into_subject()))
    }

    /// Fails with `Conflict` while grades reference the subject
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete subject", e))?;

        Ok(result.rows_affected > 0)
    }
}
