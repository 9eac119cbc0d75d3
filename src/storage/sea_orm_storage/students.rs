use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::academic_programs::{Column as ProgramColumn, Entity as AcademicPrograms};
use crate::entity::students::{ActiveModel, Column, Entity as Students, Model};
use crate::entity::year_levels::{Column as YearLevelColumn, Entity as YearLevels};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    students::{
        entities::{Student, StudentDetail, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};

impl SeaOrmStorage {
    pub async fn create_student_impl(
        &self,
        school_id: String,
        req: CreateStudentRequest,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(school_id),
            first_name: Set(req.first_name),
            middle_name: Set(req.middle_name),
            last_name: Set(req.last_name),
            suffix: Set(req.suffix),
            email: Set(req.email),
            program_id: Set(req.program_id),
            year_level_id: Set(req.year_level_id),
            status: Set(req.status.unwrap_or(StudentStatus::Enrolled).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("Failed to create student", e))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to load student", e))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_detail_impl(&self, id: i64) -> Result<Option<StudentDetail>> {
        let Some(model) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to load student", e))?
        else {
            return Ok(None);
        };

        Ok(self.attach_student_details(vec![model]).await?.pop())
    }

    pub async fn school_id_exists_impl(&self, school_id: &str) -> Result<bool> {
        let count = Students::find()
            .filter(Column::SchoolId.eq(school_id))
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to check school id", e))?;

        Ok(count > 0)
    }

    pub async fn existing_school_ids_impl(&self, school_ids: &[String]) -> Result<Vec<String>> {
        if school_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        // stay well below bind parameter limits
        for chunk in school_ids.chunks(500) {
            let ids: Vec<String> = Students::find()
                .select_only()
                .column(Column::SchoolId)
                .filter(Column::SchoolId.is_in(chunk.iter().cloned()))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| db_error("Failed to check school ids", e))?;
            found.extend(ids);
        }
        Ok(found)
    }

    pub async fn find_students_by_school_ids_impl(
        &self,
        school_ids: &[String],
    ) -> Result<Vec<Student>> {
        let mut students = Vec::new();
        for chunk in school_ids.chunks(500) {
            let models = Students::find()
                .filter(Column::SchoolId.is_in(chunk.iter().cloned()))
                .all(&self.db)
                .await
                .map_err(|e| db_error("Failed to load students", e))?;
            students.extend(models.into_iter().map(|m| m.into_student()));
        }
        Ok(students)
    }

    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 20);

        let paginator = filtered_students(&query).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("Failed to count students", e))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("Failed to list students", e))?;

        Ok(StudentListResponse {
            items: self.attach_student_details(models).await?,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn list_students_for_export_impl(
        &self,
        query: StudentListQuery,
        limit: u64,
    ) -> Result<Vec<StudentDetail>> {
        let models = filtered_students(&query)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list students for export", e))?;

        self.attach_student_details(models).await
    }

    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
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
        if let Some(middle_name) = update.middle_name {
            model.middle_name = Set(Some(middle_name).filter(|v| !v.is_empty()));
        }
        if let Some(suffix) = update.suffix {
            model.suffix = Set(Some(suffix).filter(|v| !v.is_empty()));
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email).filter(|v| !v.is_empty()));
        }
        if let Some(program_id) = update.program_id {
            model.program_id = Set(program_id);
        }
        if let Some(year_level_id) = update.year_level_id {
            model.year_level_id = Set(year_level_id);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("Failed to update student", e))?;

        Ok(Some(updated.into_student()))
    }

    /// Grades of the student are removed by the cascading foreign key
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete student", e))?;

        Ok(result.rows_affected > 0)
    }

    /// Resolves program codes and year level names in two batched lookups
    pub(crate) async fn attach_student_details(
        &self,
        models: Vec<Model>,
    ) -> Result<Vec<StudentDetail>> {
        let program_ids: Vec<i64> = models.iter().map(|m| m.program_id).collect();
        let year_level_ids: Vec<i64> = models.iter().map(|m| m.year_level_id).collect();

        let programs: HashMap<i64, String> = if program_ids.is_empty() {
            HashMap::new()
        } else {
            AcademicPrograms::find()
                .filter(ProgramColumn::Id.is_in(program_ids))
                .all(&self.db)
                .await
                .map_err(|e| db_error("Failed to load programs", e))?
                .into_iter()
                .map(|p| (p.id, p.code))
                .collect()
        };

        let year_levels: HashMap<i64, String> = if year_level_ids.is_empty() {
            HashMap::new()
        } else {
            YearLevels::find()
                .filter(YearLevelColumn::Id.is_in(year_level_ids))
                .all(&self.db)
                .await
                .map_err(|e| db_error("Failed to load year levels", e))?
                .into_iter()
                .map(|y| (y.id, y.name))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let student = m.into_student();
                StudentDetail {
                    full_name: student.full_name(),
                    program_code: programs.get(&student.program_id).cloned(),
                    year_level_name: year_levels.get(&student.year_level_id).cloned(),
                    student,
                }
            })
            .collect())
    }
}

fn filtered_students(query: &StudentListQuery) -> Select<Students> {
    let mut select = Students::find();

    if let Some(ref search) = query.search
        && !search.trim().is_empty()
    {
        let term = search.trim();
        select = select.filter(
            Condition::any()
                .add(Column::SchoolId.like(like_contains(term)))
                .add(Column::FirstName.like(like_contains(term)))
                .add(Column::MiddleName.like(like_contains(term)))
                .add(Column::LastName.like(like_contains(term))),
        );
    }
    if let Some(program_id) = query.program_id {
        select = select.filter(Column::ProgramId.eq(program_id));
    }
    if let Some(year_level_id) = query.year_level_id {
        select = select.filter(Column::YearLevelId.eq(year_level_id));
    }
    if let Some(status) = query.status {
        select = select.filter(Column::Status.eq(status.to_string()));
    }

    select
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .order_by_asc(Column::Id)
}
