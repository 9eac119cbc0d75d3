use std::collections::{HashMap, HashSet};

use super::{SeaOrmStorage, db_error};
use crate::entity::completion_exams::{Column as ExamColumn, Entity as CompletionExams};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades, Model};
use crate::entity::professors::{Column as ProfessorColumn, Entity as Professors};
use crate::entity::school_years::{Column as SchoolYearColumn, Entity as SchoolYears};
use crate::entity::students::{self, Column as StudentColumn, Entity as Students};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    grades::{
        entities::{Grade, GradeDetail},
        requests::{GradeListQuery, NewGrade},
        responses::GradeListResponse,
    },
    subjects::entities::Semester,
};
use crate::utils::names::{full_name, sortable_name};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_grade_impl(&self, grade: NewGrade) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(grade.student_id),
            subject_id: Set(grade.subject_id),
            professor_id: Set(grade.professor_id),
            school_year_id: Set(grade.school_year_id),
            semester: Set(grade.semester.to_string()),
            value: Set(grade.value),
            encoded_by: Set(grade.encoded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("Failed to create grade", e))?;

        Ok(result.into_grade())
    }

    pub async fn upsert_grade_impl(&self, grade: NewGrade) -> Result<(Grade, bool)> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        let existing = find_enrollment_grade(&txn, &grade).await?;

        let (model, inserted) = match existing {
            Some(current) => {
                let mut model = ActiveModel {
                    id: Set(current.id),
                    value: Set(grade.value),
                    encoded_by: Set(grade.encoded_by),
                    updated_at: Set(now),
                    ..Default::default()
                };
                // keep the recorded professor when the sheet names none
                if grade.professor_id.is_some() {
                    model.professor_id = Set(grade.professor_id);
                }
                let updated = model
                    .update(&txn)
                    .await
                    .map_err(|e| db_error("Failed to update grade", e))?;
                (updated, false)
            }
            None => {
                let model = ActiveModel {
                    student_id: Set(grade.student_id),
                    subject_id: Set(grade.subject_id),
                    professor_id: Set(grade.professor_id),
                    school_year_id: Set(grade.school_year_id),
                    semester: Set(grade.semester.to_string()),
                    value: Set(grade.value),
                    encoded_by: Set(grade.encoded_by),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                let created = model
                    .insert(&txn)
                    .await
                    .map_err(|e| db_error("Failed to create grade", e))?;
                (created, true)
            }
        };

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit grade", e))?;

        Ok((model.into_grade(), inserted))
    }

    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to load grade", e))?;

        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn get_grade_detail_impl(&self, id: i64) -> Result<Option<GradeDetail>> {
        let Some(model) = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to load grade", e))?
        else {
            return Ok(None);
        };

        Ok(self.attach_grade_details(vec![model]).await?.pop())
    }

    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 20);

        let mut select = Grades::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(school_year_id) = query.school_year_id {
            select = select.filter(Column::SchoolYearId.eq(school_year_id));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester.to_string()));
        }
        if let Some(professor_id) = query.professor_id {
            select = select.filter(Column::ProfessorId.eq(professor_id));
        }
        if let Some(remarks) = query.remarks {
            select = select.filter(Column::Value.is_in(remarks.stored_values()));
        }

        let paginator = select
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("Failed to count grades", e))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("Failed to list grades", e))?;

        Ok(GradeListResponse {
            items: self.attach_grade_details(models).await?,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn list_student_grades_impl(&self, student_id: i64) -> Result<Vec<GradeDetail>> {
        let models = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .inner_join(SchoolYears)
            .order_by_asc(SchoolYearColumn::StartYear)
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list student grades", e))?;

        self.attach_grade_details(models).await
    }

    /// Class record of one subject offering, ordered by student surname
    pub async fn list_grade_sheet_impl(
        &self,
        subject_id: i64,
        school_year_id: i64,
        semester: Semester,
    ) -> Result<Vec<GradeDetail>> {
        let models = Grades::find()
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::SchoolYearId.eq(school_year_id))
            .filter(Column::Semester.eq(semester.to_string()))
            .inner_join(Students)
            .order_by_asc(StudentColumn::LastName)
            .order_by_asc(StudentColumn::FirstName)
            .order_by_asc(StudentColumn::SchoolId)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to load grade sheet", e))?;

        self.attach_grade_details(models).await
    }

    pub async fn update_grade_impl(
        &self,
        id: i64,
        value: Option<String>,
        professor_id: Option<i64>,
    ) -> Result<Option<Grade>> {
        if self.get_grade_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(value) = value {
            model.value = Set(value);
        }
        if let Some(professor_id) = professor_id {
            model.professor_id = Set(Some(professor_id));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("Failed to update grade", e))?;

        Ok(Some(updated.into_grade()))
    }

    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete grade", e))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn has_completion_exam_impl(&self, grade_id: i64) -> Result<bool> {
        let count = CompletionExams::find()
            .filter(ExamColumn::GradeId.eq(grade_id))
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to check completion exam", e))?;

        Ok(count > 0)
    }

    /// Joins names onto grades with one lookup per related table, keeping input order
    pub(crate) async fn attach_grade_details(
        &self,
        models: Vec<Model>,
    ) -> Result<Vec<GradeDetail>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let unique = |ids: Vec<i64>| {
            ids.into_iter()
                .collect::<HashSet<_>>()
                .into_iter()
                .collect::<Vec<_>>()
        };
        let student_ids = unique(models.iter().map(|m| m.student_id).collect());
        let subject_ids = unique(models.iter().map(|m| m.subject_id).collect());
        let school_year_ids = unique(models.iter().map(|m| m.school_year_id).collect());
        let professor_ids = unique(models.iter().filter_map(|m| m.professor_id).collect());
        let grade_ids: Vec<i64> = models.iter().map(|m| m.id).collect();

        let students: HashMap<i64, students::Model> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to load students", e))?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let subjects: HashMap<i64, (String, String, f64)> = Subjects::find()
            .filter(SubjectColumn::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to load subjects", e))?
            .into_iter()
            .map(|s| (s.id, (s.code, s.title, s.units)))
            .collect();

        let school_years: HashMap<i64, String> = SchoolYears::find()
            .filter(SchoolYearColumn::Id.is_in(school_year_ids))
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to load school years", e))?
            .into_iter()
            .map(|y| (y.id, y.name))
            .collect();

        let professors: HashMap<i64, String> = if professor_ids.is_empty() {
            HashMap::new()
        } else {
            Professors::find()
                .filter(ProfessorColumn::Id.is_in(professor_ids))
                .all(&self.db)
                .await
                .map_err(|e| db_error("Failed to load professors", e))?
                .into_iter()
                .map(|p| {
                    let name =
                        full_name(&p.first_name, p.middle_name.as_deref(), &p.last_name, None);
                    (p.id, name)
                })
                .collect()
        };

        let completed: HashSet<i64> = CompletionExams::find()
            .select_only()
            .column(ExamColumn::GradeId)
            .filter(ExamColumn::GradeId.is_in(grade_ids))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to load completion exams", e))?
            .into_iter()
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let student = students.get(&m.student_id);
                let subject = subjects.get(&m.subject_id);
                let professor_name = m.professor_id.and_then(|id| professors.get(&id).cloned());
                GradeDetail {
                    student_school_id: student.map(|s| s.school_id.clone()),
                    student_name: student.map(|s| {
                        full_name(
                            &s.first_name,
                            s.middle_name.as_deref(),
                            &s.last_name,
                            s.suffix.as_deref(),
                        )
                    }),
                    student_sortable_name: student.map(|s| {
                        sortable_name(&s.first_name, s.middle_name.as_deref(), &s.last_name)
                    }),
                    subject_code: subject.map(|s| s.0.clone()),
                    subject_title: subject.map(|s| s.1.clone()),
                    units: subject.map(|s| s.2),
                    school_year_name: school_years.get(&m.school_year_id).cloned(),
                    professor_name,
                    completed: completed.contains(&m.id),
                    grade: m.into_grade(),
                }
            })
            .collect())
    }
}

async fn find_enrollment_grade<C: ConnectionTrait>(
    db: &C,
    grade: &NewGrade,
) -> Result<Option<Model>> {
    Grades::find()
        .filter(Column::StudentId.eq(grade.student_id))
        .filter(Column::SubjectId.eq(grade.subject_id))
        .filter(Column::SchoolYearId.eq(grade.school_year_id))
        .filter(Column::Semester.eq(grade.semester.to_string()))
        .one(db)
        .await
        .map_err(|e| db_error("Failed to look up grade", e))
}
