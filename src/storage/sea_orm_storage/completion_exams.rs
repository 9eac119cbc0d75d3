use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::completion_exams::{ActiveModel, Column, Entity as CompletionExams};
use crate::entity::grades::{self, Column as GradeColumn, Entity as Grades};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{GradeSysError, Result};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    completion_exams::{
        entities::{CompletionExam, CompletionExamDetail},
        requests::{CompletionExamListQuery, NewCompletionExam},
        responses::CompletionExamListResponse,
    },
    grades::entities::Grade,
};
use crate::utils::grading::INCOMPLETE;
use crate::utils::names::full_name;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// Writes the exam and the new grade value together.
    ///
    /// The grade must still read `INC` inside the transaction; the unique
    /// `grade_id` index rejects a second exam for the same grade.
    pub async fn record_completion_impl(
        &self,
        exam: NewCompletionExam,
    ) -> Result<(CompletionExam, Grade)> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        let grade = Grades::find_by_id(exam.grade_id)
            .one(&txn)
            .await
            .map_err(|e| db_error("Failed to load grade", e))?
            .ok_or_else(|| GradeSysError::not_found("Grade not found"))?;
        if grade.value != INCOMPLETE {
            return Err(GradeSysError::conflict("Grade is no longer INC"));
        }

        let record = ActiveModel {
            grade_id: Set(exam.grade_id),
            original_value: Set(exam.original_value),
            completion_value: Set(exam.completion_value.clone()),
            exam_date: Set(exam.exam_date.timestamp()),
            remarks: Set(exam.remarks),
            processed_by: Set(exam.processed_by),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| db_error("Failed to record completion exam", e))?;

        let updated = grades::ActiveModel {
            id: Set(grade.id),
            value: Set(exam.completion_value),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| db_error("Failed to update completed grade", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit completion exam", e))?;

        Ok((record.into_completion_exam(), updated.into_grade()))
    }

    pub async fn list_completion_exams_with_pagination_impl(
        &self,
        query: CompletionExamListQuery,
    ) -> Result<CompletionExamListResponse> {
        let (page, size) = normalize_page(query.page, query.size, 20);

        let mut select = CompletionExams::find();
        if let Some(student_id) = query.student_id {
            select = select
                .inner_join(Grades)
                .filter(GradeColumn::StudentId.eq(student_id));
        }

        let paginator = select
            .order_by_desc(Column::ExamDate)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("Failed to count completion exams", e))?;
        let exams = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("Failed to list completion exams", e))?;

        let grade_ids: Vec<i64> = exams.iter().map(|e| e.grade_id).collect();
        let grades: HashMap<i64, grades::Model> = if grade_ids.is_empty() {
            HashMap::new()
        } else {
            Grades::find()
                .filter(GradeColumn::Id.is_in(grade_ids))
                .all(&self.db)
                .await
                .map_err(|e| db_error("Failed to load grades", e))?
                .into_iter()
                .map(|g| (g.id, g))
                .collect()
        };

        let student_ids: Vec<i64> = grades.values().map(|g| g.student_id).collect();
        let subject_ids: Vec<i64> = grades.values().map(|g| g.subject_id).collect();

        let students: HashMap<i64, (String, String)> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            Students::find()
                .filter(StudentColumn::Id.is_in(student_ids))
                .all(&self.db)
                .await
                .map_err(|e| db_error("Failed to load students", e))?
                .into_iter()
                .map(|s| {
                    let name = full_name(
                        &s.first_name,
                        s.middle_name.as_deref(),
                        &s.last_name,
                        s.suffix.as_deref(),
                    );
                    (s.id, (s.school_id, name))
                })
                .collect()
        };

        let subjects: HashMap<i64, String> = if subject_ids.is_empty() {
            HashMap::new()
        } else {
            Subjects::find()
                .filter(SubjectColumn::Id.is_in(subject_ids))
                .all(&self.db)
                .await
                .map_err(|e| db_error("Failed to load subjects", e))?
                .into_iter()
                .map(|s| (s.id, s.code))
                .collect()
        };

        let items = exams
            .into_iter()
            .map(|e| {
                let grade = grades.get(&e.grade_id);
                let student = grade.and_then(|g| students.get(&g.student_id));
                CompletionExamDetail {
                    student_id: grade.map(|g| g.student_id),
                    student_school_id: student.map(|s| s.0.clone()),
                    student_name: student.map(|s| s.1.clone()),
                    subject_code: grade.and_then(|g| subjects.get(&g.subject_id).cloned()),
                    exam: e.into_completion_exam(),
                }
            })
            .collect();

        Ok(CompletionExamListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }
}
