use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::academic_programs::{Column as ProgramColumn, Entity as AcademicPrograms};
use crate::entity::completion_exams::{Column as ExamColumn, Entity as CompletionExams};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::professors::Entity as Professors;
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::subjects::Entity as Subjects;
use crate::errors::Result;
use crate::models::dashboard::{DashboardResponse, GradeDistribution, ProgramHeadcount};
use crate::models::grades::entities::GradeRemark;
use crate::utils::grading::{INCOMPLETE, remarks_of};
use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    pub async fn dashboard_summary_impl(&self, eligible_since: i64) -> Result<DashboardResponse> {
        let total_students = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to count students", e))?;
        let total_subjects = Subjects::find()
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to count subjects", e))?;
        let total_professors = Professors::find()
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to count professors", e))?;

        let programs = AcademicPrograms::find()
            .order_by_asc(ProgramColumn::Code)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list programs", e))?;

        let headcounts: HashMap<i64, i64> = Students::find()
            .select_only()
            .column(StudentColumn::ProgramId)
            .column_as(StudentColumn::Id.count(), "students")
            .group_by(StudentColumn::ProgramId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to count students per program", e))?
            .into_iter()
            .collect();

        let current_school_year = self.get_current_school_year_impl().await?;

        // distribution covers the current school year, or every grade when none is current
        let mut grades = Grades::find();
        if let Some(ref year) = current_school_year {
            grades = grades.filter(GradeColumn::SchoolYearId.eq(year.id));
        }
        let value_counts: Vec<(String, i64)> = grades
            .select_only()
            .column(GradeColumn::Value)
            .column_as(GradeColumn::Id.count(), "grades")
            .group_by(GradeColumn::Value)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to count grades", e))?;

        let mut grade_distribution = GradeDistribution::default();
        for (value, count) in value_counts {
            match remarks_of(&value) {
                Some(GradeRemark::Passed) => grade_distribution.passed += count,
                Some(GradeRemark::Failed) => grade_distribution.failed += count,
                Some(GradeRemark::Incomplete) => grade_distribution.incomplete += count,
                Some(GradeRemark::Dropped) => grade_distribution.dropped += count,
                Some(GradeRemark::Withdrawn) => grade_distribution.withdrawn += count,
                None => {}
            }
        }

        // a grade set back to INC after its completion exam stays completed
        let completed = Query::select()
            .column(ExamColumn::GradeId)
            .from(CompletionExams)
            .to_owned();
        let eligible_incomplete = Grades::find()
            .filter(GradeColumn::Value.eq(INCOMPLETE))
            .filter(GradeColumn::CreatedAt.gte(eligible_since))
            .filter(GradeColumn::Id.not_in_subquery(completed))
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to count incomplete grades", e))?;

        Ok(DashboardResponse {
            total_students: total_students as i64,
            total_subjects: total_subjects as i64,
            total_programs: programs.len() as i64,
            total_professors: total_professors as i64,
            current_school_year,
            grade_distribution,
            students_per_program: programs
                .into_iter()
                .map(|p| ProgramHeadcount {
                    students: headcounts.get(&p.id).copied().unwrap_or(0),
                    program_id: p.id,
                    program_code: p.code,
                })
                .collect(),
            eligible_incomplete: eligible_incomplete as i64,
        })
    }
}
