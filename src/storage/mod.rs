use std::sync::Arc;

use crate::models::{
    completion_exams::{
        entities::CompletionExam,
        requests::{CompletionExamListQuery, NewCompletionExam},
        responses::CompletionExamListResponse,
    },
    dashboard::DashboardResponse,
    grades::{
        entities::{Grade, GradeDetail},
        requests::{GradeListQuery, NewGrade},
        responses::GradeListResponse,
    },
    professors::{
        entities::Professor,
        requests::{CreateProfessorRequest, ProfessorListQuery, UpdateProfessorRequest},
        responses::ProfessorListResponse,
    },
    programs::{
        entities::Program,
        requests::{CreateProgramRequest, ProgramListQuery, UpdateProgramRequest},
        responses::ProgramListResponse,
    },
    school_years::entities::SchoolYear,
    students::{
        entities::{Student, StudentDetail},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    subjects::{
        entities::{Semester, Subject},
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
    year_levels::entities::YearLevel,
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// Persistence operations used by the services.
///
/// Unique and foreign key violations surface as `GradeSysError::Conflict`.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // Users. `password` in the create/update requests is already hashed.
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    // Academic programs
    async fn create_program(&self, program: CreateProgramRequest) -> Result<Program>;
    async fn get_program_by_id(&self, id: i64) -> Result<Option<Program>>;
    async fn list_programs_with_pagination(
        &self,
        query: ProgramListQuery,
    ) -> Result<ProgramListResponse>;
    async fn list_all_programs(&self) -> Result<Vec<Program>>;
    async fn update_program(
        &self,
        id: i64,
        update: UpdateProgramRequest,
    ) -> Result<Option<Program>>;
    async fn delete_program(&self, id: i64) -> Result<bool>;

    // Year levels
    async fn list_year_levels(&self) -> Result<Vec<YearLevel>>;
    async fn get_year_level_by_id(&self, id: i64) -> Result<Option<YearLevel>>;
    async fn create_year_level(&self, level: i32, name: String) -> Result<YearLevel>;
    async fn delete_year_level(&self, id: i64) -> Result<bool>;

    // School years
    async fn create_school_year(
        &self,
        name: String,
        start_year: i32,
        end_year: i32,
        is_current: bool,
    ) -> Result<SchoolYear>;
    async fn get_school_year_by_id(&self, id: i64) -> Result<Option<SchoolYear>>;
    async fn get_current_school_year(&self) -> Result<Option<SchoolYear>>;
    async fn list_school_years(&self) -> Result<Vec<SchoolYear>>;
    async fn update_school_year(
        &self,
        id: i64,
        name: String,
        start_year: i32,
        end_year: i32,
    ) -> Result<Option<SchoolYear>>;
    /// Marks one school year current and clears the flag on all others
    async fn set_current_school_year(&self, id: i64) -> Result<Option<SchoolYear>>;
    async fn delete_school_year(&self, id: i64) -> Result<bool>;

    // Professors
    async fn create_professor(
        &self,
        professor_code: String,
        professor: CreateProfessorRequest,
    ) -> Result<Professor>;
    async fn get_professor_by_id(&self, id: i64) -> Result<Option<Professor>>;
    async fn professor_code_exists(&self, code: &str) -> Result<bool>;
    async fn list_professors_with_pagination(
        &self,
        query: ProfessorListQuery,
    ) -> Result<ProfessorListResponse>;
    async fn update_professor(
        &self,
        id: i64,
        update: UpdateProfessorRequest,
    ) -> Result<Option<Professor>>;
    async fn delete_professor(&self, id: i64) -> Result<bool>;

    // Students
    async fn create_student(
        &self,
        school_id: String,
        student: CreateStudentRequest,
    ) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_detail(&self, id: i64) -> Result<Option<StudentDetail>>;
    async fn school_id_exists(&self, school_id: &str) -> Result<bool>;
    /// Subset of `school_ids` already present
    async fn existing_school_ids(&self, school_ids: &[String]) -> Result<Vec<String>>;
    async fn find_students_by_school_ids(&self, school_ids: &[String]) -> Result<Vec<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn list_students_for_export(
        &self,
        query: StudentListQuery,
        limit: u64,
    ) -> Result<Vec<StudentDetail>>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;

    // Subjects
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    /// Codes already used within one program
    async fn list_subject_codes(&self, program_id: i64) -> Result<Vec<String>>;
    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    // Grades
    async fn create_grade(&self, grade: NewGrade) -> Result<Grade>;
    /// Inserts or overwrites the grade for the same enrollment key; `true` when inserted
    async fn upsert_grade(&self, grade: NewGrade) -> Result<(Grade, bool)>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn get_grade_detail(&self, id: i64) -> Result<Option<GradeDetail>>;
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
    async fn list_student_grades(&self, student_id: i64) -> Result<Vec<GradeDetail>>;
    async fn list_grade_sheet(
        &self,
        subject_id: i64,
        school_year_id: i64,
        semester: Semester,
    ) -> Result<Vec<GradeDetail>>;
    async fn update_grade(
        &self,
        id: i64,
        value: Option<String>,
        professor_id: Option<i64>,
    ) -> Result<Option<Grade>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;
    async fn has_completion_exam(&self, grade_id: i64) -> Result<bool>;

    // Completion exams
    /// Inserts the exam and replaces the grade value in one transaction
    async fn record_completion(&self, exam: NewCompletionExam)
    -> Result<(CompletionExam, Grade)>;
    async fn list_completion_exams_with_pagination(
        &self,
        query: CompletionExamListQuery,
    ) -> Result<CompletionExamListResponse>;

    // Dashboard
    /// `eligible_since`: INC grades recorded at or after this unix time count as still completable
    async fn dashboard_summary(&self, eligible_since: i64) -> Result<DashboardResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
