//! SeaORM storage for SQLite, PostgreSQL and MySQL.

mod completion_exams;
mod dashboard;
mod grades;
mod professors;
mod programs;
mod school_years;
mod students;
mod subjects;
mod users;
mod year_levels;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{GradeSysError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;
use url::Url;

#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

/// Maps constraint violations to `Conflict` and everything else to `DatabaseOperation`
pub(crate) fn db_error(context: &str, err: DbErr) -> GradeSysError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            GradeSysError::conflict(format!("{context}: duplicate value ({detail})"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            let message = format!("{context}: record is referenced or missing ({detail})");
            GradeSysError::conflict(message)
        }
        _ => GradeSysError::database_operation(format!("{context}: {err}")),
    }
}

impl SeaOrmStorage {
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::from_url(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// Connects and applies pending migrations
    pub async fn from_url(url: &str, pool_size: u32, timeout_secs: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout_secs).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout_secs).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage ready, database: {}", redact_url(&db_url));

        Ok(Self { db })
    }

    /// SQLite with WAL and tuned pragmas; in-memory databases keep one connection
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");
        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| GradeSysError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let max_connections = if in_memory { 1 } else { pool_size.max(1) };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout_secs))
            // an in-memory database disappears with its last connection
            .idle_timeout(if in_memory {
                None
            } else {
                Some(Duration::from_secs(300))
            })
            .max_lifetime(if in_memory {
                None
            } else {
                Some(Duration::from_secs(1800))
            })
            .connect_with(opt)
            .await
            .map_err(|e| {
                GradeSysError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout_secs))
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| {
                GradeSysError::database_connection(format!("Cannot connect to database: {e}"))
            })
    }

    /// Infers the driver from the URL; bare `.db`/`.sqlite` paths become SQLite URLs
    pub fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url.ends_with(".sqlite3") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(GradeSysError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

/// Hides the password of server URLs; sqlite forms are returned as given
fn redact_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if url.password().is_some() => match url.set_password(Some("***")) {
            Ok(()) => url.to_string(),
            Err(()) => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}

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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // Users
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // Programs
    async fn create_program(&self, program: CreateProgramRequest) -> Result<Program> {
        self.create_program_impl(program).await
    }

    async fn get_program_by_id(&self, id: i64) -> Result<Option<Program>> {
        self.get_program_by_id_impl(id).await
    }

    async fn list_programs_with_pagination(
        &self,
        query: ProgramListQuery,
    ) -> Result<ProgramListResponse> {
        self.list_programs_with_pagination_impl(query).await
    }

    async fn list_all_programs(&self) -> Result<Vec<Program>> {
        self.list_all_programs_impl().await
    }

    async fn update_program(
        &self,
        id: i64,
        update: UpdateProgramRequest,
    ) -> Result<Option<Program>> {
        self.update_program_impl(id, update).await
    }

    async fn delete_program(&self, id: i64) -> Result<bool> {
        self.delete_program_impl(id).await
    }

    // Year levels
    async fn list_year_levels(&self) -> Result<Vec<YearLevel>> {
        self.list_year_levels_impl().await
    }

    async fn get_year_level_by_id(&self, id: i64) -> Result<Option<YearLevel>> {
        self.get_year_level_by_id_impl(id).await
    }

    async fn create_year_level(&self, level: i32, name: String) -> Result<YearLevel> {
        self.create_year_level_impl(level, name).await
    }

    async fn delete_year_level(&self, id: i64) -> Result<bool> {
        self.delete_year_level_impl(id).await
    }

    // School years
    async fn create_school_year(
        &self,
        name: String,
        start_year: i32,
        end_year: i32,
        is_current: bool,
    ) -> Result<SchoolYear> {
        self.create_school_year_impl(name, start_year, end_year, is_current)
            .await
    }

    async fn get_school_year_by_id(&self, id: i64) -> Result<Option<SchoolYear>> {
        self.get_school_year_by_id_impl(id).await
    }

    async fn get_current_school_year(&self) -> Result<Option<SchoolYear>> {
        self.get_current_school_year_impl().await
    }

    async fn list_school_years(&self) -> Result<Vec<SchoolYear>> {
        self.list_school_years_impl().await
    }

    async fn update_school_year(
        &self,
        id: i64,
        name: String,
        start_year: i32,
        end_year: i32,
    ) -> Result<Option<SchoolYear>> {
        self.update_school_year_impl(id, name, start_year, end_year)
            .await
    }

    async fn set_current_school_year(&self, id: i64) -> Result<Option<SchoolYear>> {
        self.set_current_school_year_impl(id).await
    }

    async fn delete_school_year(&self, id: i64) -> Result<bool> {
        self.delete_school_year_impl(id).await
    }

    // Professors
    async fn create_professor(
        &self,
        professor_code: String,
        professor: CreateProfessorRequest,
    ) -> Result<Professor> {
        self.create_professor_impl(professor_code, professor).await
    }

    async fn get_professor_by_id(&self, id: i64) -> Result<Option<Professor>> {
        self.get_professor_by_id_impl(id).await
    }

    async fn professor_code_exists(&self, code: &str) -> Result<bool> {
        self.professor_code_exists_impl(code).await
    }

    async fn list_professors_with_pagination(
        &self,
        query: ProfessorListQuery,
    ) -> Result<ProfessorListResponse> {
        self.list_professors_with_pagination_impl(query).await
    }

    async fn update_professor(
        &self,
        id: i64,
        update: UpdateProfessorRequest,
    ) -> Result<Option<Professor>> {
        self.update_professor_impl(id, update).await
    }

    async fn delete_professor(&self, id: i64) -> Result<bool> {
        self.delete_professor_impl(id).await
    }

    // Students
    async fn create_student(
        &self,
        school_id: String,
        student: CreateStudentRequest,
    ) -> Result<Student> {
        self.create_student_impl(school_id, student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_detail(&self, id: i64) -> Result<Option<StudentDetail>> {
        self.get_student_detail_impl(id).await
    }

    async fn school_id_exists(&self, school_id: &str) -> Result<bool> {
        self.school_id_exists_impl(school_id).await
    }

    async fn existing_school_ids(&self, school_ids: &[String]) -> Result<Vec<String>> {
        self.existing_school_ids_impl(school_ids).await
    }

    async fn find_students_by_school_ids(&self, school_ids: &[String]) -> Result<Vec<Student>> {
        self.find_students_by_school_ids_impl(school_ids).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students_for_export(
        &self,
        query: StudentListQuery,
        limit: u64,
    ) -> Result<Vec<StudentDetail>> {
        self.list_students_for_export_impl(query, limit).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // Subjects
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn list_subject_codes(&self, program_id: i64) -> Result<Vec<String>> {
        self.list_subject_codes_impl(program_id).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // Grades
    async fn create_grade(&self, grade: NewGrade) -> Result<Grade> {
        self.create_grade_impl(grade).await
    }

    async fn upsert_grade(&self, grade: NewGrade) -> Result<(Grade, bool)> {
        self.upsert_grade_impl(grade).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn get_grade_detail(&self, id: i64) -> Result<Option<GradeDetail>> {
        self.get_grade_detail_impl(id).await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn list_student_grades(&self, student_id: i64) -> Result<Vec<GradeDetail>> {
        self.list_student_grades_impl(student_id).await
    }

    async fn list_grade_sheet(
        &self,
        subject_id: i64,
        school_year_id: i64,
        semester: Semester,
    ) -> Result<Vec<GradeDetail>> {
        self.list_grade_sheet_impl(subject_id, school_year_id, semester)
            .await
    }

    async fn update_grade(
        &self,
        id: i64,
        value: Option<String>,
        professor_id: Option<i64>,
    ) -> Result<Option<Grade>> {
        self.update_grade_impl(id, value, professor_id).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    async fn has_completion_exam(&self, grade_id: i64) -> Result<bool> {
        self.has_completion_exam_impl(grade_id).await
    }

    // Completion exams
    async fn record_completion(
        &self,
        exam: NewCompletionExam,
    ) -> Result<(CompletionExam, Grade)> {
        self.record_completion_impl(exam).await
    }

    async fn list_completion_exams_with_pagination(
        &self,
        query: CompletionExamListQuery,
    ) -> Result<CompletionExamListResponse> {
        self.list_completion_exams_with_pagination_impl(query).await
    }

    // Dashboard
    async fn dashboard_summary(&self, eligible_since: i64) -> Result<DashboardResponse> {
        self.dashboard_summary_impl(eligible_since).await
    }
}
