//! API data models: business entities, request payloads and response bodies.

pub mod auth;
pub mod common;
pub mod completion_exams;
pub mod dashboard;
pub mod grades;
pub mod imports;
pub mod professors;
pub mod programs;
pub mod school_years;
pub mod students;
pub mod subjects;
pub mod system;
pub mod users;
pub mod year_levels;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// Process start time, shared with handlers for uptime reporting
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// Business error codes carried in the `code` field of [`ApiResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // General
    BadRequest = 1000,
    Unauthorized = 1001,
    ValidationFailed = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    RateLimitExceeded = 1029,

    // Authentication
    AuthFailed = 2000,
    OtpInvalid = 2001,
    OtpExpired = 2002,
    PasswordPolicyViolation = 2003,

    // Users
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserNameInvalid = 3002,
    UserEmailInvalid = 3003,
    UserCreationFailed = 3004,
    UserUpdateFailed = 3005,
    UserDeleteFailed = 3006,
    CanNotDeleteCurrentUser = 3007,

    // Reference data
    ProgramNotFound = 4000,
    ProgramAlreadyExists = 4001,
    ProgramInUse = 4002,
    YearLevelNotFound = 4100,
    YearLevelAlreadyExists = 4101,
    YearLevelInUse = 4102,
    SchoolYearNotFound = 4200,
    SchoolYearAlreadyExists = 4201,
    SchoolYearInUse = 4202,
    ProfessorNotFound = 4300,
    ProfessorAlreadyExists = 4301,

    // Students and subjects
    StudentNotFound = 5000,
    StudentAlreadyExists = 5001,
    StudentIdInvalid = 5002,
    SubjectNotFound = 5100,
    SubjectAlreadyExists = 5101,
    SubjectInUse = 5102,

    // Grades
    GradeNotFound = 6000,
    GradeAlreadyExists = 6001,
    GradeValueInvalid = 6002,
    CompletionNotEligible = 6003,

    // Files
    ImportFileMissingColumn = 7000,
    ImportFileParseFailed = 7001,
    ImportFileDataInvalid = 7002,
    FileUploadFailed = 7003,
    ExportFailed = 7004,

    // System
    BackupFailed = 8000,
    RestoreFailed = 8001,
    BackupNotFound = 8002,
}
