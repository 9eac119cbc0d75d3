pub mod auth;

pub mod users;

pub mod programs;

pub mod year_levels;

pub mod school_years;

pub mod professors;

pub mod students;

pub mod subjects;

pub mod grades;

pub mod completion_exams;

pub mod dashboard;

pub mod system;

pub use auth::configure_auth_routes;
pub use completion_exams::configure_completion_exam_routes;
pub use dashboard::configure_dashboard_routes;
pub use grades::configure_grade_routes;
pub use professors::configure_professor_routes;
pub use programs::configure_program_routes;
pub use school_years::configure_school_year_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
pub use year_levels::configure_year_level_routes;

use crate::middlewares::RequireRole;
use crate::models::users::entities::UserRole;

// Per-route role gates for scopes that mix read and write access

pub(crate) fn any_role() -> RequireRole {
    RequireRole::new_any(UserRole::all_roles())
}

pub(crate) fn encoder_role() -> RequireRole {
    RequireRole::new_any(UserRole::encoder_roles())
}

pub(crate) fn admin_role() -> RequireRole {
    RequireRole::new_any(UserRole::admin_roles())
}
