pub use super::academic_programs::{
    ActiveModel as ProgramActiveModel, Entity as AcademicPrograms, Model as ProgramModel,
};
pub use super::completion_exams::{
    ActiveModel as CompletionExamActiveModel, Entity as CompletionExams,
    Model as CompletionExamModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::professors::{
    ActiveModel as ProfessorActiveModel, Entity as Professors, Model as ProfessorModel,
};
pub use super::school_years::{
    ActiveModel as SchoolYearActiveModel, Entity as SchoolYears, Model as SchoolYearModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
pub use super::year_levels::{
    ActiveModel as YearLevelActiveModel, Entity as YearLevels, Model as YearLevelModel,
};
