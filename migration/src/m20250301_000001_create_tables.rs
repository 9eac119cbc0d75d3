use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().null())
                    .col(ColumnDef::new(Users::LastName).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Academic programs
        manager
            .create_table(
                Table::create()
                    .table(AcademicPrograms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AcademicPrograms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AcademicPrograms::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AcademicPrograms::Name).string().not_null())
                    .col(ColumnDef::new(AcademicPrograms::Description).text().null())
                    .col(
                        ColumnDef::new(AcademicPrograms::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AcademicPrograms::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Year levels
        manager
            .create_table(
                Table::create()
                    .table(YearLevels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(YearLevels::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(YearLevels::Level)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(YearLevels::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // School years
        manager
            .create_table(
                Table::create()
                    .table(SchoolYears::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolYears::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SchoolYears::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SchoolYears::StartYear).integer().not_null())
                    .col(ColumnDef::new(SchoolYears::EndYear).integer().not_null())
                    .col(
                        ColumnDef::new(SchoolYears::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SchoolYears::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolYears::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Professors
        manager
            .create_table(
                Table::create()
                    .table(Professors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Professors::ProfessorCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Professors::FirstName).string().not_null())
                    .col(ColumnDef::new(Professors::MiddleName).string().null())
                    .col(ColumnDef::new(Professors::LastName).string().not_null())
                    .col(ColumnDef::new(Professors::Email).string().null())
                    .col(ColumnDef::new(Professors::Department).string().null())
                    .col(
                        ColumnDef::new(Professors::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Professors::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Students
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::SchoolId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::MiddleName).string().null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::Suffix).string().null())
                    .col(ColumnDef::new(Students::Email).string().null())
                    .col(ColumnDef::new(Students::ProgramId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Students::YearLevelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::ProgramId)
                            .to(AcademicPrograms::Table, AcademicPrograms::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::YearLevelId)
                            .to(YearLevels::Table, YearLevels::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Subjects
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Code).string().not_null())
                    .col(ColumnDef::new(Subjects::Title).string().not_null())
                    .col(ColumnDef::new(Subjects::Units).double().not_null())
                    .col(ColumnDef::new(Subjects::ProgramId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Subjects::YearLevelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subjects::Semester).string().not_null())
                    .col(ColumnDef::new(Subjects::Prerequisite).string().null())
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subjects::Table, Subjects::ProgramId)
                            .to(AcademicPrograms::Table, AcademicPrograms::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subjects::Table, Subjects::YearLevelId)
                            .to(YearLevels::Table, YearLevels::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Grades
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::ProfessorId).big_integer().null())
                    .col(
                        ColumnDef::new(Grades::SchoolYearId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Grades::Semester).string().not_null())
                    .col(ColumnDef::new(Grades::Value).string().not_null())
                    .col(ColumnDef::new(Grades::EncodedBy).big_integer().null())
                    .col(ColumnDef::new(Grades::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::SchoolYearId)
                            .to(SchoolYears::Table, SchoolYears::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::EncodedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Completion exams
        manager
            .create_table(
                Table::create()
                    .table(CompletionExams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CompletionExams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CompletionExams::GradeId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CompletionExams::OriginalValue)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompletionExams::CompletionValue)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompletionExams::ExamDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CompletionExams::Remarks).text().null())
                    .col(
                        ColumnDef::new(CompletionExams::ProcessedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CompletionExams::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CompletionExams::Table, CompletionExams::GradeId)
                            .to(Grades::Table, Grades::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CompletionExams::Table, CompletionExams::ProcessedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subjects_program_code")
                    .table(Subjects::Table)
                    .col(Subjects::ProgramId)
                    .col(Subjects::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_unique_enrollment")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .col(Grades::SubjectId)
                    .col(Grades::SchoolYearId)
                    .col(Grades::Semester)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_school_year_id")
                    .table(Grades::Table)
                    .col(Grades::SchoolYearId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_program_id")
                    .table(Students::Table)
                    .col(Students::ProgramId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_last_name")
                    .table(Students::Table)
                    .col(Students::LastName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse creation order
        manager
            .drop_table(Table::drop().table(CompletionExams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchoolYears::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(YearLevels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AcademicPrograms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    FirstName,
    LastName,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AcademicPrograms {
    #[sea_orm(iden = "academic_programs")]
    Table,
    Id,
    Code,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum YearLevels {
    #[sea_orm(iden = "year_levels")]
    Table,
    Id,
    Level,
    Name,
}

#[derive(DeriveIden)]
enum SchoolYears {
    #[sea_orm(iden = "school_years")]
    Table,
    Id,
    Name,
    StartYear,
    EndYear,
    IsCurrent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Professors {
    #[sea_orm(iden = "professors")]
    Table,
    Id,
    ProfessorCode,
    FirstName,
    MiddleName,
    LastName,
    Email,
    Department,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    SchoolId,
    FirstName,
    MiddleName,
    LastName,
    Suffix,
    Email,
    ProgramId,
    YearLevelId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Code,
    Title,
    Units,
    ProgramId,
    YearLevelId,
    Semester,
    Prerequisite,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    StudentId,
    SubjectId,
    ProfessorId,
    SchoolYearId,
    Semester,
    Value,
    EncodedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CompletionExams {
    #[sea_orm(iden = "completion_exams")]
    Table,
    Id,
    GradeId,
    OriginalValue,
    CompletionValue,
    ExamDate,
    Remarks,
    ProcessedBy,
    CreatedAt,
}
