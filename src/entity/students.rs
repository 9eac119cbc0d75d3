use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub school_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub email: Option<String>,
    pub program_id: i64,
    pub year_level_id: i64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::academic_programs::Entity",
        from = "Column::ProgramId",
        to = "super::academic_programs::Column::Id",
        on_delete = "Restrict"
    )]
    Program,
    #[sea_orm(
        belongs_to = "super::year_levels::Entity",
        from = "Column::YearLevelId",
        to = "super::year_levels::Column::Id",
        on_delete = "Restrict"
    )]
    YearLevel,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
}

impl Related<super::academic_programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Program.def()
    }
}

impl Related<super::year_levels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::YearLevel.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{Student, StudentStatus};

        Student {
            id: self.id,
            school_id: self.school_id,
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            suffix: self.suffix,
            email: self.email,
            program_id: self.program_id,
            year_level_id: self.year_level_id,
            status: self
                .status
                .parse::<StudentStatus>()
                .unwrap_or(StudentStatus::Enrolled),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
