use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub title: String,
    #[sea_orm(column_type = "Double")]
    pub units: f64,
    pub program_id: i64,
    pub year_level_id: i64,
    pub semester: String,
    pub prerequisite: Option<String>,
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
    pub fn into_subject(self) -> crate::models::subjects::entities::Subject {
        use crate::models::subjects::entities::{Semester, Subject};

        Subject {
            id: self.id,
            code: self.code,
            title: self.title,
            units: self.units,
            program_id: self.program_id,
            year_level_id: self.year_level_id,
            semester: self.semester.parse::<Semester>().unwrap_or(Semester::First),
            prerequisite: self.prerequisite,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
