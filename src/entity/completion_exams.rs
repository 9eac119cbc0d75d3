use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "completion_exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub grade_id: i64,
    pub original_value: String,
    pub completion_value: String,
    pub exam_date: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub processed_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grades::Entity",
        from = "Column::GradeId",
        to = "super::grades::Column::Id",
        on_delete = "Cascade"
    )]
    Grade,
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grade.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_completion_exam(self) -> crate::models::completion_exams::entities::CompletionExam {
        crate::models::completion_exams::entities::CompletionExam {
            id: self.id,
            grade_id: self.grade_id,
            original_value: self.original_value,
            completion_value: self.completion_value,
            exam_date: super::to_datetime(self.exam_date),
            remarks: self.remarks,
            processed_by: self.processed_by,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
