use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A saved travel preference. `locations_id` holds zero or more location
/// references; `locations_text` is the denormalized display string built from
/// resolved and free-text locations. Rows are never updated in place, edits
/// are modeled as delete + recreate.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_interests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub locations_id: Vec<Uuid>,
    pub locations_text: String,
    pub budget: i64,
    pub duration: i32,
    pub activities: String,
    pub notes: Option<String>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_profile::Entity",
        from = "Column::UserId",
        to = "super::user_profile::Column::Id"
    )]
    UserProfile,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
