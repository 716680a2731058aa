use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_profile::Entity")]
    Profile,

    #[sea_orm(has_many = "super::travel_package::Entity")]
    TravelPackages,

    #[sea_orm(has_many = "super::proposed_travel_package::Entity")]
    ProposedTravelPackages,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::travel_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelPackages.def()
    }
}

impl Related<super::proposed_travel_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProposedTravelPackages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
