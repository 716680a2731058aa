use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Immutable reference data created by administrators.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub tags: Vec<String>,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::travel_package::Entity")]
    TravelPackages,
}

impl Related<super::travel_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelPackages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
