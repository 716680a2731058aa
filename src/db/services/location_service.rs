use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::db::entities::location;

// --- Location Service Functions ---

/// Lists all reference locations, name-ordered for display.
pub async fn get_all_locations(db: &DatabaseConnection) -> Result<Vec<location::Model>, DbErr> {
    location::Entity::find()
        .order_by_asc(location::Column::Name)
        .all(db)
        .await
}

/// Resolves a set of location ids. An empty id set short-circuits to an empty
/// result without touching the database; unknown ids simply resolve to
/// nothing.
pub async fn get_locations_by_ids(
    db: &DatabaseConnection,
    ids: &[Uuid],
) -> Result<Vec<location::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    location::Entity::find()
        .filter(location::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await
}

pub async fn create_location(
    db: &DatabaseConnection,
    name: &str,
    country: &str,
    tags: Vec<String>,
    description: &str,
) -> Result<location::Model, DbErr> {
    let new_location = location::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_owned()),
        country: Set(country.to_owned()),
        tags: Set(tags),
        description: Set(description.to_owned()),
    };
    new_location.insert(db).await
}
