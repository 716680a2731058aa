use chrono::Utc;
use rand::seq::SliceRandom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::db::entities::{proposed_travel_package, travel_package};

// The random feed over-fetches and samples so small catalogs still vary
// between refreshes.
const RANDOM_POOL_SIZE: u64 = 20;
const RANDOM_SAMPLE_SIZE: usize = 5;
const TRENDING_LIMIT: u64 = 10;
const PROPOSED_LIMIT: u64 = 3;

// --- Package Service Functions ---

pub struct NewPackage {
    pub location_id: Option<Uuid>,
    pub title: String,
    pub price: f64,
    pub duration_days: i32,
    pub highlights: Vec<String>,
    pub description: String,
    pub image_url: Option<String>,
}

pub async fn create_package(
    db: &DatabaseConnection,
    provider_id: Uuid,
    package: NewPackage,
) -> Result<travel_package::Model, DbErr> {
    let now = Utc::now();
    let new_package = travel_package::ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_id: Set(provider_id),
        location_id: Set(package.location_id),
        title: Set(package.title),
        price: Set(package.price),
        duration_days: Set(package.duration_days),
        highlights: Set(package.highlights),
        description: Set(package.description),
        image_url: Set(package.image_url),
        interested_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };
    new_package.insert(db).await
}

pub async fn get_package_by_id(
    db: &DatabaseConnection,
    package_id: Uuid,
) -> Result<Option<travel_package::Model>, DbErr> {
    travel_package::Entity::find_by_id(package_id).one(db).await
}

/// Updates a provider's own package. A missing row or a provider mismatch
/// surfaces as `DbErr::RecordNotUpdated`.
pub async fn update_package(
    db: &DatabaseConnection,
    package_id: Uuid,
    provider_id: Uuid,
    package: NewPackage,
) -> Result<travel_package::Model, DbErr> {
    let existing = travel_package::Entity::find_by_id(package_id)
        .filter(travel_package::Column::ProviderId.eq(provider_id))
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotUpdated)?;

    let mut active_package = existing.into_active_model();
    active_package.location_id = Set(package.location_id);
    active_package.title = Set(package.title);
    active_package.price = Set(package.price);
    active_package.duration_days = Set(package.duration_days);
    active_package.highlights = Set(package.highlights);
    active_package.description = Set(package.description);
    active_package.image_url = Set(package.image_url);
    active_package.updated_at = Set(Utc::now());
    active_package.update(db).await
}

pub async fn delete_package(
    db: &DatabaseConnection,
    package_id: Uuid,
    provider_id: Uuid,
) -> Result<DeleteResult, DbErr> {
    travel_package::Entity::delete_many()
        .filter(travel_package::Column::Id.eq(package_id))
        .filter(travel_package::Column::ProviderId.eq(provider_id))
        .exec(db)
        .await
}

/// Fetches a pool of catalog packages and returns a shuffled sample.
pub async fn get_random_packages(
    db: &DatabaseConnection,
) -> Result<Vec<travel_package::Model>, DbErr> {
    let mut pool = travel_package::Entity::find()
        .limit(RANDOM_POOL_SIZE)
        .all(db)
        .await?;

    let mut rng = rand::rng();
    pool.shuffle(&mut rng);
    pool.truncate(RANDOM_SAMPLE_SIZE);
    Ok(pool)
}

/// The most-saved catalog packages, by `interested_count`.
pub async fn get_trending_packages(
    db: &DatabaseConnection,
) -> Result<Vec<travel_package::Model>, DbErr> {
    travel_package::Entity::find()
        .order_by_desc(travel_package::Column::InterestedCount)
        .limit(TRENDING_LIMIT)
        .all(db)
        .await
}

/// The most recent provider proposals.
pub async fn get_proposed_packages(
    db: &DatabaseConnection,
) -> Result<Vec<proposed_travel_package::Model>, DbErr> {
    proposed_travel_package::Entity::find()
        .order_by_desc(proposed_travel_package::Column::CreatedAt)
        .limit(PROPOSED_LIMIT)
        .all(db)
        .await
}
