use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use uuid::Uuid;

use crate::db::entities::{location, user_interest};

// --- Interest Service Functions ---

/// An interest row together with its resolved location records.
#[derive(Debug, Serialize)]
pub struct InterestWithLocations {
    #[serde(flatten)]
    pub interest: user_interest::Model,
    pub locations: Vec<location::Model>,
}

pub struct NewInterest {
    pub user_id: Uuid,
    pub locations_id: Vec<Uuid>,
    pub locations_text: String,
    pub budget: i64,
    pub duration: i32,
    pub activities: String,
    pub notes: Option<String>,
}

pub async fn create_interest(
    db: &DatabaseConnection,
    interest: &NewInterest,
) -> Result<user_interest::Model, DbErr> {
    let new_interest = user_interest::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(interest.user_id),
        locations_id: Set(interest.locations_id.clone()),
        locations_text: Set(interest.locations_text.clone()),
        budget: Set(interest.budget),
        duration: Set(interest.duration),
        activities: Set(interest.activities.clone()),
        notes: Set(interest.notes.clone()),
        created_at: Set(Utc::now()),
    };
    new_interest.insert(db).await
}

pub async fn get_interest_by_id(
    db: &DatabaseConnection,
    interest_id: Uuid,
) -> Result<Option<user_interest::Model>, DbErr> {
    user_interest::Entity::find_by_id(interest_id).one(db).await
}

pub async fn get_interests_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<user_interest::Model>, DbErr> {
    user_interest::Entity::find()
        .filter(user_interest::Column::UserId.eq(user_id))
        .order_by_desc(user_interest::Column::CreatedAt)
        .all(db)
        .await
}

/// Lists a user's interests with their location records resolved. The
/// resolution is a single secondary lookup over the union of every
/// `locations_id`; interests without location references come back with an
/// empty `locations` list.
pub async fn get_interests_with_locations(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<InterestWithLocations>, DbErr> {
    let interests = get_interests_by_user_id(db, user_id).await?;

    let referenced_ids: Vec<Uuid> = interests
        .iter()
        .flat_map(|interest| interest.locations_id.iter().copied())
        .collect();
    let locations = super::location_service::get_locations_by_ids(db, &referenced_ids).await?;

    Ok(attach_locations(interests, &locations))
}

/// Pairs each interest with the location rows its `locations_id` references.
/// Ids that resolved to nothing are skipped.
pub fn attach_locations(
    interests: Vec<user_interest::Model>,
    locations: &[location::Model],
) -> Vec<InterestWithLocations> {
    interests
        .into_iter()
        .map(|interest| {
            let resolved = locations
                .iter()
                .filter(|location| interest.locations_id.contains(&location.id))
                .cloned()
                .collect();
            InterestWithLocations {
                interest,
                locations: resolved,
            }
        })
        .collect()
}

pub async fn delete_interest_by_id(
    db: &DatabaseConnection,
    interest_id: Uuid,
) -> Result<DeleteResult, DbErr> {
    user_interest::Entity::delete_by_id(interest_id).exec(db).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: Uuid, name: &str, country: &str) -> location::Model {
        location::Model {
            id,
            name: name.to_string(),
            country: country.to_string(),
            tags: vec![],
            description: String::new(),
        }
    }

    fn interest(locations_id: Vec<Uuid>) -> user_interest::Model {
        user_interest::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            locations_id,
            locations_text: String::new(),
            budget: 1000,
            duration: 5,
            activities: "hiking".to_string(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn attach_locations_resolves_referenced_rows() {
        let hanoi = Uuid::new_v4();
        let osaka = Uuid::new_v4();
        let locations = vec![
            location(hanoi, "Hanoi", "Vietnam"),
            location(osaka, "Osaka", "Japan"),
        ];

        let result = attach_locations(vec![interest(vec![hanoi])], &locations);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].locations.len(), 1);
        assert_eq!(result[0].locations[0].name, "Hanoi");
    }

    #[test]
    fn attach_locations_yields_empty_list_for_empty_ids() {
        let locations = vec![location(Uuid::new_v4(), "Hanoi", "Vietnam")];
        let result = attach_locations(vec![interest(vec![])], &locations);
        assert!(result[0].locations.is_empty());
    }

    #[test]
    fn attach_locations_skips_unknown_ids() {
        let known = Uuid::new_v4();
        let unknown = Uuid::new_v4();
        let locations = vec![location(known, "Hanoi", "Vietnam")];

        let result = attach_locations(vec![interest(vec![known, unknown])], &locations);
        assert_eq!(result[0].locations.len(), 1);
        assert_eq!(result[0].locations[0].id, known);
    }
}
