use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::db::entities::{user, user_profile};

pub const DEFAULT_ROLE: &str = "user";
const USER_SEARCH_LIMIT: u64 = 10;

// --- User Service Functions ---

pub async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    password_hash: String,
) -> Result<user::Model, DbErr> {
    let now = Utc::now();
    let new_user = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_owned()),
        password_hash: Set(Some(password_hash)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    new_user.insert(db).await
}

pub async fn find_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
}

/// Case-insensitive substring search over account emails, for the admin
/// user-administration screen.
pub async fn search_users_by_email(
    db: &DatabaseConnection,
    fragment: &str,
) -> Result<Vec<user::Model>, DbErr> {
    user::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(user::Column::Email)))
                .like(format!("%{}%", fragment.to_lowercase())),
        )
        .limit(USER_SEARCH_LIMIT)
        .all(db)
        .await
}

pub async fn get_profile_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<user_profile::Model>, DbErr> {
    user_profile::Entity::find_by_id(user_id).one(db).await
}

#[derive(Default)]
pub struct NewProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

/// Creates the profile row for an account if it does not exist yet. Returns
/// the existing row untouched when one is already present, so the call is
/// safe to repeat.
pub async fn create_profile_if_missing(
    db: &DatabaseConnection,
    user_id: Uuid,
    profile: NewProfile,
) -> Result<(user_profile::Model, bool), DbErr> {
    if let Some(existing) = get_profile_by_user_id(db, user_id).await? {
        return Ok((existing, false));
    }

    let new_profile = user_profile::ActiveModel {
        id: Set(user_id),
        full_name: Set(profile.full_name),
        avatar_url: Set(None),
        phone: Set(profile.phone),
        role: Set(profile.role.unwrap_or_else(|| DEFAULT_ROLE.to_string())),
        created_at: Set(Utc::now()),
    };
    let created = new_profile.insert(db).await?;
    Ok((created, true))
}
