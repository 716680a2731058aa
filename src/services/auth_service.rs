use axum::Extension;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::DatabaseConnection;

use crate::db::entities::user;
use crate::db::services::user_service;
use crate::web::error::AppError;
use crate::web::models::{
    AuthenticatedUser, Claims, LoginRequest, LoginResponse, RegisterRequest, UserResponse,
};

pub async fn register_user(
    db: &DatabaseConnection,
    req: RegisterRequest,
) -> Result<UserResponse, AppError> {
    if req.email.is_empty() || !req.email.contains('@') || req.password.len() < 8 {
        return Err(AppError::InvalidInput(
            "A valid email and a password of at least 8 characters are required.".to_string(),
        ));
    }

    let existing_user = user_service::find_user_by_email(db, &req.email)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to check email availability: {e}")))?;

    if existing_user.is_some() {
        return Err(AppError::UserAlreadyExists(
            "An account with this email already exists.".to_string(),
        ));
    }

    let password_hash = hash(&req.password, DEFAULT_COST)
        .map_err(|e| AppError::PasswordHashingError(e.to_string()))?;

    let user_model = user_service::create_user(db, &req.email, password_hash)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create user: {e}")))?;

    // The profile row is what interests reference; provision it alongside the
    // account so first-time inserts do not have to.
    user_service::create_profile_if_missing(
        db,
        user_model.id,
        user_service::NewProfile {
            full_name: req.full_name,
            phone: req.phone,
            role: None,
        },
    )
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create user profile: {e}")))?;

    Ok(UserResponse {
        id: user_model.id,
        email: user_model.email,
    })
}

pub async fn login_user(
    db: &DatabaseConnection,
    req: LoginRequest,
    jwt_secret: &str,
) -> Result<LoginResponse, AppError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Email and password must not be empty.".to_string(),
        ));
    }

    let user_model_option = user_service::find_user_by_email(db, &req.email)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to look up user by email: {e}")))?;

    let user = match user_model_option {
        Some(u) => u,
        None => return Err(AppError::UserNotFound),
    };

    let password_hash = match user.password_hash.as_ref() {
        Some(hash) => hash,
        None => return Err(AppError::InvalidCredentials), // No password set for this user
    };

    let valid_password = verify(&req.password, password_hash)
        .map_err(|e| AppError::InternalServerError(format!("Password verification failed: {e}")))?;

    if !valid_password {
        return Err(AppError::InvalidCredentials);
    }

    create_jwt_for_user(&user, jwt_secret)
}

pub fn create_jwt_for_user(user: &user::Model, jwt_secret: &str) -> Result<LoginResponse, AppError> {
    let now = Utc::now();
    // Token valid for 24 hours
    let expiration = (now + Duration::hours(24)).timestamp() as usize;

    let claims = Claims {
        sub: user.email.clone(),
        user_id: user.id,
        exp: expiration,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::TokenCreationError(e.to_string()))?;

    Ok(LoginResponse {
        token,
        user_id: user.id,
        email: user.email.clone(),
    })
}

pub async fn me(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<axum::Json<UserResponse>, AppError> {
    Ok(axum::Json(UserResponse {
        id: user.id,
        email: user.email,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};
    use uuid::Uuid;

    fn test_user() -> user::Model {
        user::Model {
            id: Uuid::new_v4(),
            email: "traveler@example.com".to_string(),
            password_hash: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_decodes_back_to_the_same_identity() {
        let user = test_user();
        let response = create_jwt_for_user(&user, "test-secret").unwrap();
        assert_eq!(response.user_id, user.id);

        let decoded = decode::<Claims>(
            &response.token,
            &DecodingKey::from_secret("test-secret".as_ref()),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(decoded.claims.user_id, user.id);
        assert_eq!(decoded.claims.sub, user.email);
    }

    #[test]
    fn token_does_not_validate_with_a_different_secret() {
        let response = create_jwt_for_user(&test_user(), "test-secret").unwrap();
        let result = decode::<Claims>(
            &response.token,
            &DecodingKey::from_secret("other-secret".as_ref()),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
