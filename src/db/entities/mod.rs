//! SeaORM Entity Crate
//!
//! Defines the SeaORM entities that map to database tables.
//! Each entity is typically defined in its own module (e.g., `user.rs`, `location.rs`).

// Declare entity modules here
pub mod location;
pub mod proposed_travel_package;
pub mod travel_package;
pub mod user;
pub mod user_interest;
pub mod user_profile;

// Prelude module for easy importing of all entities and their related types
pub mod prelude {
    pub use super::user::Entity as User;
    pub use super::user::Model as UserModel;
    pub use super::user::ActiveModel as UserActiveModel;
    pub use super::user::Column as UserColumn;

    pub use super::user_profile::Entity as UserProfile;
    pub use super::user_profile::Model as UserProfileModel;
    pub use super::user_profile::ActiveModel as UserProfileActiveModel;
    pub use super::user_profile::Column as UserProfileColumn;

    pub use super::location::Entity as Location;
    pub use super::location::Model as LocationModel;
    pub use super::location::ActiveModel as LocationActiveModel;
    pub use super::location::Column as LocationColumn;

    pub use super::user_interest::Entity as UserInterest;
    pub use super::user_interest::Model as UserInterestModel;
    pub use super::user_interest::ActiveModel as UserInterestActiveModel;
    pub use super::user_interest::Column as UserInterestColumn;

    pub use super::travel_package::Entity as TravelPackage;
    pub use super::travel_package::Model as TravelPackageModel;
    pub use super::travel_package::ActiveModel as TravelPackageActiveModel;
    pub use super::travel_package::Column as TravelPackageColumn;

    pub use super::proposed_travel_package::Entity as ProposedTravelPackage;
    pub use super::proposed_travel_package::Model as ProposedTravelPackageModel;
    pub use super::proposed_travel_package::ActiveModel as ProposedTravelPackageActiveModel;
    pub use super::proposed_travel_package::Column as ProposedTravelPackageColumn;
}
