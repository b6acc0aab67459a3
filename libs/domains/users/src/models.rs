use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Maximum length of `username` and `email`, matching the column sizes
pub const MAX_FIELD_LEN: u64 = 128;

/// User entity as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(max = MAX_FIELD_LEN))]
    #[schema(example = "midCenturyDude7", max_length = 128)]
    pub username: String,

    #[validate(length(max = MAX_FIELD_LEN))]
    #[schema(example = "mgriffes@gmail.com", max_length = 128)]
    pub email: String,
}

impl CreateUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Public representation of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "midCenturyDude7")]
    pub username: String,
    #[schema(example = "mgriffes@gmail.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Single-message body used by create and delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "mgriffes@gmail.com was added!")]
    pub message: String,
}

impl MessageResponse {
    pub fn added(email: &str) -> Self {
        Self {
            message: format!("{} was added!", email),
        }
    }

    pub fn removed(email: &str) -> Self {
        Self {
            message: format!("{} was removed!", email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_accepts_max_length() {
        let max = MAX_FIELD_LEN as usize;
        let input = CreateUser::new("u".repeat(max), "e".repeat(max));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_user_rejects_long_fields() {
        let over = MAX_FIELD_LEN as usize + 1;
        let input = CreateUser::new("u".repeat(over), "a@b.c");
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));

        let input = CreateUser::new("user", "e".repeat(over));
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_create_user_requires_both_keys() {
        assert!(serde_json::from_str::<CreateUser>(r#"{"username":"x"}"#).is_err());
        assert!(serde_json::from_str::<CreateUser>(r#"{"email":"x@y.z"}"#).is_err());
        assert!(serde_json::from_str::<CreateUser>(r#"{"username":1,"email":"x@y.z"}"#).is_err());
    }

    #[test]
    fn test_response_hides_created_at() {
        let user = User {
            id: 3,
            username: "midCenturyDude7".into(),
            email: "mgriffes@gmail.com".into(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "username": "midCenturyDude7", "email": "mgriffes@gmail.com"})
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(MessageResponse::added("a@b.c").message, "a@b.c was added!");
        assert_eq!(MessageResponse::removed("a@b.c").message, "a@b.c was removed!");
    }
}
