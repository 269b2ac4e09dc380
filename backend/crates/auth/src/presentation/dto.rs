//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::{CreateUserInput, SignInInput, UpdateUserInput};
use crate::domain::entity::user::User;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl From<LoginRequest> for SignInInput {
    fn from(req: LoginRequest) -> Self {
        SignInInput {
            user_name: req.username,
            password: req.password,
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// User as shown to clients; never carries the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub admin: bool,
    pub active: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            username: user.user_name.to_string(),
            email: user.email.to_string(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            admin: user.admin,
            active: user.active,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Create user request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl From<CreateUserRequest> for CreateUserInput {
    fn from(req: CreateUserRequest) -> Self {
        CreateUserInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
            name: req.name,
            surname: req.surname,
            admin: req.admin,
            active: req.active,
        }
    }
}

/// Update user request; absent fields stay as they are
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub admin: Option<bool>,
    pub active: Option<bool>,
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(req: UpdateUserRequest) -> Self {
        UpdateUserInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
            name: req.name,
            surname: req.surname,
            admin: req.admin,
            active: req.active,
        }
    }
}
