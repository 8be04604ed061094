use crate::db::db_service::DbService;
use crate::{
    types::{error::AppError, user::NewUser},
    utils::{email::normalize_email, password, token},
};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

impl DbService {
    pub async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// Signup: hash the password and insert the user.
    ///
    /// The unique constraints on `username` and `email` have the final say: a
    /// row that slipped in after validation surfaces as
    /// [`AppError::UniqueConflict`].
    pub async fn create_user(&self, payload: NewUser) -> Result<UserModel, AppError> {
        if payload.username.is_empty() {
            return Err(AppError::InvalidArgument("users must have a username".into()));
        }
        if payload.email.trim().is_empty() {
            return Err(AppError::InvalidArgument("users must have an email address".into()));
        }

        let password_hash = password::hash(&payload.password)?;
        let now = Utc::now();

        let user = UserActive {
            id: Set(token::new_id()),
            username: Set(payload.username),
            email: Set(normalize_email(&payload.email)),
            password_hash: Set(password_hash),
            is_active: Set(true),
            is_staff: Set(false),
            is_superuser: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.database_connection)
        .await?;

        Ok(user)
    }
}
