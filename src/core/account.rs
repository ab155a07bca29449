//! Account business logic - registration, credential verification, and
//! administration.
//!
//! Password handling is a black-box primitive: a salted SHA-256 digest,
//! hex-encoded. Credential verification never reveals whether the username
//! or the password was wrong.

use crate::{
    entities::{Account, Role, account},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use sha2::{Digest, Sha256};
use tracing::info;

/// Hashes a password for storage, salted with the username.
#[must_use]
pub fn hash_password(username: &str, password: &str) -> String {
    format!(
        "{:x}",
        Sha256::digest(format!("{username}:{password}").as_bytes())
    )
}

/// Registers a new account with the given role.
pub async fn register_account(
    db: &DatabaseConnection,
    username: String,
    password: String,
    role: Role,
) -> Result<account::Model> {
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(Error::Validation {
            message: "Username cannot be empty".to_string(),
        });
    }

    if password.len() < 8 {
        return Err(Error::Validation {
            message: "Password must be at least 8 characters".to_string(),
        });
    }

    let model = account::ActiveModel {
        username: Set(username.clone()),
        password_hash: Set(hash_password(&username, &password)),
        role: Set(role),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(account) => Ok(account),
        Err(err)
            if matches!(
                err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) =>
        {
            Err(Error::DuplicateUsername { username })
        }
        Err(err) => Err(err.into()),
    }
}

/// Verifies a username/password pair, returning the account on success.
///
/// Both unknown-username and wrong-password cases return
/// [`Error::InvalidCredentials`].
pub async fn verify_credentials(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<account::Model> {
    let account = Account::find()
        .filter(account::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if account.password_hash != hash_password(username, password) {
        return Err(Error::InvalidCredentials);
    }

    Ok(account)
}

/// Finds an account by username.
pub async fn get_account_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<account::Model>> {
    Account::find()
        .filter(account::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all accounts, ordered by username.
pub async fn list_accounts(db: &DatabaseConnection) -> Result<Vec<account::Model>> {
    Account::find()
        .order_by_asc(account::Column::Username)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an account by username.
pub async fn delete_account(db: &DatabaseConnection, username: &str) -> Result<()> {
    let account = get_account_by_username(db, username)
        .await?
        .ok_or_else(|| Error::AccountNotFound {
            username: username.to_string(),
        })?;

    account.delete(db).await?;
    Ok(())
}

/// Creates the initial admin account if it does not exist yet.
///
/// Called at startup when `ADMIN_USERNAME`/`ADMIN_PASSWORD` are configured,
/// so a fresh deployment has a way to log in before any accounts exist.
pub async fn ensure_bootstrap_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<()> {
    if get_account_by_username(db, username).await?.is_some() {
        return Ok(());
    }

    register_account(db, username.to_string(), password.to_string(), Role::Admin).await?;
    info!(username, "created bootstrap admin account");
    Ok(())
}
