//! Credential store: user documents plus the unique email index.

use redb::{Database, ReadableTable};

use crate::db::tables;
use crate::error::{AppError, Result};
use crate::models::User;

/// Persist a new user
///
/// The email index is checked and written in the same write transaction,
/// so two registrations racing on one address cannot both succeed.
/// Returns `EmailTaken` if the address is already registered.
pub fn insert_user(db: &Database, user: &User) -> Result<()> {
    let doc = serde_json::to_vec(user)?;

    let write_txn = db.begin_write()?;
    {
        let mut emails = write_txn.open_table(tables::USER_EMAILS)?;
        if emails.get(user.email.as_str())?.is_some() {
            tracing::info!("Registration rejected: email already in use");
            return Err(AppError::EmailTaken);
        }
        emails.insert(user.email.as_str(), user.id.as_str())?;

        let mut users = write_txn.open_table(tables::USERS)?;
        users.insert(user.id.as_str(), doc.as_slice())?;
    }
    write_txn.commit()?;

    Ok(())
}

/// Look up a user by (already normalized) email
pub fn find_user_by_email(db: &Database, email: &str) -> Result<Option<User>> {
    let read_txn = db.begin_read()?;
    let emails = read_txn.open_table(tables::USER_EMAILS)?;

    let Some(id) = emails.get(email)? else {
        return Ok(None);
    };

    let users = read_txn.open_table(tables::USERS)?;
    let user = users
        .get(id.value())?
        .map(|doc| serde_json::from_slice(doc.value()))
        .transpose()?;

    Ok(user)
}
