//! [`SqliteUserStore`], the SQLite implementation of [`UserStore`].

use std::path::Path;

use moodmap_core::{
  store::{CreateUserError, UserStore},
  user::{NewUser, User},
};
use rusqlite::OptionalExtension as _;

use crate::{Error, Result, schema::SCHEMA};

fn read_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:            row.get(0)?,
    username:      row.get(1)?,
    password_hash: row.get(2)?,
  })
}

fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An account store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteUserStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteUserStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for SqliteUserStore {
  type Error = Error;

  async fn create_user(
    &self,
    input: NewUser,
  ) -> Result<User, CreateUserError<Error>> {
    let NewUser {
      username,
      password_hash,
    } = input;
    let insert_username = username.clone();
    let insert_hash = password_hash.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
          rusqlite::params![insert_username, insert_hash],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await;

    match inserted {
      Ok(id) => Ok(User {
        id,
        username,
        password_hash,
      }),
      Err(err) if is_unique_violation(&err) => {
        Err(CreateUserError::UsernameTaken)
      }
      Err(err) => Err(CreateUserError::Store(err.into())),
    }
  }

  async fn find_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> Result<Option<User>> {
    let username = username.to_owned();

    let user = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, username, password_hash FROM users WHERE username = ?1",
              rusqlite::params![username],
              read_user,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(user)
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
    let user = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, username, password_hash FROM users WHERE id = ?1",
              rusqlite::params![id],
              read_user,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(user)
  }
}
