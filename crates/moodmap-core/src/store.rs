//! The `UserStore` trait and its creation outcome.

use std::future::Future;

use thiserror::Error;

use crate::user::{NewUser, User};

// ─── Create outcome ──────────────────────────────────────────────────────────

/// Failure of [`UserStore::create_user`].
///
/// Collisions on the unique username are split out from backend failures,
/// so the loser of a registration race can be answered exactly like a
/// pre-checked duplicate.
#[derive(Debug, Error)]
pub enum CreateUserError<E>
where
  E: std::error::Error + Send + Sync + 'static,
{
  /// The username is already registered.
  #[error("username already exists")]
  UsernameTaken,

  /// Any other backend failure.
  #[error("store error: {0}")]
  Store(#[source] E),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Interface to the account store.
///
/// Implementors provide durable storage for [`User`] rows keyed by id and
/// by unique username. The web layer is generic over this trait and never
/// touches a concrete backend directly.
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persists a new account and returns it with its assigned id.
  ///
  /// A username collision comes back as
  /// [`CreateUserError::UsernameTaken`], whether or not the caller checked
  /// for the name first.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, CreateUserError<Self::Error>>>
    + Send
    + '_;

  /// Looks up an account by its unique username.
  fn find_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Looks up an account by primary key.
  fn find_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}
