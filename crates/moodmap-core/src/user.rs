//! The stored account row and its creation input.

/// A stored account row.
///
/// Mirrors the `users` table one-to-one. Rows are written once at
/// registration and only read afterwards; nothing updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  pub id:            i64,
  pub username:      String,
  /// PHC-format password hash. The plaintext password never reaches a
  /// store.
  pub password_hash: String,
}

/// Input for [`UserStore::create_user`](crate::store::UserStore): a
/// [`User`] minus the id, which the store assigns.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:      String,
  pub password_hash: String,
}
