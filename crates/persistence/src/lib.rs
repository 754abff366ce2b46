// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the event registration platform.
//!
//! This crate owns the `SQLite` schema and every statement that touches
//! it. It is built on Diesel with embedded migrations; callers never
//! see SQL, they see typed queries and mutations.
//!
//! ## Concurrency discipline
//!
//! Scarce-resource state (stock, registration slots, team seats,
//! pending statuses) is never mutated by reading a value and writing a
//! computed one back. Every capacity-affecting write in `mutations/` is
//! a single conditional statement whose precondition travels inside the
//! statement, and the caller learns whether it won from the number of
//! rows affected. Multi-statement operations (decide an order, join a
//! team) run inside `immediate_transaction` so a lost conditional
//! update rolls the whole operation back.
//!
//! Invariants that must hold under any interleaving are also declared
//! in the schema itself: one ticket and one team seat per
//! `(event, participant)` are UNIQUE constraints, stock is CHECKed
//! non-negative, and one pending invitation per `(team, participant)`
//! is a partial unique index.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases; no external
//! infrastructure is required.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
pub mod data_models;
mod diesel_schema;
mod error;
pub mod mutations;
pub mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter owning the `SQLite` connection.
///
/// Single-statement reads and writes go through the `queries` and
/// `mutations` modules with a connection borrowed from
/// [`Persistence::connection`]. Operations that must commit or roll
/// back together wrap the same borrowed connection in
/// `immediate_transaction`, which takes the `SQLite` write lock up
/// front so conditional updates inside the transaction see settled
/// state.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Uses a shared in-memory database via `Diesel`.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        // Use atomic counter instead of timestamp to eliminate race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        // Initialize database with Diesel migrations
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        // Verify foreign key enforcement is active
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        // Initialize database with Diesel migrations
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        // Verify foreign key enforcement is active
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure
    /// referential integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Borrows the underlying connection.
    ///
    /// Callers run `queries` and `mutations` functions against the
    /// borrow, or open an `immediate_transaction` on it when several
    /// statements must land together.
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}
