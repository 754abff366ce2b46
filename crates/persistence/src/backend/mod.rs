// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates backend-specific initialization, migration,
//! and helper functions that cannot be expressed in Diesel DSL.
//!
//! Backend-specific code is limited to:
//!
//! - Connection initialization
//! - Migration execution
//! - `SQLite` configuration (PRAGMA statements)
//! - Workarounds for missing Diesel DSL features (e.g.,
//!   `last_insert_rowid()` and the guarded multi-table inserts that
//!   implement conditional capacity mutations)
//!
//! All other queries and mutations live in `queries/` and `mutations/`
//! modules and use Diesel DSL.

pub mod sqlite;
