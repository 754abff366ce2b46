// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! This module contains all read-only queries. All queries use Diesel
//! DSL against the `SQLite` backend; stored enum strings and timestamps
//! are decoded into domain types at the read boundary, surfacing
//! `CorruptRecord` when a stored value no longer decodes.
//!
//! ## Module Organization
//!
//! - `audit` — Audit trail queries
//! - `events` — Event and variant queries
//! - `orders` — Order queries and allocation aggregates
//! - `participants` — Participant identity queries
//! - `teams` — Team, membership, and invitation queries
//! - `tickets` — Ticket queries

pub mod audit;
pub mod events;
pub mod orders;
pub mod participants;
pub mod teams;
pub mod tickets;
