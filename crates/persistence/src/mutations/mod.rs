// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for the persistence layer.
//!
//! This module contains all state-changing operations. Most mutations
//! use Diesel DSL, with minimal use of `SQLite`-specific helpers (e.g.,
//! `last_insert_rowid()`).
//!
//! Every capacity-affecting mutation here is a single conditional
//! statement: the precondition is part of the statement itself and the
//! caller learns the outcome from the number of rows affected. Nothing
//! in this module reads current state and writes back a computed value.
//!
//! ## Module Organization
//!
//! - `audit` — Audit event persistence
//! - `events` — Event and variant creation, phase changes, stock reservation
//! - `orders` — Order creation and decision flips
//! - `participants` — Participant identity mirror upserts
//! - `teams` — Team creation, guarded membership appends, invitations
//! - `tickets` — Ticket inserts, slot-guarded inserts, check-in flips

pub mod audit;
pub mod events;
pub mod orders;
pub mod participants;
pub mod teams;
pub mod tickets;
