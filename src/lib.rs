// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Looker user cleanup: delete users who do not own any scheduled plan.
//!
//! The run first collects the owners of every scheduled plan, then walks
//! all users and deletes (or, in dry run, reports) everybody else.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
