// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod page;
pub mod plan;
pub mod stats;
pub mod user;

pub use page::Page;
pub use plan::ScheduledPlan;
pub use stats::RunStats;
pub use user::User;
