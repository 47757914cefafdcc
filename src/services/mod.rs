// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API client and cleanup workflow.

pub mod cleanup;
pub mod collector;
pub mod looker;
pub mod processor;
pub mod retry;

pub use cleanup::{run_cleanup, run_cleanup_with};
pub use collector::{collect_plan_owners, PlanOwners};
pub use looker::LookerClient;
pub use processor::UserProcessor;
pub use retry::{with_retry, RetryPolicy};
