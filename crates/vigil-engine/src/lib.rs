//! # vigil-engine
//!
//! The engine contract and the runner that schedules engines.
//!
//! - [`Engine`]: `name()` plus `analyze(ctx, root, workspace)`
//! - [`TaskEngine`]: an engine built from ordered [`EngineTask`]s whose
//!   failures become synthetic findings instead of aborting the engine
//! - [`Runner`]: runs every registered engine concurrently against one
//!   shared workspace and folds hard failures into one [`RunError`]
//! - [`RunContext`]: cooperative cancellation and deadline

mod collector;
mod context;
mod engine;
pub mod error;
mod runner;
mod task;

pub use collector::IssueCollector;
pub use context::RunContext;
pub use engine::Engine;
pub use error::{EngineError, EngineFailure, RunError};
pub use runner::Runner;
pub use task::{EngineTask, FnTask, TASK_FAILED_ID, TaskEngine};
