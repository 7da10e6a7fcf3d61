//! # Task System Core Traits
//!
//! This module defines the fundamental building blocks of the task system.
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called on the owning thread with the world
//! 5. The result can spawn follow-up tasks

use crate::voxels::world::World;

/// A unit of work executed on a worker thread.
///
/// Tasks should own all the data they need; the only shared state is
/// read-only (such as the terrain generator behind an `Arc`).
pub trait Task: Send {
    /// Performs the work and returns a result to be applied by the owning thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The result of processing a [`Task`].
pub trait TaskResult: Send {
    /// Applies the result to the world.
    ///
    /// # Returns
    /// Follow-up tasks to schedule (can be empty).
    fn handle_result(self: Box<Self>, world: &mut World) -> Vec<Box<dyn Task + Send>>;
}
