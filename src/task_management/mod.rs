//! # Task Management System
//!
//! A small worker pool for CPU-bound work such as chunk generation.
//!
//! ## Architecture Overview
//! - `TaskManager`: Central coordinator for task distribution and worker management
//! - `Task`: A unit of work executed on a worker thread
//! - `TaskResult`: The result of a completed task, applied to the world on the owning thread
//! - `TaskChannel`: Communication channel between the owning thread and one worker
//!
//! ## Task Lifecycle
//! 1. Tasks are published via `TaskManager::publish_task()`
//! 2. The manager distributes tasks to available worker channels using round-robin
//! 3. Workers process tasks and send back results
//! 4. Results are applied in `wait_for_all()`
//! 5. Results can spawn new tasks
//!
//! Results are only ever applied on the thread that owns the `TaskManager`, so
//! the world itself is never shared between threads.

pub mod task;

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{error, info};
use task::{Task, TaskResult};

use crate::voxels::world::World;

/// A communication channel between the owning thread and a worker thread.
#[derive(Debug)]
pub struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    connected: bool,
    _worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// Dropping the manager closes every task channel, which ends the workers
/// once their current task is done.
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a new `TaskManager` with the specified number of worker threads.
    ///
    /// At least one worker is always started.
    pub fn new(num_workers: usize) -> Self {
        let num_workers = num_workers.max(1);
        let mut channels = Vec::with_capacity(num_workers);

        for _ in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let worker = thread::spawn(move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            });

            channels.push(TaskChannel {
                task_sender: task_tx,
                result_receiver: result_rx,
                num_tasks_in_flight: 0,
                connected: true,
                _worker: worker,
            });
        }

        info!("Started {} task workers", num_workers);
        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// Creates a manager with one worker per available core.
    pub fn with_available_parallelism() -> Self {
        let workers = thread::available_parallelism()
            .map(|count| count.get())
            .unwrap_or(1);
        TaskManager::new(workers)
    }

    /// Number of worker threads.
    pub fn num_workers(&self) -> usize {
        self.channels.len()
    }

    /// Tasks published but not yet completed.
    pub fn pending_tasks(&self) -> usize {
        self.queued_tasks.len()
            + self
                .channels
                .iter()
                .map(|channel| channel.num_tasks_in_flight)
                .sum::<usize>()
    }

    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        match self.channels[channel_idx].task_sender.send(task) {
            Ok(_) => {
                self.channels[channel_idx].num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => {
                error!("Task worker {} disconnected", channel_idx);
                self.channels[channel_idx].connected = false;
                Err(task.0)
            }
        }
    }

    /// Finds the next channel, round-robin, that can accept a task.
    fn find_available_channel(&self) -> Option<usize> {
        let len = self.channels.len();
        (0..len)
            .map(|offset| (self.current_channel + offset) % len)
            .find(|&idx| {
                let channel = &self.channels[idx];
                channel.connected && channel.num_tasks_in_flight < MAX_TASKS_IN_FLIGHT
            })
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `true` if the task was immediately sent to a worker
    /// - `false` if it was queued because all workers are busy
    pub fn publish_task(&mut self, mut task: Box<dyn Task + Send>) -> bool {
        while let Some(channel_idx) = self.find_available_channel() {
            match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    return true;
                }
                // The channel is now marked disconnected, try the next one
                Err(returned) => task = returned,
            }
        }
        self.queued_tasks.push_back(task);
        false
    }

    /// Sends queued tasks to workers while any are available.
    pub fn process_queued_tasks(&mut self) {
        while let Some(channel_idx) = self.find_available_channel() {
            let Some(task) = self.queued_tasks.pop_front() else {
                break;
            };
            match self.try_send_task(task, channel_idx) {
                Ok(_) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                // Channel is disconnected, put the task back for the next one
                Err(task) => self.queued_tasks.push_front(task),
            }
        }
    }

    /// Blocks until every published task, and every task they spawn, is done.
    ///
    /// A worker that dies mid-task loses that task; the loss is logged and
    /// the remaining work still completes.
    pub fn wait_for_all(&mut self, world: &mut World) {
        loop {
            self.process_queued_tasks();
            if self.pending_tasks() == 0 {
                return;
            }
            if self.pending_tasks() == self.queued_tasks.len() && self.find_available_channel().is_none() {
                error!(
                    "All task workers are gone; dropping {} queued task(s)",
                    self.queued_tasks.len()
                );
                self.queued_tasks.clear();
                return;
            }

            let mut tasks_to_queue = Vec::new();
            for (idx, channel) in self.channels.iter_mut().enumerate() {
                if channel.num_tasks_in_flight == 0 {
                    continue;
                }
                match channel.result_receiver.recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight -= 1;
                        tasks_to_queue.extend(result.handle_result(world));
                    }
                    Err(_) => {
                        error!(
                            "Task worker {} disconnected with {} task(s) in flight",
                            idx, channel.num_tasks_in_flight
                        );
                        channel.num_tasks_in_flight = 0;
                        channel.connected = false;
                    }
                }
            }

            for task in tasks_to_queue {
                self.publish_task(task);
            }
        }
    }
}
