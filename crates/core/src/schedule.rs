//! Deterministic timed tasks.
//!
//! Replaces fire-and-forget delayed callbacks: every delay is a task with an
//! id that can be cancelled, and time only moves when [`Scheduler::advance`]
//! is called from the fixed-step tick. Storage is a stack-only `ArrayVec`.

use arrayvec::ArrayVec;

/// Maximum number of pending tasks.
pub const SCHEDULER_CAPACITY: usize = 8;

/// Handle returned by [`Scheduler::schedule_after`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TaskId,
    remaining_ms: u32,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    pending: ArrayVec<Scheduled<T>, SCHEDULER_CAPACITY>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: ArrayVec::new(),
            next_id: 1,
        }
    }

    /// Run `task` once `delay_ms` has elapsed.
    ///
    /// Returns `None` when the scheduler is full.
    pub fn schedule_after(&mut self, delay_ms: u32, task: T) -> Option<TaskId> {
        let id = TaskId(self.next_id);
        self.pending
            .try_push(Scheduled {
                id,
                remaining_ms: delay_ms,
                task,
            })
            .ok()?;
        self.next_id += 1;
        Some(id)
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.iter().position(|s| s.id == id) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every pending task. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn remaining_ms(&self, id: TaskId) -> Option<u32> {
        self.pending
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.remaining_ms)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move time forward and return the tasks that came due.
    ///
    /// Due tasks are ordered by due time, then by scheduling order.
    pub fn advance(&mut self, elapsed_ms: u32) -> ArrayVec<T, SCHEDULER_CAPACITY> {
        let mut due: ArrayVec<Scheduled<T>, SCHEDULER_CAPACITY> = ArrayVec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].remaining_ms <= elapsed_ms {
                due.push(self.pending.remove(i));
            } else {
                self.pending[i].remaining_ms -= elapsed_ms;
                i += 1;
            }
        }

        due.sort_by_key(|s| (s.remaining_ms, s.id));
        due.into_iter().map(|s| s.task).collect()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
