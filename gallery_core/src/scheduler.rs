//! Deterministic timer scheduler
//!
//! Timers are plain data: the host advances the clock once per frame and the
//! owner pops due tasks one at a time. Popping one task at a time means a task
//! cancelled by an earlier handler in the same frame never fires.

use std::cmp::Ordering;

/// Smallest allowed repeat interval, keeps catch-up loops finite
const MIN_REPEAT_INTERVAL: f32 = 1e-3;

/// Handle to a scheduled task. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Work the round controller schedules for later
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
    Spawn,
    RoundEnd,
    /// Snapshot taken when the round ended
    ReplayPrompt { final_score: i32, high_score: i32 },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    handle: TaskHandle,
    task: Task,
    due: f32,
    interval: Option<f32>, // Some = repeating
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: f32,     // Clock; set to each task's due time while draining
    horizon: f32, // Clock target of the current advance
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler time in seconds
    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn schedule_once(&mut self, task: Task, delay: f32) -> TaskHandle {
        self.insert(task, delay.max(0.0), None)
    }

    /// First fire is one interval from now
    pub fn schedule_repeating(&mut self, task: Task, interval: f32) -> TaskHandle {
        let interval = interval.max(MIN_REPEAT_INTERVAL);
        self.insert(task, interval, Some(interval))
    }

    fn insert(&mut self, task: Task, delay: f32, interval: Option<f32>) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            task,
            due: self.now + delay,
            interval,
        });
        handle
    }

    /// Returns false if the handle already fired (one-shot) or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Cancel `old` (if any) and arm a repeating task in its place
    pub fn replace(&mut self, old: Option<TaskHandle>, task: Task, interval: f32) -> TaskHandle {
        if let Some(old) = old {
            self.cancel(old);
        }
        self.schedule_repeating(task, interval)
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Seconds until the handle next fires
    pub fn time_until(&self, handle: TaskHandle) -> Option<f32> {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.due - self.now)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Shift the clock back to zero, keeping every pending task's remaining time.
    /// Keeps f32 timing precise in long-running processes.
    pub fn rebase(&mut self) {
        let origin = self.now;
        for entry in &mut self.entries {
            entry.due -= origin;
        }
        self.horizon = (self.horizon - origin).max(0.0);
        self.now = 0.0;
    }

    /// Move the clock target forward. Drain with `pop_due`.
    pub fn advance(&mut self, dt: f32) {
        self.horizon = self.horizon.max(self.now) + dt.max(0.0);
    }

    /// Pop the earliest task due at or before the clock target
    pub fn pop_due(&mut self) -> Option<(TaskHandle, Task)> {
        let horizon = self.horizon;
        let next = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= horizon)
            .min_by(|(_, a), (_, b)| {
                a.due
                    .partial_cmp(&b.due)
                    .unwrap_or(Ordering::Equal)
                    .then(a.handle.cmp(&b.handle))
            })
            .map(|(i, _)| i);

        let Some(index) = next else {
            self.now = self.now.max(horizon);
            return None;
        };

        let entry = self.entries[index];
        self.now = self.now.max(entry.due);

        match entry.interval {
            Some(interval) => self.entries[index].due += interval,
            None => {
                self.entries.swap_remove(index);
            }
        }

        Some((entry.handle, entry.task))
    }
}
