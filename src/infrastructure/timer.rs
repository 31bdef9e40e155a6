// SPDX-License-Identifier: MPL-2.0
//! [`Clock`] adapter for the Iced runtime.
//!
//! Scheduling only records the request. After each update the app drains the
//! requests into sleeping tasks whose completion comes back as a message
//! carrying the [`TimerId`], which is then passed to [`IcedClock::fire`].

use crate::application::port::{Clock, TimerId};
use iced::Task;
use std::collections::HashSet;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct IcedClock {
    next_id: u64,
    scheduled: Vec<(TimerId, Duration)>,
    cancelled: HashSet<TimerId>,
}

impl IcedClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the requests scheduled since the last call.
    pub fn take_scheduled(&mut self) -> Vec<(TimerId, Duration)> {
        std::mem::take(&mut self.scheduled)
    }

    /// Turns the scheduled requests into tasks, mapping each firing with `f`.
    pub fn drain_tasks<M, F>(&mut self, f: F) -> Task<M>
    where
        M: Send + 'static,
        F: Fn(TimerId) -> M + Clone + Send + 'static,
    {
        let tasks: Vec<Task<M>> = self
            .take_scheduled()
            .into_iter()
            .map(|(id, delay)| {
                let f = f.clone();
                // Lazy so the sleep registers with the runtime that polls it.
                Task::perform(async move { tokio::time::sleep(delay).await }, move |()| f(id))
            })
            .collect();
        Task::batch(tasks)
    }

    /// Accepts a firing. Returns `false` if the timer was cancelled meanwhile.
    pub fn fire(&mut self, id: TimerId) -> bool {
        !self.cancelled.remove(&id)
    }
}

impl Clock for IcedClock {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId::new(self.next_id);
        self.scheduled.push((id, delay));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let before = self.scheduled.len();
        self.scheduled.retain(|(pending, _)| *pending != id);
        // Already handed to the runtime: swallow it when it fires.
        if self.scheduled.len() == before && id.value() <= self.next_id {
            self.cancelled.insert(id);
        }
    }
}
