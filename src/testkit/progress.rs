//! A [`Progress`] sink that keeps every event for later assertions.

use std::sync::Mutex;

use crate::port::{Event, Progress};

#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Event>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Names of packages whose install finished, in order.
    pub fn finished_packages(&self) -> Vec<&'static str> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::InstallFinished { package, .. } => Some(package.name),
                _ => None,
            })
            .collect()
    }
}

impl Progress for RecordingProgress {
    fn notify(&self, event: Event) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
