use std::collections::{HashMap, hash_map::Entry};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::reminder::{Reminder, ReminderId};

use super::model::{NewReminder, UpdateReminder};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderStorageError {
    #[error("reminder with id `{0}` already exists")]
    DuplicateId(ReminderId),
    #[error("reminder with id `{0}` does not exist")]
    NotFound(ReminderId),
}

pub type ReminderStorageResult<T> = Result<T, ReminderStorageError>;

pub trait ReminderStorage {
    fn create(&mut self, reminder: NewReminder) -> ReminderStorageResult<&Reminder>;
    fn exists(&self, id: &str) -> bool;
    fn get(&self, id: &str) -> Option<&Reminder>;
    fn get_all(&self) -> Vec<&Reminder>;
    fn get_all_due_by_today(&self) -> Vec<&Reminder>;
    fn mark_completed(&mut self, id: &str) -> ReminderStorageResult<()>;
    fn unmark_completed(&mut self, id: &str) -> ReminderStorageResult<()>;
    fn update(&mut self, reminder: UpdateReminder) -> ReminderStorageResult<&Reminder>;
    fn remove(&mut self, id: &str) -> ReminderStorageResult<Reminder>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_all_completed(&self) -> Vec<&Reminder> {
        self.get_all()
            .into_iter()
            .filter(|reminder| reminder.completed)
            .collect()
    }

    fn get_all_incomplete(&self) -> Vec<&Reminder> {
        self.get_all()
            .into_iter()
            .filter(|reminder| !reminder.completed)
            .collect()
    }

    fn get_all_due_by(&self, instant: DateTime<Utc>) -> Vec<&Reminder> {
        self.get_all()
            .into_iter()
            .filter(|reminder| reminder.is_due_by(instant))
            .collect()
    }
}

pub struct InMemoryReminderStorage<C: Clock = SystemClock> {
    reminders: HashMap<ReminderId, Reminder>,
    clock: C,
}

impl InMemoryReminderStorage {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::default())
    }
}

impl Default for InMemoryReminderStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryReminderStorage<C> {
    pub fn with_clock(clock: C) -> Self {
        InMemoryReminderStorage {
            reminders: HashMap::new(),
            clock,
        }
    }

    fn get_mut_or_not_found(&mut self, id: &str) -> ReminderStorageResult<&mut Reminder> {
        self.reminders.get_mut(id).ok_or_else(|| {
            log::warn!("Reminder {id} does not exist");
            ReminderStorageError::NotFound(id.to_string())
        })
    }

    fn set_completed(&mut self, id: &str, completed: bool) -> ReminderStorageResult<()> {
        let reminder = self.get_mut_or_not_found(id)?;
        reminder.completed = completed;
        log::debug!("Reminder {id} completed = {completed}");
        Ok(())
    }
}

impl<C: Clock> ReminderStorage for InMemoryReminderStorage<C> {
    fn create(&mut self, reminder: NewReminder) -> ReminderStorageResult<&Reminder> {
        match self.reminders.entry(reminder.id.clone()) {
            Entry::Occupied(entry) => {
                log::warn!("Reminder {} already exists, rejecting", entry.key());
                Err(ReminderStorageError::DuplicateId(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                log::info!("Creating reminder {}", entry.key());
                Ok(&*entry.insert(reminder.into()))
            }
        }
    }

    fn exists(&self, id: &str) -> bool {
        self.reminders.contains_key(id)
    }

    fn get(&self, id: &str) -> Option<&Reminder> {
        self.reminders.get(id)
    }

    fn get_all(&self) -> Vec<&Reminder> {
        self.reminders.values().collect()
    }

    fn get_all_due_by_today(&self) -> Vec<&Reminder> {
        let end_of_today = self.clock.end_of_today();
        log::debug!("Collecting reminders due by {end_of_today}");
        self.get_all_due_by(end_of_today)
    }

    fn mark_completed(&mut self, id: &str) -> ReminderStorageResult<()> {
        self.set_completed(id, true)
    }

    fn unmark_completed(&mut self, id: &str) -> ReminderStorageResult<()> {
        self.set_completed(id, false)
    }

    fn update(&mut self, update_reminder: UpdateReminder) -> ReminderStorageResult<&Reminder> {
        let reminder = self.get_mut_or_not_found(&update_reminder.id)?;
        update_reminder.apply(reminder);
        log::debug!("Updated reminder {}", reminder.id);
        Ok(&*reminder)
    }

    fn remove(&mut self, id: &str) -> ReminderStorageResult<Reminder> {
        match self.reminders.remove(id) {
            Some(reminder) => {
                log::info!("Removed reminder {id}");
                Ok(reminder)
            }
            None => {
                log::warn!("Reminder {id} does not exist, nothing to remove");
                Err(ReminderStorageError::NotFound(id.to_string()))
            }
        }
    }

    fn len(&self) -> usize {
        self.reminders.len()
    }
}
