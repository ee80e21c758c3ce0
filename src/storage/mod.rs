mod model;
mod reminder_storage;

pub use model::{NewReminder, UpdateReminder};
pub use reminder_storage::{
    InMemoryReminderStorage, ReminderStorage, ReminderStorageError, ReminderStorageResult,
};
