pub mod appsettings;
pub mod clock;
pub mod reminder;
pub mod storage;

pub use reminder::{Reminder, ReminderId};
pub use storage::{
    InMemoryReminderStorage, NewReminder, ReminderStorage, ReminderStorageError, UpdateReminder,
};
