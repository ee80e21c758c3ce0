use chrono::{DateTime, Utc};

pub type ReminderId = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub completed: bool,
}

impl Reminder {
    pub fn is_due_by(&self, instant: DateTime<Utc>) -> bool {
        self.date <= instant
    }
}
