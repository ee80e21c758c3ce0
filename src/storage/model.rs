use chrono::{DateTime, Utc};

use crate::reminder::{Reminder, ReminderId};

#[derive(Debug)]
pub struct NewReminder {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl NewReminder {
    pub fn new(
        id: impl Into<ReminderId>,
        title: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            date,
        }
    }
}

impl From<NewReminder> for Reminder {
    fn from(value: NewReminder) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            date: value.date,
            completed: false,
        }
    }
}

/// Partial update. `None` leaves the field as is, `Some` overwrites it,
/// empty strings included.
#[derive(Default)]
pub struct UpdateReminder {
    pub id: ReminderId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl UpdateReminder {
    pub fn new(id: impl Into<ReminderId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub(crate) fn apply(self, reminder: &mut Reminder) {
        let UpdateReminder {
            id: _,
            title,
            description,
            date,
        } = self;

        if let Some(title) = title {
            reminder.title = title;
        }
        if let Some(description) = description {
            reminder.description = description;
        }
        if let Some(date) = date {
            reminder.date = date;
        }
    }
}
