use chrono::{Local, NaiveDate, TimeZone, Utc};
use reminder_registry::{
    InMemoryReminderStorage, NewReminder, ReminderStorage, appsettings::AppSettings,
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::load()?;
    let clock = settings.clock()?;
    log::info!("Evaluating due dates in {:?}", clock.zone());

    let mut storage = InMemoryReminderStorage::with_clock(clock);

    let meeting_at = NaiveDate::from_ymd_opt(2025, 3, 11)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .and_then(|naive| Local.from_local_datetime(&naive).single())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| anyhow::anyhow!("Meeting time does not exist in the local zone"))?;

    storage.create(NewReminder::new(
        "1",
        "Meeting",
        "Team meeting at 10 AM",
        meeting_at,
    ))?;
    log::info!("All reminders: {:?}", storage.get_all());
    log::info!("Reminder 1: {:?}", storage.get("1"));

    storage.mark_completed("1")?;
    log::info!("Completed: {:?}", storage.get_all_completed());

    storage.unmark_completed("1")?;
    log::info!("Incomplete: {:?}", storage.get_all_incomplete());
    log::info!("Due by today: {:?}", storage.get_all_due_by_today());

    storage.remove("1")?;
    log::info!("All reminders: {:?}", storage.get_all());

    Ok(())
}
