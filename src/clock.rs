use chrono::{DateTime, Local, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Source of the current instant and of calendar-day boundaries.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Last millisecond of the calendar day that contains `now`.
    fn end_of_day(&self, now: DateTime<Utc>) -> DateTime<Utc>;

    fn end_of_today(&self) -> DateTime<Utc> {
        self.end_of_day(self.now())
    }
}

/// Zone in which calendar days are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayZone {
    #[default]
    Local,
    Named(Tz),
}

impl DayZone {
    pub fn end_of_day(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            DayZone::Local => end_of_day_in(&Local, now),
            DayZone::Named(tz) => end_of_day_in(tz, now),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    zone: DayZone,
}

impl SystemClock {
    pub fn new(zone: DayZone) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> DayZone {
        self.zone
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn end_of_day(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.zone.end_of_day(now)
    }
}

/// The day ends one millisecond before the next local day starts. When the
/// next midnight falls into a DST gap, the next day starts where the gap does.
fn end_of_day_in<Z: TimeZone>(zone: &Z, now: DateTime<Utc>) -> DateTime<Utc> {
    let local_now = now.with_timezone(zone);
    let today = local_now.date_naive();

    let Some(tomorrow) = today.succ_opt() else {
        log::warn!("No calendar day follows {today}, ending it at 23:59:59.999 UTC");
        let last_millisecond =
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("This is always in bounds.");
        return Utc.from_utc_datetime(&today.and_time(last_millisecond));
    };
    let next_midnight = tomorrow.and_time(NaiveTime::MIN);

    let start_of_tomorrow = match zone.from_local_datetime(&next_midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        None => {
            let offset = TimeDelta::seconds(local_now.offset().fix().local_minus_utc().into());
            Utc.from_utc_datetime(&(next_midnight - offset))
        }
    };

    start_of_tomorrow - TimeDelta::milliseconds(1)
}

#[cfg(test)]
pub(crate) struct FixedClock {
    pub now: DateTime<Utc>,
    pub zone: DayZone,
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn end_of_day(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.zone.end_of_day(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveDateTime, Timelike};
    use proptest_arbitrary_interop::arb;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap();
        DateTime::from_naive_utc_and_offset(naive, Utc)
    }

    #[test]
    pub fn end_of_day_in_utc_is_last_millisecond_of_same_date() {
        let now = utc(2025, 3, 11, 10, 0);

        let end = DayZone::Named(Tz::UTC).end_of_day(now);

        assert_eq!(end, utc(2025, 3, 12, 0, 0) - TimeDelta::milliseconds(1));
    }

    #[test]
    pub fn end_of_day_is_converted_from_named_zone() {
        // Berlin is UTC+1 in March before the DST switch.
        let now = utc(2025, 3, 11, 10, 0);

        let end = DayZone::Named(Tz::Europe__Berlin).end_of_day(now);

        assert_eq!(end, utc(2025, 3, 11, 23, 0) - TimeDelta::milliseconds(1));
    }

    #[test]
    pub fn calendar_date_is_taken_in_the_zone_not_in_utc() {
        // 23:30 UTC is already the 12th in Berlin.
        let now = utc(2025, 3, 11, 23, 30);

        let end = DayZone::Named(Tz::Europe__Berlin).end_of_day(now);

        assert_eq!(end, utc(2025, 3, 12, 23, 0) - TimeDelta::milliseconds(1));
    }

    #[test]
    pub fn fixed_clock_end_of_today_uses_its_own_now() {
        let clock = FixedClock {
            now: utc(2030, 1, 1, 5, 0),
            zone: DayZone::Named(Tz::UTC),
        };

        assert_eq!(
            clock.end_of_today(),
            utc(2030, 1, 2, 0, 0) - TimeDelta::milliseconds(1)
        );
    }

    #[test]
    pub fn midnight_skipped_by_dst_ends_the_day_where_the_gap_starts() {
        // Sao Paulo jumped from 2018-11-04 00:00 (-03) straight to 01:00 (-02).
        let now = utc(2018, 11, 3, 15, 0);

        let end = DayZone::Named(Tz::America__Sao_Paulo).end_of_day(now);

        assert_eq!(end, utc(2018, 11, 4, 3, 0) - TimeDelta::milliseconds(1));
    }

    #[test]
    pub fn repeated_hour_before_midnight_belongs_to_the_same_day() {
        // Sao Paulo went back from 2019-02-17 00:00 (-02) to 2019-02-16 23:00 (-03).
        let now = utc(2019, 2, 16, 12, 0);

        let end = DayZone::Named(Tz::America__Sao_Paulo).end_of_day(now);

        assert_eq!(end, utc(2019, 2, 17, 3, 0) - TimeDelta::milliseconds(1));
    }

    #[test]
    pub fn skipped_calendar_day_ends_the_previous_one_at_the_jump() {
        // Samoa skipped 2011-12-30 entirely, going from 29th 23:59:59 (-10) to 31st 00:00 (+14).
        let now = utc(2011, 12, 29, 12, 0);

        let end = DayZone::Named(Tz::Pacific__Apia).end_of_day(now);

        assert_eq!(end, utc(2011, 12, 30, 10, 0) - TimeDelta::milliseconds(1));
    }

    proptest::proptest! {
        #[test]
        fn end_of_day_is_never_before_now(now_utc in arb::<NaiveDateTime>()) {
            let now = DateTime::from_naive_utc_and_offset(now_utc.with_nanosecond(0).unwrap(), Utc);
            let end = DayZone::Named(Tz::UTC).end_of_day(now);

            assert!(end >= now, "End of day should not precede now. now = {:?}, end = {:?}", now, end);
            assert!(end - now < TimeDelta::days(1), "End of day should be less than a day away. now = {:?}, end = {:?}", now, end);
            assert_eq!(end.time(), NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
        }

        #[test]
        fn end_of_day_in_named_zone_falls_on_local_date(
            year in 1990i32..2100,
            ordinal in 1u32..=365,
            seconds in 0u32..86_400
        ) {
            let zone = Tz::America__New_York;
            let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
            let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap();
            let now = DateTime::from_naive_utc_and_offset(date.and_time(time), Utc);

            let end = DayZone::Named(zone).end_of_day(now);

            assert!(end >= now);
            assert!(end - now < TimeDelta::hours(25));
            assert_eq!(end.with_timezone(&zone).date_naive(), now.with_timezone(&zone).date_naive());
        }
    }
}
