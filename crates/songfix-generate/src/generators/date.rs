use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rand::{Rng, RngCore};

const YEARS_BACK: i32 = 100;

/// Pick a date uniformly by elapsed time between January 1st a century ago
/// and `now`.
pub fn random_date(now: NaiveDateTime, rng: &mut dyn RngCore) -> NaiveDate {
    let Some(lower) = NaiveDate::from_ymd_opt(now.year() - YEARS_BACK, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    else {
        return now.date();
    };

    let span = (now - lower).num_milliseconds();
    if span <= 0 {
        return lower.date();
    }
    let offset = rng.random_range(0..=span);
    (lower + Duration::milliseconds(offset)).date()
}

/// `random_date` rendered as `YYYY-MM-DD`.
pub fn random_date_text(now: NaiveDateTime, rng: &mut dyn RngCore) -> String {
    random_date(now, rng).format("%Y-%m-%d").to_string()
}
