//! Date parameters of the suite and their random generation.

use chrono::{Local, NaiveDate};
use rand::Rng;

pub const ISO_FORMAT: &str = "%Y-%m-%d";
/// Day-month-short-year, a format the service doesn't accept.
pub const SHORT_FORMAT: &str = "%d-%m-%y";

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn format_short(date: NaiveDate) -> String {
    date.format(SHORT_FORMAT).to_string()
}

/// A date between 2015 and 2020. Days stop at 28 so that every month/day pair exists.
pub fn random_date_from_2015_to_2020<R: Rng>(rng: &mut R) -> NaiveDate {
    let year = rng.gen_range(2015..=2020);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);

    NaiveDate::from_ymd_opt(year, month, day).expect("every month has a 28th day")
}

pub fn random_count<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(1..=10)
}
