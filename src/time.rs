use sgp4::chrono::{Datelike, NaiveDateTime, Timelike};

use crate::{
    constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD},
    prelude::{Epoch, Unit},
};

/// Converts the (UTC) datetime used by the SGP4 layer to [Epoch].
pub(crate) fn epoch_from_naive_utc(dt: &NaiveDateTime) -> Epoch {
    Epoch::from_gregorian_utc(
        dt.year(),
        dt.month() as u8,
        dt.day() as u8,
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
        dt.nanosecond(),
    )
}

/// Minutes elapsed since `epoch`, as expected by SGP4.
pub(crate) fn minutes_since(epoch: Epoch, t: Epoch) -> f64 {
    (t - epoch).to_unit(Unit::Minute)
}

/// Julian centuries since J2000, on the UTC julian date of `t`.
/// UT1 is approximated by UTC (|UT1-UTC| < 0.9s).
pub(crate) fn julian_centuries_ut1(t: Epoch) -> f64 {
    (t.to_jde_utc_days() - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}
