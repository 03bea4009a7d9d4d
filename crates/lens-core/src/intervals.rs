//! Release-year interval bucketing.

/// Width in years of one release interval.
pub const INTERVAL_WIDTH: i32 = 5;

/// Bucket a release year into the start of its 5-year interval.
///
/// Returns `None` for negative years: they are invalid input by policy and
/// are excluded (and counted) by interval-based views rather than being fed
/// through floor division, whose behavior on negatives reads as a data bug.
///
/// # Examples
///
/// ```
/// use lens_core::intervals::year_interval;
///
/// assert_eq!(year_interval(2012), Some(2010));
/// assert_eq!(year_interval(2015), Some(2015));
/// assert_eq!(year_interval(1999), Some(1995));
/// assert_eq!(year_interval(-44), None);
/// ```
pub fn year_interval(year: i32) -> Option<i32> {
    if year < 0 {
        return None;
    }
    Some((year / INTERVAL_WIDTH) * INTERVAL_WIDTH)
}

/// Human-readable label for an interval start, e.g. `"2010-2014"`.
pub fn interval_label(start: i32) -> String {
    format!("{}-{}", start, start + INTERVAL_WIDTH - 1)
}
