use chrono::NaiveDate;

/// Whole years between `dob` and `today`; `None` for a birth date in the future.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> Option<u32> {
    today.years_since(dob)
}
