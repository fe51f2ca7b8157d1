use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{Timestamp, TimestampValue};

/// `05-01-2025`
pub const MEMBER_DATE: &str = "%d-%m-%Y";
/// `05-Jan-2025`
pub const PAYMENT_DATE: &str = "%d-%b-%Y";

/// Formats a backend date string; anything unparseable is shown verbatim.
pub fn date_text(raw: &str, fmt: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format(fmt).to_string(),
        None => raw.to_string(),
    }
}

pub fn timestamp(ts: Option<&Timestamp>, fmt: &str) -> String {
    match ts.map(|t| &t.value) {
        Some(TimestampValue::Millis(ms)) => DateTime::from_timestamp_millis(*ms)
            .map(|dt| dt.date_naive().format(fmt).to_string())
            .unwrap_or_else(|| ms.to_string()),
        Some(TimestampValue::Text(s)) => date_text(s, fmt),
        None => String::new(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f UTC"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub fn rupees(amount: f64) -> String {
    format!("Rs {amount}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_dates() {
        assert_eq!(date_text("2025-01-05", MEMBER_DATE), "05-01-2025");
        assert_eq!(date_text("2025-01-05T10:30:00.000Z", MEMBER_DATE), "05-01-2025");
        assert_eq!(date_text("2025-01-05 10:30:00 UTC", MEMBER_DATE), "05-01-2025");
        assert_eq!(date_text("last tuesday", MEMBER_DATE), "last tuesday");
    }

    #[test]
    fn payment_timestamps() {
        let millis = Timestamp { value: TimestampValue::Millis(1_735_689_600_000) };
        assert_eq!(timestamp(Some(&millis), PAYMENT_DATE), "01-Jan-2025");

        let text = Timestamp { value: TimestampValue::Text("2025-02-28T00:00:00Z".into()) };
        assert_eq!(timestamp(Some(&text), PAYMENT_DATE), "28-Feb-2025");

        assert_eq!(timestamp(None, PAYMENT_DATE), "");
    }

    #[test]
    fn whole_amounts_have_no_decimals() {
        assert_eq!(rupees(1500.0), "Rs 1500");
        assert_eq!(rupees(99.5), "Rs 99.5");
    }
}
