/// Date and time formatting for tables and forms.
use chrono::{DateTime, NaiveDate, Utc};

/// "2024-03-15T14:02:26Z" -> "15.03.2024 14:02"
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M").to_string()
}

pub fn format_datetime_opt(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_datetime).unwrap_or_else(|| "-".to_string())
}

pub fn format_date(value: &NaiveDate) -> String {
    value.format("%d.%m.%Y").to_string()
}

/// Parse the value of an `<input type="date">`; blank means none.
pub fn parse_input_date(value: &str) -> Result<Option<NaiveDate>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("'{}' is not a valid date", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_datetime_and_date() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_datetime(&ts), "15.03.2024 14:02");
        assert_eq!(format_datetime_opt(None), "-");
        let d = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_date(&d), "31.12.2024");
    }

    #[test]
    fn parses_date_input() {
        assert_eq!(parse_input_date(""), Ok(None));
        assert_eq!(
            parse_input_date("2025-01-09"),
            Ok(NaiveDate::from_ymd_opt(2025, 1, 9))
        );
        assert!(parse_input_date("09.01.2025").is_err());
    }
}
