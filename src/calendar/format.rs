//! Canonical `DD Mon YYYY` text form of a [`CalendarDate`].

use crate::calendar::date::{CalendarDate, MONTH_ABBREVIATIONS};

pub fn format(date: CalendarDate) -> String {
    format!(
        "{:02} {} {:04}",
        date.day(),
        MONTH_ABBREVIATIONS[date.month() as usize - 1],
        date.year()
    )
}

/// Parses the output of [`format`]. Anything else, including dates that do
/// not exist, is `None`.
pub fn parse(text: &str) -> Option<CalendarDate> {
    let mut parts = text.split_whitespace();
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let day = parse_day(day)?;
    let month = parse_month(month)?;
    let year = parse_year(year)?;
    CalendarDate::new(year, month, day)
}

fn parse_day(token: &str) -> Option<u8> {
    if token.is_empty() || token.len() > 2 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn parse_month(token: &str) -> Option<u8> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|abbr| abbr.eq_ignore_ascii_case(token))
        .map(|idx| idx as u8 + 1)
}

/// Exactly four digits; the year range never needs more.
fn parse_year(token: &str) -> Option<i32> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(y, m, d).expect("valid date")
    }

    #[test]
    fn formats_with_padded_day_and_year() {
        assert_eq!(format(date(2025, 6, 1)), "01 Jun 2025");
        assert_eq!(format(date(2024, 12, 25)), "25 Dec 2024");
        assert_eq!(format(date(987, 3, 9)), "09 Mar 0987");
    }

    #[test]
    fn parse_inverts_format_for_edge_dates() {
        let samples = [
            date(2024, 2, 29),
            date(2000, 1, 1),
            date(1900, 12, 31),
            date(1, 1, 1),
            date(0, 2, 29),
            date(9999, 12, 31),
        ];
        for d in samples {
            assert_eq!(parse(&format(d)), Some(d), "{}", format(d));
        }
    }

    #[test]
    fn parse_inverts_format_across_a_leap_cycle() {
        let start = date(2023, 1, 1);
        for offset in 0..(366 * 2) {
            let d = start.add_days(offset);
            assert_eq!(parse(&format(d)), Some(d));
        }
    }

    #[test]
    fn parse_is_lenient_about_case_whitespace_and_short_days() {
        assert_eq!(parse("  1 jun 2025 "), Some(date(2025, 6, 1)));
        assert_eq!(parse("15 DEC 2024"), Some(date(2024, 12, 15)));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in [
            "",
            "   ",
            "2025-06-01",
            "01 June 2025",
            "32 Jan 2025",
            "30 Feb 2024",
            "00 Jan 2025",
            "01 Jan 25",
            "01 Jan +2025",
            "001 Jan 2025",
            "01 Jan 2025 extra",
            "01 Jan",
            "-1 Jan 2025",
            "01 Jan -044",
            "01 Jan 10000",
            "01 Dec 2147483647",
        ] {
            assert_eq!(parse(bad), None, "{bad:?}");
        }
    }
}
