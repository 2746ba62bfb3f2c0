//! Exam session codes and scheduling rules.
//!
//! # Invariants
//! - Iteration order is always `w`, `s`, `m`.
//! - `m` (Feb/March) only administers variant `2`.
//! - Oct/Nov of the current year is pending until October starts.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Variant that is administered in the Feb/March session.
pub const FEB_MARCH_VARIANT: &str = "2";

/// First month (1-based) in which the Oct/Nov session can have papers.
const OCT_NOV_RELEASE_MONTH: u32 = 10;

/// One of the three fixed exam administration windows per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    /// Code `w`.
    #[serde(rename = "w")]
    OctNov,
    /// Code `s`.
    #[serde(rename = "s")]
    MayJune,
    /// Code `m`.
    #[serde(rename = "m")]
    FebMarch,
}

impl Session {
    /// All sessions in resolution order.
    pub const ALL: [Session; 3] = [Session::OctNov, Session::MayJune, Session::FebMarch];

    /// One-letter code used in file names and form values.
    pub fn code(self) -> &'static str {
        match self {
            Self::OctNov => "w",
            Self::MayJune => "s",
            Self::FebMarch => "m",
        }
    }

    /// Parses a session code. Unknown codes return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "w" => Some(Self::OctNov),
            "s" => Some(Self::MayJune),
            "m" => Some(Self::FebMarch),
            _ => None,
        }
    }

    /// Human-readable session name without a year.
    pub fn name(self) -> &'static str {
        match self {
            Self::OctNov => "Oct/Nov",
            Self::MayJune => "May/June",
            Self::FebMarch => "Feb/March",
        }
    }

    /// Session label shown to users, e.g. `Oct/Nov 2023`.
    pub fn label(self, year: i32) -> String {
        format!("{} {}", self.name(), year)
    }

    /// Code plus two-digit year suffix, e.g. `w23`.
    pub fn short_code(self, year: i32) -> String {
        format!("{}{}", self.code(), year_suffix(year))
    }

    /// Returns whether `variant` can exist in this session.
    pub fn allows_variant(self, variant: &str) -> bool {
        match self {
            Self::FebMarch => variant == FEB_MARCH_VARIANT,
            Self::OctNov | Self::MayJune => true,
        }
    }

    /// Returns whether this session has not been administered yet for `year`
    /// as seen on `today`.
    pub fn is_pending(self, year: i32, today: NaiveDate) -> bool {
        self == Self::OctNov && year == today.year() && today.month() < OCT_NOV_RELEASE_MONTH
    }
}

/// Last two digits of `year`, zero padded.
pub fn year_suffix(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

#[cfg(test)]
mod tests {
    use super::{year_suffix, Session};
    use chrono::NaiveDate;

    #[test]
    fn codes_roundtrip_and_unknown_codes_are_rejected() {
        for session in Session::ALL {
            assert_eq!(Session::from_code(session.code()), Some(session));
        }
        assert_eq!(Session::from_code("x"), None);
        assert_eq!(Session::from_code(""), None);
    }

    #[test]
    fn labels_and_short_codes_use_two_digit_suffix() {
        assert_eq!(Session::OctNov.label(2023), "Oct/Nov 2023");
        assert_eq!(Session::FebMarch.short_code(2005), "m05");
        assert_eq!(year_suffix(2100), "00");
    }

    #[test]
    fn feb_march_only_allows_variant_two() {
        assert!(Session::FebMarch.allows_variant("2"));
        assert!(!Session::FebMarch.allows_variant("1"));
        assert!(!Session::FebMarch.allows_variant("3"));
        assert!(Session::MayJune.allows_variant("3"));
    }

    #[test]
    fn oct_nov_is_pending_before_october_of_current_year_only() {
        let september = NaiveDate::from_ymd_opt(2023, 9, 30).unwrap();
        let october = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();

        assert!(Session::OctNov.is_pending(2023, september));
        assert!(!Session::OctNov.is_pending(2023, october));
        assert!(!Session::OctNov.is_pending(2022, september));
        assert!(!Session::MayJune.is_pending(2023, september));
    }
}
