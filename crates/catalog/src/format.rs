//! Display formatting for view counts and record age.
//!
//! Every function here is total: any count and any pair of timestamps yields a
//! string.

use chrono::{DateTime, Utc};

use crate::locale::{Locale, Plural};

/// `999` → `999`, `1500` → `1.5 тыс`, `2_500_000` → `2.5 млн` (Russian locale).
///
/// Rounding is half-up to one decimal and done in integers, so `1250` renders
/// as `1.3` rather than whatever the nearest binary float happens to give.
pub fn format_view_count(n: u64, locale: Locale) -> String {
    if n < 1_000 {
        n.to_string()
    } else if n < 1_000_000 {
        format!("{}{}", one_decimal(n, 1_000), locale.thousands_suffix())
    } else {
        format!("{}{}", one_decimal(n, 1_000_000), locale.millions_suffix())
    }
}

fn one_decimal(n: u64, unit: u64) -> String {
    let step = u128::from(unit / 10);
    let tenths = (u128::from(n) + step / 2) / step;
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// View count followed by the word for "views" in the right grammatical form.
pub fn format_views_label(n: u64, locale: Locale) -> String {
    let count = format_view_count(n, locale);
    // Abbreviated counts always take the genitive plural.
    let plural = if n < 1_000 {
        Plural::of(locale, n)
    } else {
        Plural::Many
    };
    let word = match locale {
        Locale::Ru => plural.pick("просмотр", "просмотра", "просмотров"),
        Locale::En => plural.pick("view", "views", "views"),
    };
    format!("{count} {word}")
}

/// Bucketed time since a record was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    Today,
    Yesterday,
    Days(u64),
    Weeks(u64),
    Months(u64),
}

impl Age {
    /// Timestamps in the future count as today.
    pub fn between(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let days = u64::try_from((now - created_at).num_days()).unwrap_or(0);
        Self::from_days(days)
    }

    pub fn from_days(days: u64) -> Self {
        match days {
            0 => Self::Today,
            1 => Self::Yesterday,
            2..=6 => Self::Days(days),
            7..=29 => Self::Weeks(days / 7),
            _ => Self::Months(days / 30),
        }
    }

    pub fn label(self, locale: Locale) -> String {
        match (self, locale) {
            (Self::Today, Locale::Ru) => "сегодня".to_string(),
            (Self::Today, Locale::En) => "today".to_string(),
            (Self::Yesterday, Locale::Ru) => "вчера".to_string(),
            (Self::Yesterday, Locale::En) => "yesterday".to_string(),
            (Self::Days(n), _) => ago(n, locale, ["день", "дня", "дней"], ["day", "days"]),
            (Self::Weeks(n), _) => ago(n, locale, ["неделю", "недели", "недель"], ["week", "weeks"]),
            (Self::Months(n), _) => {
                ago(n, locale, ["месяц", "месяца", "месяцев"], ["month", "months"])
            }
        }
    }
}

fn ago(n: u64, locale: Locale, ru: [&str; 3], en: [&str; 2]) -> String {
    let plural = Plural::of(locale, n);
    match locale {
        Locale::Ru => format!("{n} {} назад", plural.pick(ru[0], ru[1], ru[2])),
        Locale::En => format!("{n} {} ago", plural.pick(en[0], en[1], en[1])),
    }
}

/// "today", "yesterday", "3 days ago", "2 weeks ago", "5 months ago".
pub fn format_relative_age(created_at: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    Age::between(created_at, now).label(locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn small_counts_are_unchanged() {
        for n in [0, 1, 42, 999] {
            assert_eq!(format_view_count(n, Locale::Ru), n.to_string());
            assert_eq!(format_view_count(n, Locale::En), n.to_string());
        }
    }

    #[test]
    fn thousands_and_millions() {
        assert_eq!(format_view_count(1_000, Locale::Ru), "1.0 тыс");
        assert_eq!(format_view_count(1_500, Locale::Ru), "1.5 тыс");
        assert_eq!(format_view_count(1_250, Locale::Ru), "1.3 тыс");
        assert_eq!(format_view_count(1_249, Locale::Ru), "1.2 тыс");
        assert_eq!(format_view_count(123_456, Locale::Ru), "123.5 тыс");
        assert_eq!(format_view_count(2_500_000, Locale::Ru), "2.5 млн");
        assert_eq!(format_view_count(1_000_000, Locale::En), "1.0M");
        assert_eq!(format_view_count(1_500, Locale::En), "1.5K");
    }

    #[test]
    fn rounding_at_the_top_of_a_unit() {
        // round(999_999 / 1000, 1) = 1000.0; the unit does not roll over.
        assert_eq!(format_view_count(999_999, Locale::Ru), "1000.0 тыс");
        assert_eq!(format_view_count(u64::MAX, Locale::En), "18446744073709.6M");
    }

    #[test]
    fn views_label_agrees_with_count() {
        assert_eq!(format_views_label(1, Locale::Ru), "1 просмотр");
        assert_eq!(format_views_label(3, Locale::Ru), "3 просмотра");
        assert_eq!(format_views_label(11, Locale::Ru), "11 просмотров");
        assert_eq!(format_views_label(1_500, Locale::Ru), "1.5 тыс просмотров");
        assert_eq!(format_views_label(1, Locale::En), "1 view");
        assert_eq!(format_views_label(0, Locale::En), "0 views");
        assert_eq!(format_views_label(2_000_000, Locale::En), "2.0M views");
    }

    #[test]
    fn age_bucket_boundaries() {
        let cases = [
            (0, "today"),
            (1, "yesterday"),
            (2, "2 days ago"),
            (6, "6 days ago"),
            (7, "1 week ago"),
            (13, "1 week ago"),
            (14, "2 weeks ago"),
            (29, "4 weeks ago"),
            (30, "1 month ago"),
            (59, "1 month ago"),
            (60, "2 months ago"),
            (400, "13 months ago"),
        ];
        for (days, expected) in cases {
            assert_eq!(Age::from_days(days).label(Locale::En), expected, "{days} days");
        }
    }

    #[test]
    fn russian_age_labels() {
        let cases = [
            (0, "сегодня"),
            (1, "вчера"),
            (2, "2 дня назад"),
            (6, "6 дней назад"),
            (7, "1 неделю назад"),
            (21, "3 недели назад"),
            (30, "1 месяц назад"),
            (150, "5 месяцев назад"),
        ];
        for (days, expected) in cases {
            assert_eq!(Age::from_days(days).label(Locale::Ru), expected, "{days} days");
        }
    }

    #[test]
    fn elapsed_days_are_floored() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let almost_two_days = now - Duration::hours(47);
        assert_eq!(Age::between(almost_two_days, now), Age::Yesterday);
        assert_eq!(Age::between(now - Duration::days(7), now), Age::Weeks(1));
        assert_eq!(
            format_relative_age(now - Duration::minutes(5), now, Locale::En),
            "today"
        );
    }

    #[test]
    fn future_timestamps_count_as_today() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        assert_eq!(Age::between(now + Duration::days(3), now), Age::Today);
    }
}
