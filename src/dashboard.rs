//! Read-only aggregation over the mail log.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::{MailLogEntry, MailStatus};

/// Counters shown on a platform dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MailStats {
    /// Entries whose timestamp falls on the current day
    pub today: usize,
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub spam: usize,
}

fn matches_platform(entry: &MailLogEntry, platform: Option<&str>) -> bool {
    platform.map_or(true, |p| entry.platform == p)
}

/// Count entries, optionally restricted to one platform string (exact match).
/// `today` is a UTC calendar date.
pub fn mail_stats(entries: &[MailLogEntry], platform: Option<&str>, today: NaiveDate) -> MailStats {
    entries
        .iter()
        .filter(|e| matches_platform(e, platform))
        .fold(MailStats::default(), |mut stats, e| {
            stats.total += 1;
            if e.timestamp.date_naive() == today {
                stats.today += 1;
            }
            match e.status {
                MailStatus::Sent => stats.sent += 1,
                MailStatus::Failed => stats.failed += 1,
                MailStatus::Spam => stats.spam += 1,
            }
            stats
        })
}

/// Bucket entries per calendar day over the last `days` days ending `today`.
///
/// A window of one day yields at most the single bucket for today, which is
/// what the dashboard chart shows by default. Days without entries have no
/// bucket.
pub fn daily_counts(
    entries: &[MailLogEntry],
    platform: Option<&str>,
    today: NaiveDate,
    days: u32,
) -> BTreeMap<NaiveDate, usize> {
    let span = u64::from(days.max(1) - 1);
    let start = today.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);

    let mut counts = BTreeMap::new();
    for entry in entries.iter().filter(|e| matches_platform(e, platform)) {
        let date = entry.timestamp.date_naive();
        if date >= start && date <= today {
            *counts.entry(date).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn entry(status: MailStatus, platform: &str, y: i32, m: u32, d: u32) -> MailLogEntry {
        MailLogEntry {
            status,
            platform: platform.to_string(),
            timestamp: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            recipients: vec!["a@example.com".to_string()],
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<MailLogEntry> {
        vec![
            entry(MailStatus::Sent, "smtp.gmail.com", 2024, 5, 1),
            entry(MailStatus::Failed, "smtp.gmail.com", 2024, 5, 3),
            entry(MailStatus::Sent, "smtp.office365.com", 2024, 5, 3),
            entry(MailStatus::Spam, "smtp.gmail.com", 2024, 5, 3),
            entry(MailStatus::Sent, "smtp.gmail.com", 2024, 4, 20),
        ]
    }

    #[test]
    fn test_today_count_ignores_platform_without_filter() {
        let stats = mail_stats(&sample(), None, date(2024, 5, 3));
        assert_eq!(
            stats,
            MailStats {
                today: 3,
                total: 5,
                sent: 3,
                failed: 1,
                spam: 1
            }
        );
    }

    #[test]
    fn test_platform_filter_is_exact() {
        let stats = mail_stats(&sample(), Some("smtp.gmail.com"), date(2024, 5, 3));
        assert_eq!(stats.today, 2);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.sent, 2);

        let none = mail_stats(&sample(), Some("gmail"), date(2024, 5, 3));
        assert_eq!(none, MailStats::default());
    }

    #[test]
    fn test_daily_counts_single_day_window() {
        let counts = daily_counts(&sample(), None, date(2024, 5, 3), 1);
        assert_eq!(counts.into_iter().collect::<Vec<_>>(), vec![(date(2024, 5, 3), 3)]);
    }

    #[test]
    fn test_daily_counts_trend_window() {
        let counts = daily_counts(&sample(), Some("smtp.gmail.com"), date(2024, 5, 3), 7);
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            vec![(date(2024, 5, 1), 1), (date(2024, 5, 3), 2)]
        );
    }

    #[test]
    fn test_zero_day_window_behaves_like_one() {
        let counts = daily_counts(&sample(), None, date(2024, 5, 3), 0);
        assert_eq!(counts.len(), 1);
    }
}
