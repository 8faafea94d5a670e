use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use crate::dashboard::{self, MailStats};
use crate::error::Result;
use crate::models::{MailLogEntry, MailStatus};

use super::{decode_all, encode, Store};

const MAILS_KEY: &str = "mails";

/// Append-only log of send attempts
#[derive(Clone)]
pub struct MailLogRepository {
    store: Store,
}

impl MailLogRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Append one entry stamped with the current time
    pub async fn record(
        &self,
        status: MailStatus,
        platform: &str,
        recipients: Vec<String>,
    ) -> Result<MailLogEntry> {
        let entry = MailLogEntry {
            status,
            platform: platform.to_string(),
            timestamp: Utc::now(),
            recipients,
        };

        self.store.list_push(MAILS_KEY, &encode(&entry)?).await?;

        tracing::debug!(
            status = %entry.status,
            platform = %entry.platform,
            recipients = entry.recipients.len(),
            "Mail attempt logged"
        );
        Ok(entry)
    }

    pub async fn entries(&self) -> Result<Vec<MailLogEntry>> {
        decode_all(self.store.list_all(MAILS_KEY).await?)
    }

    /// Entries matching an exact platform string and/or status, oldest first
    pub async fn list(
        &self,
        platform: Option<&str>,
        status: Option<MailStatus>,
    ) -> Result<Vec<MailLogEntry>> {
        let mut entries = self.entries().await?;
        entries.retain(|e| {
            platform.map_or(true, |p| e.platform == p) && status.map_or(true, |s| e.status == s)
        });
        Ok(entries)
    }

    pub async fn stats(&self, platform: Option<&str>) -> Result<MailStats> {
        let entries = self.entries().await?;
        Ok(dashboard::mail_stats(&entries, platform, today()))
    }

    pub async fn daily_counts(
        &self,
        platform: Option<&str>,
        days: u32,
    ) -> Result<BTreeMap<NaiveDate, usize>> {
        let entries = self.entries().await?;
        Ok(dashboard::daily_counts(&entries, platform, today(), days))
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_record_and_filter() {
        let repo = MailLogRepository::new(Store::memory());
        repo.record(MailStatus::Sent, "smtp.gmail.com", vec!["a".to_string()])
            .await
            .unwrap();
        repo.record(MailStatus::Failed, "smtp.gmail.com", vec!["b".to_string()])
            .await
            .unwrap();
        repo.record(MailStatus::Sent, "smtp.office365.com", vec!["c".to_string()])
            .await
            .unwrap();

        let gmail_sent = repo
            .list(Some("smtp.gmail.com"), Some(MailStatus::Sent))
            .await
            .unwrap();
        assert_eq!(gmail_sent.len(), 1);
        assert_eq!(gmail_sent[0].recipients, vec!["a".to_string()]);

        assert_eq!(repo.list(None, None).await.unwrap().len(), 3);
        assert_eq!(repo.list(Some("gmail"), None).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_stats_today_counts_by_platform() {
        let repo = MailLogRepository::new(Store::memory());
        repo.record(MailStatus::Sent, "smtp.gmail.com", vec![]).await.unwrap();
        repo.record(MailStatus::Failed, "smtp.office365.com", vec![])
            .await
            .unwrap();

        let all = repo.stats(None).await.unwrap();
        assert_eq!(all.today, 2);
        assert_eq!(all.total, 2);

        let gmail = repo.stats(Some("smtp.gmail.com")).await.unwrap();
        assert_eq!(
            gmail,
            MailStats {
                today: 1,
                total: 1,
                sent: 1,
                failed: 0,
                spam: 0
            }
        );

        let daily = repo.daily_counts(None, 1).await.unwrap();
        assert_eq!(daily.get(&today()), Some(&2));
    }
}
