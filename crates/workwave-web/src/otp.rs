//! In-memory one-time password store for password resets.
//!
//! Codes live only in process memory: a restart invalidates every pending
//! reset. One code per email; issuing again replaces the previous code.

use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OtpError {
    #[error("No OTP found or expired")]
    Missing,
    #[error("OTP has expired")]
    Expired,
    #[error("Invalid OTP")]
    Mismatch,
}

#[derive(Debug, Clone)]
struct OtpEntry {
    code: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct OtpStore {
    entries: Mutex<HashMap<String, OtpEntry>>,
    ttl: Duration,
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Mutex::new(HashMap::new()), ttl }
    }

    /// Generate and store a fresh 6 digit code for `email`.
    pub async fn issue(&self, email: &str) -> String {
        self.issue_at(email, Instant::now()).await
    }

    /// A matching code stays until `consume` is called. An expired one is
    /// dropped, a wrong one stays so the user can retry.
    pub async fn check(&self, email: &str, code: &str) -> Result<(), OtpError> {
        self.check_at(email, code, Instant::now()).await
    }

    pub async fn consume(&self, email: &str) {
        self.entries.lock().await.remove(email);
    }

    async fn issue_at(&self, email: &str, now: Instant) -> String {
        let code = rand::thread_rng().gen_range(100_000..1_000_000).to_string();
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            email.to_string(),
            OtpEntry { code: code.clone(), expires_at: now + self.ttl },
        );
        code
    }

    async fn check_at(&self, email: &str, code: &str, now: Instant) -> Result<(), OtpError> {
        let mut entries = self.entries.lock().await;
        Self::check_entry(&mut entries, email, code, now)
    }

    fn check_entry(
        entries: &mut HashMap<String, OtpEntry>,
        email: &str,
        code: &str,
        now: Instant,
    ) -> Result<(), OtpError> {
        let entry = entries.get(email).ok_or(OtpError::Missing)?;
        if now >= entry.expires_at {
            entries.remove(email);
            return Err(OtpError::Expired);
        }
        if entry.code != code.trim() {
            return Err(OtpError::Mismatch);
        }
        Ok(())
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(15 * 60);

    #[tokio::test]
    async fn test_code_is_six_digits_and_kept_until_consumed() {
        let store = OtpStore::new(TTL);
        let code = store.issue("asha@example.com").await;
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(store.check("asha@example.com", &code).await, Ok(()));
        assert_eq!(store.check("asha@example.com", &code).await, Ok(()));
        store.consume("asha@example.com").await;
        assert_eq!(store.check("asha@example.com", &code).await, Err(OtpError::Missing));
    }

    #[tokio::test]
    async fn test_mismatch_keeps_code() {
        let store = OtpStore::new(TTL);
        let code = store.issue("asha@example.com").await;
        let wrong = if code == "100000" { "100001" } else { "100000" };

        assert_eq!(store.check("asha@example.com", wrong).await, Err(OtpError::Mismatch));
        assert_eq!(store.check("asha@example.com", &code).await, Ok(()));
    }

    #[tokio::test]
    async fn test_expired_code_is_removed() {
        let store = OtpStore::new(TTL);
        let issued = Instant::now();
        let code = store.issue_at("asha@example.com", issued).await;

        let later = issued + TTL + Duration::from_secs(1);
        assert_eq!(store.check_at("asha@example.com", &code, later).await, Err(OtpError::Expired));
        assert_eq!(store.check_at("asha@example.com", &code, later).await, Err(OtpError::Missing));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_reissue_replaces_previous_code() {
        let store = OtpStore::new(TTL);
        let first = store.issue("asha@example.com").await;
        let second = store.issue("asha@example.com").await;
        assert_eq!(store.len().await, 1);
        if first != second {
            assert_eq!(store.check("asha@example.com", &first).await, Err(OtpError::Mismatch));
        }
        assert_eq!(store.check("asha@example.com", &second).await, Ok(()));
    }

    #[tokio::test]
    async fn test_issue_purges_expired_entries() {
        let store = OtpStore::new(TTL);
        let start = Instant::now();
        store.issue_at("old@example.com", start).await;
        store.issue_at("new@example.com", start + TTL * 2).await;
        assert_eq!(store.len().await, 1);
    }
}
