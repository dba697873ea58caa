//! Content-based dedup scan over a vendor's record store
//!
//! Avoids creating duplicate remote certificate records when the same
//! artifact is uploaded repeatedly (retries, repeated workflow runs). Best
//! effort only: concurrent callers can still race to two equivalent records,
//! callers needing strict uniqueness must serialize externally.

use crate::adapter::CertificateStore;
use crate::artifact::{CertificateArtifact, RemoteRecord};
use crate::cancel::CancelToken;
use crate::error::Result;

pub const DEFAULT_PAGE_SIZE: i32 = 100;

/// Paginated first-match scan for an equivalent remote record
#[derive(Debug, Clone)]
pub struct DedupResolver {
    page_size: i32,
}

impl Default for DedupResolver {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DedupResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: i32) -> Self {
        Self { page_size }
    }

    /// Scan page by page for a record whose PEM content equals `artifact`.
    ///
    /// First match wins. A page shorter than the page size is the last page.
    /// `Ok(None)` means no equivalent record exists; the caller decides
    /// whether to create. A failed page fetch propagates immediately, and the
    /// cancellation signal is checked before every page request.
    pub async fn find_existing(
        &self,
        cancel: &CancelToken,
        store: &dyn CertificateStore,
        artifact: &CertificateArtifact,
    ) -> Result<Option<RemoteRecord>> {
        let mut page = 1;
        loop {
            cancel.check()?;

            let records = store.list_page(page, self.page_size).await?;
            let count = records.len();

            for record in records {
                if artifact.matches(&record) {
                    return Ok(Some(record));
                }
            }

            if count < self.page_size as usize {
                return Ok(None);
            }
            page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::CreateReceipt;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory store that counts page fetches.
    struct FakeStore {
        records: Vec<RemoteRecord>,
        list_calls: AtomicUsize,
        fail_on_page: Option<i32>,
    }

    impl FakeStore {
        fn with_records(records: Vec<RemoteRecord>) -> Self {
            Self {
                records,
                list_calls: AtomicUsize::new(0),
                fail_on_page: None,
            }
        }
    }

    #[async_trait]
    impl CertificateStore for FakeStore {
        async fn list_page(&self, page: i32, page_size: i32) -> Result<Vec<RemoteRecord>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on_page == Some(page) {
                return Err(ProviderError::transport("fake.List", "boom"));
            }
            let start = ((page - 1) * page_size) as usize;
            let end = (start + page_size as usize).min(self.records.len());
            if start >= self.records.len() {
                return Ok(Vec::new());
            }
            Ok(self.records[start..end].to_vec())
        }

        async fn create(&self, _: &CertificateArtifact, _: &str) -> Result<CreateReceipt> {
            unreachable!("dedup scan must not create records");
        }
    }

    fn record(id: usize, cert: &str, key: &str) -> RemoteRecord {
        RemoteRecord {
            id: id.to_string(),
            name: format!("cert-{id}"),
            certificate_pem: Some(cert.to_string()),
            private_key_pem: Some(key.to_string()),
        }
    }

    fn filler(count: usize) -> Vec<RemoteRecord> {
        (0..count)
            .map(|i| record(i, &format!("CERT-{i}"), &format!("KEY-{i}")))
            .collect()
    }

    #[tokio::test]
    async fn test_not_found_is_ok_none() {
        let store = FakeStore::with_records(filler(3));
        let resolver = DedupResolver::with_page_size(100);
        let found = resolver
            .find_existing(
                &CancelToken::new(),
                &store,
                &CertificateArtifact::new("CERT-X", "KEY-X"),
            )
            .await
            .unwrap();
        assert!(found.is_none());
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pagination_issues_exactly_ceil_n_over_p_pages() {
        // 250 records, page size 100 -> 3 pages when nothing matches
        let store = FakeStore::with_records(filler(250));
        let resolver = DedupResolver::with_page_size(100);
        let found = resolver
            .find_existing(
                &CancelToken::new(),
                &store,
                &CertificateArtifact::new("CERT-X", "KEY-X"),
            )
            .await
            .unwrap();
        assert!(found.is_none());
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_full_last_page_needs_one_extra_fetch() {
        // Exactly 200 records with page size 100: the second page is full, so
        // a third (empty) page is fetched to terminate.
        let store = FakeStore::with_records(filler(200));
        let resolver = DedupResolver::with_page_size(100);
        resolver
            .find_existing(
                &CancelToken::new(),
                &store,
                &CertificateArtifact::new("CERT-X", "KEY-X"),
            )
            .await
            .unwrap();
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_first_match_stops_pagination_early() {
        let mut records = filler(250);
        records[120] = record(120, "CERT-A", "KEY-A");
        let store = FakeStore::with_records(records);
        let resolver = DedupResolver::with_page_size(100);
        let found = resolver
            .find_existing(
                &CancelToken::new(),
                &store,
                &CertificateArtifact::new("CERT-A", "KEY-A"),
            )
            .await
            .unwrap()
            .expect("match on page 2");
        assert_eq!(found.id, "120");
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_whitespace_variants_are_equal() {
        let store = FakeStore::with_records(vec![record(0, "  CERT-A\n", "\tKEY-A  ")]);
        let resolver = DedupResolver::new();
        let found = resolver
            .find_existing(
                &CancelToken::new(),
                &store,
                &CertificateArtifact::new("CERT-A", "KEY-A"),
            )
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_cancellation_checked_before_first_page() {
        let store = FakeStore::with_records(filler(10));
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = DedupResolver::new()
            .find_existing(&cancel, &store, &CertificateArtifact::new("C", "K"))
            .await;
        assert!(matches!(result, Err(ProviderError::Cancelled)));
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mid_scan_failure_propagates() {
        let mut store = FakeStore::with_records(filler(250));
        store.fail_on_page = Some(2);
        let result = DedupResolver::with_page_size(100)
            .find_existing(
                &CancelToken::new(),
                &store,
                &CertificateArtifact::new("CERT-X", "KEY-X"),
            )
            .await;
        assert!(matches!(result, Err(ProviderError::Transport { .. })));
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 2);
    }
}
