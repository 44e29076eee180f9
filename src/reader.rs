//! Cached reads from the external sheet into domain records.
//!
//! `SheetReader` owns the process-wide range cache. Raw range responses are
//! cached under `sheets_<range>` keys; mapping to domain records happens on
//! every call so both cached and fresh reads go through the same single
//! column-mapping implementation.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::{SheetError, SheetsClient};
use crate::cache::TimedCache;
use crate::config::Config;
use crate::models::{merchant_from_row, volunteers_from_rows, Merchant, Volunteer};

/// Reads merchants and volunteers from the sheet, with a read-through cache.
///
/// Clone is cheap and shares the cache: the HTTP handlers, the assignment
/// coordinator, and the background refresh task all hold clones of one
/// reader so a `clear()` from the write path is visible everywhere.
#[derive(Clone)]
pub struct SheetReader {
    client: SheetsClient,
    cache: Arc<Mutex<TimedCache<Vec<Vec<String>>>>>,
    config: Arc<Config>,
}

impl SheetReader {
    pub fn new(client: SheetsClient, config: Arc<Config>) -> Self {
        let cache = Arc::new(Mutex::new(TimedCache::new(config.cache_ttl())));
        Self {
            client,
            cache,
            config,
        }
    }

    /// Fetch the raw cells for a range, consulting the cache unless
    /// `use_cache` is false. Successful upstream reads repopulate the cache.
    async fn fetch_range(&self, range: &str, use_cache: bool) -> Result<Vec<Vec<String>>, SheetError> {
        let key = format!("sheets_{}", range);

        if use_cache {
            let mut cache = self.cache.lock().await;
            if let Some(rows) = cache.get(&key) {
                debug!(range = range, "Range served from cache");
                return Ok(rows.clone());
            }
        }

        let rows = self.client.fetch_range(range).await?;
        debug!(range = range, rows = rows.len(), "Range fetched from upstream");

        let mut cache = self.cache.lock().await;
        cache.set(key, rows.clone());
        Ok(rows)
    }

    /// Fetch the merchant collection.
    ///
    /// Row 0 is the header and is discarded; remaining rows map positionally
    /// through the configured column table, and rows with a blank business
    /// name are dropped. Zero data rows from the source (a header-only
    /// response included) is `EmptyDataset`; zero rows left after filtering
    /// is a valid empty result.
    pub async fn fetch_merchants(&self, use_cache: bool) -> Result<Vec<Merchant>, SheetError> {
        let rows = self
            .fetch_range(&self.config.merchants_range, use_cache)
            .await?;

        if rows.len() <= 1 {
            return Err(SheetError::EmptyDataset {
                range: self.config.merchants_range.clone(),
            });
        }

        let merchants: Vec<Merchant> = rows
            .iter()
            .skip(1)
            .enumerate()
            .filter_map(|(i, row)| merchant_from_row(row, i, &self.config.columns))
            .collect();

        debug!(count = merchants.len(), "Mapped merchant rows");
        Ok(merchants)
    }

    /// Fetch the volunteer list, derived from the assignee column.
    ///
    /// Autocomplete is a convenience, not a required path: any failure is
    /// swallowed and degrades to an empty list so the UI still renders.
    pub async fn fetch_volunteers(&self) -> Vec<Volunteer> {
        match self
            .fetch_range(&self.config.volunteers_range, true)
            .await
        {
            Ok(rows) => volunteers_from_rows(&rows),
            Err(e) => {
                warn!(error = %e, "Volunteer fetch failed, returning empty list");
                Vec::new()
            }
        }
    }

    /// Drop every cached range. The assignment write path calls this after a
    /// successful write so the next read reflects post-write data.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.lock().await;
        cache.clear();
        debug!("Cache cleared");
    }

    /// Seed the cache directly, bypassing the upstream fetch.
    #[cfg(test)]
    pub async fn prime_range(&self, range: &str, rows: Vec<Vec<String>>) {
        let mut cache = self.cache.lock().await;
        cache.set(format!("sheets_{}", range), rows);
    }

    /// Number of cached ranges, for assertions.
    #[cfg(test)]
    pub async fn cached_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader() -> SheetReader {
        let config = Arc::new(Config::default());
        let client = SheetsClient::new(&config).unwrap();
        SheetReader::new(client, config)
    }

    fn raw_rows() -> Vec<Vec<String>> {
        let to_row = |cells: &[&str]| -> Vec<String> {
            cells.iter().map(|c| c.to_string()).collect()
        };
        vec![
            to_row(&[
                "Business Name", "Street", "Street Master", "Number", "Town", "State",
                "", "Index Category", "Phone", "Email", "Contact", "Cast Who Sold Ad",
            ]),
            to_row(&[
                "Tony's Pizza Palace", "Main St", "Main Street", "123", "Ridgewood", "NJ",
                "", "restaurant", "(201) 555-0123", "tony@tonypizza.com", "Tony", "",
            ]),
            to_row(&["   ", "Elm St"]), // blank name, dropped
            to_row(&[
                "Green Garden Market", "Maple Dr", "", "987", "Ridgewood", "NJ",
                "", "retail", "", "", "Tom", "Sarah Johnson",
            ]),
        ]
    }

    #[tokio::test]
    async fn test_cached_merchants_are_mapped_and_filtered() {
        let reader = reader();
        reader.prime_range("Sheet1!A:L", raw_rows()).await;

        let merchants = reader.fetch_merchants(true).await.unwrap();
        assert_eq!(merchants.len(), 2);
        assert!(merchants.iter().all(|m| !m.business_name.trim().is_empty()));
        assert_eq!(merchants[0].business_name, "Tony's Pizza Palace");
        assert_eq!(merchants[0].address, "123 Main Street Ridgewood, NJ");
        assert_eq!(merchants[1].assigned_to.as_deref(), Some("Sarah Johnson"));
    }

    #[tokio::test]
    async fn test_header_only_range_is_empty_dataset() {
        let reader = reader();
        reader
            .prime_range("Sheet1!A:L", vec![vec!["Business Name".to_string()]])
            .await;

        match reader.fetch_merchants(true).await {
            Err(SheetError::EmptyDataset { range }) => assert_eq!(range, "Sheet1!A:L"),
            other => panic!("expected EmptyDataset, got {:?}", other.map(|m| m.len())),
        }
    }

    #[tokio::test]
    async fn test_invalidate_forces_next_read_upstream() {
        let reader = reader();
        reader.prime_range("Sheet1!A:L", raw_rows()).await;
        assert_eq!(reader.cache.lock().await.len(), 1);

        reader.invalidate().await;
        // Nothing left to serve from cache; the next fetch must go upstream
        assert!(reader.cache.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_volunteers_from_cached_range() {
        let reader = reader();
        let rows = vec![
            vec!["Cast Who Sold Ad".to_string()],
            vec!["Sarah".to_string()],
            vec!["Mike".to_string()],
            vec!["Sarah".to_string()],
        ];
        reader.prime_range("Sheet1!L:L", rows).await;

        let volunteers = reader.fetch_volunteers().await;
        assert_eq!(volunteers.len(), 2);
        assert_eq!(volunteers[0].full_name, "Sarah");
    }
}
