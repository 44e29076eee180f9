//! Merchant -> volunteer assignment against the external sheet.
//!
//! The write itself happens in an Apps Script endpoint we treat as an opaque
//! RPC. This coordinator adds the best-effort capacity guard in front of it
//! and the cache invalidation behind it. The guard is check-then-act: two
//! concurrent attempts for the same volunteer can both pass the count before
//! either write lands. The sheet offers no transaction primitive, so that
//! race is accepted and the usage pattern assumed is one writer at a time.

use std::sync::Arc;

use tracing::info;

use crate::api::{SheetError, SheetsClient};
use crate::config::Config;
use crate::models::Merchant;
use crate::reader::SheetReader;

pub struct AssignmentCoordinator {
    client: SheetsClient,
    reader: SheetReader,
    config: Arc<Config>,
}

impl AssignmentCoordinator {
    pub fn new(client: SheetsClient, reader: SheetReader, config: Arc<Config>) -> Self {
        Self {
            client,
            reader,
            config,
        }
    }

    /// Assign a merchant to a volunteer.
    ///
    /// Re-reads the merchant collection bypassing the cache for a fresh
    /// assignment count, rejects at the cap before any write is attempted,
    /// then submits the RPC. On semantic success the entire cache is
    /// invalidated so every subsequent read reflects the write; on any
    /// failure the cache is left untouched.
    pub async fn assign(
        &self,
        merchant_name: &str,
        volunteer_name: &str,
    ) -> Result<String, SheetError> {
        if self.config.enforce_assignment_cap {
            let merchants = self.reader.fetch_merchants(false).await?;
            check_capacity(&merchants, volunteer_name, self.config.assignment_cap)?;
        }

        let message = self
            .client
            .submit_assignment(merchant_name, volunteer_name)
            .await?;

        self.reader.invalidate().await;
        info!(merchant = merchant_name, volunteer = volunteer_name, "Assignment recorded");
        Ok(message)
    }

    /// Merchants currently assigned to a volunteer, from the cached view.
    pub async fn assignments_for(&self, volunteer_name: &str) -> Result<Vec<Merchant>, SheetError> {
        let merchants = self.reader.fetch_merchants(true).await?;
        Ok(merchants
            .into_iter()
            .filter(|m| m.assigned_to.as_deref() == Some(volunteer_name))
            .collect())
    }
}

/// Reject when the volunteer already holds `cap` or more merchants.
fn check_capacity(
    merchants: &[Merchant],
    volunteer_name: &str,
    cap: usize,
) -> Result<(), SheetError> {
    let count = merchants
        .iter()
        .filter(|m| m.assigned_to.as_deref() == Some(volunteer_name))
        .count();

    if count >= cap {
        return Err(SheetError::AssignmentLimitExceeded {
            volunteer: volunteer_name.to_string(),
            count,
            limit: cap,
        });
    }
    Ok(())
}
