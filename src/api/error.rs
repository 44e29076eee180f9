use thiserror::Error;

/// Failure taxonomy for external sheet reads and assignment writes.
///
/// Every failure is caught at the boundary of the operation that produced it
/// and converted to a user-visible message; none is fatal to the process.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Transport-level failure reaching the sheet or the write endpoint.
    /// Retryable; surfaced as a visible error banner.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The source was reachable but the range held no data rows. Distinct
    /// from a legitimately empty filtered result.
    #[error("No data found in range {range}. Check that the sheet is shared and contains data in these columns.")]
    EmptyDataset { range: String },

    /// Business-rule rejection: the volunteer is already at the cap.
    #[error("{volunteer} already has {count} assignments. Maximum limit of {limit} reached.")]
    AssignmentLimitExceeded {
        volunteer: String,
        count: usize,
        limit: usize,
    },

    /// The write RPC reported a non-success status; the message is passed
    /// through from its payload verbatim.
    #[error("{0}")]
    AssignmentRejected(String),
}

impl From<reqwest::Error> for SheetError {
    fn from(err: reqwest::Error) -> Self {
        SheetError::UpstreamUnavailable(err.to_string())
    }
}
