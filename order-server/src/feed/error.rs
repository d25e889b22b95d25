//! Feed loading error types.

/// Errors that can occur while fetching or reading a GTFS archive.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// No feed location configured
    #[error("rail feed not configured")]
    NotConfigured,

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed server returned an error status
    #[error("feed download failed: status {status}")]
    Status { status: u16 },

    /// Reading a local feed file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive is not a readable zip file
    #[error("invalid feed archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A required table is absent from the archive
    #[error("feed archive missing {0}")]
    MissingTable(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::MissingTable("stop_times.txt");
        assert_eq!(err.to_string(), "feed archive missing stop_times.txt");

        let err = FeedError::Status { status: 404 };
        assert_eq!(err.to_string(), "feed download failed: status 404");

        assert_eq!(FeedError::NotConfigured.to_string(), "rail feed not configured");
    }
}
