use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// The request did not complete: offline, DNS, refused, timeout or a
    /// non-success status from the service.
    #[error("symbol search request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("symbol search response is malformed: {0}")]
    ResponseFormat(#[from] serde_json::Error),
}

impl SearchError {
    pub fn is_network(&self) -> bool {
        matches!(self, SearchError::Network(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, SearchError::ResponseFormat(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_display() {
        let inner = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = SearchError::from(inner);
        assert!(error.is_format());
        assert!(!error.is_network());
        assert!(
            format!("{error}").starts_with("symbol search response is malformed: "),
            "{error}"
        );
    }
}
