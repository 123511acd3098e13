/// Failure talking to the demographics provider.
///
/// Never leaves the fetcher: callers see `None` or an empty list.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Upstream returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("HTML parse error: {0}")]
    HtmlParse(String),
}
