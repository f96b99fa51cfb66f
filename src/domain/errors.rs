#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::Constructor)]
#[display("{key} must be set")]
pub struct ConfigurationMissing {
    key: &'static str
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
#[display("malformed update: {_0}")]
pub struct MalformedInput(serde_json::Error);

/// Write failures of the admin registry. A missing entry is never an error.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RegistryError {
    #[display("the admin registry is not configured")]
    Unconfigured,
    #[display("the admin registry is unavailable: {_0}")]
    StoreUnavailable(sqlx::Error),
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::Constructor)]
#[display("couldn't send a message to {target}: {source}")]
pub struct UpstreamSendFailure {
    target: String,
    source: teloxide::RequestError,
}
