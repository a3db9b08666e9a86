use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopdeskError {
    #[error("Customer ID #{0} not found.")]
    CustomerNotFound(u32),

    #[error("Ticket ID #{0} not found.")]
    TicketNotFound(u32),

    #[error("Customer ID #{0} is not active.")]
    CustomerInactive(u32),

    #[error("invalid record format: {0}")]
    InvalidFormat(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not signed in. Run `shopdesk login <email>` first")]
    NotSignedIn,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ShopdeskError>;
