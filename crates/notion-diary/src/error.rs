#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),

    #[error("Notion API error [{status}]: {body}")]
    Transport { status: u16, body: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("{0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
