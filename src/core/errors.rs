use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobTrackError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Http(Box<reqwest::Error>),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Application not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JobTrackError: {0}")]
    Custom(String),
}

impl JobTrackError {
    pub fn is_validation(&self) -> bool {
        matches!(self, JobTrackError::Validation(_))
    }
}

impl From<std::io::Error> for JobTrackError {
    fn from(error: std::io::Error) -> Self {
        JobTrackError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for JobTrackError {
    fn from(error: reqwest::Error) -> Self {
        JobTrackError::Http(Box::new(error))
    }
}

pub type Result<T> = std::result::Result<T, JobTrackError>;
