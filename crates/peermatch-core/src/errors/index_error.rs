/// Vector index adapter errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("index service returned status {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("embedding model {configured} inconsistent with existing collection model {stored}")]
    ModelMismatch { configured: String, stored: String },

    #[error("malformed index response: {reason}")]
    MalformedResponse { reason: String },
}
