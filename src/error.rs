use thiserror::Error;

pub type QualityResult<T> = Result<T, QualityError>;

#[derive(Debug, Clone, Error)]
pub enum QualityError {
    /// A single video could not be scored. Skipped, never retried.
    #[error("failed to score video {video_id}: {reason}")]
    Computation { video_id: String, reason: String },

    /// The scorer as a whole is unavailable; the batch is retried.
    #[error("quality scorer unavailable: {0}")]
    Unavailable(String),
}

impl QualityError {
    pub fn computation(video_id: impl Into<String>, reason: impl Into<String>) -> Self {
        QualityError::Computation {
            video_id: video_id.into(),
            reason: reason.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, QualityError::Unavailable(_))
    }
}
