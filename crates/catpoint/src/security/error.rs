use catpoint_image::ImageError;

use super::repository::RepositoryError;

/// Errors surfaced by the security service.
///
/// The service adds no failure modes of its own; collaborator errors are
/// passed through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    ImageAnalysis(#[from] ImageError),
}
