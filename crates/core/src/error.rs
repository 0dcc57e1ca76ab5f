use std::fmt;

/// Failure taxonomy for the capture-to-report pipeline. The API layer downcasts
/// to this type to pick a status class; everything else is a 500.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The capture batch was empty or carried no usable timestamps.
    EmptyCapture,
    /// No snapshot in the batch carried a non-empty restaurant name.
    NoRestaurantIdentity,
    ReportNotFound,
    ArtifactNotFound,
    Render(String),
    Delivery(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::EmptyCapture => write!(f, "No captured data provided"),
            ReportError::NoRestaurantIdentity => write!(f, "Unable to process captured data"),
            ReportError::ReportNotFound => write!(f, "Report not found"),
            ReportError::ArtifactNotFound => write!(f, "Report document not found"),
            ReportError::Render(detail) => write!(f, "Failed to render report: {detail}"),
            ReportError::Delivery(detail) => write!(f, "Failed to deliver report: {detail}"),
        }
    }
}

impl std::error::Error for ReportError {}
