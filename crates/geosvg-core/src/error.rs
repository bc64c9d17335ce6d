pub type Result<T> = std::result::Result<T, Error>;

/// Input errors. The offending text is echoed back verbatim so callers can report exactly what
/// was rejected.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid geometry: {input}")]
    InvalidGeometry { input: String },

    #[error("invalid feature: {input}")]
    InvalidFeature { input: String },

    #[error("invalid feature collection: {input}")]
    InvalidFeatureCollection { input: String },

    #[error("invalid GeoJSON: {input}")]
    InvalidGeoJson { input: String },

    #[error("GeoJSON value error: {0}")]
    Json(#[from] serde_json::Error),
}
