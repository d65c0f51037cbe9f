// Library error type.
//
// Only table/data problems are errors here. Missing optional fields are
// defaults and network trouble during URL resolution is logged and absorbed
// by the resolver, so neither ever shows up as a FeatureError.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    /// A post carried a language code that is not in the language table.
    #[error("unknown language code {code:?} on post {post_id}")]
    UnknownLanguage { code: String, post_id: String },

    /// One of the built-in patterns failed to compile.
    #[error("failed to compile {name} pattern: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    /// A geofence region was defined with an unusable ring.
    #[error("invalid geofence region {region}: {reason}")]
    Geofence { region: String, reason: String },

    /// The HTTP client for URL resolution could not be built.
    #[cfg(feature = "http")]
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
