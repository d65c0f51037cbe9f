// Cinder: feature extraction for bot detection.
//
// This is the library root. The extraction engine is split into the
// lookup tables it reads (lexicon), the text cleaning step (normalize)
// and the two extractors that produce fixed-length vectors (features).

pub mod config;
pub mod error;
pub mod features;
pub mod lexicon;
pub mod normalize;
pub mod output;
pub mod records;

pub use error::FeatureError;
pub use features::account::{extract_account_features, extract_account_features_at};
pub use features::layout::{AccountFeature, AccountFeatureVector, PostFeature, PostFeatureVector};
pub use features::post::extract_post_features;
pub use lexicon::RuleSet;
pub use normalize::resolver::UrlResolver;
