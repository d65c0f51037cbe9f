// Feature extraction: fixed-layout numeric vectors for posts and accounts.
//
// `layout` owns the field order, `post` and `account` fill the vectors,
// `stats` and `similarity` hold the aggregation math the account extractor
// runs over per-post columns.

pub mod account;
pub mod layout;
pub mod post;
pub mod similarity;
pub mod stats;
