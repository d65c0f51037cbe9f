// Raw records: the post and account shapes the extractors consume.
//
// This is cinder's own JSON record shape. Field names borrow from the classic
// REST payloads, but ids are strings, timestamps are RFC 3339, coordinates are a
// bare `[lon, lat]` pair and retweets carry `retweeted_status_id`, so a raw
// crawl has to be converted before it can be fed in. Optional fields are
// optional here too; the extractors decide what an absent field means.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post as fetched from the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPost {
    pub id: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub text: String,
    /// `[longitude, latitude]`
    #[serde(default)]
    pub coordinates: Option<[f64; 2]>,
    #[serde(default)]
    pub place: Option<Place>,
    #[serde(default)]
    pub entities: Entities,
    /// Posting client, either a plain name or the legacy `<a href>` anchor.
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub retweet_count: Option<u64>,
    #[serde(default)]
    pub favorite_count: Option<u64>,
    pub lang: String,
    #[serde(default)]
    pub in_reply_to_status_id: Option<String>,
    #[serde(default)]
    pub in_reply_to_user_id: Option<String>,
    #[serde(default)]
    pub quoted_status_id: Option<String>,
    #[serde(default)]
    pub withheld_in_countries: Option<Vec<String>>,
    /// Present when this post is a retweet of another post.
    #[serde(default)]
    pub retweeted_status_id: Option<String>,
    /// Media counters stored alongside replayed posts; when present they win
    /// over counting `entities.media`.
    #[serde(default)]
    pub media_counts: Option<MediaCounts>,
}

impl RawPost {
    pub fn is_retweet(&self) -> bool {
        self.retweeted_status_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub country_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub urls: Vec<EntityUrl>,
    #[serde(default)]
    pub media: Vec<Media>,
}

/// A link the platform already recognised in the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityUrl {
    /// The string as it appears in the text (usually a t.co link).
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
}

impl EntityUrl {
    pub fn target(&self) -> &str {
        self.expanded_url.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    /// `photo`, `video` or `animated_gif`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCounts {
    pub photos: u32,
    pub videos: u32,
    pub gifs: u32,
}

/// An account profile snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAccount {
    pub id: String,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Profile link with shorteners already resolved, when the crawler kept it.
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub friends_count: u64,
    #[serde(default)]
    pub listed_count: u64,
    #[serde(default)]
    pub favourites_count: u64,
    #[serde(default)]
    pub statuses_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub default_profile: bool,
    #[serde(default)]
    pub default_profile_image: bool,
    /// When the profile was fetched. Account age is measured against this.
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl RawAccount {
    /// The profile link to compare against, preferring the expanded form.
    pub fn profile_url(&self) -> Option<&str> {
        self.expanded_url
            .as_deref()
            .or(self.url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

/// Input shape of a single-post extraction: the post and its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub post: RawPost,
    pub author: RawAccount,
}

/// Input shape of an account extraction: the profile and its history,
/// oldest post first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account: RawAccount,
    #[serde(default)]
    pub posts: Vec<RawPost>,
}
