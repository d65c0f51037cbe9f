// Unit tests for post feature extraction.
//
// Each test builds a post from a minimal JSON payload, tweaks the fields it
// cares about and checks the matching vector positions. A stub resolver
// stands in for the network.

use cinder::features::post::{contains_pagination, NO_COORDINATES};
use cinder::normalize::resolver::IdentityResolver;
use cinder::records::{EntityUrl, Media, MediaCounts, Place, RawAccount, RawPost};
use cinder::{extract_post_features, FeatureError, PostFeature as F, PostFeatureVector, RuleSet};
use serde_json::json;

fn author() -> RawAccount {
    serde_json::from_value(json!({
        "id": "42",
        "screen_name": "jane_doe",
        "name": "Jane Doe",
        "created_at": "2015-01-01T00:00:00Z",
    }))
    .unwrap()
}

fn post(text: &str) -> RawPost {
    serde_json::from_value(json!({
        "id": "1",
        "author_id": "42",
        "created_at": "2021-03-01T13:45:00Z",
        "text": text,
        "lang": "en",
    }))
    .unwrap()
}

fn extract(post: &RawPost) -> PostFeatureVector {
    let rules = RuleSet::new().unwrap();
    extract_post_features(&rules, &IdentityResolver, post, &author()).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ============================================================
// Plain text
// ============================================================

#[test]
fn simple_sentence() {
    // The sentence is 38 characters long, period included.
    let v = extract(&post("This is just a simple test tweet text."));
    assert_eq!(v.get(F::NumberOfHashtags), 0.0);
    assert_eq!(v.get(F::NumberOfUrls), 0.0);
    assert_eq!(v.get(F::TweetTextLength), 38.0);
    assert_eq!(v.get(F::CleanedTweetTextLength), 38.0);
    assert_eq!(v.get(F::NumberOfSentences), 1.0);
    assert_eq!(v.get(F::NumberOfWords), 8.0);
    assert_eq!(v.get(F::MeanWordsPerSentence), 8.0);
    assert_eq!(v.get(F::ContainsOnlyUrls), 0.0);
    assert_eq!(v.get(F::ContainsOnlyEmojis), 0.0);
}

#[test]
fn hashtags_mentions_numbers() {
    let v = extract(&post("#rust and #go with @alice, 1,000 and 42"));
    assert_eq!(v.get(F::NumberOfHashtags), 2.0);
    assert_eq!(v.get(F::MinHashtagLength), 2.0);
    assert_eq!(v.get(F::MaxHashtagLength), 4.0);
    assert_close(v.get(F::MeanHashtagLength), 3.0);

    assert_eq!(v.get(F::NumberOfMentions), 1.0);
    assert_eq!(v.get(F::MaxMentionLength), 5.0);

    assert_eq!(v.get(F::NumberOfNumbers), 2.0);
    assert_eq!(v.get(F::MinNumberLength), 2.0);
    assert_eq!(v.get(F::MaxNumberLength), 4.0);
}

#[test]
fn timing_fields() {
    // 2021-03-01 was a Monday
    let v = extract(&post("hello"));
    assert_eq!(v.get(F::HourOfDay), 13.0);
    assert_eq!(v.get(F::DayOfWeek), 0.0);
}

// ============================================================
// Metadata
// ============================================================

#[test]
fn missing_location_sentinels() {
    let v = extract(&post("hello"));
    assert_eq!(v.get(F::CoordinatesGroup), NO_COORDINATES);
    assert_eq!(v.get(F::CountryCodeEncoded), 0.0);
}

#[test]
fn geotagged_post() {
    let rules = RuleSet::new().unwrap();
    let mut p = post("hello from Berlin");
    p.coordinates = Some([13.4, 52.5]);
    p.place = Some(Place {
        country_code: "DE".to_string(),
    });
    let v = extract_post_features(&rules, &IdentityResolver, &p, &author()).unwrap();

    let europe = rules
        .geofence()
        .regions()
        .iter()
        .position(|r| r.name == "europe")
        .unwrap();
    assert_eq!(v.get(F::CoordinatesGroup), europe as f64);
    assert_eq!(v.get(F::CountryCodeEncoded), rules.country_code(Some("DE")) as f64);
}

#[test]
fn out_of_range_coordinates_are_ignored() {
    let mut p = post("hello");
    p.coordinates = Some([200.0, 95.0]);
    assert_eq!(extract(&p).get(F::CoordinatesGroup), NO_COORDINATES);
}

#[test]
fn reply_retweet_quote_flags() {
    let mut p = post("replying to myself");
    p.in_reply_to_status_id = Some("0".to_string());
    p.in_reply_to_user_id = Some("42".to_string());
    p.quoted_status_id = Some("7".to_string());
    p.retweeted_status_id = Some("9".to_string());
    p.withheld_in_countries = Some(vec!["DE".to_string(), "FR".to_string()]);

    let v = extract(&p);
    assert_eq!(v.get(F::IsAnswer), 1.0);
    assert_eq!(v.get(F::IsSelfReply), 1.0);
    assert_eq!(v.get(F::ContainsQuote), 1.0);
    assert_eq!(v.get(F::IsRetweet), 1.0);
    assert_eq!(v.get(F::NumberOfWithheldCountries), 2.0);
}

#[test]
fn reply_to_someone_else_is_not_self_reply() {
    let mut p = post("hi");
    p.in_reply_to_status_id = Some("0".to_string());
    p.in_reply_to_user_id = Some("99".to_string());
    let v = extract(&p);
    assert_eq!(v.get(F::IsAnswer), 1.0);
    assert_eq!(v.get(F::IsSelfReply), 0.0);
}

#[test]
fn source_anchor_decoded() {
    let mut p = post("hi");
    p.source = r#"<a href="http://twitter.com/download/iphone" rel="nofollow">Twitter for iPhone</a>"#
        .to_string();
    assert_eq!(extract(&p).get(F::SourceEncoded), 2.0);
}

#[test]
fn media_from_entities_and_stored_counts() {
    let mut p = post("pics");
    p.entities.media = ["photo", "photo", "video", "animated_gif"]
        .iter()
        .map(|k| Media {
            kind: k.to_string(),
        })
        .collect();
    let v = extract(&p);
    assert_eq!(v.get(F::NumberOfPhotos), 2.0);
    assert_eq!(v.get(F::NumberOfVideos), 1.0);
    assert_eq!(v.get(F::NumberOfGifs), 1.0);

    p.media_counts = Some(MediaCounts {
        photos: 0,
        videos: 3,
        gifs: 0,
    });
    let v = extract(&p);
    assert_eq!(v.get(F::NumberOfPhotos), 0.0);
    assert_eq!(v.get(F::NumberOfVideos), 3.0);
}

#[test]
fn unknown_language_is_an_error() {
    let rules = RuleSet::new().unwrap();
    let mut p = post("hello");
    p.lang = "zz-klingon".to_string();
    let err = extract_post_features(&rules, &IdentityResolver, &p, &author()).unwrap_err();
    assert!(matches!(err, FeatureError::UnknownLanguage { ref code, .. } if code == "zz-klingon"));
}

// ============================================================
// Links and content-only posts
// ============================================================

#[test]
fn link_matches_author() {
    let mut a = author();
    a.url = Some("https://janedoe.com".to_string());

    let mut p = post("my new blog post https://t.co/x");
    p.entities.urls = vec![EntityUrl {
        url: "https://t.co/x".to_string(),
        expanded_url: Some("https://janedoe.com/blog".to_string()),
    }];

    let rules = RuleSet::new().unwrap();
    let v = extract_post_features(&rules, &IdentityResolver, &p, &a).unwrap();
    assert_eq!(v.get(F::NumberOfUrls), 1.0);
    assert_eq!(v.get(F::UrlMatchesUsername), 1.0);
    assert_eq!(v.get(F::UrlMatchesProfileUrl), 1.0);
    assert_eq!(v.get(F::UrlPathMatchesText), 1.0);
}

#[test]
fn unrelated_link_matches_nothing() {
    let mut p = post("look https://example.org/news");
    p.entities.urls = vec![];
    let v = extract(&p);
    assert_eq!(v.get(F::NumberOfUrls), 1.0);
    assert_eq!(v.get(F::UrlMatchesUsername), 0.0);
    assert_eq!(v.get(F::UrlMatchesProfileUrl), 0.0);
    assert_eq!(v.get(F::UrlPathMatchesText), 0.0);
}

#[test]
fn only_url_post() {
    let mut p = post("https://t.co/abc");
    p.entities.urls = vec![EntityUrl {
        url: "https://t.co/abc".to_string(),
        expanded_url: Some("https://example.com/".to_string()),
    }];
    let v = extract(&p);
    assert_eq!(v.get(F::ContainsOnlyUrls), 1.0);
    assert_eq!(v.get(F::ContainsOnlyEmojis), 0.0);
    assert_eq!(v.get(F::CleanedTweetTextLength), 0.0);
}

#[test]
fn only_emoji_post() {
    let v = extract(&post("\u{1F600} \u{1F600}"));
    assert_eq!(v.get(F::ContainsOnlyEmojis), 1.0);
    assert_eq!(v.get(F::ContainsOnlyUrls), 0.0);
    assert_eq!(v.get(F::NumberOfEmojis), 2.0);
}

#[test]
fn empty_post_is_neither_only_urls_nor_only_emojis() {
    let v = extract(&post(""));
    assert_eq!(v.get(F::ContainsOnlyUrls), 0.0);
    assert_eq!(v.get(F::ContainsOnlyEmojis), 0.0);
    assert_eq!(v.get(F::NumberOfSentences), 0.0);
    assert_eq!(v.get(F::MeanWordsPerSentence), 0.0);
}

// ============================================================
// Pagination
// ============================================================

#[test]
fn pagination_leading_or_trailing() {
    let rules = RuleSet::new().unwrap();
    assert!(contains_pagination(&rules, "2/2 hello"));
    assert!(contains_pagination(&rules, "the story goes on 1/3"));
    assert!(contains_pagination(&rules, "the story goes on (1/3)"));
}

#[test]
fn pagination_both_markers_cancel() {
    let rules = RuleSet::new().unwrap();
    assert!(!contains_pagination(&rules, "1/2 first half and more 1/2"));
    // A bare marker is both leading and trailing.
    assert!(!contains_pagination(&rules, "1/2"));
}

#[test]
fn pagination_page_past_total_is_invalid() {
    let rules = RuleSet::new().unwrap();
    assert!(!contains_pagination(&rules, "4/3 something"));
    assert!(contains_pagination(&rules, "4/3 something 2/3"));
}

#[test]
fn pagination_flag_in_vector() {
    assert_eq!(extract(&post("1/3 a long thread starts")).get(F::ContainsPagination), 1.0);
    assert_eq!(extract(&post("no thread here")).get(F::ContainsPagination), 0.0);
}

// ============================================================
// Determinism and serialization
// ============================================================

#[test]
fn extraction_is_idempotent() {
    let mut p = post("Same input #twice @bob 12 https://example.com/x \u{1F600}");
    p.coordinates = Some([-74.0, 40.7]);
    let first = extract(&p);
    let second = extract(&p);
    assert_eq!(first, second);
}

#[test]
fn serializes_as_ordered_name_map() {
    let v = extract(&post("hello"));
    let json = serde_json::to_string(&v).unwrap();
    assert!(json.starts_with(r#"{"retweet_count":"#));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_object().unwrap().len(), F::COUNT);
    assert_eq!(value["tweet_text_length"], json!(5.0));
}
