// Post feature extraction: one post plus its author into 43 numbers.
//
// Metadata fields come straight from the record. Everything content-related
// is measured on the normalized text (see crate::normalize), and the link
// fields compare each expanded URL against the author's handle, the author's
// profile link and the words of the post itself.

use chrono::{Datelike, Timelike};

use super::layout::{PostFeature as F, PostFeatureVector};
use crate::error::{FeatureError, Result};
use crate::lexicon::geofence::is_valid_coordinate;
use crate::lexicon::RuleSet;
use crate::normalize::resolver::UrlResolver;
use crate::normalize::{self, host_of, path_segments_of, tokenize, NormalizedText};
use crate::records::{MediaCounts, RawAccount, RawPost};

/// Coordinates group for posts without usable coordinates.
pub const NO_COORDINATES: f64 = -1.0;

/// Compute the feature vector of a single post.
///
/// Fails only when the post's language code is not in the language table.
pub fn extract_post_features(
    rules: &RuleSet,
    resolver: &dyn UrlResolver,
    post: &RawPost,
    author: &RawAccount,
) -> Result<PostFeatureVector> {
    let lang = rules
        .language_code(&post.lang)
        .ok_or_else(|| FeatureError::UnknownLanguage {
            code: post.lang.clone(),
            post_id: post.id.clone(),
        })?;

    let mut v = PostFeatureVector::filled(0.0);

    // Metadata
    v.set(F::RetweetCount, post.retweet_count.unwrap_or(0) as f64);
    v.set(F::FavoriteCount, post.favorite_count.unwrap_or(0) as f64);
    v.set(F::CoordinatesGroup, coordinates_group(rules, post.coordinates));
    v.set(
        F::CountryCodeEncoded,
        rules.country_code(post.place.as_ref().map(|p| p.country_code.as_str())) as f64,
    );
    v.set(F::SourceEncoded, rules.source_code(&post.source) as f64);
    v.set_flag(F::IsRetweet, post.is_retweet());
    v.set_flag(F::IsAnswer, post.in_reply_to_status_id.is_some());
    v.set_flag(
        F::IsSelfReply,
        post.in_reply_to_user_id.as_deref() == Some(post.author_id.as_str()),
    );
    v.set_flag(F::ContainsQuote, post.quoted_status_id.is_some());
    v.set(
        F::NumberOfWithheldCountries,
        post.withheld_in_countries.as_ref().map_or(0, |c| c.len()) as f64,
    );

    let media = post.media_counts.unwrap_or_else(|| count_media(post));
    v.set(F::NumberOfPhotos, media.photos as f64);
    v.set(F::NumberOfVideos, media.videos as f64);
    v.set(F::NumberOfGifs, media.gifs as f64);

    let normalized = normalize::normalize(rules, resolver, &post.text, &post.entities.urls);
    let cleaned = normalized.cleaned.as_str();

    v.set(F::TweetTextLength, post.text.chars().count() as f64);
    v.set(F::CleanedTweetTextLength, cleaned.chars().count() as f64);
    v.set(F::LangEncoded, lang as f64);

    // Content
    v.set_flag(F::ContainsPagination, contains_pagination(rules, cleaned));

    let url_count = normalized.expanded_urls.len();
    let links = LinkMatches::count(rules, &normalized, author);
    v.set(F::NumberOfUrls, url_count as f64);
    v.set(F::UrlMatchesUsername, links.username as f64);
    v.set(F::UrlMatchesProfileUrl, links.profile_url as f64);
    v.set(F::UrlPathMatchesText, links.path_text as f64);

    let text_is_blank = cleaned.chars().all(char::is_whitespace);
    let raw_non_empty = !post.text.is_empty();
    v.set_flag(
        F::ContainsOnlyUrls,
        url_count >= 1 && text_is_blank && normalized.emoji_count == 0 && raw_non_empty,
    );
    v.set_flag(
        F::ContainsOnlyEmojis,
        normalized.emoji_count >= 1 && text_is_blank && url_count == 0 && raw_non_empty,
    );

    let patterns = rules.patterns();
    let hashtags = LengthStats::of(
        patterns
            .hashtag
            .captures_iter(cleaned)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().chars().count()),
    );
    hashtags.write(&mut v, [F::NumberOfHashtags, F::MinHashtagLength, F::MaxHashtagLength, F::MeanHashtagLength]);

    let mentions = LengthStats::of(
        patterns
            .mention
            .captures_iter(cleaned)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().chars().count()),
    );
    mentions.write(&mut v, [F::NumberOfMentions, F::MinMentionLength, F::MaxMentionLength, F::MeanMentionLength]);

    let numbers = LengthStats::of(
        patterns
            .number
            .find_iter(cleaned)
            .map(|m| m.as_str().chars().filter(|c| c.is_ascii_digit()).count()),
    );
    numbers.write(&mut v, [F::NumberOfNumbers, F::MinNumberLength, F::MaxNumberLength, F::MeanNumberLength]);

    let per_sentence = tokenize::words_per_sentence(patterns, cleaned);
    let sentences = LengthStats::of(per_sentence.iter().copied());
    sentences.write(
        &mut v,
        [
            F::NumberOfSentences,
            F::MinWordsPerSentence,
            F::MaxWordsPerSentence,
            F::MeanWordsPerSentence,
        ],
    );
    v.set(F::NumberOfWords, per_sentence.iter().sum::<usize>() as f64);
    v.set(F::NumberOfEmojis, normalized.emoji_count as f64);

    // Timing
    v.set(F::HourOfDay, post.created_at.hour() as f64);
    v.set(F::DayOfWeek, post.created_at.weekday().num_days_from_monday() as f64);

    Ok(v)
}

fn coordinates_group(rules: &RuleSet, coordinates: Option<[f64; 2]>) -> f64 {
    match coordinates {
        Some([lon, lat]) if is_valid_coordinate(lon, lat) => {
            rules.geofence().classify(lon, lat) as f64
        }
        _ => NO_COORDINATES,
    }
}

fn count_media(post: &RawPost) -> MediaCounts {
    let mut counts = MediaCounts::default();
    for media in &post.entities.media {
        match media.kind.as_str() {
            "photo" => counts.photos += 1,
            "video" => counts.videos += 1,
            "animated_gif" => counts.gifs += 1,
            _ => {}
        }
    }
    counts
}

/// Leading and trailing page markers ("2/5 …", "… (2/5)") are checked
/// independently; a marker only counts when its page is not past the total.
/// The post is paginated when exactly one of the two markers is valid.
pub fn contains_pagination(rules: &RuleSet, text: &str) -> bool {
    let patterns = rules.patterns();
    let leading = valid_page_marker(patterns.pagination_leading.captures(text));
    let trailing = valid_page_marker(patterns.pagination_trailing.captures(text));
    leading ^ trailing
}

fn valid_page_marker(caps: Option<regex::Captures<'_>>) -> bool {
    let Some(caps) = caps else {
        return false;
    };
    let page = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok());
    let total = caps.get(2).and_then(|m| m.as_str().parse::<u64>().ok());
    matches!((page, total), (Some(p), Some(t)) if p <= t)
}

/// Per-URL comparisons, each summed over all of the post's links.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct LinkMatches {
    username: usize,
    profile_url: usize,
    path_text: usize,
}

impl LinkMatches {
    fn count(rules: &RuleSet, normalized: &NormalizedText, author: &RawAccount) -> Self {
        let mut matches = Self::default();
        if normalized.expanded_urls.is_empty() {
            return matches;
        }

        let handle_variants = handle_variants(&author.screen_name);
        let profile_host = author.profile_url().and_then(host_of);
        let words: Vec<String> = tokenize::words(rules.patterns(), &normalized.cleaned)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();

        for url in &normalized.expanded_urls {
            let host = host_of(url);

            if let Some(host) = host.as_deref() {
                if host
                    .split('.')
                    .any(|label| handle_variants.iter().any(|v| v == label))
                {
                    matches.username += 1;
                }
                if profile_host
                    .as_deref()
                    .is_some_and(|profile| profile.contains(host))
                {
                    matches.profile_url += 1;
                }
            }

            let segments = path_segments_of(url);
            if segments.iter().any(|s| words.contains(s)) {
                matches.path_text += 1;
            }
        }

        matches
    }
}

/// The handle as written, without underscores, and with underscores as
/// hyphens, all lower-cased to compare against hostnames.
fn handle_variants(handle: &str) -> Vec<String> {
    let lower = handle.trim().to_lowercase();
    if lower.is_empty() {
        return Vec::new();
    }
    let mut variants = vec![lower.replace('_', ""), lower.replace('_', "-"), lower];
    variants.sort();
    variants.dedup();
    variants
}

/// Count, min, max and mean of a set of lengths; all zero when empty.
struct LengthStats {
    count: usize,
    min: usize,
    max: usize,
    mean: f64,
}

impl LengthStats {
    fn of(lengths: impl Iterator<Item = usize>) -> Self {
        let mut stats = Self {
            count: 0,
            min: usize::MAX,
            max: 0,
            mean: 0.0,
        };
        let mut total = 0usize;
        for len in lengths {
            stats.count += 1;
            stats.min = stats.min.min(len);
            stats.max = stats.max.max(len);
            total += len;
        }
        if stats.count == 0 {
            stats.min = 0;
        } else {
            stats.mean = total as f64 / stats.count as f64;
        }
        stats
    }

    /// Write `[count, min, max, mean]` into the given fields.
    fn write(&self, v: &mut PostFeatureVector, fields: [F; 4]) {
        v.set(fields[0], self.count as f64);
        v.set(fields[1], self.min as f64);
        v.set(fields[2], self.max as f64);
        v.set(fields[3], self.mean);
    }
}
