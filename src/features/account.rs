// Account feature extraction: a profile plus its post history into 105 numbers.
//
// The first block of fields only needs the profile and is always filled in.
// The second block aggregates per-post vectors over the history; it stays NaN
// when there are no posts, so "no history" is distinguishable from "history
// with zero of something".
//
// Posts must be ordered oldest to newest: the posting-interval fields are
// computed from consecutive pairs.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::debug;

use super::layout::{AccountFeature as A, AccountFeatureVector, PostFeature as P, PostFeatureVector};
use super::post::extract_post_features;
use super::similarity::similarity_matrix_stats;
use super::stats::{distinct_count, mode, ratio, Summary};
use crate::error::Result;
use crate::lexicon::codes::NO_COUNTRY;
use crate::lexicon::RuleSet;
use crate::normalize::resolver::UrlResolver;
use crate::normalize::{host_of, path_segments_of, tokenize};
use crate::records::{RawAccount, RawPost};

/// Compute an account's feature vector.
///
/// Account age is measured against `account.fetched_at`, or against the
/// current time when the snapshot time is missing. Pin it with
/// `extract_account_features_at` wherever results must be reproducible.
pub fn extract_account_features(
    rules: &RuleSet,
    resolver: &dyn UrlResolver,
    account: &RawAccount,
    posts: &[RawPost],
) -> Result<AccountFeatureVector> {
    let snapshot = account.fetched_at.unwrap_or_else(Utc::now);
    extract_account_features_at(rules, resolver, account, posts, snapshot)
}

/// Compute an account's feature vector with an explicit snapshot time.
pub fn extract_account_features_at(
    rules: &RuleSet,
    resolver: &dyn UrlResolver,
    account: &RawAccount,
    posts: &[RawPost],
    snapshot: DateTime<Utc>,
) -> Result<AccountFeatureVector> {
    let mut v = AccountFeatureVector::filled(f64::NAN);
    profile_features(rules, account, snapshot, &mut v);

    if posts.is_empty() {
        debug!(account = account.screen_name.as_str(), "No post history, history fields left NaN");
        return Ok(v);
    }

    let post_vectors = posts
        .iter()
        .map(|post| extract_post_features(rules, resolver, post, account))
        .collect::<Result<Vec<_>>>()?;

    history_features(rules, posts, &post_vectors, &mut v);

    debug!(
        account = account.screen_name.as_str(),
        posts = posts.len(),
        "Extracted account features"
    );

    Ok(v)
}

fn profile_features(
    rules: &RuleSet,
    account: &RawAccount,
    snapshot: DateTime<Utc>,
    v: &mut AccountFeatureVector,
) {
    let followers = account.followers_count as f64;
    let friends = account.friends_count as f64;
    let favourites = account.favourites_count as f64;
    let statuses = account.statuses_count as f64;
    let age_days = (snapshot - account.created_at).num_days() as f64;

    v.set(A::FollowersCount, followers);
    v.set(A::FriendsCount, friends);
    v.set(A::ListedCount, account.listed_count as f64);
    v.set(A::FavouritesCount, favourites);
    v.set(A::StatusesCount, statuses);
    v.set_flag(A::Protected, account.protected);
    v.set_flag(A::Verified, account.verified);
    v.set_flag(A::DefaultProfile, account.default_profile);
    v.set_flag(A::DefaultProfileImage, account.default_profile_image);
    v.set(A::AccountAgeDays, age_days);
    v.set(A::AgePerStatusRatio, ratio(age_days, statuses));
    v.set(A::FollowersFriendsRatio, ratio(followers, friends));
    v.set(A::StatusesFavouritesRatio, ratio(statuses, favourites));
    v.set(A::StatusesPerDay, ratio(statuses, age_days));
    v.set(A::FollowersPerDay, ratio(followers, age_days));
    v.set(A::FriendsPerDay, ratio(friends, age_days));
    v.set(A::AccountCreatedHour, account.created_at.hour() as f64);
    v.set(
        A::AccountCreatedWeekday,
        account.created_at.weekday().num_days_from_monday() as f64,
    );

    // Handle
    let handle = account.screen_name.as_str();
    v.set(A::UsernameLength, handle.chars().count() as f64);
    v.set(A::UsernameStructure, rules.username_structure(handle) as f64);
    v.set_flag(A::UsernameContainsBot, rules.contains_bot_word(handle));
    v.set(A::UsernameNumberOfDigits, count_chars(handle, |c| c.is_ascii_digit()));
    v.set(A::UsernameNumberOfUnderscores, count_chars(handle, |c| c == '_'));
    v.set(A::UsernameNumberOfUppercase, count_chars(handle, char::is_uppercase));

    // Display name
    let name = rules.entities().unescape(&account.name);
    let patterns = rules.patterns();
    v.set(A::NameLength, name.chars().count() as f64);
    v.set(A::NameNumberOfDigits, count_chars(&name, |c| c.is_numeric()));
    v.set(A::NameNumberOfEmojis, rules.emoji().count(&name) as f64);
    v.set_flag(A::NameContainsBot, rules.contains_bot_word(&name));
    v.set(A::NameNumberOfWords, tokenize::words(patterns, &name).len() as f64);
    v.set(A::NameNumberOfUppercase, count_chars(&name, char::is_uppercase));
    v.set_flag(
        A::NameEqualsUsername,
        !handle.is_empty() && name.trim().to_lowercase() == handle.to_lowercase(),
    );

    // Bio. Links are counted first and stripped so their digits and
    // path fragments do not leak into the other counts.
    let description = rules.entities().unescape(&account.description);
    let url_count = patterns.url.find_iter(&description).count();
    let text = patterns.url.replace_all(&description, "");
    v.set(A::DescriptionLength, description.chars().count() as f64);
    v.set(A::DescriptionNumberOfMentions, patterns.mention.find_iter(&text).count() as f64);
    v.set(A::DescriptionNumberOfUrls, url_count as f64);
    v.set(A::DescriptionNumberOfHashtags, patterns.hashtag.find_iter(&text).count() as f64);
    v.set(A::DescriptionNumberOfNumbers, patterns.number.find_iter(&text).count() as f64);
    v.set(A::DescriptionNumberOfEmojis, rules.emoji().count(&text) as f64);
    v.set_flag(A::DescriptionContainsBot, rules.contains_bot_word(&description));
    v.set(A::DescriptionNumberOfWords, tokenize::words(patterns, &text).len() as f64);
    v.set(A::DescriptionNumberOfSentences, tokenize::sentences(patterns, &text).len() as f64);

    // Profile link
    profile_url_features(rules, account, &name, v);

    // Location
    let location = account.location.trim();
    v.set_flag(A::HasLocation, !location.is_empty());
    v.set(A::LocationLength, location.chars().count() as f64);
    v.set(A::LocationNumberOfEmojis, rules.emoji().count(location) as f64);
    v.set_flag(A::LocationContainsBot, rules.contains_bot_word(location));
}

fn profile_url_features(rules: &RuleSet, account: &RawAccount, name: &str, v: &mut AccountFeatureVector) {
    let Some(url) = account.profile_url() else {
        v.set_flag(A::HasProfileUrl, false);
        v.set(A::ProfileUrlService, 0.0);
        for field in [
            A::ProfileUrlIsShortened,
            A::ProfileUrlHostContainsUsername,
            A::ProfileUrlPathContainsUsername,
            A::ProfileUrlHostContainsName,
            A::ProfileUrlPathContainsName,
        ] {
            v.set_flag(field, false);
        }
        return;
    };

    let host = host_of(url).unwrap_or_default();
    let path = path_segments_of(url).join("/");
    let handle = account.screen_name.trim().to_lowercase();
    let compact_name: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let contains = |haystack: &str, needle: &str| !needle.is_empty() && haystack.contains(needle);

    v.set_flag(A::HasProfileUrl, true);
    v.set(A::ProfileUrlService, rules.service_profile(url) as f64);
    v.set_flag(A::ProfileUrlIsShortened, rules.is_shortened(url));
    v.set_flag(A::ProfileUrlHostContainsUsername, contains(&host, &handle));
    v.set_flag(A::ProfileUrlPathContainsUsername, contains(&path, &handle));
    v.set_flag(A::ProfileUrlHostContainsName, contains(&host, &compact_name));
    v.set_flag(A::ProfileUrlPathContainsName, contains(&path, &compact_name));
}

fn history_features(
    rules: &RuleSet,
    posts: &[RawPost],
    vectors: &[PostFeatureVector],
    v: &mut AccountFeatureVector,
) {
    let column = |field: P| -> Vec<f64> { vectors.iter().map(|pv| pv.get(field)).collect() };
    let summary = |field: P| Summary::of(&column(field));

    // Posting rhythm
    if posts.len() >= 2 {
        let deltas: Vec<f64> = posts
            .windows(2)
            .map(|pair| (pair[1].created_at - pair[0].created_at).num_milliseconds() as f64 / 1000.0)
            .collect();
        let intervals = Summary::of(&deltas);
        v.set(A::TweetTimeIntervalMean, intervals.mean);
        v.set(A::TweetTimeIntervalStd, intervals.std);
    }

    // Content similarity, own posts and retweets separately
    let (own, retweets): (Vec<_>, Vec<_>) = posts
        .iter()
        .zip(vectors)
        .partition(|(post, _)| !post.is_retweet());
    let own_content: Vec<&[f64]> = own.iter().map(|(_, pv)| pv.content()).collect();
    let retweet_content: Vec<&[f64]> = retweets.iter().map(|(_, pv)| pv.content()).collect();
    let (mean, std) = similarity_matrix_stats(&own_content);
    v.set(A::OwnTweetsTextSimilarityMean, mean);
    v.set(A::OwnTweetsTextSimilarityStd, std);
    let (mean, std) = similarity_matrix_stats(&retweet_content);
    v.set(A::RetweetsTextSimilarityMean, mean);
    v.set(A::RetweetsTextSimilarityStd, std);

    // Categorical fields
    let countries = column(P::CountryCodeEncoded);
    let sources = column(P::SourceEncoded);
    let languages = column(P::LangEncoded);
    v.set(A::MostFrequentCountry, mode(&countries));
    v.set(A::MostFrequentSource, mode(&sources));
    v.set(A::MostFrequentCoordinatesGroup, mode(&column(P::CoordinatesGroup)));
    v.set(A::MostFrequentLang, mode(&languages));
    v.set(
        A::NumberOfDifferentCountries,
        distinct_count(&countries, &[NO_COUNTRY as i64]) as f64,
    );
    v.set(A::NumberOfDifferentSources, distinct_count(&sources, &[]) as f64);
    let undefined: Vec<i64> = rules.undefined_language_code().map(i64::from).into_iter().collect();
    v.set(A::NumberOfDifferentLanguages, distinct_count(&languages, &undefined) as f64);

    let reply_targets: HashSet<&str> = posts
        .iter()
        .filter_map(|p| p.in_reply_to_user_id.as_deref())
        .collect();
    v.set(A::DifferentUserInteractions, reply_targets.len() as f64);

    // Behaviour ratios
    v.set(A::RetweetRatio, summary(P::IsRetweet).mean);
    v.set(A::AnswerRatio, summary(P::IsAnswer).mean);
    v.set(A::SelfReplyRatio, summary(P::IsSelfReply).mean);
    v.set(A::QuoteRatio, summary(P::ContainsQuote).mean);

    let retweet_counts = summary(P::RetweetCount);
    let favorite_counts = summary(P::FavoriteCount);
    v.set(A::RetweetCountMean, retweet_counts.mean);
    v.set(A::RetweetCountMax, retweet_counts.max);
    v.set(A::FavoriteCountMean, favorite_counts.mean);
    v.set(A::FavoriteCountMax, favorite_counts.max);
    v.set(A::PhotosMean, summary(P::NumberOfPhotos).mean);
    v.set(A::VideosMean, summary(P::NumberOfVideos).mean);
    v.set(A::GifsMean, summary(P::NumberOfGifs).mean);

    // Links
    let urls = summary(P::NumberOfUrls);
    v.set(A::UrlUsernameMatchRatio, ratio(summary(P::UrlMatchesUsername).sum, urls.sum));
    v.set(A::UrlProfileUrlMatchRatio, ratio(summary(P::UrlMatchesProfileUrl).sum, urls.sum));
    v.set(A::UrlPathTextMatchRatio, ratio(summary(P::UrlPathMatchesText).sum, urls.sum));
    v.set(A::NumberOfUrlsMean, urls.mean);
    v.set(A::NumberOfUrlsStd, urls.std);
    v.set(A::OnlyUrlsRatio, summary(P::ContainsOnlyUrls).mean);
    v.set(A::OnlyEmojisRatio, summary(P::ContainsOnlyEmojis).mean);
    v.set(A::PaginationRatio, summary(P::ContainsPagination).mean);

    // Text
    let hashtags = summary(P::NumberOfHashtags);
    v.set(A::NumberOfHashtagsMean, hashtags.mean);
    v.set(A::NumberOfHashtagsStd, hashtags.std);
    v.set(A::HashtagLengthMin, summary(P::MinHashtagLength).min);
    v.set(A::HashtagLengthMax, summary(P::MaxHashtagLength).max);
    v.set(A::HashtagLengthMean, summary(P::MeanHashtagLength).mean);

    let mentions = summary(P::NumberOfMentions);
    v.set(A::NumberOfMentionsMean, mentions.mean);
    v.set(A::NumberOfMentionsStd, mentions.std);
    v.set(A::MentionLengthMin, summary(P::MinMentionLength).min);
    v.set(A::MentionLengthMax, summary(P::MaxMentionLength).max);
    v.set(A::MentionLengthMean, summary(P::MeanMentionLength).mean);

    let numbers = summary(P::NumberOfNumbers);
    v.set(A::NumberOfNumbersMean, numbers.mean);
    v.set(A::NumberOfNumbersStd, numbers.std);

    let sentences = summary(P::NumberOfSentences);
    v.set(A::NumberOfSentencesMean, sentences.mean);
    v.set(A::NumberOfSentencesStd, sentences.std);
    v.set(A::WordsPerSentenceMean, summary(P::MeanWordsPerSentence).mean);
    let words = summary(P::NumberOfWords);
    v.set(A::NumberOfWordsMean, words.mean);
    v.set(A::NumberOfWordsStd, words.std);

    let emojis = summary(P::NumberOfEmojis);
    v.set(A::NumberOfEmojisMean, emojis.mean);
    v.set(A::NumberOfEmojisStd, emojis.std);

    let lengths = summary(P::TweetTextLength);
    v.set(A::TweetTextLengthMean, lengths.mean);
    v.set(A::TweetTextLengthStd, lengths.std);
}

fn count_chars(text: &str, pred: impl Fn(char) -> bool) -> f64 {
    text.chars().filter(|c| pred(*c)).count() as f64
}
