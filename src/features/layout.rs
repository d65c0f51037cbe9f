// Feature layouts: the ordered name → index tables for both vectors.
//
// Downstream classifiers were trained against these exact positions, so the
// enums below are the contract: variant order is vector order, and the string
// names are what gets written out next to the values. Never reorder.

use serde::ser::{Serialize, SerializeMap, Serializer};

macro_rules! feature_layout {
    (
        $(#[$enum_meta:meta])*
        $layout:ident, $vector:ident, $count:literal {
            $($variant:ident => $label:literal,)+
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(usize)]
        pub enum $layout {
            $($variant,)+
        }

        impl $layout {
            /// Every field, in vector order.
            pub const ALL: &'static [$layout] = &[$($layout::$variant,)+];
            pub const COUNT: usize = $count;

            pub fn index(self) -> usize {
                self as usize
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($layout::$variant => $label,)+
                }
            }

            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }

            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|f| f.name() == name)
            }
        }

        const _: () = assert!($layout::ALL.len() == $layout::COUNT);

        impl std::fmt::Display for $layout {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        /// Fixed-length feature vector laid out by the matching enum.
        #[derive(Debug, Clone, PartialEq)]
        pub struct $vector {
            values: [f64; $count],
        }

        impl $vector {
            pub(crate) fn filled(value: f64) -> Self {
                Self {
                    values: [value; $count],
                }
            }

            pub fn get(&self, field: $layout) -> f64 {
                self.values[field.index()]
            }

            pub(crate) fn set(&mut self, field: $layout, value: f64) {
                self.values[field.index()] = value;
            }

            pub(crate) fn set_flag(&mut self, field: $layout, flag: bool) {
                self.set(field, if flag { 1.0 } else { 0.0 });
            }

            pub fn as_slice(&self) -> &[f64] {
                &self.values
            }

            pub fn into_array(self) -> [f64; $count] {
                self.values
            }

            /// `(field, value)` pairs in vector order.
            pub fn iter(&self) -> impl Iterator<Item = ($layout, f64)> + '_ {
                $layout::ALL.iter().copied().zip(self.values.iter().copied())
            }
        }

        /// Serialized as an ordered `name → value` map. NaN becomes `null`.
        impl Serialize for $vector {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some($count))?;
                for (field, value) in self.iter() {
                    map.serialize_entry(field.name(), &value)?;
                }
                map.end()
            }
        }
    };
}

feature_layout! {
    /// Fields of a single post's feature vector.
    PostFeature, PostFeatureVector, 43 {
        RetweetCount => "retweet_count",
        FavoriteCount => "favorite_count",
        CoordinatesGroup => "coordinates_group",
        CountryCodeEncoded => "country_code_encoded",
        SourceEncoded => "source_encoded",
        IsRetweet => "is_retweet",
        IsAnswer => "is_answer",
        IsSelfReply => "is_self_reply",
        ContainsQuote => "contains_quote",
        NumberOfWithheldCountries => "number_of_withheld_countries",
        NumberOfPhotos => "number_of_photos",
        NumberOfVideos => "number_of_videos",
        NumberOfGifs => "number_of_gifs",
        TweetTextLength => "tweet_text_length",
        CleanedTweetTextLength => "cleaned_tweet_text_length",
        LangEncoded => "lang_encoded",
        ContainsPagination => "contains_pagination",
        NumberOfUrls => "number_of_urls",
        UrlMatchesUsername => "url_matches_username",
        UrlMatchesProfileUrl => "url_matches_profile_url",
        UrlPathMatchesText => "url_path_matches_text",
        ContainsOnlyUrls => "contains_only_urls",
        NumberOfHashtags => "number_of_hashtags",
        MinHashtagLength => "min_hashtag_length",
        MaxHashtagLength => "max_hashtag_length",
        MeanHashtagLength => "mean_hashtag_length",
        NumberOfMentions => "number_of_mentions",
        MinMentionLength => "min_mention_length",
        MaxMentionLength => "max_mention_length",
        MeanMentionLength => "mean_mention_length",
        NumberOfNumbers => "number_of_numbers",
        MinNumberLength => "min_number_length",
        MaxNumberLength => "max_number_length",
        MeanNumberLength => "mean_number_length",
        NumberOfSentences => "number_of_sentences",
        MinWordsPerSentence => "min_words_per_sentence",
        MaxWordsPerSentence => "max_words_per_sentence",
        MeanWordsPerSentence => "mean_words_per_sentence",
        NumberOfWords => "number_of_words",
        ContainsOnlyEmojis => "contains_only_emojis",
        NumberOfEmojis => "number_of_emojis",
        HourOfDay => "hour_of_day",
        DayOfWeek => "day_of_week",
    }
}

impl PostFeature {
    /// First field of the content-derived block used for text similarity.
    pub const CONTENT_START: PostFeature = PostFeature::ContainsPagination;
    /// Last field (inclusive) of the content-derived block.
    pub const CONTENT_END: PostFeature = PostFeature::NumberOfEmojis;
}

impl PostFeatureVector {
    /// The content-derived measurements, `contains_pagination..=number_of_emojis`.
    pub fn content(&self) -> &[f64] {
        &self.values[PostFeature::CONTENT_START.index()..=PostFeature::CONTENT_END.index()]
    }
}

feature_layout! {
    /// Fields of an account's feature vector: profile-only fields first, then
    /// the fields aggregated over the post history.
    AccountFeature, AccountFeatureVector, 105 {
        FollowersCount => "followers_count",
        FriendsCount => "friends_count",
        ListedCount => "listed_count",
        FavouritesCount => "favourites_count",
        StatusesCount => "statuses_count",
        Protected => "protected",
        Verified => "verified",
        DefaultProfile => "default_profile",
        DefaultProfileImage => "default_profile_image",
        AccountAgeDays => "account_age_days",
        AgePerStatusRatio => "age_per_status_ratio",
        FollowersFriendsRatio => "followers_friends_ratio",
        StatusesFavouritesRatio => "statuses_favourites_ratio",
        StatusesPerDay => "statuses_per_day",
        FollowersPerDay => "followers_per_day",
        FriendsPerDay => "friends_per_day",
        AccountCreatedHour => "account_created_hour",
        AccountCreatedWeekday => "account_created_weekday",
        UsernameLength => "username_length",
        UsernameStructure => "username_structure",
        UsernameContainsBot => "username_contains_bot",
        UsernameNumberOfDigits => "username_number_of_digits",
        UsernameNumberOfUnderscores => "username_number_of_underscores",
        UsernameNumberOfUppercase => "username_number_of_uppercase",
        NameLength => "name_length",
        NameNumberOfDigits => "name_number_of_digits",
        NameNumberOfEmojis => "name_number_of_emojis",
        NameContainsBot => "name_contains_bot",
        NameNumberOfWords => "name_number_of_words",
        NameNumberOfUppercase => "name_number_of_uppercase",
        NameEqualsUsername => "name_equals_username",
        DescriptionLength => "description_length",
        DescriptionNumberOfMentions => "description_number_of_mentions",
        DescriptionNumberOfUrls => "description_number_of_urls",
        DescriptionNumberOfHashtags => "description_number_of_hashtags",
        DescriptionNumberOfNumbers => "description_number_of_numbers",
        DescriptionNumberOfEmojis => "description_number_of_emojis",
        DescriptionContainsBot => "description_contains_bot",
        DescriptionNumberOfWords => "description_number_of_words",
        DescriptionNumberOfSentences => "description_number_of_sentences",
        HasProfileUrl => "has_profile_url",
        ProfileUrlService => "profile_url_service",
        ProfileUrlIsShortened => "profile_url_is_shortened",
        ProfileUrlHostContainsUsername => "profile_url_host_contains_username",
        ProfileUrlPathContainsUsername => "profile_url_path_contains_username",
        ProfileUrlHostContainsName => "profile_url_host_contains_name",
        ProfileUrlPathContainsName => "profile_url_path_contains_name",
        HasLocation => "has_location",
        LocationLength => "location_length",
        LocationNumberOfEmojis => "location_number_of_emojis",
        LocationContainsBot => "location_contains_bot",
        TweetTimeIntervalMean => "tweet_time_interval_mean",
        TweetTimeIntervalStd => "tweet_time_interval_std",
        OwnTweetsTextSimilarityMean => "own_tweets_text_similarity_mean",
        OwnTweetsTextSimilarityStd => "own_tweets_text_similarity_std",
        RetweetsTextSimilarityMean => "retweets_text_similarity_mean",
        RetweetsTextSimilarityStd => "retweets_text_similarity_std",
        MostFrequentCountry => "most_frequent_country",
        MostFrequentSource => "most_frequent_source",
        MostFrequentCoordinatesGroup => "most_frequent_coordinates_group",
        MostFrequentLang => "most_frequent_lang",
        NumberOfDifferentCountries => "number_of_different_countries",
        NumberOfDifferentSources => "number_of_different_sources",
        NumberOfDifferentLanguages => "number_of_different_languages",
        DifferentUserInteractions => "different_user_interactions",
        RetweetRatio => "retweet_ratio",
        AnswerRatio => "answer_ratio",
        SelfReplyRatio => "self_reply_ratio",
        QuoteRatio => "quote_ratio",
        RetweetCountMean => "retweet_count_mean",
        RetweetCountMax => "retweet_count_max",
        FavoriteCountMean => "favorite_count_mean",
        FavoriteCountMax => "favorite_count_max",
        PhotosMean => "photos_mean",
        VideosMean => "videos_mean",
        GifsMean => "gifs_mean",
        UrlUsernameMatchRatio => "url_username_match_ratio",
        UrlProfileUrlMatchRatio => "url_profile_url_match_ratio",
        UrlPathTextMatchRatio => "url_path_text_match_ratio",
        NumberOfUrlsMean => "number_of_urls_mean",
        NumberOfUrlsStd => "number_of_urls_std",
        OnlyUrlsRatio => "only_urls_ratio",
        OnlyEmojisRatio => "only_emojis_ratio",
        PaginationRatio => "pagination_ratio",
        NumberOfHashtagsMean => "number_of_hashtags_mean",
        NumberOfHashtagsStd => "number_of_hashtags_std",
        HashtagLengthMin => "hashtag_length_min",
        HashtagLengthMax => "hashtag_length_max",
        HashtagLengthMean => "hashtag_length_mean",
        NumberOfMentionsMean => "number_of_mentions_mean",
        NumberOfMentionsStd => "number_of_mentions_std",
        MentionLengthMin => "mention_length_min",
        MentionLengthMax => "mention_length_max",
        MentionLengthMean => "mention_length_mean",
        NumberOfNumbersMean => "number_of_numbers_mean",
        NumberOfNumbersStd => "number_of_numbers_std",
        NumberOfSentencesMean => "number_of_sentences_mean",
        NumberOfSentencesStd => "number_of_sentences_std",
        WordsPerSentenceMean => "words_per_sentence_mean",
        NumberOfWordsMean => "number_of_words_mean",
        NumberOfWordsStd => "number_of_words_std",
        NumberOfEmojisMean => "number_of_emojis_mean",
        NumberOfEmojisStd => "number_of_emojis_std",
        TweetTextLengthMean => "tweet_text_length_mean",
        TweetTextLengthStd => "tweet_text_length_std",
    }
}

impl AccountFeature {
    /// First field that is aggregated over the post history. Everything from
    /// here to the end is NaN when the history is empty.
    pub const HISTORY_START: AccountFeature = AccountFeature::TweetTimeIntervalMean;

    pub fn is_post_derived(self) -> bool {
        self >= Self::HISTORY_START
    }
}
