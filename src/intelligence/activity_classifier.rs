// ABOUTME: Activity classification into a small display taxonomy plus relevance filtering
// ABOUTME: Evaluates ordered keyword rules against the type key and activity name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Activity Classifier
//!
//! Two pure functions over a [`RawActivity`]:
//!
//! - [`display_type`] picks a short label from [`DISPLAY_TYPES`]. Matching runs
//!   in stages (exact type key, keyword substring, name-word prefix of a
//!   single-word keyword); within a stage the rules are tried in table order
//!   and the first hit wins.
//! - [`is_relevant`] is a broader substring check against
//!   [`RELEVANT_KEYWORDS`]. An activity can be relevant without having a
//!   display label of its own (strength sessions, for example).

use crate::constants::activity_types::{
    DISPLAY_TYPES, MIN_PREFIX_TOKEN_LEN, OTHER_ACTIVITY, RELEVANT_KEYWORDS,
};
use crate::models::RawActivity;

/// Lowercased text fields an activity is classified by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationCorpus {
    /// Lowercased `typeKey`
    pub type_key: String,
    /// Lowercased `typeDisplayName`
    pub type_name: String,
    /// Lowercased activity name
    pub activity_name: String,
}

impl ClassificationCorpus {
    /// Extract the corpus from a raw activity
    #[must_use]
    pub fn from_raw(activity: &RawActivity) -> Self {
        Self {
            type_key: activity.type_key(),
            type_name: activity
                .type_display_name()
                .unwrap_or_default()
                .to_lowercase(),
            activity_name: activity.name_lowercase(),
        }
    }

    fn name_tokens(&self) -> impl Iterator<Item = &str> {
        self.activity_name
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() >= MIN_PREFIX_TOKEN_LEN)
    }
}

/// One `(keyword, label)` entry of the display table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRule {
    /// Canonical type key
    pub keyword: &'static str,
    /// Display label
    pub label: &'static str,
}

impl DisplayRule {
    /// Keyword with underscores turned into spaces (`trail_running` -> `trail running`)
    fn spaced_keyword(self) -> String {
        self.keyword.replace('_', " ")
    }

    fn matches_exact_key(self, corpus: &ClassificationCorpus) -> bool {
        corpus.type_key == self.keyword
    }

    fn matches_substring(self, corpus: &ClassificationCorpus) -> bool {
        let keyword = self.spaced_keyword();
        corpus.type_key.contains(&keyword) || corpus.activity_name.contains(&keyword)
    }

    /// A shortened name word (`trek`, `run`) for a single-word keyword only;
    /// compound keywords and type-key fragments never match here
    fn matches_token_prefix(self, corpus: &ClassificationCorpus) -> bool {
        !self.keyword.contains('_')
            && corpus
                .name_tokens()
                .any(|token| self.keyword.starts_with(token))
    }
}

type RuleMatcher = fn(DisplayRule, &ClassificationCorpus) -> bool;

/// Matching stages, strongest first
const MATCH_STAGES: [RuleMatcher; 3] = [
    DisplayRule::matches_exact_key,
    DisplayRule::matches_substring,
    DisplayRule::matches_token_prefix,
];

fn display_rules() -> impl Iterator<Item = DisplayRule> {
    DISPLAY_TYPES
        .iter()
        .map(|&(keyword, label)| DisplayRule { keyword, label })
}

/// Human-readable activity type label
///
/// Falls back to the raw type's display name, then to `"Other Activity"`.
#[must_use]
pub fn display_type(activity: &RawActivity) -> String {
    let corpus = ClassificationCorpus::from_raw(activity);

    MATCH_STAGES
        .iter()
        .find_map(|matcher| display_rules().find(|&rule| matcher(rule, &corpus)))
        .map_or_else(
            || {
                activity
                    .type_display_name()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(OTHER_ACTIVITY)
                    .to_owned()
            },
            |rule| rule.label.to_owned(),
        )
}

/// Whether the activity belongs to the cardio/outdoor category
#[must_use]
pub fn is_relevant(activity: &RawActivity) -> bool {
    let corpus = ClassificationCorpus::from_raw(activity);
    RELEVANT_KEYWORDS.iter().any(|keyword| {
        corpus.type_key.contains(keyword)
            || corpus.type_name.contains(keyword)
            || corpus.activity_name.contains(keyword)
    })
}
