//! Ranking strategies for search results.
//!
//! The strategy set is closed, so it is an enum dispatched by `match`
//! rather than a trait hierarchy. Every strategy assigns a non-negative
//! score to each result and orders results by score, highest first, with
//! ties broken by session id so output is reproducible.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use super::{SessionFilters, SessionSearchResult};
use crate::domain::foundation::Timestamp;

/// Which ordering a searcher asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStrategy {
    /// Textual match quality, availability, mild proximity penalty.
    #[default]
    Relevance,
    /// Proximity first.
    Distance,
    /// Soonest first.
    Time,
}

/// Pre-lowered filter text so scoring does not re-normalize per session.
struct Needles {
    subject: Option<String>,
    tags: Vec<String>,
}

impl Needles {
    fn from_filters(filters: &SessionFilters) -> Self {
        Self {
            subject: filters.subject_needle(),
            tags: filters.tag_needles(),
        }
    }
}

impl RankingStrategy {
    /// Pick a strategy by its tag.
    ///
    /// Unknown or missing tags fall back to [`RankingStrategy::Relevance`];
    /// this never fails.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("distance") => RankingStrategy::Distance,
            Some("time") => RankingStrategy::Time,
            _ => RankingStrategy::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingStrategy::Relevance => "relevance",
            RankingStrategy::Distance => "distance",
            RankingStrategy::Time => "time",
        }
    }

    /// Score every result and sort by score descending.
    pub fn rank(
        &self,
        results: Vec<SessionSearchResult>,
        filters: &SessionFilters,
        now: &Timestamp,
    ) -> Vec<SessionSearchResult> {
        let needles = Needles::from_filters(filters);
        let mut ranked: Vec<SessionSearchResult> = results
            .into_iter()
            .map(|mut result| {
                result.relevance_score = Some(self.score_with(&result, &needles, now));
                result
            })
            .collect();
        ranked.sort_by(by_score_then_id);
        ranked
    }

    /// Score a single result. Always `>= 0`.
    pub fn score(
        &self,
        result: &SessionSearchResult,
        filters: &SessionFilters,
        now: &Timestamp,
    ) -> f64 {
        self.score_with(result, &Needles::from_filters(filters), now)
    }

    fn score_with(&self, result: &SessionSearchResult, needles: &Needles, now: &Timestamp) -> f64 {
        let raw = match self {
            RankingStrategy::Relevance => relevance_score(result, needles),
            RankingStrategy::Distance => distance_score(result, now),
            RankingStrategy::Time => time_score(result, now),
        };
        raw.max(0.0)
    }
}

impl fmt::Display for RankingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn relevance_score(result: &SessionSearchResult, needles: &Needles) -> f64 {
    let session = &result.session;
    let mut score = 0.0;

    if let Some(needle) = &needles.subject {
        let subject = session.subject().to_lowercase();
        if subject == *needle {
            score += 50.0;
        } else if subject.contains(needle.as_str()) {
            score += 30.0;
        }
    }

    if !needles.tags.is_empty() {
        let matching = session
            .tags()
            .iter()
            .map(|tag| tag.to_lowercase())
            .filter(|tag| needles.tags.iter().any(|wanted| tag.contains(wanted.as_str())))
            .count();
        score += 15.0 * matching as f64;
    }

    if session.has_capacity() {
        score += 10.0;
    } else {
        score -= 50.0;
    }

    // Baseline for every candidate.
    score += 10.0;

    if let Some(distance) = result.distance {
        score -= distance * 2.0;
    }

    score
}

fn distance_score(result: &SessionSearchResult, now: &Timestamp) -> f64 {
    let session = &result.session;
    let mut score = 100.0;

    if let Some(distance) = result.distance {
        score -= distance * 5.0;
    }

    if now.days_until(session.date()) <= 7 {
        score += 10.0;
    }

    let spots = session.available_spots();
    if spots > 0 {
        score += 2.0 * spots as f64;
    }

    score
}

fn time_score(result: &SessionSearchResult, now: &Timestamp) -> f64 {
    let session = &result.session;
    let mut score = 100.0;

    let days_until = now.days_until(session.date());
    score += match days_until {
        d if d <= 1 => 50.0,
        d if d <= 3 => 30.0,
        d if d <= 7 => 15.0,
        d => -(d as f64),
    };

    if session.has_capacity() {
        score += 10.0;
    }

    score
}

fn by_score_then_id(a: &SessionSearchResult, b: &SessionSearchResult) -> Ordering {
    let a_score = a.relevance_score.unwrap_or(0.0);
    let b_score = b.relevance_score.unwrap_or(0.0);
    b_score
        .total_cmp(&a_score)
        .then_with(|| a.session.id().cmp(b.session.id()))
}
