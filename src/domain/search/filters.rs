//! Search filters and the predicates that evaluate them.
//!
//! Every supplied field narrows the result (AND semantics); unsupplied
//! fields impose nothing. A blank subject or an empty tag list counts as
//! unsupplied.
//!
//! Storage adapters that can push some predicates into their own query do
//! so and run the remaining ones, then [`apply_distance`], in memory.
//! Adapters that cannot simply call [`evaluate`]. Either way each predicate
//! runs exactly once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::distance::haversine_km;
use super::SessionSearchResult;
use crate::domain::session::{Coordinate, StudySession};

/// Criteria a searcher can narrow sessions by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionFilters {
    /// Case-insensitive substring of the subject.
    #[serde(default)]
    pub subject: Option<String>,

    /// Match-any tag list, compared case-insensitively.
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Exact calendar day.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Radius in kilometres around `user_location`.
    #[serde(default, alias = "maxDistance")]
    pub max_distance: Option<f64>,

    /// The viewer's position. Needed for any distance computation.
    #[serde(default, alias = "userLocation")]
    pub user_location: Option<Coordinate>,
}

impl SessionFilters {
    /// Lower-cased subject needle, if a non-blank subject was supplied.
    pub fn subject_needle(&self) -> Option<String> {
        self.subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Lower-cased, non-blank filter tags. Empty when no tag filter applies.
    pub fn tag_needles(&self) -> Vec<String> {
        self.tags
            .iter()
            .flatten()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    /// True when `max_distance` was given without a location to measure from.
    ///
    /// Such a radius is ignored.
    pub fn has_unanchored_radius(&self) -> bool {
        self.max_distance.is_some() && self.user_location.is_none()
    }
}

/// Case-insensitive substring match on the subject.
pub fn matches_subject(session: &StudySession, filters: &SessionFilters) -> bool {
    match filters.subject_needle() {
        Some(needle) => session.subject().to_lowercase().contains(&needle),
        None => true,
    }
}

/// True when any session tag equals a wanted tag, ignoring case.
pub fn matches_tags(session: &StudySession, filters: &SessionFilters) -> bool {
    let wanted = filters.tag_needles();
    if wanted.is_empty() {
        return true;
    }
    session
        .tags()
        .iter()
        .any(|tag| wanted.contains(&tag.to_lowercase()))
}

/// Exact calendar-day match.
pub fn matches_date(session: &StudySession, filters: &SessionFilters) -> bool {
    filters.date.map_or(true, |date| session.date() == date)
}

/// Subject, tag, and date predicates combined.
pub fn matches_attributes(session: &StudySession, filters: &SessionFilters) -> bool {
    matches_subject(session, filters) && matches_tags(session, filters) && matches_date(session, filters)
}

/// Attach distances and enforce the radius.
///
/// With a viewer location every candidate gets a distance, and when a
/// radius is also given only candidates within it survive. Without a
/// location the candidates pass through untouched.
pub fn apply_distance(
    candidates: Vec<SessionSearchResult>,
    filters: &SessionFilters,
) -> Vec<SessionSearchResult> {
    let Some(origin) = filters.user_location else {
        return candidates;
    };

    candidates
        .into_iter()
        .map(|result| {
            let distance = haversine_km(origin, result.session.location().coordinate());
            result.with_distance(distance)
        })
        .filter(|result| match (filters.max_distance, result.distance) {
            (Some(max), Some(distance)) => distance <= max,
            _ => true,
        })
        .collect()
}

/// Run every predicate over an in-memory session set.
pub fn evaluate<I>(sessions: I, filters: &SessionFilters) -> Vec<SessionSearchResult>
where
    I: IntoIterator<Item = StudySession>,
{
    let candidates = sessions
        .into_iter()
        .filter(|session| matches_attributes(session, filters))
        .map(SessionSearchResult::new)
        .collect();
    apply_distance(candidates, filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SessionId, Timestamp, UserId};
    use crate::domain::session::{Location, SessionDetails};
    use chrono::NaiveTime;
    use proptest::prelude::*;

    const CAMPUS: Coordinate = Coordinate {
        latitude: 40.7128,
        longitude: -74.006,
    };

    fn session(subject: &str, tags: &[&str], day: u32, lat: f64, lon: f64) -> StudySession {
        StudySession::new(
            SessionId::new(),
            UserId::new("host").unwrap(),
            SessionDetails {
                subject: subject.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
                start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                capacity: 4,
                location: Location::new("Campus", Coordinate::new(lat, lon), None).unwrap(),
                description: None,
            },
            Timestamp::now(),
        )
        .unwrap()
    }

    fn catalog() -> Vec<StudySession> {
        vec![
            session("Calculus II", &["math", "Exam"], 10, 40.7128, -74.006),
            session("Organic Chemistry", &["chem"], 11, 40.7300, -74.000),
            session("Linear Algebra", &["math"], 10, 41.5, -74.0),
            session("Intro to Poetry", &[], 12, 40.7130, -74.007),
        ]
    }

    fn subjects(results: &[SessionSearchResult]) -> Vec<String> {
        let mut names: Vec<String> = results
            .iter()
            .map(|r| r.session.subject().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn empty_filters_keep_everything_without_distance() {
        let results = evaluate(catalog(), &SessionFilters::default());
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.distance.is_none()));
    }

    #[test]
    fn subject_is_case_insensitive_substring() {
        let filters = SessionFilters {
            subject: Some("CALC".to_string()),
            ..Default::default()
        };
        assert_eq!(subjects(&evaluate(catalog(), &filters)), vec!["Calculus II"]);
    }

    #[test]
    fn blank_subject_is_ignored() {
        let filters = SessionFilters {
            subject: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(evaluate(catalog(), &filters).len(), 4);
    }

    #[test]
    fn tags_match_any_case_insensitively() {
        let filters = SessionFilters {
            tags: Some(vec!["exam".to_string(), "CHEM".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            subjects(&evaluate(catalog(), &filters)),
            vec!["Calculus II", "Organic Chemistry"]
        );
    }

    #[test]
    fn tags_require_whole_tag_equality() {
        let filters = SessionFilters {
            tags: Some(vec!["mat".to_string()]),
            ..Default::default()
        };
        assert!(evaluate(catalog(), &filters).is_empty());
    }

    #[test]
    fn empty_tag_list_is_ignored() {
        let filters = SessionFilters {
            tags: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(evaluate(catalog(), &filters).len(), 4);
    }

    #[test]
    fn date_is_exact_day() {
        let filters = SessionFilters {
            date: NaiveDate::from_ymd_opt(2025, 3, 10),
            ..Default::default()
        };
        assert_eq!(
            subjects(&evaluate(catalog(), &filters)),
            vec!["Calculus II", "Linear Algebra"]
        );
    }

    #[test]
    fn location_alone_attaches_distance_to_every_result() {
        let filters = SessionFilters {
            user_location: Some(CAMPUS),
            ..Default::default()
        };
        let results = evaluate(catalog(), &filters);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.distance.is_some()));
    }

    #[test]
    fn radius_keeps_only_nearby_sessions() {
        let filters = SessionFilters {
            max_distance: Some(5.0),
            user_location: Some(CAMPUS),
            ..Default::default()
        };
        let results = evaluate(catalog(), &filters);
        assert_eq!(
            subjects(&results),
            vec!["Calculus II", "Intro to Poetry", "Organic Chemistry"]
        );
        assert!(results.iter().all(|r| r.distance.unwrap() <= 5.0));
    }

    #[test]
    fn radius_without_location_is_a_no_op() {
        let filters = SessionFilters {
            max_distance: Some(5.0),
            ..Default::default()
        };
        assert!(filters.has_unanchored_radius());
        let results = evaluate(catalog(), &filters);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.distance.is_none()));
    }

    #[test]
    fn predicates_combine_with_and() {
        let filters = SessionFilters {
            tags: Some(vec!["math".to_string()]),
            max_distance: Some(5.0),
            user_location: Some(CAMPUS),
            ..Default::default()
        };
        assert_eq!(subjects(&evaluate(catalog(), &filters)), vec!["Calculus II"]);
    }

    #[test]
    fn filters_deserialize_from_partial_json() {
        let json = r#"{"subject":"calc","max_distance":2.5,"user_location":{"latitude":1.0,"longitude":2.0}}"#;
        let filters: SessionFilters = serde_json::from_str(json).unwrap();
        assert_eq!(filters.subject.as_deref(), Some("calc"));
        assert_eq!(filters.max_distance, Some(2.5));
        assert_eq!(filters.user_location, Some(Coordinate::new(1.0, 2.0)));
        assert!(filters.tags.is_none());
    }

    fn arb_filters() -> impl Strategy<Value = SessionFilters> {
        (
            prop::option::of(prop::sample::select(vec!["calc", "chem", "algebra", "poetry", "II"])),
            prop::option::of(prop::collection::vec(
                prop::sample::select(vec!["math", "exam", "chem", "art"]),
                0..3,
            )),
            prop::option::of(10u32..13),
            prop::option::of(0.5f64..200.0),
            any::<bool>(),
        )
            .prop_map(|(subject, tags, day, max_distance, located)| SessionFilters {
                subject: subject.map(str::to_string),
                tags: tags.map(|t| t.into_iter().map(str::to_string).collect()),
                date: day.and_then(|d| NaiveDate::from_ymd_opt(2025, 3, d)),
                max_distance,
                user_location: located.then_some(CAMPUS),
            })
    }

    proptest! {
        #[test]
        fn result_is_exactly_sessions_passing_every_predicate(filters in arb_filters()) {
            let sessions = catalog();
            let results = evaluate(sessions.clone(), &filters);
            for session in &sessions {
                let within_radius = match (filters.max_distance, filters.user_location) {
                    (Some(max), Some(origin)) => {
                        haversine_km(origin, session.location().coordinate()) <= max
                    }
                    _ => true,
                };
                let expected = matches_attributes(session, &filters) && within_radius;
                let present = results.iter().any(|r| r.session.id() == session.id());
                prop_assert_eq!(expected, present);
            }
        }

        #[test]
        fn dropping_a_predicate_never_shrinks_the_result(filters in arb_filters()) {
            let sessions = catalog();
            let full = evaluate(sessions.clone(), &filters).len();

            let relaxations = [
                SessionFilters { subject: None, ..filters.clone() },
                SessionFilters { tags: None, ..filters.clone() },
                SessionFilters { date: None, ..filters.clone() },
                SessionFilters { max_distance: None, ..filters.clone() },
            ];
            for relaxed in relaxations.iter() {
                prop_assert!(evaluate(sessions.clone(), relaxed).len() >= full);
            }
        }
    }
}
