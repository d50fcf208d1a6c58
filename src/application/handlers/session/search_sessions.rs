//! SearchSessionsHandler - Filtered, ranked session discovery.
//!
//! Runs the three search stages in order: the repository evaluates the
//! filters, the requested strategy ranks the survivors, and the viewer's
//! own participation is annotated last.

use std::sync::Arc;

use crate::domain::foundation::{Clock, UserId};
use crate::domain::search::{
    annotate_participation, RankingStrategy, SessionFilters, SessionSearchResult,
};
use crate::domain::session::{Coordinate, SessionError};
use crate::ports::SessionRepository;

/// Query for a session search.
#[derive(Debug, Clone, Default)]
pub struct SearchSessionsQuery {
    pub filters: SessionFilters,
    /// Strategy tag; unknown or missing tags rank by relevance.
    pub ranking_type: Option<String>,
    /// The searching user, if signed in.
    pub viewer: Option<UserId>,
}

/// Handler for session search.
pub struct SearchSessionsHandler {
    repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl SearchSessionsHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        query: SearchSessionsQuery,
    ) -> Result<Vec<SessionSearchResult>, SessionError> {
        let filters = query.filters;
        validate_filters(&filters)?;
        if filters.has_unanchored_radius() {
            tracing::debug!(
                max_distance = ?filters.max_distance,
                "max_distance given without user_location; radius ignored"
            );
        }

        let candidates = self.repository.find_by_filters(&filters).await?;
        let strategy = RankingStrategy::from_tag(query.ranking_type.as_deref());
        let ranked = strategy.rank(candidates, &filters, &self.clock.now());
        let results = annotate_participation(ranked, query.viewer.as_ref());

        tracing::debug!(
            strategy = %strategy,
            results = results.len(),
            "session search completed"
        );
        Ok(results)
    }
}

fn validate_filters(filters: &SessionFilters) -> Result<(), SessionError> {
    if let Some(max) = filters.max_distance {
        if !max.is_finite() || max < 0.0 {
            return Err(SessionError::validation(
                "max_distance",
                "max_distance must be a non-negative number of kilometres",
            ));
        }
    }
    if let Some(origin) = filters.user_location {
        Coordinate::validated(origin.latitude, origin.longitude)
            .map_err(|e| SessionError::validation(e.field(), e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStudyStore;
    use crate::application::handlers::test_support::{
        fixed_clock, now, session_on, user, FailingSessionRepository,
    };
    use crate::domain::foundation::{SessionId, Timestamp};
    use crate::domain::session::{
        Location, Participant, ParticipantStatus, SessionDetails, StudySession,
    };
    use chrono::{NaiveDate, NaiveTime};

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn session_at(subject: &str, tags: &[&str], date: NaiveDate, lat: f64, lon: f64) -> StudySession {
        StudySession::new(
            SessionId::new(),
            user("host"),
            SessionDetails {
                subject: subject.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                date,
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
                capacity: 5,
                location: Location::new("Campus", Coordinate::new(lat, lon), None).unwrap(),
                description: None,
            },
            now(),
        )
        .unwrap()
    }

    fn handler(sessions: Vec<StudySession>) -> SearchSessionsHandler {
        SearchSessionsHandler::new(
            Arc::new(InMemoryStudyStore::with_sessions(sessions)),
            fixed_clock(),
        )
    }

    #[tokio::test]
    async fn ranks_by_relevance_when_no_strategy_given() {
        let exact = session_at("Calculus", &[], march(20), 40.0, -74.0);
        let partial = session_at("Calculus II", &[], march(20), 40.0, -74.0);
        let search = handler(vec![partial, exact]);

        let results = search
            .handle(SearchSessionsQuery {
                filters: SessionFilters {
                    subject: Some("calculus".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            })
            .await
            .unwrap();

        let subjects: Vec<&str> = results.iter().map(|r| r.session.subject()).collect();
        assert_eq!(subjects, vec!["Calculus", "Calculus II"]);
        assert_eq!(results[0].relevance_score, Some(70.0));
        assert_eq!(results[1].relevance_score, Some(50.0));
    }

    #[tokio::test]
    async fn unknown_strategy_falls_back_to_relevance() {
        let search = handler(vec![session_at("Physics", &[], march(20), 40.0, -74.0)]);
        let query = |tag: &str| SearchSessionsQuery {
            filters: SessionFilters {
                subject: Some("Physics".to_string()),
                ..Default::default()
            },
            ranking_type: Some(tag.to_string()),
            viewer: None,
        };

        let bogus = search.handle(query("popularity")).await.unwrap();
        let relevance = search.handle(query("relevance")).await.unwrap();
        assert_eq!(bogus, relevance);
    }

    #[tokio::test]
    async fn distance_strategy_prefers_nearby_sessions() {
        let near = session_at("Near", &[], march(20), 40.0, -74.0);
        let far = session_at("Far", &[], march(20), 40.5, -74.0);
        let search = handler(vec![far, near]);

        let results = search
            .handle(SearchSessionsQuery {
                filters: SessionFilters {
                    user_location: Some(Coordinate::new(40.0, -74.0)),
                    ..Default::default()
                },
                ranking_type: Some("distance".to_string()),
                viewer: None,
            })
            .await
            .unwrap();

        assert_eq!(results[0].session.subject(), "Near");
        assert_eq!(results[0].distance, Some(0.0));
        assert!(results[1].distance.unwrap() > 50.0);
    }

    #[tokio::test]
    async fn max_distance_without_location_filters_nothing() {
        let search = handler(vec![
            session_at("A", &[], march(20), 10.0, 10.0),
            session_at("B", &[], march(20), -10.0, -10.0),
        ]);

        let results = search
            .handle(SearchSessionsQuery {
                filters: SessionFilters {
                    max_distance: Some(1.0),
                    ..Default::default()
                },
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.distance.is_none()));
    }

    #[tokio::test]
    async fn annotates_viewer_participation() {
        let mut requested = session_at("Requested", &[], march(20), 40.0, -74.0);
        requested
            .add_participant(Participant::request(
                *requested.id(),
                user("viewer"),
                Timestamp::now(),
            ))
            .unwrap();
        let untouched = session_at("Untouched", &[], march(20), 40.0, -74.0);
        let search = handler(vec![requested, untouched]);

        let results = search
            .handle(SearchSessionsQuery {
                viewer: Some(user("viewer")),
                ..Default::default()
            })
            .await
            .unwrap();

        for result in &results {
            match result.session.subject() {
                "Requested" => assert_eq!(
                    result.participation_status,
                    Some(Some(ParticipantStatus::Pending))
                ),
                _ => assert_eq!(result.participation_status, Some(None)),
            }
        }
    }

    #[tokio::test]
    async fn anonymous_search_is_not_annotated() {
        let search = handler(vec![session_on("host", "Biology", march(20), 3)]);
        let results = search.handle(SearchSessionsQuery::default()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].participation_status, None);
    }

    #[tokio::test]
    async fn time_strategy_uses_the_clock() {
        // Clock is 2025-03-01 12:00; the session starts 2025-03-02 00:00, so
        // days-until floors to 0 and the score is 100 + 50 + 10.
        let search = handler(vec![session_at("Soon", &[], march(2), 40.0, -74.0)]);
        let results = search
            .handle(SearchSessionsQuery {
                ranking_type: Some("time".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results[0].relevance_score, Some(160.0));
    }

    #[tokio::test]
    async fn rejects_negative_radius() {
        let search = handler(vec![]);
        let result = search
            .handle(SearchSessionsQuery {
                filters: SessionFilters {
                    max_distance: Some(-1.0),
                    user_location: Some(Coordinate::new(0.0, 0.0)),
                    ..Default::default()
                },
                ..Default::default()
            })
            .await;
        assert!(matches!(
            result,
            Err(SessionError::ValidationFailed { ref field, .. }) if field == "max_distance"
        ));
    }

    #[tokio::test]
    async fn surfaces_storage_failure() {
        let search = SearchSessionsHandler::new(Arc::new(FailingSessionRepository), fixed_clock());
        assert!(matches!(
            search.handle(SearchSessionsQuery::default()).await,
            Err(SessionError::Infrastructure(_))
        ));
    }
}
