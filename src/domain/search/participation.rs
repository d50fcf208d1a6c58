//! Attaches the viewer's own join-request status to search results.

use super::SessionSearchResult;
use crate::domain::foundation::UserId;

/// Annotate each result with the viewer's participation status.
///
/// Anonymous viewers (`None`) get no annotation at all. A known viewer gets
/// `Some(status)` where they have a request on the session and `Some(None)`
/// where they do not.
pub fn annotate_participation(
    results: Vec<SessionSearchResult>,
    viewer: Option<&UserId>,
) -> Vec<SessionSearchResult> {
    let Some(viewer) = viewer else {
        return results;
    };

    results
        .into_iter()
        .map(|mut result| {
            let status = result.session.participant_for(viewer).map(|p| p.status());
            result.participation_status = Some(status);
            result
        })
        .collect()
}
