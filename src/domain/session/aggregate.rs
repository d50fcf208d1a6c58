//! Study session aggregate entity.
//!
//! A session is a hosted meetup with a subject, a schedule on a single
//! calendar day, a venue, and a capacity. It carries the join requests
//! made against it so search can reason about availability and the
//! viewer's own participation without further lookups.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Location, Participant};
use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, Timestamp, UserId, ValidationError,
};

/// Maximum length for session subject.
pub const MAX_SUBJECT_LENGTH: usize = 200;

/// Host-supplied details for a new session.
#[derive(Debug, Clone)]
pub struct SessionDetails {
    pub subject: String,
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: u32,
    pub location: Location,
    pub description: Option<String>,
}

/// Study session aggregate.
///
/// # Invariants
///
/// - `subject` is non-empty, at most 200 characters
/// - `capacity` is at least 1
/// - `end_time` is after `start_time`
/// - at most one participant per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    id: SessionId,
    host_id: UserId,
    subject: String,
    tags: Vec<String>,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    capacity: u32,
    location: Location,
    description: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    participants: Vec<Participant>,
}

impl StudySession {
    /// Create a new session with no participants.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if subject, capacity or times are invalid
    pub fn new(
        id: SessionId,
        host_id: UserId,
        details: SessionDetails,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let subject = Self::validate_subject(&details.subject)?;
        if details.capacity == 0 {
            return Err(DomainError::validation(
                "capacity",
                "Capacity must be at least 1",
            ));
        }
        if details.end_time <= details.start_time {
            return Err(DomainError::validation(
                "end_time",
                "End time must be after start time",
            ));
        }

        Ok(Self {
            id,
            host_id,
            subject,
            tags: normalize_tags(details.tags),
            date: details.date,
            start_time: details.start_time,
            end_time: details.end_time,
            capacity: details.capacity,
            location: details.location,
            description: details
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            created_at: now,
            updated_at: now,
            participants: Vec::new(),
        })
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        host_id: UserId,
        details: SessionDetails,
        created_at: Timestamp,
        updated_at: Timestamp,
        participants: Vec<Participant>,
    ) -> Self {
        Self {
            id,
            host_id,
            subject: details.subject,
            tags: details.tags,
            date: details.date,
            start_time: details.start_time,
            end_time: details.end_time,
            capacity: details.capacity,
            location: details.location,
            description: details.description,
            created_at,
            updated_at,
            participants,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn host_id(&self) -> &UserId {
        &self.host_id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Availability
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of approved participants.
    pub fn approved_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_approved()).count()
    }

    /// Capacity minus approved participants. Negative when over-booked.
    pub fn available_spots(&self) -> i64 {
        i64::from(self.capacity) - self.approved_count() as i64
    }

    pub fn has_capacity(&self) -> bool {
        self.available_spots() > 0
    }

    pub fn is_host(&self, user_id: &UserId) -> bool {
        &self.host_id == user_id
    }

    /// The join request made by `user_id`, if any.
    pub fn participant_for(&self, user_id: &UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id() == user_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach a join request to this session.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the requester hosts this session
    /// - `AlreadyRequested` if the user already has a request here
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), DomainError> {
        if self.is_host(participant.user_id()) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Hosts cannot request to join their own session",
            ));
        }
        if self.participant_for(participant.user_id()).is_some() {
            return Err(DomainError::new(
                ErrorCode::AlreadyRequested,
                "Already requested to join this session",
            ));
        }
        self.updated_at = *participant.requested_at();
        self.participants.push(participant);
        Ok(())
    }

    /// Replace a stored participant with an updated copy.
    ///
    /// # Errors
    ///
    /// - `ParticipantNotFound` if no request with that id is attached
    /// - `SessionFull` if the copy newly approves a request and no spot is left
    pub fn replace_participant(&mut self, participant: Participant) -> Result<(), DomainError> {
        let has_capacity = self.has_capacity();
        let slot = self
            .participants
            .iter_mut()
            .find(|p| p.id() == participant.id())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ParticipantNotFound,
                    format!("Participant not found: {}", participant.id()),
                )
            })?;
        if participant.is_approved() && !slot.is_approved() && !has_capacity {
            return Err(DomainError::new(
                ErrorCode::SessionFull,
                "Session has no spots left",
            ));
        }
        *slot = participant;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_subject(subject: &str) -> Result<String, DomainError> {
        let trimmed = subject.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("subject").into());
        }
        if trimmed.chars().count() > MAX_SUBJECT_LENGTH {
            return Err(DomainError::validation(
                "subject",
                format!("Subject must be {} characters or less", MAX_SUBJECT_LENGTH),
            ));
        }
        Ok(trimmed.to_string())
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if !normalized.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}
