//! Client domain model.
//!
//! A client is the sole entity of the system: an externally-identified
//! record that lives in one of three workflow lanes and holds a 1-based
//! rank within that lane.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a client.
///
/// Ids are caller-supplied integers, never generated by the store, and
/// immutable for the life of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientId(i64);

impl ClientId {
    /// Creates a `ClientId` from a raw integer.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Parses an id from its string form (e.g. a path parameter).
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::IdNotANumber`] if the input does not
    /// parse as an integer. Existence of the id is a separate check that
    /// requires a store lookup.
    pub fn parse(raw: &str) -> Result<Self, ValidateError> {
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ValidateError::IdNotANumber(raw.to_string()))
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A client's 1-based position within its lane.
///
/// Rank 1 is the highest priority (displayed first). The reorder engine
/// only ever produces ranks in `1..=N` for a lane of `N` members; the
/// create path stores whatever it is given, so arbitrary integers remain
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(i64);

impl Rank {
    /// Creates a `Rank` from a raw integer.
    #[must_use]
    pub const fn new(rank: i64) -> Self {
        Self(rank)
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// =============================================================================
// Enums
// =============================================================================

/// The workflow lane a client occupies.
///
/// Variant order is the canonical lane order used when sorting a
/// snapshot by (lane, rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lane {
    /// Work that has not been started.
    Backlog,
    /// Work currently underway.
    InProgress,
    /// Finished work.
    Complete,
}

impl Lane {
    /// Returns the wire/database string for this lane.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in-progress",
            Self::Complete => "complete",
        }
    }

    /// Parses a lane from its wire string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::UnknownStatus`] for any value outside
    /// the three lane names.
    pub fn parse(raw: &str) -> Result<Self, ValidateError> {
        match raw {
            "backlog" => Ok(Self::Backlog),
            "in-progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            other => Err(ValidateError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for Lane {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl std::str::FromStr for Lane {
    type Err = ValidateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Caller-supplied unique identifier.
    pub id: ClientId,
    /// Display name, opaque to the core.
    pub name: String,
    /// Free-form description, opaque to the core.
    pub description: String,
    /// Workflow lane (serialized as `status`).
    pub lane: Lane,
    /// Position within the lane (serialized as `priority`).
    pub rank: Rank,
}

impl Client {
    /// Creates a new client record with the given fields, verbatim.
    #[must_use]
    pub fn new(
        id: ClientId,
        name: impl Into<String>,
        description: impl Into<String>,
        lane: Lane,
        rank: Rank,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            lane,
            rank,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors produced while validating caller input.
///
/// Every variant is a caller error and maps to a 400 response at the
/// API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// The id input did not parse as an integer.
    #[error("id must be an integer, got {0:?}")]
    IdNotANumber(String),

    /// A well-formed id that resolves to no client.
    #[error("no client with id {0}")]
    NotFound(ClientId),

    /// The priority input did not parse as an integer.
    #[error("priority must be an integer, got {0:?}")]
    PriorityNotANumber(String),

    /// A status value outside the three lane names.
    #[error("unknown status {0:?}")]
    UnknownStatus(String),
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // -------------------------------------------------------------------------
    // ClientId Tests
    // -------------------------------------------------------------------------

    #[rstest]
    #[case("1", 1)]
    #[case("42", 42)]
    #[case("-7", -7)]
    #[case(" 3 ", 3)]
    fn test_client_id_parse_valid(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(ClientId::parse(raw), Ok(ClientId::new(expected)));
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    #[case("1x")]
    fn test_client_id_parse_invalid(#[case] raw: &str) {
        assert_eq!(
            ClientId::parse(raw),
            Err(ValidateError::IdNotANumber(raw.to_string()))
        );
    }

    // -------------------------------------------------------------------------
    // Lane Tests
    // -------------------------------------------------------------------------

    #[rstest]
    #[case("backlog", Lane::Backlog)]
    #[case("in-progress", Lane::InProgress)]
    #[case("complete", Lane::Complete)]
    fn test_lane_parse_valid(#[case] raw: &str, #[case] expected: Lane) {
        assert_eq!(Lane::parse(raw), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case("done")]
    #[case("Backlog")]
    #[case("in_progress")]
    #[case("")]
    fn test_lane_parse_invalid(#[case] raw: &str) {
        assert_eq!(
            Lane::parse(raw),
            Err(ValidateError::UnknownStatus(raw.to_string()))
        );
    }

    #[rstest]
    fn test_lane_order_is_workflow_order() {
        assert!(Lane::Backlog < Lane::InProgress);
        assert!(Lane::InProgress < Lane::Complete);
    }

    #[rstest]
    fn test_lane_serde_wire_format() {
        let json = serde_json::to_string(&Lane::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let lane: Lane = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(lane, Lane::Complete);
    }

    // -------------------------------------------------------------------------
    // Client Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_client_new_keeps_fields_verbatim() {
        let client = Client::new(
            ClientId::new(9),
            "Acme",
            "An account",
            Lane::Backlog,
            Rank::new(99),
        );

        assert_eq!(client.id.get(), 9);
        assert_eq!(client.name, "Acme");
        assert_eq!(client.description, "An account");
        assert_eq!(client.lane, Lane::Backlog);
        // No normalization on construction: out-of-range ranks survive.
        assert_eq!(client.rank.get(), 99);
    }
}
