//! Prospect and field representative entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates
///
/// Latitude and longitude travel together: an entity either has a full
/// coordinate pair or none at all, which is why callers hold an
/// `Option<Coordinates>` rather than two independent optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Planar distance in raw degrees to another point.
    ///
    /// Not a geodesic distance. The calling-list routing intentionally
    /// compares prospects over small territory-sized areas, where the
    /// degree-space ordering matches the on-the-ground ordering closely
    /// enough for a visiting sequence.
    pub fn planar_distance(&self, other: &Coordinates) -> f64 {
        (self.latitude - other.latitude).hypot(self.longitude - other.longitude)
    }

    /// True when the pair is exactly (0, 0), which upstream systems use as
    /// a "not geocoded" sentinel.
    pub fn is_null_island(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// A sales prospect (read-only input to the engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    /// Prospect ID
    pub id: String,

    /// Sales territory this prospect belongs to
    pub territory: String,

    /// Specialty label (e.g. "Dental", "Chiropractor")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,

    /// Practice or contact name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Contact phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// When this prospect was last contacted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contact_date: Option<DateTime<Utc>>,

    /// Outcome label from the most recent call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_call_outcome: Option<String>,

    /// Geocoded location, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Prospect {
    /// Create a prospect in a territory
    pub fn new(id: impl Into<String>, territory: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            territory: territory.into(),
            specialty: None,
            name: None,
            phone: None,
            last_contact_date: None,
            last_call_outcome: None,
            coordinates: None,
        }
    }

    /// Set specialty
    pub fn specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    /// Set display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set contact phone
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set last contact timestamp
    pub fn last_contacted(mut self, at: DateTime<Utc>) -> Self {
        self.last_contact_date = Some(at);
        self
    }

    /// Set coordinates
    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates::new(latitude, longitude));
        self
    }

    /// Latitude used for geographic grouping; ungeocoded prospects sort
    /// as latitude 0.
    pub fn latitude_or_zero(&self) -> f64 {
        self.coordinates.map(|c| c.latitude).unwrap_or(0.0)
    }

    /// Whole days since last contact at `now`, if ever contacted
    pub fn days_since_contact(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_contact_date
            .map(|last| (now - last).num_days())
    }

    /// Get display name (name or the prospect ID)
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A field representative who works a territory from a home base
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRep {
    /// Field rep ID
    pub id: String,

    /// Territory this rep covers
    pub territory: String,

    /// Rep display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Home base used as the routing origin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_coordinates: Option<Coordinates>,
}

impl FieldRep {
    /// Create a field rep for a territory
    pub fn new(id: impl Into<String>, territory: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            territory: territory.into(),
            name: None,
            home_coordinates: None,
        }
    }

    /// Set display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set home base coordinates
    pub fn home(mut self, latitude: f64, longitude: f64) -> Self {
        self.home_coordinates = Some(Coordinates::new(latitude, longitude));
        self
    }

    /// Home coordinates usable as a routing origin.
    ///
    /// An unset pair and an exact (0, 0) pair both mean "no home base":
    /// upstream imports store ungeocoded reps as zeros.
    pub fn routing_origin(&self) -> Option<Coordinates> {
        self.home_coordinates.filter(|c| !c.is_null_island())
    }
}

/// A prospect paired with its priority score
///
/// Scores always land in `[100, 300]`: 100 base, up to 50 recency points,
/// up to 30 specialty points, capped at 300.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProspect {
    pub prospect: Prospect,
    pub score: u32,
}

impl ScoredProspect {
    pub fn new(prospect: Prospect, score: u32) -> Self {
        Self { prospect, score }
    }
}
