use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Donor identifier as issued by the donor registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonorId(pub i32);

/// NGO identifier. Zero is treated as "no NGO" on incoming payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NgoId(pub i32);

/// Storage-assigned donation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonationId(pub i32);

impl fmt::Display for DonorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for NgoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DonationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    pub id: DonorId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ngo {
    pub id: NgoId,
    pub ngo_name: String,
}

/// NGO reference as submitted by clients; only the id is honoured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgoRef {
    #[serde(default)]
    pub id: i32,
}

/// Lifecycle state of a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationStatus {
    Pending,
    Confirmed,
    Scheduled,
    PickedUp,
    InTransit,
    Delivered,
    Completed,
}

impl DonationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Scheduled => "SCHEDULED",
            Self::PickedUp => "PICKED_UP",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Descriptive fields shared by drafts and stored donations. Updates replace all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationDetails {
    pub donation_type: Option<String>,
    pub food_name: Option<String>,
    pub meal_type: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub quantity: Option<String>,
    pub city: Option<String>,
    pub expiry_date_time: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub amount: Option<String>,
    pub clothes_type: Option<String>,
    pub item_name: Option<String>,
}

impl DonationDetails {
    pub fn is_money(&self) -> bool {
        self.donation_type
            .as_deref()
            .is_some_and(|kind| kind.eq_ignore_ascii_case("MONEY"))
    }

    pub(crate) fn quantity_is_blank(&self) -> bool {
        self.quantity.as_deref().map_or(true, str::is_empty)
    }
}

/// Incoming create/update payload. Any `donor` key in the JSON is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationDraft {
    #[serde(flatten)]
    pub details: DonationDetails,
    pub ngo: Option<NgoRef>,
    pub status: Option<DonationStatus>,
    pub status_message: Option<String>,
}

impl DonationDraft {
    /// The referenced NGO, or `None` when the reference is absent or zero.
    pub fn ngo_id(&self) -> Option<NgoId> {
        self.ngo
            .filter(|reference| reference.id != 0)
            .map(|reference| NgoId(reference.id))
    }
}

/// Timestamps recorded as a donation reaches each lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleTimeline {
    pub confirmed_at: Option<NaiveDateTime>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub picked_up_at: Option<NaiveDateTime>,
    pub in_transit_at: Option<NaiveDateTime>,
    pub delivered_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
}

impl LifecycleTimeline {
    /// Every stage stamped with the same instant.
    pub fn completed_at_once(now: NaiveDateTime) -> Self {
        Self {
            confirmed_at: Some(now),
            scheduled_at: Some(now),
            picked_up_at: Some(now),
            in_transit_at: Some(now),
            delivered_at: Some(now),
            completed_at: Some(now),
        }
    }

    pub fn stamps(&self) -> [Option<NaiveDateTime>; 6] {
        [
            self.confirmed_at,
            self.scheduled_at,
            self.picked_up_at,
            self.in_transit_at,
            self.delivered_at,
            self.completed_at,
        ]
    }
}

/// A pledged contribution as persisted by the donation store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: Option<DonationId>,
    #[serde(flatten)]
    pub details: DonationDetails,
    pub donor: Donor,
    pub ngo: Option<Ngo>,
    pub status: DonationStatus,
    pub status_message: Option<String>,
    #[serde(flatten)]
    pub timeline: LifecycleTimeline,
}

impl Donation {
    pub fn is_owned_by(&self, donor_id: DonorId) -> bool {
        self.donor.id == donor_id
    }

    pub fn ngo_name(&self) -> Option<&str> {
        self.ngo.as_ref().map(|ngo| ngo.ngo_name.as_str())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}
