use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::donations::domain::{
    Donation, DonationDetails, DonationDraft, DonationId, DonationStatus, Donor, DonorId,
    LifecycleTimeline, Ngo, NgoId, NgoRef,
};
use crate::donations::memory::{InMemoryDirectory, InMemoryDonationStore, InMemoryOutbox};
use crate::donations::notifier::{EmailMessage, Notifier, NotifyError};
use crate::donations::repository::{DonationStore, RepositoryError};
use crate::donations::service::{DonationLifecycleManager, PENDING_MESSAGE};

pub(super) fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 3)
        .expect("valid date")
        .and_hms_opt(10, 30, 0)
        .expect("valid time")
}

pub(super) fn donor(id: i32, name: &str) -> Donor {
    Donor {
        id: DonorId(id),
        name: name.to_string(),
        email: format!("{}@example.org", name.to_ascii_lowercase()),
    }
}

pub(super) fn ngo(id: i32, name: &str) -> Ngo {
    Ngo {
        id: NgoId(id),
        ngo_name: name.to_string(),
    }
}

pub(super) fn directory() -> Arc<InMemoryDirectory> {
    let directory = InMemoryDirectory::default();
    for entry in [donor(3, "Meera"), donor(5, "Asha"), donor(7, "Ravi")] {
        directory.register_donor(entry).expect("register donor");
    }
    for entry in [ngo(2, "Annapurna Trust"), ngo(4, "Goonj")] {
        directory.register_ngo(entry).expect("register ngo");
    }
    Arc::new(directory)
}

pub(super) struct Harness {
    pub(super) manager: DonationLifecycleManager,
    pub(super) store: Arc<InMemoryDonationStore>,
    pub(super) outbox: Arc<InMemoryOutbox>,
}

pub(super) fn build_manager() -> Harness {
    let directory = directory();
    let store = Arc::new(InMemoryDonationStore::default());
    let outbox = Arc::new(InMemoryOutbox::default());
    let manager = DonationLifecycleManager::new(
        directory.clone(),
        directory,
        store.clone(),
        outbox.clone(),
    )
    .with_clock(fixed_now);
    Harness {
        manager,
        store,
        outbox,
    }
}

pub(super) fn money_draft(amount: &str) -> DonationDraft {
    DonationDraft {
        details: DonationDetails {
            donation_type: Some("MONEY".to_string()),
            amount: Some(amount.to_string()),
            ..DonationDetails::default()
        },
        ..DonationDraft::default()
    }
}

pub(super) fn food_draft(food_name: &str) -> DonationDraft {
    DonationDraft {
        details: DonationDetails {
            donation_type: Some("FOOD".to_string()),
            food_name: Some(food_name.to_string()),
            meal_type: Some("Lunch".to_string()),
            quantity: Some("20 plates".to_string()),
            city: Some("Pune".to_string()),
            expiry_date_time: Some("2025-11-03T18:00".to_string()),
            ..DonationDetails::default()
        },
        ..DonationDraft::default()
    }
}

pub(super) fn with_ngo(mut draft: DonationDraft, id: i32) -> DonationDraft {
    draft.ngo = Some(NgoRef { id });
    draft
}

/// Stores donation 9, a pending food donation owned by donor 3 and routed to NGO 2.
pub(super) fn seed_owned_donation(harness: &Harness) -> Donation {
    let donation = Donation {
        id: Some(DonationId(9)),
        details: food_draft("Dal").details,
        donor: donor(3, "Meera"),
        ngo: Some(ngo(2, "Annapurna Trust")),
        status: DonationStatus::Pending,
        status_message: Some(PENDING_MESSAGE.to_string()),
        timeline: LifecycleTimeline::default(),
    };
    harness.store.save(donation).expect("store seeded donation")
}

pub(super) struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send_email(&self, _message: EmailMessage) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl DonationStore for UnavailableStore {
    fn find_by_id(&self, _id: DonationId) -> Result<Option<Donation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _donation: Donation) -> Result<Donation, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_all(&self) -> Result<Vec<Donation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_donor_id(&self, _id: DonorId) -> Result<Vec<Donation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_ngo_id(&self, _id: NgoId) -> Result<Vec<Donation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
