use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use super::domain::{
    Donation, DonationDraft, DonationId, DonationStatus, DonorId, LifecycleTimeline, Ngo, NgoId,
};
use super::notifier::Notifier;
use super::receipt;
use super::repository::{DonationStore, DonorStore, NgoStore, RepositoryError};

pub const MONEY_RECEIVED_MESSAGE: &str =
    "Money donation received successfully. Thank you for your contribution!";
pub const PENDING_MESSAGE: &str = "Donation added to cart. Waiting for confirmation.";

/// Source of "now" for lifecycle timestamps.
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Applies the donation lifecycle rules on top of the store and notifier seams.
pub struct DonationLifecycleManager {
    donors: Arc<dyn DonorStore>,
    ngos: Arc<dyn NgoStore>,
    donations: Arc<dyn DonationStore>,
    notifier: Arc<dyn Notifier>,
    clock: Clock,
}

impl DonationLifecycleManager {
    pub fn new(
        donors: Arc<dyn DonorStore>,
        ngos: Arc<dyn NgoStore>,
        donations: Arc<dyn DonationStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            donors,
            ngos,
            donations,
            notifier,
            clock: local_now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Record a new donation for `donor_id`.
    ///
    /// Money donations complete immediately and trigger a receipt e-mail; everything else
    /// starts out pending unless the payload already carries a status. All lookups happen
    /// before the single write, so a failed lookup persists nothing.
    pub fn create_donation(
        &self,
        donor_id: DonorId,
        payload: DonationDraft,
    ) -> Result<Donation, DonationServiceError> {
        let donor = self
            .donors
            .find_by_id(donor_id)?
            .ok_or(NotFound::Donor)?;

        let ngo = match payload.ngo_id() {
            Some(ngo_id) => Some(self.resolve_ngo(ngo_id)?),
            None => None,
        };

        let DonationDraft {
            details,
            status,
            status_message,
            ..
        } = payload;

        let mut donation = Donation {
            id: None,
            details,
            donor,
            ngo,
            status: DonationStatus::Pending,
            status_message: None,
            timeline: LifecycleTimeline::default(),
        };

        if donation.details.is_money() {
            return self.complete_money_donation(donation);
        }

        match status {
            Some(status) => {
                donation.status = status;
                donation.status_message = status_message;
            }
            None => {
                donation.status = DonationStatus::Pending;
                donation.status_message = Some(PENDING_MESSAGE.to_string());
            }
        }

        let saved = self.donations.save(donation)?;
        info!(donation_id = ?saved.id, %donor_id, status = %saved.status, "donation recorded");
        Ok(saved)
    }

    fn complete_money_donation(
        &self,
        mut donation: Donation,
    ) -> Result<Donation, DonationServiceError> {
        if donation.details.amount.is_some() && donation.details.quantity_is_blank() {
            donation.details.quantity = donation.details.amount.clone();
        }

        let now = (self.clock)();
        donation.status = DonationStatus::Completed;
        donation.timeline = LifecycleTimeline::completed_at_once(now);
        donation.status_message = Some(MONEY_RECEIVED_MESSAGE.to_string());

        let saved = self.donations.save(donation)?;
        info!(
            donation_id = ?saved.id,
            donor_id = %saved.donor.id,
            amount = saved.details.amount.as_deref().unwrap_or_default(),
            "money donation completed"
        );

        let message = receipt::money_receipt(&saved);
        if let Err(err) = self.notifier.send_email(message) {
            warn!(donation_id = ?saved.id, error = %err, "receipt e-mail not dispatched");
        }

        Ok(saved)
    }

    /// Overwrite the descriptive fields of a donation owned by `donor_id`.
    ///
    /// Status and timestamps are left alone. The NGO is only replaced when the payload
    /// names a non-zero id; unlike creation, an absent reference keeps the current NGO.
    pub fn update_donation(
        &self,
        donation_id: DonationId,
        donor_id: DonorId,
        payload: DonationDraft,
    ) -> Result<Donation, DonationServiceError> {
        let mut existing = self
            .donations
            .find_by_id(donation_id)?
            .ok_or(NotFound::Donation)?;

        if !existing.is_owned_by(donor_id) {
            warn!(%donation_id, %donor_id, owner = %existing.donor.id, "update rejected");
            return Err(DonationServiceError::NotAllowed);
        }

        let ngo = match payload.ngo_id() {
            Some(ngo_id) => Some(self.resolve_ngo(ngo_id)?),
            None => None,
        };

        existing.details = payload.details;
        if ngo.is_some() {
            existing.ngo = ngo;
        }

        let saved = self.donations.save(existing)?;
        info!(%donation_id, %donor_id, "donation updated");
        Ok(saved)
    }

    pub fn list_all(&self) -> Result<Vec<Donation>, DonationServiceError> {
        Ok(self.donations.find_all()?)
    }

    pub fn list_by_donor(&self, donor_id: DonorId) -> Result<Vec<Donation>, DonationServiceError> {
        Ok(self.donations.find_by_donor_id(donor_id)?)
    }

    pub fn list_by_ngo(&self, ngo_id: NgoId) -> Result<Vec<Donation>, DonationServiceError> {
        Ok(self.donations.find_by_ngo_id(ngo_id)?)
    }

    fn resolve_ngo(&self, ngo_id: NgoId) -> Result<Ngo, DonationServiceError> {
        let ngo = self.ngos.find_by_id(ngo_id)?.ok_or(NotFound::Ngo)?;
        Ok(ngo)
    }
}

/// Which lookup came back empty. The messages are user-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    #[error("Donor not found")]
    Donor,
    #[error("NGO not found")]
    Ngo,
    #[error("Donation not found")]
    Donation,
}

/// Error raised by the lifecycle manager.
#[derive(Debug, thiserror::Error)]
pub enum DonationServiceError {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error("Not allowed")]
    NotAllowed,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
