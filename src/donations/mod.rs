//! Donation lifecycle: creation, ownership-gated updates, queries, and money receipts.

pub mod domain;
pub mod memory;
pub mod notifier;
pub mod receipt;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Donation, DonationDetails, DonationDraft, DonationId, DonationStatus, Donor, DonorId,
    LifecycleTimeline, Ngo, NgoId, NgoRef,
};
pub use memory::{InMemoryDirectory, InMemoryDonationStore, InMemoryOutbox};
pub use notifier::{EmailMessage, LogMailer, Mailer, Notifier, NotifyError, QueuedNotifier};
pub use repository::{DonationStore, DonorStore, NgoStore, RepositoryError};
pub use router::donation_router;
pub use service::{
    Clock, DonationLifecycleManager, DonationServiceError, NotFound, MONEY_RECEIVED_MESSAGE,
    PENDING_MESSAGE,
};
