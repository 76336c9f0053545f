use super::domain::{Donation, DonationId, Donor, DonorId, Ngo, NgoId};

/// Donor lookup used to attach the requesting donor to new donations.
pub trait DonorStore: Send + Sync {
    fn find_by_id(&self, id: DonorId) -> Result<Option<Donor>, RepositoryError>;
}

/// NGO lookup used when a payload references a charity.
pub trait NgoStore: Send + Sync {
    fn find_by_id(&self, id: NgoId) -> Result<Option<Ngo>, RepositoryError>;
}

/// Storage abstraction so the lifecycle manager can be exercised in isolation.
pub trait DonationStore: Send + Sync {
    fn find_by_id(&self, id: DonationId) -> Result<Option<Donation>, RepositoryError>;

    /// Insert when `donation.id` is `None` (assigning one), otherwise overwrite.
    fn save(&self, donation: Donation) -> Result<Donation, RepositoryError>;

    fn find_all(&self) -> Result<Vec<Donation>, RepositoryError>;
    fn find_by_donor_id(&self, id: DonorId) -> Result<Vec<Donation>, RepositoryError>;
    fn find_by_ngo_id(&self, id: NgoId) -> Result<Vec<Donation>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
