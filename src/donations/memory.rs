//! In-process collaborators backing the API service, the CLI demo, and tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Donation, DonationId, Donor, DonorId, Ngo, NgoId};
use super::notifier::{EmailMessage, Notifier, NotifyError};
use super::repository::{DonationStore, DonorStore, NgoStore, RepositoryError};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store lock poisoned".to_string()))
}

/// Donor and NGO registry kept in memory.
#[derive(Default, Clone)]
pub struct InMemoryDirectory {
    donors: Arc<Mutex<BTreeMap<DonorId, Donor>>>,
    ngos: Arc<Mutex<BTreeMap<NgoId, Ngo>>>,
}

impl InMemoryDirectory {
    pub fn register_donor(&self, donor: Donor) -> Result<(), RepositoryError> {
        lock(&self.donors)?.insert(donor.id, donor);
        Ok(())
    }

    pub fn register_ngo(&self, ngo: Ngo) -> Result<(), RepositoryError> {
        lock(&self.ngos)?.insert(ngo.id, ngo);
        Ok(())
    }
}

impl DonorStore for InMemoryDirectory {
    fn find_by_id(&self, id: DonorId) -> Result<Option<Donor>, RepositoryError> {
        Ok(lock(&self.donors)?.get(&id).cloned())
    }
}

impl NgoStore for InMemoryDirectory {
    fn find_by_id(&self, id: NgoId) -> Result<Option<Ngo>, RepositoryError> {
        Ok(lock(&self.ngos)?.get(&id).cloned())
    }
}

#[derive(Default)]
struct DonationTable {
    last_id: i32,
    records: BTreeMap<DonationId, Donation>,
}

/// Donation store assigning sequential ids from 1; listings come back in id order.
#[derive(Default, Clone)]
pub struct InMemoryDonationStore {
    table: Arc<Mutex<DonationTable>>,
}

impl InMemoryDonationStore {
    pub fn len(&self) -> usize {
        lock(&self.table).map_or(0, |table| table.records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn select(
        &self,
        predicate: impl Fn(&Donation) -> bool,
    ) -> Result<Vec<Donation>, RepositoryError> {
        let table = lock(&self.table)?;
        Ok(table
            .records
            .values()
            .filter(|donation| predicate(donation))
            .cloned()
            .collect())
    }
}

impl DonationStore for InMemoryDonationStore {
    fn find_by_id(&self, id: DonationId) -> Result<Option<Donation>, RepositoryError> {
        Ok(lock(&self.table)?.records.get(&id).cloned())
    }

    fn save(&self, mut donation: Donation) -> Result<Donation, RepositoryError> {
        let mut table = lock(&self.table)?;
        let id = match donation.id {
            Some(id) => {
                table.last_id = table.last_id.max(id.0);
                id
            }
            None => {
                table.last_id += 1;
                DonationId(table.last_id)
            }
        };
        donation.id = Some(id);
        table.records.insert(id, donation.clone());
        Ok(donation)
    }

    fn find_all(&self) -> Result<Vec<Donation>, RepositoryError> {
        self.select(|_| true)
    }

    fn find_by_donor_id(&self, id: DonorId) -> Result<Vec<Donation>, RepositoryError> {
        self.select(|donation| donation.donor.id == id)
    }

    fn find_by_ngo_id(&self, id: NgoId) -> Result<Vec<Donation>, RepositoryError> {
        self.select(|donation| donation.ngo.as_ref().is_some_and(|ngo| ngo.id == id))
    }
}

/// Notifier that keeps every message instead of sending it.
#[derive(Default, Clone)]
pub struct InMemoryOutbox {
    messages: Arc<Mutex<Vec<EmailMessage>>>,
}

impl InMemoryOutbox {
    pub fn messages(&self) -> Vec<EmailMessage> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for InMemoryOutbox {
    fn send_email(&self, message: EmailMessage) -> Result<(), NotifyError> {
        self.messages
            .lock()
            .map_err(|_| NotifyError::Transport("outbox lock poisoned".to_string()))?
            .push(message);
        Ok(())
    }
}
