use food_donation::donations::{
    DonationLifecycleManager, Donor, DonorId, InMemoryDirectory, InMemoryDonationStore, Ngo,
    NgoId, Notifier, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stores backing one manager instance.
#[derive(Clone, Default)]
pub(crate) struct Collaborators {
    pub(crate) directory: Arc<InMemoryDirectory>,
    pub(crate) donations: Arc<InMemoryDonationStore>,
}

impl Collaborators {
    pub(crate) fn manager(&self, notifier: Arc<dyn Notifier>) -> DonationLifecycleManager {
        DonationLifecycleManager::new(
            self.directory.clone(),
            self.directory.clone(),
            self.donations.clone(),
            notifier,
        )
    }
}

pub(crate) fn demo_donors() -> Vec<Donor> {
    [
        (1, "Asha Kulkarni", "asha.kulkarni@example.org"),
        (2, "Ravi Menon", "ravi.menon@example.org"),
        (3, "Meera Iyer", "meera.iyer@example.org"),
    ]
    .into_iter()
    .map(|(id, name, email)| Donor {
        id: DonorId(id),
        name: name.to_string(),
        email: email.to_string(),
    })
    .collect()
}

pub(crate) fn demo_ngos() -> Vec<Ngo> {
    [(1, "Annapurna Food Bank"), (2, "Goonj Clothing Drive")]
        .into_iter()
        .map(|(id, name)| Ngo {
            id: NgoId(id),
            ngo_name: name.to_string(),
        })
        .collect()
}

pub(crate) fn seed_directory(directory: &InMemoryDirectory) -> Result<(), RepositoryError> {
    for donor in demo_donors() {
        directory.register_donor(donor)?;
    }
    for ngo in demo_ngos() {
        directory.register_ngo(ngo)?;
    }
    Ok(())
}
