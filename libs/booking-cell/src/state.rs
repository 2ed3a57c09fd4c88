// libs/booking-cell/src/state.rs
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use uuid::Uuid;

use doctor_cell::directory::DoctorDirectory;
use shared_config::AppConfig;
use shared_storage::{open_store, CollectionStore};

use crate::services::store::AppointmentStore;
use crate::services::wizard::BookingWizard;

/// Shared application state. One logical thread of control mutates the
/// store and sessions; the locks only arbitrate the async handler tasks.
pub struct AppState {
    pub config: AppConfig,
    pub directory: Arc<DoctorDirectory>,
    pub store: RwLock<AppointmentStore>,
    pub sessions: RwLock<HashMap<Uuid, BookingWizard>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let sink = open_store(&config.data_dir)?;
        Self::with_sink(config, sink, Arc::new(DoctorDirectory::seeded()))
    }

    pub fn with_sink(
        config: AppConfig,
        sink: Box<dyn CollectionStore>,
        directory: Arc<DoctorDirectory>,
    ) -> Result<Self> {
        let store = AppointmentStore::open(sink)?;
        Ok(Self {
            config,
            directory,
            store: RwLock::new(store),
            sessions: RwLock::new(HashMap::new()),
        })
    }
}
