use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::GuestId,
    protocol::{Guest, GuestUpdate, NewGuest},
};
use tokio::sync::broadcast;
use tracing::{info, warn};
use url::Url;

pub mod error;
pub mod state;

pub use error::StoreError;
pub use state::{DirectoryState, Draft, LoadState};

/// The Remote Guest Store seam: a REST-ish collection resource the
/// directory reconciles against. Implementations must not touch local
/// state; they only move records over the wire.
#[async_trait]
pub trait GuestStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Guest>>;
    async fn create(&self, new_guest: &NewGuest) -> Result<Guest>;
    async fn fetch(&self, id: &GuestId) -> Result<Guest>;
    async fn update(&self, id: &GuestId, update: &GuestUpdate) -> Result<Guest>;
    async fn delete(&self, id: &GuestId) -> Result<Guest>;
}

/// `GuestStore` over HTTP: `{base}/guests` collection semantics with
/// JSON bodies. No auth, pagination, retries, or timeouts.
pub struct HttpGuestStore {
    http: Client,
    base_url: String,
}

impl HttpGuestStore {
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed =
            Url::parse(base_url).with_context(|| format!("invalid guest store url: {base_url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("guest store url must be http or https: {base_url}");
        }
        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/guests", self.base_url)
    }

    fn item_url(&self, id: &GuestId) -> String {
        format!("{}/guests/{}", self.base_url, id)
    }
}

#[async_trait]
impl GuestStore for HttpGuestStore {
    async fn list(&self) -> Result<Vec<Guest>> {
        let guests = self
            .http
            .get(self.collection_url())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(guests)
    }

    async fn create(&self, new_guest: &NewGuest) -> Result<Guest> {
        let created = self
            .http
            .post(self.collection_url())
            .json(new_guest)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created)
    }

    async fn fetch(&self, id: &GuestId) -> Result<Guest> {
        let guest = self
            .http
            .get(self.item_url(id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(guest)
    }

    async fn update(&self, id: &GuestId, update: &GuestUpdate) -> Result<Guest> {
        let updated = self
            .http
            .put(self.item_url(id))
            .json(update)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: &GuestId) -> Result<Guest> {
        let deleted = self
            .http
            .delete(self.item_url(id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(deleted)
    }
}

/// How `toggle_attendance` reconciles with the store.
///
/// Both strategies are valid against a conforming backend; they differ
/// in what travels over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateStrategy {
    /// `PUT` a partial `{attending}` body and trust the store to merge.
    #[default]
    AttendingOnly,
    /// `GET` the current record first, then `PUT` the full field set
    /// with the new attendance merged in.
    RefetchMerge,
}

/// Change notifications for the presentation layer. Snapshots stay
/// read-only; re-rendering hangs off this stream.
#[derive(Debug, Clone)]
pub enum DirectoryEvent {
    Loaded {
        guest_count: usize,
    },
    GuestAdded(Guest),
    AttendanceChanged {
        id: GuestId,
        attending: bool,
    },
    GuestRemoved(GuestId),
    DraftCleared,
    SyncFailed {
        operation: &'static str,
        message: String,
    },
}

#[derive(Debug)]
pub enum InitializeOutcome {
    /// Directory replaced verbatim with the store's listing.
    Loaded { guest_count: usize },
    /// Directory and load state untouched. A directory that has never
    /// loaded stays `Loading` until a future initialize succeeds.
    StoreFailed(StoreError),
}

#[derive(Debug)]
pub enum AddOutcome {
    /// The server-returned record was prepended and the draft cleared.
    Added(Guest),
    /// One or both names were blank after trimming; no request issued.
    RejectedEmptyName,
    StoreFailed(StoreError),
}

#[derive(Debug)]
pub enum ToggleOutcome {
    /// The matching entry carries the server-confirmed value.
    Confirmed(Guest),
    /// No directory entry has this id; no request issued.
    UnknownId,
    StoreFailed(StoreError),
}

#[derive(Debug)]
pub enum RemoveOutcome {
    /// The entry matching the server-echoed id was removed.
    Removed(Guest),
    /// No directory entry has this id; no request issued.
    UnknownId,
    StoreFailed(StoreError),
}

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owns the local mirror of the guest collection and keeps it
/// consistent with user intents.
///
/// Single logical thread of control: operations take `&mut self` and
/// run their network round trip to completion before the next intent
/// begins. A failed request always leaves the previous state intact.
pub struct GuestDirectory {
    store: Arc<dyn GuestStore>,
    state: DirectoryState,
    update_strategy: UpdateStrategy,
    events: broadcast::Sender<DirectoryEvent>,
}

impl GuestDirectory {
    pub fn new(store: Arc<dyn GuestStore>) -> Self {
        Self::with_update_strategy(store, UpdateStrategy::default())
    }

    pub fn with_update_strategy(store: Arc<dyn GuestStore>, strategy: UpdateStrategy) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            state: DirectoryState::new(),
            update_strategy: strategy,
            events,
        }
    }

    pub fn guests(&self) -> &[Guest] {
        &self.state.guests
    }

    pub fn draft(&self) -> &Draft {
        &self.state.draft
    }

    pub fn load_state(&self) -> LoadState {
        self.state.load_state
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    pub fn snapshot(&self) -> DirectoryState {
        self.state.clone()
    }

    pub fn update_strategy(&self) -> UpdateStrategy {
        self.update_strategy
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.events.subscribe()
    }

    /// Fetch the full collection and mirror it verbatim. No retry is
    /// scheduled on failure; callers decide when to try again.
    pub async fn initialize(&mut self) -> InitializeOutcome {
        match self.store.list().await {
            Ok(guests) => {
                let guest_count = guests.len();
                self.state.absorb_listing(guests);
                info!(guest_count, "guest directory loaded");
                let _ = self.events.send(DirectoryEvent::Loaded { guest_count });
                InitializeOutcome::Loaded { guest_count }
            }
            Err(source) => {
                let error = StoreError::new("initialize", source);
                warn!(%error, "guest listing fetch failed; directory left as-is");
                let _ = self.events.send(DirectoryEvent::SyncFailed {
                    operation: error.operation,
                    message: error.to_string(),
                });
                InitializeOutcome::StoreFailed(error)
            }
        }
    }

    /// Create a guest with `attending: false`. The record prepended to
    /// the directory is the server's response, not the local input.
    pub async fn add_guest(&mut self, first_name: &str, last_name: &str) -> AddOutcome {
        self.warn_if_not_ready("add_guest");
        if !Draft::submittable(first_name, last_name) {
            return AddOutcome::RejectedEmptyName;
        }

        let new_guest = NewGuest::not_attending(first_name, last_name);
        match self.store.create(&new_guest).await {
            Ok(created) => {
                self.state.absorb_created(created.clone());
                let _ = self
                    .events
                    .send(DirectoryEvent::GuestAdded(created.clone()));
                let _ = self.events.send(DirectoryEvent::DraftCleared);
                AddOutcome::Added(created)
            }
            Err(source) => {
                let error = StoreError::new("add_guest", source);
                warn!(%error, "guest create failed; directory and draft unchanged");
                let _ = self.events.send(DirectoryEvent::SyncFailed {
                    operation: error.operation,
                    message: error.to_string(),
                });
                AddOutcome::StoreFailed(error)
            }
        }
    }

    /// Submit the composed draft as a new guest. Same rules as
    /// `add_guest`: a rejected or failed submission keeps the draft, a
    /// successful one clears it.
    pub async fn submit_draft(&mut self) -> AddOutcome {
        let first_name = self.state.draft.first_name.clone();
        let last_name = self.state.draft.last_name.clone();
        self.add_guest(&first_name, &last_name).await
    }

    /// Set a guest's attendance via the configured update strategy,
    /// then fold the server-confirmed value into the matching entry.
    /// At most one entry changes per call.
    pub async fn toggle_attendance(&mut self, id: &GuestId, attending: bool) -> ToggleOutcome {
        self.warn_if_not_ready("toggle_attendance");
        if !self.state.contains(id) {
            return ToggleOutcome::UnknownId;
        }

        let result = match self.update_strategy {
            UpdateStrategy::AttendingOnly => {
                self.store
                    .update(id, &GuestUpdate::attending(attending))
                    .await
            }
            UpdateStrategy::RefetchMerge => match self.store.fetch(id).await {
                Ok(remote) => {
                    self.store
                        .update(id, &GuestUpdate::merged(&remote, attending))
                        .await
                }
                Err(err) => Err(err),
            },
        };

        match result {
            Ok(confirmed) => {
                if self.state.absorb_confirmed(&confirmed) {
                    let _ = self.events.send(DirectoryEvent::AttendanceChanged {
                        id: confirmed.id.clone(),
                        attending: confirmed.attending,
                    });
                }
                ToggleOutcome::Confirmed(confirmed)
            }
            Err(source) => {
                let error = StoreError::new("toggle_attendance", source);
                warn!(%error, "attendance update failed; directory unchanged");
                let _ = self.events.send(DirectoryEvent::SyncFailed {
                    operation: error.operation,
                    message: error.to_string(),
                });
                ToggleOutcome::StoreFailed(error)
            }
        }
    }

    /// Delete a guest. The id echoed in the store's response, not the
    /// requested one, decides which local entry is removed.
    pub async fn remove_guest(&mut self, id: &GuestId) -> RemoveOutcome {
        self.warn_if_not_ready("remove_guest");
        if !self.state.contains(id) {
            return RemoveOutcome::UnknownId;
        }

        match self.store.delete(id).await {
            Ok(echoed) => {
                if self.state.absorb_removed(&echoed.id).is_some() {
                    let _ = self
                        .events
                        .send(DirectoryEvent::GuestRemoved(echoed.id.clone()));
                }
                RemoveOutcome::Removed(echoed)
            }
            Err(source) => {
                let error = StoreError::new("remove_guest", source);
                warn!(%error, "guest delete failed; directory unchanged");
                let _ = self.events.send(DirectoryEvent::SyncFailed {
                    operation: error.operation,
                    message: error.to_string(),
                });
                RemoveOutcome::StoreFailed(error)
            }
        }
    }

    pub fn set_draft_first_name(&mut self, value: impl Into<String>) {
        self.state.draft.first_name = value.into();
    }

    pub fn set_draft_last_name(&mut self, value: impl Into<String>) {
        self.state.draft.last_name = value.into();
    }

    pub fn clear_draft(&mut self) {
        self.state.draft.clear();
        let _ = self.events.send(DirectoryEvent::DraftCleared);
    }

    fn warn_if_not_ready(&self, operation: &'static str) {
        if !self.state.is_ready() {
            warn!(
                operation,
                "mutating operation invoked before the directory finished loading"
            );
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
