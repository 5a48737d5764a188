use shared::{domain::GuestId, protocol::Guest};

/// Coarse directory lifecycle: `Loading` until the first successful
/// fetch, `Ready` afterwards. There is no transition back to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// Transient first/last name pair being composed before submission.
/// Never persisted; cleared on a successful add or an explicit clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub first_name: String,
    pub last_name: String,
}

impl Draft {
    /// The canonical validation rule: both names must be non-empty
    /// after trimming.
    pub fn submittable(first_name: &str, last_name: &str) -> bool {
        !first_name.trim().is_empty() && !last_name.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty() && self.last_name.is_empty()
    }
}

/// The controller-owned mirror of the Remote Guest Store, plus the UI
/// state that travels with it.
///
/// All mutation happens through the `absorb_*` folds below, which only
/// ever run on a successful store response. Network I/O stays in the
/// controller; this type never suspends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryState {
    pub guests: Vec<Guest>,
    pub draft: Draft,
    pub load_state: LoadState,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryState {
    pub fn new() -> Self {
        Self {
            guests: Vec::new(),
            draft: Draft::default(),
            load_state: LoadState::Loading,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    pub fn find(&self, id: &GuestId) -> Option<&Guest> {
        self.guests.iter().find(|guest| &guest.id == id)
    }

    pub fn contains(&self, id: &GuestId) -> bool {
        self.find(id).is_some()
    }

    /// Fold a successful list response: store order verbatim, no sort.
    pub fn absorb_listing(&mut self, guests: Vec<Guest>) {
        self.guests = guests;
        self.load_state = LoadState::Ready;
    }

    /// Fold a successful create response: the server-returned record is
    /// prepended (most recent first) and the draft is cleared.
    pub fn absorb_created(&mut self, created: Guest) {
        self.guests.insert(0, created);
        self.draft.clear();
    }

    /// Fold a successful update response: the entry matching the
    /// server-confirmed id takes the confirmed attendance value.
    /// Attendance is the only field ever mutated in place. Returns
    /// false when no entry matches.
    pub fn absorb_confirmed(&mut self, confirmed: &Guest) -> bool {
        match self.guests.iter_mut().find(|guest| guest.id == confirmed.id) {
            Some(entry) => {
                entry.attending = confirmed.attending;
                true
            }
            None => false,
        }
    }

    /// Fold a successful delete response: the entry matching the
    /// server-echoed id (not necessarily the requested one) is removed.
    pub fn absorb_removed(&mut self, echoed: &GuestId) -> Option<Guest> {
        let position = self.guests.iter().position(|guest| &guest.id == echoed)?;
        Some(self.guests.remove(position))
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
