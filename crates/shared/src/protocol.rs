use serde::{Deserialize, Serialize};

use crate::domain::GuestId;

/// A guest record as the Remote Guest Store serves it.
///
/// Wire shape: `{ "id", "firstName", "lastName", "attending" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: GuestId,
    pub first_name: String,
    pub last_name: String,
    pub attending: bool,
}

/// Body for `POST {base}/guests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGuest {
    pub first_name: String,
    pub last_name: String,
    pub attending: bool,
}

impl NewGuest {
    /// New guests always start as not attending.
    pub fn not_attending(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            attending: false,
        }
    }
}

/// Body for `PUT {base}/guests/{id}`.
///
/// Fields left `None` are omitted from the payload; the store merges
/// whatever is present into the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attending: Option<bool>,
}

impl GuestUpdate {
    /// Partial update carrying only the attendance flag.
    pub fn attending(value: bool) -> Self {
        Self {
            attending: Some(value),
            ..Self::default()
        }
    }

    /// Full-field update: the guest's current names plus the new
    /// attendance flag.
    pub fn merged(guest: &Guest, attending: bool) -> Self {
        Self {
            first_name: Some(guest.first_name.clone()),
            last_name: Some(guest.last_name.clone()),
            attending: Some(attending),
        }
    }
}
