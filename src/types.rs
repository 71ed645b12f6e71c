/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::database::manager::DatabaseError;
use crate::database::models::artwork::Artwork;

/// Save actions supported by the artwork store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Insert,
    Update,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Insert => "INSERT",
            Action::Update => "UPDATE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INSERT" => Ok(Action::Insert),
            "UPDATE" => Ok(Action::Update),
            other => Err(DatabaseError::InvalidAction(other.to_string())),
        }
    }
}

/// A save request: the action together with the record it applies to.
///
/// `Insert` ignores the record's `id` (the store assigns one). `Update`
/// targets the row matching the record's `id` and never touches `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveAction {
    Insert(Artwork),
    Update(Artwork),
}

impl SaveAction {
    pub fn new(action: Action, artwork: Artwork) -> Self {
        match action {
            Action::Insert => SaveAction::Insert(artwork),
            Action::Update => SaveAction::Update(artwork),
        }
    }

    pub fn action(&self) -> Action {
        match self {
            SaveAction::Insert(_) => Action::Insert,
            SaveAction::Update(_) => Action::Update,
        }
    }

    pub fn artwork(&self) -> &Artwork {
        match self {
            SaveAction::Insert(a) | SaveAction::Update(a) => a,
        }
    }

    pub fn into_artwork(self) -> Artwork {
        match self {
            SaveAction::Insert(a) | SaveAction::Update(a) => a,
        }
    }
}
