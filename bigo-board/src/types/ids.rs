//! Identifier newtypes for board entities
//!
//! Ids are opaque strings. Freshly created entities get ULIDs; seed data and
//! snapshots can carry any string (the seed columns use fixed slugs like
//! `todo` so saved boards stay greppable).

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! board_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh ULID-backed identifier
            pub fn new() -> Self {
                Self(ulid::Ulid::new().to_string())
            }

            /// Wrap an existing identifier
            pub fn from_string(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// The identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True for the empty placeholder id
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

board_id!(
    /// Identifies a column; distinct from the column's position in the board
    ColumnId
);

board_id!(
    /// Identifies a task
    TaskId
);

board_id!(
    /// Identifies an actor; empty for the anonymous fallback
    ActorId
);
