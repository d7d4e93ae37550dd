//! Type-safe identifier wrappers.
//!
//! Agents and NPCs are numbered separately: agent ids are the indices the
//! RL harness uses to address actions, observations and scores, while
//! entity ids are unique across every simulated object (agents included).

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an identifier from its raw index.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Return the raw index.
            pub const fn into_inner(self) -> u32 {
                self.0
            }

            /// Return the raw index as a `usize`, for slice addressing.
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a player-controlled survivor, as seen by the RL harness.
    AgentId
}

define_id! {
    /// Identifier of any simulated object (survivor or NPC).
    EntityId
}
