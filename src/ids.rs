use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// non-negative chip count. A cash-game engine must never represent a
/// stack or pot as negative, so this is an unsigned alias throughout.
pub type Chips = u64;

macro_rules! uuid_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn nil() -> Self {
                Self(Uuid::nil())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter) -> FmtResult {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(u: Uuid) -> Self {
                Self(u)
            }
        }
    };
}

uuid_id!(TableId);
uuid_id!(PlayerId);

/// a zero-indexed seat position, bounded by the table's configured
/// `max_seats` (<= 10).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatIndex(u8);

impl SeatIndex {
    pub fn new(i: u8) -> Self {
        Self(i)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Display for SeatIndex {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for SeatIndex {
    fn from(i: u8) -> Self {
        Self(i)
    }
}

impl From<SeatIndex> for usize {
    fn from(s: SeatIndex) -> usize {
        s.0 as usize
    }
}
