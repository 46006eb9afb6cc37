//! Index handles into a state machine definition.
//!
//! Handles are plain indices assigned at build time in declaration order.
//! They are only meaningful for the definition that produced them.

use serde::{Deserialize, Serialize};

macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub(crate) u32);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(i: usize) -> Self {
                Self(i as u32)
            }
        }
    };
}

index_id!(
    /// Input position in declaration order.
    InputId
);
index_id!(
    /// Layer position inside a state machine.
    LayerId
);
index_id!(
    /// State position inside its layer.
    StateId
);
