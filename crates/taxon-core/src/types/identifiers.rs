//! Dense index types for items and schemes.
//!
//! Each ID wraps the position of its value inside the owning `Universe`.
//! An `ItemId` cannot be accidentally used where a `SchemeId` is expected.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new ID from a universe index.
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Position of the value inside the universe.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

define_id!(
    /// Item identifier, assigned in registration order.
    ItemId
);

define_id!(
    /// Scheme identifier, assigned in first-seen order.
    SchemeId
);
