//! Typed index newtypes.
//!
//! The graph lives in parallel `Vec`s, so every entity is addressed by a
//! small integer.  Wrapping those integers in distinct types stops a link
//! index from ever landing in a node array (and vice versa) at zero runtime
//! cost.  The inner value stays `pub` for the rare place that needs the raw
//! number; everything else goes through [`index`](NodeId::index).
//!
//! There is no `Option<Id>` anywhere on the hot paths — slabs of optional
//! ids would double their size — so each type reserves its all-ones value as
//! an `INVALID` sentinel instead, and `Default` produces it so a forgotten
//! initialization is loud rather than silently id 0.

/// Define one index newtype with the sentinel and conversion plumbing.
macro_rules! id_type {
    ($(#[$doc:meta])* $vis:vis $name:ident($repr:ty)) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $repr);

        impl $name {
            /// All-ones sentinel standing in for "no such entity".
            pub const INVALID: Self = Self(<$repr>::MAX);

            /// `true` unless this is the `INVALID` sentinel.
            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }

            /// The raw value as a slab index.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> usize {
                id.index()
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<Self, Self::Error> {
                <$repr>::try_from(n).map(Self)
            }
        }
    };
}

id_type! {
    /// Position of a node in the graph's parallel node arrays.
    pub NodeId(u32)
}

id_type! {
    /// Position of a directed link in the sorted link arrays.
    pub LinkId(u32)
}

id_type! {
    /// A grid cell, `col * dim + row`.  `u16` is plenty for the 20×20
    /// default and keeps per-link flag rows small.
    pub RegionId(u16)
}
