//! Strongly typed, zero-cost identifier wrappers.
//!
//! Agents, context bins and delta bins are all small integers that index
//! into tables.  Wrapping them keeps a context index from being passed where
//! a delta index is expected: the two share a numeric range in the default
//! 10 × 10 configuration, so mixing them up would otherwise compile silently.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a negotiating agent.  Also mixes into the agent's RNG seed.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a discretized context bin in `[0, n_contexts)`.
    pub struct ContextBin(u16);
}

typed_id! {
    /// Index of a concession-step bin in `[0, n_deltas)`, smallest step first.
    pub struct DeltaBin(u16);
}
