//! `tom-core` — foundational types for the theory-of-mind bargaining engine.
//!
//! This crate is a dependency of every other `tom-*` crate.  It has no
//! `tom-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ContextBin`, `DeltaBin`                   |
//! | [`direction`]   | `Direction` (seller / buyer role)                     |
//! | [`party`]       | `Party` — external wealth and property of one side    |
//! | [`config`]      | `BargainConfig`, `ContextSignal`, `TieBreak`          |
//! | [`discretize`]  | `DeltaGrid`, `ContextMapper`                          |
//! | [`payoff`]      | `PayoffMatrix`, `PENALTY`, `crosses`, argmax helpers  |
//! | [`rng`]         | `AgentRng` (per-agent, seeded)                        |
//! | [`error`]       | `TomError`, `TomResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config, ids, `Party`.    |

pub mod config;
pub mod direction;
pub mod discretize;
pub mod error;
pub mod ids;
pub mod party;
pub mod payoff;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BargainConfig, ContextSignal, TieBreak};
pub use direction::Direction;
pub use discretize::{ContextMapper, DeltaGrid};
pub use error::{TomError, TomResult};
pub use ids::{AgentId, ContextBin, DeltaBin};
pub use party::Party;
pub use payoff::{CROSS_TOLERANCE, PENALTY, PayoffMatrix, argmax_all, argmax_first, crosses};
pub use rng::AgentRng;
