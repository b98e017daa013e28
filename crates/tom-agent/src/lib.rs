//! `tom-agent` — theory-of-mind bargaining agents.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`beliefs`] | `Beliefs0` — per-context concession counts                   |
//! | [`model`]   | `Negotiator` trait, `Action`                                 |
//! | [`tom0`]    | `Tom0` — expected-utility agent over learned beliefs         |
//! | [`tom1`]    | `Tom1` — best response to a nested `Tom0` of the opponent    |
//! | [`any`]     | `AnyNegotiator` — enum over both orders                      |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                               |
//!
//! # Design notes
//!
//! The order hierarchy is composition, not inheritance: `Tom1` owns one
//! `Tom0` and nothing deeper, so the recursion depth is fixed at one.
//! Both orders implement the same [`Negotiator`] trait, which is all the
//! negotiation protocol sees.

pub mod any;
pub mod beliefs;
pub mod error;
pub mod model;
pub mod tom0;
pub mod tom1;


pub use any::AnyNegotiator;
pub use beliefs::Beliefs0;
pub use error::{AgentError, AgentResult};
pub use model::{Action, Negotiator};
pub use tom0::Tom0;
pub use tom1::Tom1;
