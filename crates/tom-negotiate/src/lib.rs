//! `tom-negotiate` — alternating-offer negotiation between two traders.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`protocol`] | `Negotiation` — role assignment, rounds, termination      |
//! | [`trader`]   | `Trader<N>` — a `Party` and the agent bargaining for it   |
//! | [`outcome`]  | `Outcome`, `Agreement` (+ settlement), `NoTradeReason`    |
//! | [`observer`] | `NegotiationObserver`, `NoopObserver`, `Transcript`       |
//! | [`error`]    | `NegotiationError`, `NegotiationResult<T>`                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tom_agent::AnyNegotiator;
//! use tom_core::{AgentId, AgentRng, BargainConfig, Party};
//! use tom_negotiate::{Negotiation, Trader};
//!
//! let config = BargainConfig::default();
//! let mut owner = Trader::new(
//!     AgentId(0),
//!     Party::new(0.0, 10.0),
//!     AnyNegotiator::of_order(1, &config, AgentRng::new(42, AgentId(0)))?,
//! );
//! let mut intruder = Trader::new(
//!     AgentId(1),
//!     Party::intruder(100.0),
//!     AnyNegotiator::of_order(0, &config, AgentRng::new(42, AgentId(1)))?,
//! );
//! let outcome = Negotiation::new(config)?.negotiate(&mut owner, &mut intruder)?;
//! if let Some(deal) = outcome.agreement() {
//!     deal.apply(&mut owner.party, &mut intruder.party);
//! }
//! ```

pub mod error;
pub mod observer;
pub mod outcome;
pub mod protocol;
pub mod trader;

#[cfg(test)]
mod tests;

pub use error::{NegotiationError, NegotiationResult};
pub use observer::{NegotiationObserver, NoopObserver, RoundRecord, Transcript};
pub use outcome::{Agreement, NoTradeReason, Outcome};
pub use protocol::{BUYER_OPENING, Negotiation, SELLER_OPENING, offers_in_range};
pub use trader::Trader;

pub use tom_core::Party;
