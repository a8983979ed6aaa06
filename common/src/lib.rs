//! Cross-chain accounting core shared by the origin and remote strategy programs.
//!
//! Nothing in here touches accounts directly. Programs load their state, hand it to the
//! state machines in [`origin`] and [`remote`] together with a [`transport::Transport`] and a
//! [`vault::Vault`] implementation, and persist the result.

pub mod ledger;
pub mod link;
pub mod message;
pub mod ordering;
pub mod origin;
pub mod remote;
pub mod roles;
pub mod transport;
pub mod vault;

pub use ledger::*;
pub use link::*;
pub use message::*;
pub use ordering::*;
pub use roles::*;
pub use transport::*;
