//! # mcping core
//!
//! Prepares the addressing of a multicast ping session: which remote hosts take
//! part, which IP version everybody speaks, which multicast group is used and
//! which of the given hosts is this machine.
//!
//! The entry point is [`session::resolve_session`]. It depends only on the
//! collaborator traits from `mcping_common::resolver`; [`resolver::SystemResolver`]
//! and [`system::SystemInterfaces`] are the implementations backed by the OS.

pub mod resolver;
pub mod session;
pub mod system;
