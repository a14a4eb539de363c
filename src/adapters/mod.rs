//! Adapter implementations of the port traits.
//!
//! `live` talks to the real world, `recording` wraps another adapter and
//! captures its traffic into cassettes, `replaying` serves cassettes back.

pub mod live;
pub mod recording;
pub mod replaying;
