//! Calendar feed (ICS) parsing.
//!
//! Read-only: joyboard never writes events back to a feed, so there is no
//! generation counterpart.

mod parse;

pub use parse::{ParsedFeed, parse_feed};
