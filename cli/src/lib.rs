// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal front end for wikirace
//!
//! [`session::Session`] wires typed [`command::Command`]s and clock ticks to
//! the game controller; [`render`] turns what comes back into lines of text.

pub mod command;
pub mod render;
pub mod session;

pub use command::{parse_command, Command};
pub use session::{Reply, Session};
