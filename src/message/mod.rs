// src/message/mod.rs

//! Diagnostic messages in the hint / expected / received layout.
//!
//! - [`print`] defines printable values and the `MatcherUtils` contract the
//!   host supplies for hints and value rendering.
//! - [`builder`] turns a comparison into a lazily rendered [`Message`].

pub mod builder;
pub mod print;

pub use builder::{
    DefaultMessageBuilder, Message, MessageBuilder, MessageContext, expected_caption,
    matcher_hint_label, render_message, snapshot_message,
};
pub use print::{MatcherUtils, PlainUtils, PrintValue};
