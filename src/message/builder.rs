// src/message/builder.rs

//! Diagnostic construction.
//!
//! Messages always describe the failure of the *opposite* polarity from the
//! comparison result: a passing comparison yields the text shown when a
//! negated assertion fails, and vice versa. The host picks which one to show.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::expected::ExpectedKind;

use super::print::{MatcherUtils, PrintValue};

/// A diagnostic rendered on first read and cached afterwards.
pub struct Message {
    render: Box<dyn Fn() -> String + Send + Sync>,
    cached: OnceLock<String>,
}

impl Message {
    pub fn new(render: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            render: Box::new(render),
            cached: OnceLock::new(),
        }
    }

    /// A message whose text is already known.
    pub fn constant(text: impl Into<String>) -> Self {
        let cached = OnceLock::new();
        let _ = cached.set(text.into());
        Self {
            render: Box::new(String::new),
            cached,
        }
    }

    pub fn text(&self) -> &str {
        self.cached.get_or_init(|| (self.render)())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("rendered", &self.cached.get().is_some())
            .finish_non_exhaustive()
    }
}

/// Everything the builder needs to phrase one comparison.
#[derive(Debug, Clone)]
pub struct MessageContext {
    /// `"exit code"` / `"stdout"` for scalar expectations.
    pub field_label: Option<&'static str>,
    pub expected: PrintValue,
    pub received: PrintValue,
    pub pass: bool,
    pub kind: ExpectedKind,
}

pub trait MessageBuilder: Send + Sync {
    fn build(&self, ctx: MessageContext, utils: Arc<dyn MatcherUtils>) -> Message;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessageBuilder;

impl MessageBuilder for DefaultMessageBuilder {
    fn build(&self, ctx: MessageContext, utils: Arc<dyn MatcherUtils>) -> Message {
        Message::new(move || render_message(&ctx, utils.as_ref()))
    }
}

/// Hint passed to `matcher_hint`: deep equality for shapes, identity
/// otherwise, negated when the comparison passed.
pub fn matcher_hint_label(kind: ExpectedKind, pass: bool) -> &'static str {
    match (kind == ExpectedKind::Object, pass) {
        (true, true) => ".not.toEqual",
        (true, false) => ".toEqual",
        (false, true) => ".not.toBe",
        (false, false) => ".toBe",
    }
}

pub fn expected_caption(field_label: Option<&str>, pass: bool) -> String {
    match (field_label, pass) {
        (Some(label), true) => format!("Expected {label} not to be:"),
        (Some(label), false) => format!("Expected {label} to be:"),
        (None, true) => "Expected not to be:".to_string(),
        (None, false) => "Expected:".to_string(),
    }
}

pub fn render_message(ctx: &MessageContext, utils: &dyn MatcherUtils) -> String {
    [
        utils.matcher_hint(matcher_hint_label(ctx.kind, ctx.pass)),
        String::new(),
        expected_caption(ctx.field_label, ctx.pass),
        format!("  {}", utils.print_expected(&ctx.expected)),
        "Received:".to_string(),
        format!("  {}", utils.print_received(&ctx.received)),
    ]
    .join("\n")
}

/// Diagnostic for the snapshot matchers.
///
/// `stored` is `None` when no snapshot exists and none was written.
pub fn snapshot_message(
    key: &str,
    stored: Option<PrintValue>,
    received: PrintValue,
    pass: bool,
    utils: Arc<dyn MatcherUtils>,
) -> Message {
    let key = key.to_string();
    Message::new(move || {
        let hint = if pass { ".not.toMatchSnapshot" } else { ".toMatchSnapshot" };
        let mut lines = vec![
            utils.matcher_hint(hint),
            String::new(),
            format!("Snapshot: {key}"),
        ];
        match &stored {
            Some(stored) => {
                lines.push("Expected:".to_string());
                lines.push(format!("  {}", utils.print_expected(stored)));
            }
            None => {
                lines.push(
                    "New snapshot was not written. Snapshot updates are disabled.".to_string(),
                );
            }
        }
        lines.push("Received:".to_string());
        lines.push(format!("  {}", utils.print_received(&received)));
        lines.join("\n")
    })
}
