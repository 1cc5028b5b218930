// tests/message_builder.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use shell_matchers::expected::ExpectedKind;
use shell_matchers::message::{
    DefaultMessageBuilder, Message, MessageBuilder, MessageContext, PlainUtils, PrintValue,
    expected_caption, matcher_hint_label, snapshot_message,
};
use shell_matchers_test_utils::spies::RecordingUtils;

fn exit_code_ctx(pass: bool, expected: i64) -> MessageContext {
    MessageContext {
        field_label: Some("exit code"),
        expected: PrintValue::Int(expected),
        received: PrintValue::Int(0),
        pass,
        kind: ExpectedKind::Number,
    }
}

#[test]
fn hint_style_follows_kind_and_polarity() {
    assert_eq!(matcher_hint_label(ExpectedKind::Number, true), ".not.toBe");
    assert_eq!(matcher_hint_label(ExpectedKind::String, false), ".toBe");
    assert_eq!(matcher_hint_label(ExpectedKind::Pattern, true), ".not.toBe");
    assert_eq!(matcher_hint_label(ExpectedKind::Object, true), ".not.toEqual");
    assert_eq!(matcher_hint_label(ExpectedKind::Object, false), ".toEqual");
}

#[test]
fn captions_interpolate_the_field_label() {
    assert_eq!(expected_caption(Some("stdout"), true), "Expected stdout not to be:");
    assert_eq!(expected_caption(Some("exit code"), false), "Expected exit code to be:");
    assert_eq!(expected_caption(None, true), "Expected not to be:");
    assert_eq!(expected_caption(None, false), "Expected:");
}

#[test]
fn passing_exit_code_message() {
    let msg = DefaultMessageBuilder.build(exit_code_ctx(true, 0), RecordingUtils::new());
    assert_eq!(
        msg.text(),
        "MATCHER HINT: .not.toBe\n\
         \n\
         Expected exit code not to be:\n\
         \x20 EXPECTED: 0\n\
         Received:\n\
         \x20 RECEIVED: 0"
    );
}

#[test]
fn failing_exit_code_message() {
    let msg = DefaultMessageBuilder.build(exit_code_ctx(false, 1), RecordingUtils::new());
    assert_eq!(
        msg.text(),
        "MATCHER HINT: .toBe\n\nExpected exit code to be:\n  EXPECTED: 1\nReceived:\n  RECEIVED: 0"
    );
}

#[test]
fn patterns_print_as_empty_objects() {
    let ctx = MessageContext {
        field_label: Some("stdout"),
        expected: PrintValue::Pattern("^Hello World".to_string()),
        received: PrintValue::Str("Hello World\n".to_string()),
        pass: false,
        kind: ExpectedKind::Pattern,
    };
    let msg = DefaultMessageBuilder.build(ctx, RecordingUtils::new());
    assert_eq!(
        msg.text(),
        "MATCHER HINT: .toBe\n\nExpected stdout to be:\n  EXPECTED: {}\nReceived:\n  RECEIVED: \"Hello World\\n\""
    );
}

#[test]
fn object_messages_use_generic_captions_and_keep_key_order() {
    let ctx = MessageContext {
        field_label: None,
        expected: PrintValue::Object(vec![
            ("code".to_string(), PrintValue::Int(0)),
            ("stdout".to_string(), PrintValue::Pattern("^Hello".to_string())),
            ("stderr".to_string(), PrintValue::Str(String::new())),
        ]),
        received: PrintValue::Object(vec![
            ("code".to_string(), PrintValue::Int(0)),
            ("signal".to_string(), PrintValue::Str(String::new())),
            ("stdout".to_string(), PrintValue::Str("Hello World\n".to_string())),
            ("stderr".to_string(), PrintValue::Str(String::new())),
        ]),
        pass: true,
        kind: ExpectedKind::Object,
    };
    let msg = DefaultMessageBuilder.build(ctx, RecordingUtils::new());
    assert_eq!(
        msg.text(),
        concat!(
            "MATCHER HINT: .not.toEqual\n",
            "\n",
            "Expected not to be:\n",
            "  EXPECTED: {\"code\":0,\"stdout\":{},\"stderr\":\"\"}\n",
            "Received:\n",
            "  RECEIVED: {\"code\":0,\"signal\":\"\",\"stdout\":\"Hello World\\n\",\"stderr\":\"\"}",
        )
    );
}

#[test]
fn plain_utils_render_a_full_hint() {
    let msg = DefaultMessageBuilder.build(exit_code_ctx(false, 1), Arc::new(PlainUtils));
    assert_eq!(
        msg.text(),
        "expect(received).toBe(expected)\n\nExpected exit code to be:\n  1\nReceived:\n  0"
    );
}

#[test]
fn message_is_rendered_lazily_and_once() {
    let utils = RecordingUtils::new();
    let msg = DefaultMessageBuilder.build(exit_code_ctx(true, 0), utils.clone());
    assert!(utils.calls().is_empty(), "nothing printed before first read");

    let first = msg.text().to_string();
    let second = msg.to_string();
    assert_eq!(first, second);
    assert_eq!(
        utils.calls(),
        vec!["matcher_hint", "print_expected", "print_received"]
    );
}

#[test]
fn custom_messages_are_cached() {
    let renders = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&renders);
    let msg = Message::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        "rendered".to_string()
    });

    assert_eq!(msg.text(), "rendered");
    assert_eq!(msg.text(), "rendered");
    assert_eq!(renders.load(Ordering::SeqCst), 1);
    assert_eq!(Message::constant("fixed").text(), "fixed");
}

#[test]
fn snapshot_message_shows_the_stored_value() {
    let msg = snapshot_message(
        "greets 1",
        Some(PrintValue::Str("Hello\n".to_string())),
        PrintValue::Str("Bye\n".to_string()),
        false,
        RecordingUtils::new(),
    );
    assert_eq!(
        msg.text(),
        "MATCHER HINT: .toMatchSnapshot\n\nSnapshot: greets 1\nExpected:\n  EXPECTED: \"Hello\\n\"\nReceived:\n  RECEIVED: \"Bye\\n\""
    );
}

#[test]
fn snapshot_message_without_stored_value() {
    let msg = snapshot_message(
        "greets 1",
        None,
        PrintValue::Int(3),
        false,
        Arc::new(PlainUtils),
    );
    assert!(msg.text().contains("Snapshot updates are disabled."));
    assert!(msg.text().ends_with("Received:\n  3"));
}
