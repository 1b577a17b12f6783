//! Codec Tests
//!
//! Tests for message encoding/decoding.

use amiwire::protocol::{decode, decode_bytes, encode, encode_into, COMMAND_OUTPUT_KEY, EOL};
use amiwire::{AmiError, Config, Message, VariableMode};
use bytes::BytesMut;
use proptest::prelude::*;

fn routed() -> Config {
    Config::builder()
        .variable_mode(VariableMode::Routed)
        .build()
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_encode_empty_message() {
    let message = Message::new();
    assert_eq!(encode(&message), "\r\n");
}

#[test]
fn test_encode_fields() {
    let mut message = Message::new();
    message.set("Action", "Login");
    message.set("Username", "admin");

    assert_eq!(
        encode(&message),
        "Action: Login\r\nUsername: admin\r\n\r\n"
    );
}

#[test]
fn test_encode_keeps_name_casing() {
    let mut message = Message::new();
    message.set("ActionID", "1");

    assert_eq!(message.encode(), "ActionID: 1\r\n\r\n");
}

#[test]
fn test_encode_variables_after_fields() {
    let mut message = Message::new();
    message.set("Action", "Originate");
    message.set_variable("foo", "bar");
    message.set_variable("baz", "1");

    assert_eq!(
        encode(&message),
        "Action: Originate\r\nVariable: foo=bar\r\nVariable: baz=1\r\n\r\n"
    );
}

#[test]
fn test_encode_does_not_trim_values() {
    let mut message = Message::new();
    message.set("Data", "  padded  ");

    assert_eq!(encode(&message), "Data:   padded  \r\n\r\n");
}

#[test]
fn test_encode_never_emits_raw_lines() {
    let message = Message::decoded("Response: Success\r\nMessage: Pong\r\n\r\n");

    assert_eq!(encode(&message), "response: Success\r\nmessage: Pong\r\n\r\n");
}

#[test]
fn test_encode_into_appends() {
    let mut message = Message::new();
    message.set("Action", "Ping");

    let mut buf = BytesMut::from("prefix|");
    encode_into(&message, &mut buf);

    assert_eq!(&buf[..], b"prefix|Action: Ping\r\n\r\n");
}

#[test]
fn test_display_matches_encode() {
    let mut message = Message::new();
    message.set("Action", "Ping");
    message.set_variable("a", "b");

    assert_eq!(message.to_string(), message.encode());
    assert_eq!(message.to_bytes(), message.encode().as_bytes());
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_decode_simple_fields() {
    let message = Message::decoded("Response: Success\r\nActionID: 42\r\n\r\n");

    assert_eq!(message.get("response"), Some("Success"));
    assert_eq!(message.get("actionid"), Some("42"));
    assert_eq!(message.field_count(), 2);
}

#[test]
fn test_decode_normalizes_keys() {
    let message = Message::decoded("Caller-ID-Num: 100\r\n");

    let names: Vec<_> = message.fields().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["caller_id-num"]);
    assert_eq!(message.get("Caller-ID-Num"), Some("100"));
}

#[test]
fn test_decode_keeps_keys_differing_after_first_hyphen() {
    let message = Message::decoded("A-B-C: 1\r\nA_B_C: 2\r\n");

    let fields: Vec<_> = message.fields().collect();
    assert_eq!(fields, vec![("a_b-c", "1"), ("a_b_c", "2")]);
    assert_eq!(message.encode(), "a_b-c: 1\r\na_b_c: 2\r\n\r\n");
}

#[test]
fn test_decode_colon_in_value() {
    let message = Message::decoded("ListCommands: cmd1:arg1 cmd2:arg2");

    assert_eq!(message.get("listcommands"), Some("cmd1:arg1 cmd2:arg2"));
}

#[test]
fn test_decode_trims_value() {
    let message = Message::decoded("Key:   value with spaces   ");

    assert_eq!(message.get("key"), Some("value with spaces"));
}

#[test]
fn test_decode_empty_value() {
    let message = Message::decoded("Privilege:\r\n");

    assert_eq!(message.get("privilege"), Some(""));
}

#[test]
fn test_decode_does_not_trim_keys() {
    let message = Message::decoded(" Key: value");

    assert_eq!(message.get(" key"), Some("value"));
    assert_eq!(message.get("key"), None);
}

#[test]
fn test_decode_last_duplicate_wins() {
    let message = Message::decoded("Event: A\r\nEvent: B\r\n");

    assert_eq!(message.get("event"), Some("B"));
    assert_eq!(message.field_count(), 1);
}

#[test]
fn test_decode_no_colon_line() {
    let message = Message::decoded("justsometext");

    assert_eq!(message.get("justsometext"), Some("justsometext"));
    assert_eq!(message.field_count(), 1);
}

#[test]
fn test_decode_no_colon_line_normalizes_key_only() {
    let message = Message::decoded("Some-Text Here  ");

    let fields: Vec<_> = message.fields().collect();
    assert_eq!(fields, vec![("some_text here  ", "Some-Text Here")]);
}

#[test]
fn test_decode_skips_blank_lines() {
    let message = Message::decoded("Response: Success\r\n   \r\n\r\n");

    assert_eq!(message.field_count(), 1);
    assert_eq!(message.get(""), None);
}

#[test]
fn test_decode_empty_input() {
    let message = Message::decoded("");

    assert!(message.is_empty());
    assert_eq!(message.lines(), &[String::new()]);
}

#[test]
fn test_decode_keeps_raw_lines() {
    let message = Message::decoded("Response: Success\r\nMessage: Pong\r\n\r\n");

    assert_eq!(
        message.lines(),
        &["Response: Success", "Message: Pong", "", ""]
    );
}

#[test]
fn test_decode_splits_only_on_crlf() {
    let message = Message::decoded("Output: line one\nline two\r\n");

    assert_eq!(message.get("output"), Some("line one\nline two"));
    assert_eq!(message.lines().len(), 2);
}

#[test]
fn test_decode_into_existing_message() {
    let mut message = Message::new();
    message.set("Kept", "yes");
    message.set("Response", "Pending");

    message.decode("Response: Success");

    assert_eq!(message.get("kept"), Some("yes"));
    assert_eq!(message.get("response"), Some("Success"));
}

#[test]
fn test_decode_passes_unicode_through() {
    let message = Message::decoded("CallerIDName: Zoë 日本 ☎");

    assert_eq!(message.get("calleridname"), Some("Zoë 日本 ☎"));
}

// =============================================================================
// Command Output Tests
// =============================================================================

#[test]
fn test_decode_sentinel_line() {
    let message = Message::decoded("some output here --END COMMAND--");

    assert_eq!(message.get("commandoutput"), Some("some output here"));
    assert_eq!(message.get(COMMAND_OUTPUT_KEY), Some("some output here"));
}

#[test]
fn test_decode_sentinel_line_is_not_colon_split() {
    let message = Message::decoded("Uptime: 1:02:03 --END COMMAND--");

    assert_eq!(message.get("commandoutput"), Some("Uptime: 1:02:03"));
    assert_eq!(message.get("uptime"), None);
}

#[test]
fn test_decode_command_response() {
    let text = "Response: Follows\r\n\
                Privilege: Command\r\n\
                ActionID: 7\r\n\
                Name/username              Host   --END COMMAND--\r\n\
                \r\n";
    let message = Message::decoded(text);

    assert_eq!(message.get("response"), Some("Follows"));
    assert_eq!(message.get("actionid"), Some("7"));
    assert_eq!(
        message.get("commandoutput"),
        Some("Name/username              Host")
    );
}

// =============================================================================
// Variable Mode Tests
// =============================================================================

#[test]
fn test_compat_stores_variable_as_field() {
    let message = Message::decoded("Variable: foo=bar\r\nVariable: baz=1\r\n");

    assert_eq!(message.get("variable"), Some("baz=1"));
    assert_eq!(message.variables().count(), 0);
}

#[test]
fn test_routed_fills_variables() {
    let message = Message::decoded_with("Variable: foo=bar\r\nVariable: baz=1\r\n", &routed());

    assert_eq!(message.get("variable"), None);
    let vars: Vec<_> = message.variables().collect();
    assert_eq!(vars, vec![("foo", "bar"), ("baz", "1")]);
}

#[test]
fn test_routed_splits_on_first_equals() {
    let message = Message::decoded_with("Variable: expr=a=b", &routed());

    assert_eq!(message.variable("expr"), Some("a=b"));
}

#[test]
fn test_routed_variable_without_equals() {
    let message = Message::decoded_with("Variable: lonely", &routed());

    assert_eq!(message.variable("lonely"), Some(""));
}

#[test]
fn test_routed_round_trips_variables() {
    let mut message = Message::new();
    message.set("Action", "Originate");
    message.set_variable("foo", "bar");
    message.set_variable("baz", "1");

    let decoded = Message::decoded_with(&message.encode(), &routed());

    assert_eq!(decoded.get("action"), Some("Originate"));
    let vars: Vec<_> = decoded.variables().collect();
    assert_eq!(vars, vec![("foo", "bar"), ("baz", "1")]);
}

// =============================================================================
// Byte Decoding Tests
// =============================================================================

#[test]
fn test_decode_bytes_valid() {
    let mut message = Message::new();
    decode_bytes(b"Response: Success\r\n", &mut message, &Config::default()).unwrap();

    assert_eq!(message.get("response"), Some("Success"));
}

#[test]
fn test_decode_bytes_lossy_replaces_invalid() {
    let mut message = Message::new();
    decode_bytes(b"Name: a\xffb", &mut message, &Config::default()).unwrap();

    assert_eq!(message.get("name"), Some("a\u{fffd}b"));
}

#[test]
fn test_decode_bytes_strict_rejects_invalid() {
    let config = Config::builder().lossy_utf8(false).build();
    let mut message = Message::new();

    let err = decode_bytes(b"Name: a\xffb", &mut message, &config).unwrap_err();

    assert!(matches!(err, AmiError::InvalidUtf8 { offset: 7 }));
    assert!(message.is_empty());
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_round_trip_lowercases_names() {
    let mut message = Message::new();
    message.set("Action", "Ping");
    message.set("ActionID", "x1");

    let decoded = Message::decoded(&message.encode());
    let fields: Vec<_> = decoded.fields().collect();

    assert_eq!(fields, vec![("action", "Ping"), ("actionid", "x1")]);
}

proptest! {
    #[test]
    fn prop_round_trip_simple_fields(
        fields in proptest::collection::vec(("[A-Za-z][A-Za-z0-9_]{0,12}", "[A-Za-z0-9 ./=@-]{0,24}"), 0..8)
    ) {
        let mut message = Message::new();
        for (name, value) in &fields {
            message.set(name, value.trim());
        }

        let mut decoded = Message::new();
        decode(&encode(&message), &mut decoded, &Config::default());

        prop_assert_eq!(decoded.field_count(), message.field_count());
        for (name, value) in message.fields() {
            prop_assert_eq!(decoded.get(name), Some(value));
        }
    }
}

#[test]
fn test_eol_constant() {
    assert_eq!(EOL, "\r\n");
}
