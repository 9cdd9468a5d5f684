//! Integration tests for message parsing and serialization
//!
//! These tests verify that messages can be serialized and then parsed back to
//! equal values, and that the end-to-end line examples hold.

use slirc_line::{
    EncodeOptions, Message, MessageEncodeError, MessageParseError, ParseOptions, ProtocolError,
};

fn round_trip_messages() -> Vec<Message> {
    vec![
        Message::with_tags(
            [
                ("time", "2019-02-27T04:38:57.489Z"),
                ("account", "dan-"),
                ("+status", "typing"),
            ],
            "dan-!~user@example.com",
            "TAGMSG",
            &[],
        ),
        // not a valid PING, but the codec doesn't care
        Message::with_tags([("+status", "typing")], "", "PING", &[]),
        Message::with_tags(
            [("time", "2019-02-27T04:38:57.489Z")],
            "",
            "PING",
            &["12345"],
        ),
        Message::with_tags(
            [("time", "2019-02-27T04:38:57.489Z"), ("account", "dan-")],
            "dan-!~user@example.com",
            "PRIVMSG",
            &["#ircv3", ":smiley:"],
        ),
        Message::with_tags(
            [("time", "2019-02-27T04:38:57.489Z"), ("account", "dan-")],
            "dan-!~user@example.com",
            "PRIVMSG",
            &["#ircv3", "\x01ACTION writes some specs!\x01"],
        ),
        Message::new(
            "dan-!~user@example.com",
            "PRIVMSG",
            &["#ircv3", ": long trailing command with langue française in it"],
        ),
        Message::new(
            "dan-!~user@example.com",
            "PRIVMSG",
            &["#ircv3", " : long trailing command with langue française in it "],
        ),
        Message::new(
            "shivaram",
            "KLINE",
            &[
                "ANDKILL",
                "24h",
                "tkadich",
                "your",
                "client",
                "is",
                "disconnecting",
                "too",
                "much",
            ],
        ),
        Message::with_tags(
            [
                ("time", "2019-02-27T06:01:23.545Z"),
                ("draft/msgid", "xjmgr6e4ih7izqu6ehmrtrzscy"),
            ],
            "שיברם",
            "PRIVMSG",
            &["ויקם מלך חדש על מצרים אשר לא ידע את יוסף"],
        ),
        Message::with_tags(
            [("+draft/reply", "a;b c\\d\r\ne")],
            "",
            "PRIVMSG",
            &["#channel", ""],
        ),
    ]
}

#[test]
fn test_encode_then_parse_is_identity() {
    for message in round_trip_messages() {
        let encoded = message.line(false, 0).expect("encodes");
        let parsed = Message::parse_line(&encoded, true, 0).expect("re-parses");
        assert_eq!(message, parsed, "through {:?}", encoded);
    }
}

#[test]
fn test_parse_then_encode_is_stable() {
    let lines = [
        "PING :irc.example.com\r\n",
        ":nick!user@host PRIVMSG #channel :Hello, world!\r\n",
        "@time=2023-01-01T00:00:00.000Z;msgid=abc123 :nick!user@host PRIVMSG #channel :Tagged message\r\n",
        ":server 001 nickname :Welcome to the IRC Network\r\n",
        "@batch=abc123;msgid=def456;time=2023-01-01T12:00:00Z;+custom=value :nick BATCH +abc123 chathistory #channel\r\n",
    ];

    for line in lines {
        let message: Message = line.parse().expect("parses");
        let encoded = message.line(false, 0).expect("encodes");
        let reparsed: Message = encoded.parse().expect("re-parses");
        assert_eq!(message, reparsed, "through {:?}", encoded);
    }
}

#[test]
fn test_parse_end_to_end() {
    let msg = Message::parse_line("@time=2848 :dan-!d@localhost LIST\r\n", true, 0).unwrap();
    assert_eq!(msg.all_tags().len(), 1);
    assert_eq!(msg.get_tag("time"), Some("2848"));
    assert_eq!(msg.prefix, "dan-!d@localhost");
    assert_eq!(msg.command, "LIST");
    assert!(msg.params.is_empty());
}

#[test]
fn test_encode_end_to_end() {
    let mut msg = Message::new("", "PING", &["HiThere!"]);
    msg.set_tag("+draft/test", "hi\nthere");
    assert_eq!(
        msg.line(false, 0).unwrap(),
        "@+draft/test=hi\\nthere PING HiThere!\r\n"
    );
    assert_eq!(
        msg.line_bytes(false, 0).unwrap(),
        b"@+draft/test=hi\\nthere PING HiThere!\r\n"
    );
}

#[test]
fn test_empty_lines() {
    for raw in ["\r\n", " \r\n", ":dan-\r\n", "@tag1=1;tag2=2 :dan \r\n"] {
        for strict in [false, true] {
            assert_eq!(
                Message::parse_line(raw, strict, 0),
                Err(MessageParseError::LineIsEmpty),
                "{:?}",
                raw
            );
        }
    }
}

#[test]
fn test_nul_anywhere() {
    for raw in [
        "\0PRIVMSG #ch :hi\r\n",
        "@a=\0 PING\r\n",
        ":ni\0ck PING\r\n",
        "PRIVMSG #ch :hi\0\r\n",
        "PRIVMSG #ch :hi\r\n\0",
    ] {
        for strict in [false, true] {
            assert_eq!(
                Message::parse_line(raw, strict, 0),
                Err(MessageParseError::LineContainsBadChar),
                "{:?}",
                raw
            );
        }
    }
}

#[test]
fn test_bounded_parse() {
    let opts = ParseOptions::new().strict(true);
    assert_eq!(
        opts.max_raw_length(6).parse("TESTMSG\r\n").unwrap().command,
        "TESTMS"
    );
    for max in [7, 8, 9] {
        assert_eq!(
            opts.max_raw_length(max).parse("TESTMSG\r\n").unwrap().command,
            "TESTMSG"
        );
    }
}

#[test]
fn test_encode_validation() {
    let msg = Message::new("example.com", "", &["*"]);
    assert_eq!(msg.line(true, 0), Err(MessageEncodeError::MissingCommand));

    let msg = Message::new("example.com", "TEST", &["*", "t s", "", "Param after empty!"]);
    assert!(matches!(
        msg.line(true, 0),
        Err(MessageEncodeError::InvalidParam { .. })
    ));
}

#[test]
fn test_tag_budget_shared_mode() {
    let mut msg = Message::with_tags(
        [("draft/msgid", "SAXV5OYJUr18CNJzdWa1qQ")],
        "shivaram",
        "PRIVMSG",
        &["aaaaaaaaaaaaaaaaaaaaa"],
    );
    assert!(msg.line_bytes(true, 0).is_ok());

    for i in 0..100 {
        msg.set_tag(format!("+client-tag-{i}"), "ok");
    }
    let line = msg.line_bytes(true, 0).unwrap();
    assert!(line.len() <= 4096, "line is too long: {}", line.len());

    // excess tag data pushes the section over the limit
    for i in 100..500 {
        msg.set_tag(format!("+client-tag-{i}"), "ok");
    }
    assert!(matches!(
        msg.line_bytes(true, 0),
        Err(MessageEncodeError::LineTooLong { .. })
    ));

    let mut msg = Message::new("shivaram", "PRIVMSG", &["aaaaaaaaaaaaaaaaaaaaa"]);
    for i in 0..500 {
        msg.set_tag(format!("server-tag-{i}"), "ok");
    }
    assert!(matches!(
        msg.line_bytes(true, 0),
        Err(MessageEncodeError::LineTooLong { .. })
    ));
    assert!(matches!(
        msg.line_bytes(false, 0),
        Err(MessageEncodeError::LineTooLong { .. })
    ));
}

#[test]
fn test_tag_budget_independent_mode() {
    let mut msg = Message::new("shivaram", "PRIVMSG", &["aaaaaaaaaaaaaaaaaaaaa"]);
    for i in 0..200 {
        msg.set_tag(format!("server-tag-{i}"), "ok");
        msg.set_tag(format!("+client-tag-{i}"), "ok");
    }

    // a client cannot send this much tag data
    assert!(matches!(
        msg.line_bytes(true, 0),
        Err(MessageEncodeError::LineTooLong { .. })
    ));
    // but a server can, since each class has its own budget
    let line = msg.line_bytes(false, 0).unwrap();
    let reparsed = Message::parse_line(&line, true, 0).unwrap();
    assert_eq!(reparsed, msg);
}

#[test]
fn test_packed_lines() {
    let msg = Message::new(
        "dan-!d@localhost",
        "PRIVMSG",
        &["dan", "#test", "What a cool message"],
    );
    assert_eq!(
        EncodeOptions::new()
            .from_client(true)
            .max_line_length(12)
            .encode(&msg)
            .unwrap(),
        ":dan-!d@lo\r\n"
    );

    let msg = Message::with_tags([("riohwihowihirgowihre", "")], "", "TEST", &["*", "*"]);
    assert_eq!(
        msg.line(true, 8).unwrap(),
        "@riohwihowihirgowihre TEST *\r\n"
    );
}

#[test]
fn test_from_str_errors() {
    let err = "@a=b :nick".parse::<Message>().unwrap_err();
    match err {
        ProtocolError::InvalidMessage { string, cause } => {
            assert_eq!(string, "@a=b :nick");
            assert_eq!(cause, MessageParseError::LineIsEmpty);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_encode_to_socket_buffer() {
    let mut wire = Vec::new();
    let opts = EncodeOptions::new();
    for message in round_trip_messages() {
        message.encode_to(&mut wire, &opts).unwrap();
    }

    let lines: Vec<&[u8]> = wire
        .split_inclusive(|&b| b == b'\n')
        .collect();
    assert_eq!(lines.len(), round_trip_messages().len());
    for (line, message) in lines.into_iter().zip(round_trip_messages()) {
        assert_eq!(Message::parse_line(line, true, 0).unwrap(), message);
    }
}

#[test]
fn test_unrepresentable_messages_are_refused() {
    // NUL has no tag escape
    let msg = Message::new("", "PING", &["x"]).with_tag("a", "b\0c");
    assert_eq!(
        msg.line(false, 0),
        Err(MessageEncodeError::InvalidTagValue("a".to_owned()))
    );

    // would be read back as a tag section
    let msg = Message::new("", "@FOO", &["x"]);
    assert_eq!(
        msg.line(false, 0),
        Err(MessageEncodeError::InvalidCommand("@FOO".to_owned()))
    );
}
