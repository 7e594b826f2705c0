use kbase_core::constants::MAX_QUESTION_BYTES;
use kbase_core::errors::SessionError;
use kbase_session::protocol::parse_inbound;
use kbase_session::Inbound;
use proptest::prelude::*;

// ── Arbitrary input never panics and is either valid or malformed ───────

proptest! {
    #[test]
    fn arbitrary_input_is_question_ack_or_malformed(raw in ".{0,200}") {
        match parse_inbound(&raw) {
            Ok(Inbound::Question(q)) => {
                prop_assert!(!q.is_empty());
                prop_assert_eq!(q.trim(), q.as_str());
            }
            Ok(Inbound::HeartbeatAck) => {}
            Err(err) => {
                let is_malformed = matches!(err, SessionError::MalformedRequest { .. });
                prop_assert!(is_malformed);
            }
        }
    }
}

// ── Any non-blank string question survives the round trip trimmed ───────

proptest! {
    #[test]
    fn string_questions_are_accepted_trimmed(text in "[ ]{0,3}[A-Za-z][A-Za-z0-9 ?]{0,80}") {
        let raw = serde_json::json!({ "message": text }).to_string();
        prop_assert_eq!(
            parse_inbound(&raw),
            Ok(Inbound::Question(text.trim().to_string()))
        );
    }
}

// ── Questions over the byte limit are always rejected ───────────────────

proptest! {
    #[test]
    fn oversized_questions_are_rejected(extra in 1usize..64) {
        let raw = serde_json::json!({ "message": "a".repeat(MAX_QUESTION_BYTES + extra) }).to_string();
        prop_assert!(parse_inbound(&raw).is_err());
    }
}
