//! Property tests: totality, INIT idempotence, classification determinism.

use proptest::prelude::*;
use sensei_core::engine::is_valid_email;
use sensei_core::{Bucket, Engine, Input, Session, SessionData, StateId};

fn any_state() -> impl Strategy<Value = StateId> {
    proptest::sample::select(StateId::ALL.to_vec())
}

fn any_data() -> impl Strategy<Value = SessionData> {
    proptest::collection::btree_map(
        prop_oneof![
            Just("goal".to_string()),
            Just("bucket".to_string()),
            Just("pain".to_string()),
            Just("years".to_string()),
            Just("email".to_string()),
            Just("first_name".to_string()),
            "[a-z_]{1,8}",
        ],
        ".{0,24}",
        0..6,
    )
}

proptest! {
    #[test]
    fn advance_is_total(state in any_state(), data in any_data(), input in ".{0,40}") {
        let session = Session { state, data };
        let turn = Engine::default().advance(session, &Input::Text(input)).unwrap();
        prop_assert!(!turn.messages.is_empty());
        prop_assert_ne!(turn.session.state, StateId::Unrecognized);
        prop_assert_eq!(turn.checkout_url.is_some(), turn.session.state == StateId::Checkout);
    }

    #[test]
    fn init_is_idempotent(state in any_state(), data in any_data()) {
        let engine = Engine::default();
        let first = engine.advance(Session { state, data }, &Input::Init).unwrap();
        prop_assert_eq!(&first.session, &Session::fresh());

        let second = engine.advance(first.session.clone(), &Input::Init).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn classification_is_deterministic(goal in ".{0,40}") {
        let bucket = Bucket::classify(&goal);
        prop_assert_eq!(bucket, Bucket::classify(&goal));

        let lower = goal.to_lowercase();
        let expected = if lower.contains("kumite") {
            Bucket::Kumite
        } else if lower.contains("kata") {
            Bucket::Kata
        } else if lower.contains("fit") || lower.contains("flex") {
            Bucket::Conditioning
        } else {
            Bucket::Mind
        };
        prop_assert_eq!(bucket, expected);
    }

    #[test]
    fn invalid_email_keeps_state(input in "[^@]{0,30}") {
        prop_assume!(!is_valid_email(&input));
        for state in [StateId::Email, StateId::FreebieEmail] {
            let session = Session { state, data: SessionData::new() };
            let turn = Engine::default().advance(session.clone(), &Input::Text(input.clone())).unwrap();
            prop_assert_eq!(turn.session, session);
        }
    }
}
