//! End-to-end walks through both funnel branches using the pure engine.

use sensei_core::state::{KEY_BUCKET, KEY_EMAIL};
use sensei_core::{Engine, Input, Session, StateId, Turn};

struct Walk {
    engine: Engine,
    session: Session,
}

impl Walk {
    fn new() -> Self {
        Self {
            engine: Engine::default(),
            session: Session::fresh(),
        }
    }

    fn send(&mut self, input: Input) -> Turn {
        let turn = self
            .engine
            .advance(self.session.clone(), &input)
            .expect("default catalog is valid");
        self.session = turn.session.clone();
        turn
    }

    fn say(&mut self, text: &str) -> Turn {
        self.send(Input::text(text))
    }
}

#[test]
fn test_purchase_path() {
    let mut walk = Walk::new();

    let turn = walk.send(Input::Init);
    assert_eq!(turn.session.state, StateId::Consent);
    assert!(turn.messages[0].text.contains("Welcome to Shotokan Karate Rebel"));
    assert_eq!(turn.messages[0].buttons(), ["Yes", "Not now"]);

    let turn = walk.say("Yes");
    assert_eq!(turn.session.state, StateId::Goal);
    assert!(turn.messages[0].text.contains("what result do you want most"));

    let turn = walk.say("Win more kumite exchanges");
    assert_eq!(turn.session.state, StateId::Pain);
    assert_eq!(turn.session.get(KEY_BUCKET), Some("kumite"));
    assert_eq!(
        turn.messages[0].buttons(),
        ["Can’t close distance", "I get countered", "Freeze under pressure"]
    );

    let turn = walk.say("I get countered");
    assert_eq!(turn.session.state, StateId::Years);

    let turn = walk.say("3–5");
    assert_eq!(turn.session.state, StateId::Email);
    let summary = &turn.messages[0].text;
    assert!(summary.contains("Win more kumite exchanges"));
    assert!(summary.contains("I get countered"));
    assert!(summary.contains("With 3–5 years"));

    let turn = walk.say("test@example.com");
    assert_eq!(turn.session.state, StateId::Prescribe);
    assert!(turn.messages[0].text.contains("Kumite Strategy Playbook"));

    let turn = walk.say("What’s inside?");
    assert_eq!(turn.session.state, StateId::Prescribe);
    assert!(turn.checkout_url.is_none());

    let turn = walk.say("Yes, start now");
    assert_eq!(turn.session.state, StateId::Checkout);
    assert_eq!(turn.messages[0].text, "Opening checkout…");
    let url = turn.checkout_url.expect("checkout url");
    assert!(url.as_str().contains("tag=tc_kumite_core"));
    assert!(url.as_str().contains("email=test%40example.com"));
    assert!(url.as_str().contains("utm_source=sensei_bot"));
    assert!(url.as_str().contains("utm_campaign=skr"));

    // Anything after checkout restarts without losing collected data
    let turn = walk.say("thanks");
    assert_eq!(turn.session.state, StateId::Consent);
    assert_eq!(turn.session.get(KEY_EMAIL), Some("test@example.com"));
}

#[test]
fn test_freebie_path() {
    let mut walk = Walk::new();
    walk.send(Input::Init);

    let turn = walk.say("Not now");
    assert_eq!(turn.session.state, StateId::Freebie);
    assert_eq!(turn.messages[0].buttons(), ["Yes, send it", "Maybe later"]);

    let turn = walk.say("Yes, send it");
    assert_eq!(turn.session.state, StateId::FreebieEmail);

    let turn = walk.say("still not an email");
    assert_eq!(turn.session.state, StateId::FreebieEmail);
    assert_eq!(turn.messages[0].text, "Please enter a valid email.");

    let turn = walk.say("karateka@dojo.jp");
    assert_eq!(turn.session.state, StateId::End);
    assert_eq!(turn.session.get(KEY_EMAIL), Some("karateka@dojo.jp"));
    assert!(turn.messages[0].text.contains("check your inbox"));
    assert!(turn.checkout_url.is_none());
}

#[test]
fn test_restart_mid_funnel() {
    let mut walk = Walk::new();
    walk.send(Input::Init);
    walk.say("yes");
    walk.say("Ace my next grading (kata)");
    assert_eq!(walk.session.state, StateId::Pain);

    let turn = walk.send(Input::Init);
    assert_eq!(turn.session, Session::fresh());
}

#[test]
fn test_recovery_from_bogus_state() {
    let engine = Engine::default();
    let session = Session::from_echo("bogus", None);
    let turn = engine.advance(session, &Input::text("hello")).unwrap();
    assert_eq!(turn.session.state, StateId::Consent);
    assert_eq!(turn.messages[0].buttons(), ["Start"]);
}
