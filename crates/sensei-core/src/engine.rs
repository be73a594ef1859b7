//! Conversation engine.
//!
//! `advance` is a pure, total function of `(session, input)`: every state and
//! every input yields a next session and at least one bot message. The only
//! failure is a misconfigured checkout destination, which is a deployment
//! defect rather than a conversational outcome.
//!
//! ## Transitions
//!
//! | state           | input                         | next            |
//! |-----------------|-------------------------------|-----------------|
//! | consent         | `yes` (whole, any case)       | goal            |
//! | consent         | anything else                 | freebie         |
//! | goal            | any (classified into bucket)  | pain            |
//! | pain            | any                           | years           |
//! | years           | any                           | email           |
//! | email           | valid email                   | prescribe       |
//! | email           | invalid                       | email           |
//! | prescribe       | `start now` in text, or `yes` | checkout        |
//! | prescribe       | anything else                 | prescribe       |
//! | freebie         | contains `yes`                | freebie_email   |
//! | freebie         | anything else                 | end             |
//! | freebie_email   | valid email                   | end             |
//! | freebie_email   | invalid                       | freebie_email   |
//! | checkout / end / unrecognized | any             | consent (restart prompt) |
//!
//! [`Input::Init`] short-circuits all of the above.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::bucket::Bucket;
use crate::catalog::Catalog;
use crate::checkout::{build_checkout_link, CheckoutError};
use crate::message::OutgoingMessage;
use crate::script;
use crate::state::{
    Session, StateId, KEY_BUCKET, KEY_EMAIL, KEY_GOAL, KEY_PAIN, KEY_YEARS,
};

/// Permissive email shape: non-space `@` non-space `.` non-space.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Bucket used at checkout when none was recorded.
const FALLBACK_CHECKOUT_BUCKET: Bucket = Bucket::Kumite;

/// One unit of visitor input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Out-of-band initialization signal. Not constructible from message text.
    Init,
    /// Typed or button-originated text; the two are indistinguishable.
    Text(String),
}

impl Input {
    pub fn text(s: impl Into<String>) -> Self {
        Input::Text(s.into())
    }
}

/// Result of one engine step.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub session: Session,
    pub messages: Vec<OutgoingMessage>,
    pub checkout_url: Option<Url>,
}

impl Turn {
    fn say(session: Session, message: OutgoingMessage) -> Self {
        Self {
            session,
            messages: vec![message],
            checkout_url: None,
        }
    }
}

/// Whether `input` looks like an email address.
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_RE.is_match(input)
}

/// The funnel state machine, bound to a product catalog.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    catalog: Catalog,
}

impl Engine {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Advance `session` by one input.
    pub fn advance(&self, session: Session, input: &Input) -> Result<Turn, CheckoutError> {
        let text = match input {
            Input::Init => return Ok(Turn::say(Session::fresh(), script::welcome())),
            Input::Text(text) => text.trim(),
        };
        self.dispatch(session, text)
    }

    fn dispatch(&self, mut s: Session, m: &str) -> Result<Turn, CheckoutError> {
        let turn = match s.state {
            StateId::Consent => {
                if m.eq_ignore_ascii_case("yes") {
                    s.state = StateId::Goal;
                    Turn::say(s, script::goal_prompt())
                } else {
                    s.state = StateId::Freebie;
                    Turn::say(s, script::freebie_offer())
                }
            }

            StateId::Goal => {
                let bucket = Bucket::classify(m);
                s.set(KEY_GOAL, m);
                s.set(KEY_BUCKET, bucket.as_str());
                s.state = StateId::Pain;
                Turn::say(s, script::pain_prompt(bucket))
            }

            StateId::Pain => {
                s.set(KEY_PAIN, m);
                s.state = StateId::Years;
                Turn::say(s, script::years_prompt())
            }

            StateId::Years => {
                s.set(KEY_YEARS, m);
                s.state = StateId::Email;
                let message = script::summary_and_email_request(
                    m,
                    s.get(KEY_GOAL).unwrap_or_default(),
                    s.get(KEY_PAIN).unwrap_or_default(),
                );
                Turn::say(s, message)
            }

            StateId::Email => {
                if !is_valid_email(m) {
                    return Ok(Turn::say(s, script::email_reprompt()));
                }
                s.set(KEY_EMAIL, m);
                s.state = StateId::Prescribe;
                let bucket = recorded_bucket(&s);
                Turn::say(s, script::pitch(bucket))
            }

            StateId::Prescribe => {
                if accepts_offer(m) {
                    s.state = StateId::Checkout;
                    let bucket = recorded_bucket(&s).unwrap_or(FALLBACK_CHECKOUT_BUCKET);
                    let url = build_checkout_link(&self.catalog, bucket, &s.data)?;
                    Turn {
                        session: s,
                        messages: vec![script::opening_checkout()],
                        checkout_url: Some(url),
                    }
                } else {
                    Turn::say(s, script::feature_list())
                }
            }

            StateId::Freebie => {
                if m.to_lowercase().contains("yes") {
                    s.state = StateId::FreebieEmail;
                    Turn::say(s, script::freebie_email_request())
                } else {
                    s.state = StateId::End;
                    Turn::say(s, script::farewell())
                }
            }

            StateId::FreebieEmail => {
                if !is_valid_email(m) {
                    return Ok(Turn::say(s, script::freebie_email_reprompt()));
                }
                s.set(KEY_EMAIL, m);
                s.state = StateId::End;
                Turn::say(s, script::freebie_confirmation())
            }

            // Terminal nodes and unknown identifiers restart; data is kept.
            StateId::Checkout | StateId::End | StateId::Unrecognized => {
                s.state = StateId::Consent;
                Turn::say(s, script::restart_prompt())
            }
        };
        Ok(turn)
    }
}

fn recorded_bucket(s: &Session) -> Option<Bucket> {
    s.get(KEY_BUCKET).and_then(Bucket::parse)
}

fn accepts_offer(m: &str) -> bool {
    m.to_lowercase().contains("start now") || m.eq_ignore_ascii_case("yes")
}
