//! Funnel copy: every bot message the engine can emit.

use crate::bucket::Bucket;
use crate::message::OutgoingMessage;

pub const BUTTON_START_NOW: &str = "Yes, start now";
pub const BUTTON_WHATS_INSIDE: &str = "What’s inside?";
pub const BUTTON_MAYBE_LATER: &str = "Maybe later";
pub const BUTTON_START: &str = "Start";

pub fn welcome() -> OutgoingMessage {
    OutgoingMessage::bot(
        "👋 Welcome to Shotokan Karate Rebel. I’m your digital sensei. \
         Want help pinpointing what’s holding you back—and the fastest way to fix it?",
    )
    .with_buttons(["Yes", "Not now"])
}

pub fn goal_prompt() -> OutgoingMessage {
    OutgoingMessage::bot("In the next 90 days, what result do you want most?").with_buttons([
        "Win more kumite exchanges",
        "Ace my next grading (kata)",
        "Get fitter & more flexible",
        "Stay calm & confident",
    ])
}

pub fn freebie_offer() -> OutgoingMessage {
    OutgoingMessage::bot("No worries. Want the Kumite Cheatsheet (10 quick wins)?")
        .with_buttons(["Yes, send it", BUTTON_MAYBE_LATER])
}

pub fn pain_prompt(bucket: Bucket) -> OutgoingMessage {
    let buttons: [&str; 3] = match bucket {
        Bucket::Kumite => [
            "Can’t close distance",
            "I get countered",
            "Freeze under pressure",
        ],
        Bucket::Kata => ["Timing/flow", "Hip drive & stances", "Nerves on grading"],
        Bucket::Conditioning => ["Gas out", "Stiff hips/hamstrings", "No plan"],
        Bucket::Mind => ["Anxiety", "Motivation dips", "Focus drift"],
    };
    OutgoingMessage::bot("What’s the #1 frustration right now?").with_buttons(buttons)
}

pub fn years_prompt() -> OutgoingMessage {
    OutgoingMessage::bot("How many years have you trained?").with_buttons(["<1", "1–3", "3–5", "5+"])
}

/// Goal and pain are interpolated verbatim.
pub fn summary_and_email_request(years: &str, goal: &str, pain: &str) -> OutgoingMessage {
    OutgoingMessage::bot(format!(
        "Got it. With {years} years aiming to \"{goal}\", your main blocker is \"{pain}\". \
         More reps won’t fix it. You need strategy + the right drills.\n\
         What’s your email so I can send your tailored plan?"
    ))
}

pub fn email_reprompt() -> OutgoingMessage {
    OutgoingMessage::bot("Please enter a valid email (e.g. name@example.com)")
}

/// Product pitch; `None` (no bucket recorded) falls back to the mind pitch.
pub fn pitch(bucket: Option<Bucket>) -> OutgoingMessage {
    let text = match bucket {
        Some(Bucket::Kumite) => {
            "I recommend the **Kumite Strategy Playbook** (PDF + videos):\n\
             • 3 distance-closing patterns that avoid counter-gyaku\n\
             • Rhythm breaks to create openings\n\
             • Sen-no-sen / go-no-sen timing with examples\n\
             • 10-minute footwork & reaction sessions\n\
             Ready to start? £27. Instant access."
        }
        Some(Bucket::Kata) => {
            "I recommend the **Kata Mastery Blueprint** (checklists, rhythm drills, visual cues). \
             Ready to start? £27."
        }
        Some(Bucket::Conditioning) => {
            "I recommend the **Dojo Conditioning 30-Day Plan** (short sessions for gas tank & mobility). \
             Ready to start? £27."
        }
        Some(Bucket::Mind) | None => {
            "I recommend the **Mental Dojo Journal System** (focus, calm, confidence protocols). \
             Ready to start? £27."
        }
    };
    OutgoingMessage::bot(text).with_buttons([BUTTON_START_NOW, BUTTON_WHATS_INSIDE])
}

pub fn opening_checkout() -> OutgoingMessage {
    OutgoingMessage::bot("Opening checkout…")
}

pub fn feature_list() -> OutgoingMessage {
    OutgoingMessage::bot(
        "Here’s what you’ll get: 6 core modules, 6 short videos, drills & a printable plan. Ready?",
    )
    .with_buttons([BUTTON_START_NOW, BUTTON_MAYBE_LATER])
}

pub fn freebie_email_request() -> OutgoingMessage {
    OutgoingMessage::bot("Great—what’s your email?")
}

pub fn farewell() -> OutgoingMessage {
    OutgoingMessage::bot("All good. Come back anytime. 👊")
}

pub fn freebie_email_reprompt() -> OutgoingMessage {
    OutgoingMessage::bot("Please enter a valid email.")
}

pub fn freebie_confirmation() -> OutgoingMessage {
    OutgoingMessage::bot("Done—check your inbox in a minute. Oss!")
}

pub fn restart_prompt() -> OutgoingMessage {
    OutgoingMessage::bot("Tap a button or say 'start' to begin again.").with_buttons([BUTTON_START])
}
