//! Conversation controller behavior against scripted backends and fake voices

mod common;

use buddy::backend::BackendError;
use buddy::conversation::APOLOGY;
use buddy::messages::Role;
use buddy::voice::RecognitionEvent;
use common::{fixture, Step, WAIT};
use std::time::Duration;

fn transcript(fx: &common::Fixture) -> Vec<(Role, String)> {
    fx.controller
        .view()
        .messages()
        .iter()
        .map(|m| (m.role, m.content.clone()))
        .collect()
}

#[test]
fn test_blank_submission_is_ignored() {
    let mut fx = fixture().build();

    for text in ["", "   ", "\t\n"] {
        assert!(!fx.controller.submit(text));
    }

    fx.controller.set_input("  ");
    assert!(!fx.controller.submit_pending());

    assert!(fx.controller.wait_for_reply(WAIT));
    let view = fx.controller.view();
    assert!(view.messages().is_empty());
    assert!(!view.is_typing());
    assert!(view.show_welcome());
    assert_eq!(view.input(), "  ");
    assert_eq!(fx.backend.calls(), 0);
}

#[test]
fn test_successful_submission_appends_user_then_ai() {
    let mut fx = fixture().step(Step::reply("hello")).build();

    assert!(fx.controller.submit("hi"));
    {
        let view = fx.controller.view();
        assert_eq!(view.messages().len(), 1);
        assert!(view.is_typing());
        assert!(!view.show_welcome());
    }

    assert!(fx.controller.wait_for_reply(WAIT));

    assert_eq!(
        transcript(&fx),
        vec![(Role::User, "hi".to_string()), (Role::Ai, "hello".to_string())]
    );
    let view = fx.controller.view();
    assert!(!view.is_typing());
    assert!(view.is_connected());
    assert_eq!(fx.backend.queries(), vec!["hi".to_string()]);
    assert_eq!(fx.speech.lock().texts(), vec!["hello".to_string()]);
}

#[test]
fn test_failed_submission_appends_apology() {
    let mut fx = fixture()
        .step(Step::fail(BackendError::Status {
            status: 500,
            message: "boom".into(),
        }))
        .build();

    fx.controller.submit("hi");
    assert!(fx.controller.wait_for_reply(WAIT));

    assert_eq!(
        transcript(&fx),
        vec![(Role::User, "hi".to_string()), (Role::Ai, APOLOGY.to_string())]
    );
    let view = fx.controller.view();
    assert!(!view.is_connected());
    assert!(!view.is_typing());
    assert_eq!(fx.speech.lock().texts(), vec![APOLOGY.to_string()]);
}

#[test]
fn test_transport_failure_marks_connection_degraded() {
    let mut fx = fixture()
        .step(Step::fail(BackendError::Transport("connection refused".into())))
        .step(Step::reply("back again"))
        .build();

    fx.controller.submit("hi");
    fx.controller.wait_for_reply(WAIT);
    assert!(!fx.controller.view().is_connected());

    fx.controller.submit("retry");
    fx.controller.wait_for_reply(WAIT);
    assert!(fx.controller.view().is_connected());
    assert_eq!(fx.controller.view().messages().len(), 4);
}

#[test]
fn test_submit_clears_pending_input() {
    let mut fx = fixture().build();

    fx.controller.set_input("what time is it?");
    assert!(fx.controller.submit_pending());
    assert_eq!(fx.controller.view().input(), "");

    fx.controller.wait_for_reply(WAIT);
    assert_eq!(
        transcript(&fx),
        vec![
            (Role::User, "what time is it?".to_string()),
            (Role::Ai, "echo: what time is it?".to_string()),
        ]
    );
}

#[test]
fn test_newer_submission_supersedes_outstanding_request() {
    let mut fx = fixture()
        .step(
            Step::reply("slow answer")
                .after(Duration::from_millis(300))
                .when("first"),
        )
        .step(Step::reply("fast answer").when("second"))
        .build();

    fx.controller.submit("first");
    fx.controller.submit("second");
    assert!(fx.controller.wait_for_reply(WAIT));

    // Give the aborted request time to have answered if it were still alive
    std::thread::sleep(Duration::from_millis(400));
    fx.controller.poll_events();

    assert_eq!(
        transcript(&fx),
        vec![
            (Role::User, "first".to_string()),
            (Role::User, "second".to_string()),
            (Role::Ai, "fast answer".to_string()),
        ]
    );
    assert!(!fx.controller.view().is_typing());
}

#[test]
fn test_clear_restores_welcome() {
    let mut fx = fixture().build();

    fx.controller.submit("hi");
    fx.controller.wait_for_reply(WAIT);
    fx.controller.set_input("draft");
    assert!(!fx.controller.view().show_welcome());

    fx.controller.clear();

    let view = fx.controller.view();
    assert!(view.messages().is_empty());
    assert!(view.show_welcome());
    assert!(!view.is_typing());
    assert_eq!(view.input(), "draft");
}

#[test]
fn test_clear_drops_outstanding_reply() {
    let mut fx = fixture()
        .step(Step::reply("late").after(Duration::from_millis(200)))
        .build();

    fx.controller.submit("hi");
    fx.controller.clear();

    std::thread::sleep(Duration::from_millis(300));
    fx.controller.poll_events();

    let view = fx.controller.view();
    assert!(view.messages().is_empty());
    assert!(!view.is_typing());
    assert!(fx.speech.lock().utterances.is_empty());
}

#[test]
fn test_welcome_and_sidebar_toggles() {
    let mut fx = fixture().build();
    assert!(fx.controller.view().sidebar_open());

    fx.controller.toggle_sidebar();
    assert!(!fx.controller.view().sidebar_open());
    fx.controller.toggle_sidebar();
    assert!(fx.controller.view().sidebar_open());

    fx.controller.dismiss_welcome();
    assert!(!fx.controller.view().show_welcome());
    assert!(fx.controller.view().messages().is_empty());
}

#[test]
fn test_listen_toggle_without_utterance_changes_nothing() {
    let mut fx = fixture().build();
    fx.controller.set_input("typed so far");

    fx.controller.toggle_listening();
    assert!(fx.controller.view().is_listening());
    fx.controller.toggle_listening();
    assert!(!fx.controller.view().is_listening());

    fx.controller.poll_events();
    assert_eq!(fx.controller.view().input(), "typed so far");
    assert!(fx.controller.view().messages().is_empty());
    assert_eq!(fx.backend.calls(), 0);
    assert_eq!(fx.recognizer.stops(), 1);
}

#[test]
fn test_recognized_utterance_is_submitted_once() {
    let mut fx = fixture().step(Step::reply("Opening YouTube")).build();

    fx.controller.toggle_listening();
    let starts = fx.recognizer.starts();
    assert_eq!(starts.len(), 1);
    assert!(!starts[0].continuous);
    assert!(!starts[0].interim_results);

    fx.recognizer
        .emit(RecognitionEvent::Result("open youtube".into()));
    fx.recognizer.emit(RecognitionEvent::Ended);
    assert!(fx.controller.poll_events());
    assert!(!fx.controller.view().is_listening());

    fx.controller.wait_for_reply(WAIT);
    fx.controller.poll_events();

    assert_eq!(fx.backend.calls(), 1);
    assert_eq!(
        transcript(&fx),
        vec![
            (Role::User, "open youtube".to_string()),
            (Role::Ai, "Opening YouTube".to_string()),
        ]
    );
}

#[test]
fn test_recognition_error_falls_back_to_typing() {
    let mut fx = fixture().build();
    fx.controller.set_input("half typed");

    fx.controller.toggle_listening();
    fx.recognizer
        .emit(RecognitionEvent::Error("not-allowed".into()));
    fx.controller.poll_events();

    let view = fx.controller.view();
    assert!(!view.is_listening());
    assert_eq!(view.input(), "half typed");
    assert!(view.messages().is_empty());
    assert_eq!(fx.backend.calls(), 0);
}

#[test]
fn test_listening_unavailable_without_recognizer() {
    let mut fx = fixture().without_recognizer().build();

    assert!(!fx.controller.can_listen());
    assert_eq!(fx.controller.listen_unavailable_reason(), Some("no microphone"));

    fx.controller.toggle_listening();
    assert!(!fx.controller.view().is_listening());
}

#[test]
fn test_replies_work_without_synthesizer() {
    let mut fx = fixture().without_synthesizer().build();

    fx.controller.submit("hi");
    assert!(fx.controller.wait_for_reply(WAIT));
    assert_eq!(fx.controller.view().messages().len(), 2);
}

#[test]
fn test_reply_is_spoken_with_preferred_voice() {
    let mut fx = fixture().build();

    fx.controller.submit("hi");
    fx.controller.wait_for_reply(WAIT);

    let speech = fx.speech.lock();
    assert_eq!(speech.utterances.len(), 1);
    let voice = speech.utterances[0].voice.as_ref().expect("voice chosen");
    assert_eq!(voice.lang, "en-us");
    // Playback is interrupted before every new utterance
    assert_eq!(speech.cancels, 1);
}
