use super::*;
use crate::console::{HostProcess, MessageDisplay, ShutdownHook};
use crate::frontend::ConsoleFrontEnd;
use crate::test_support::{RecordingDisplay, RecordingHost, ScriptedLines, Shown};
use crate::transfer::DecisionWaiter;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

struct Fixture {
    display: Arc<RecordingDisplay>,
    host: Arc<RecordingHost>,
    farewells: Arc<AtomicUsize>,
    frontend: ConsoleFrontEnd,
}

fn fixture() -> Fixture {
    let display = Arc::new(RecordingDisplay::default());
    let host = Arc::new(RecordingHost::default());
    let farewells = Arc::new(AtomicUsize::new(0));
    let counter = farewells.clone();
    let frontend = ConsoleFrontEnd::with_parts(
        Arc::new(Profile::new("kari")),
        display.clone() as Arc<dyn MessageDisplay>,
        host.clone() as Arc<dyn HostProcess>,
        DecisionWaiter::new(Duration::from_millis(20)),
        Arc::new(ShutdownHook::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
    );
    Fixture {
        display,
        host,
        farewells,
        frontend,
    }
}

fn logged_on() -> Fixture {
    let f = fixture();
    f.frontend.session().log_on();
    f
}

fn invalid(result: Result<(), CommandError>) -> String {
    match result {
        Err(CommandError::Invalid(message)) => message,
        other => panic!("expected invalid command, got {other:?}"),
    }
}

fn wait_for_pending(session: &LocalSession, count: usize) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while session.pending_transfers().len() < count {
        assert!(Instant::now() < deadline, "transfer never registered");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn log_on_announces_nick() {
    let f = logged_on();
    assert_eq!(f.display.system_lines(), vec!["You logged on as kari"]);
}

#[test]
fn chat_is_refused_until_logged_on() {
    let f = fixture();
    let err = f
        .frontend
        .session()
        .send_chat_message("hi")
        .expect_err("not logged on");
    assert_eq!(err.to_string(), messages::NOT_LOGGED_ON);

    f.frontend.session().log_on();
    assert!(f.frontend.session().send_chat_message("hi").is_ok());

    f.frontend.session().log_off();
    assert!(f.frontend.session().send_chat_message("hi").is_err());
}

#[test]
fn chat_is_refused_while_away() {
    let f = logged_on();
    let session = f.frontend.session();
    session.parse("away lunch").unwrap();
    let err = session.send_chat_message("hi").expect_err("away");
    assert_eq!(err.to_string(), messages::AWAY_SEND_REFUSED);
    session.parse("back").unwrap();
    assert!(session.send_chat_message("hi").is_ok());
}

#[test]
fn away_and_back_validate_current_status() {
    let f = logged_on();
    let session = f.frontend.session();
    assert_eq!(invalid(session.parse("back")), "You are not away");
    session.parse("away gone fishing").unwrap();
    assert_eq!(invalid(session.parse("away again")), "You are already away");
    session.parse("whoami").unwrap();
    assert_eq!(
        f.display.system_lines().last().unwrap(),
        "You are kari (away: gone fishing)"
    );
}

#[test]
fn nick_changes_are_validated() {
    let f = logged_on();
    let session = f.frontend.session();
    assert!(invalid(session.parse("nick no way")).contains("not a valid nick"));
    assert_eq!(invalid(session.parse("nick kari")), "You are already called kari");
    session.parse("nick ola").unwrap();
    assert_eq!(f.frontend.profile().nick(), "ola");
    assert_eq!(
        f.display.system_lines().last().unwrap(),
        "You changed nick to ola"
    );
}

#[test]
fn help_lists_every_command() {
    let f = fixture();
    f.frontend.session().parse("help").unwrap();
    assert_eq!(f.display.system_lines().len(), messages::HELP_LINES.len());
}

#[test]
fn clear_is_reported_as_unsupported() {
    let f = fixture();
    f.frontend.session().parse("clear").unwrap();
    assert_eq!(
        f.display.system_lines(),
        vec![messages::CLEAR_UNSUPPORTED.to_string()]
    );
}

#[test]
fn quit_terminates_with_status_zero() {
    let f = fixture();
    f.frontend.session().parse("quit").unwrap();
    assert_eq!(f.host.exits(), vec![0]);
}

#[test]
fn transfers_lists_pending_offers() {
    let f = logged_on();
    let session = f.frontend.session().clone();
    session.parse("transfers").unwrap();
    assert_eq!(
        f.display.system_lines().last().unwrap(),
        messages::NO_PENDING_TRANSFERS
    );

    let receiver = {
        let session = session.clone();
        thread::spawn(move || session.receive_file("ola", "notes.txt", 2048))
    };
    wait_for_pending(&session, 1);
    session.parse("transfers").unwrap();
    assert_eq!(
        f.display.system_lines().last().unwrap(),
        "[1] notes.txt from ola (2.0 KB)"
    );

    session.parse("reject 1").unwrap();
    receiver.join().unwrap();
}

#[test]
fn accepted_file_is_announced_after_receive_command() {
    let f = logged_on();
    let session = f.frontend.session().clone();
    let receiver = {
        let session = session.clone();
        thread::spawn(move || session.receive_file("ola", "notes.txt", 2048))
    };
    wait_for_pending(&session, 1);
    session.parse("receive 1").unwrap();

    let transfer = receiver.join().unwrap();
    assert!(transfer.is_accepted());
    assert!(session.pending_transfers().is_empty());
    let lines = f.display.system_lines();
    assert_eq!(
        lines[1],
        "ola is trying to send you the file notes.txt (2.0 KB). Type /receive 1 to accept or /reject 1 to decline"
    );
    assert_eq!(lines[2], "Receiving notes.txt (2.0 KB) from ola");
}

#[test]
fn rejected_file_is_acknowledged() {
    let f = logged_on();
    let session = f.frontend.session().clone();
    let receiver = {
        let session = session.clone();
        thread::spawn(move || session.receive_file("ola", "notes.txt", 2048))
    };
    wait_for_pending(&session, 1);
    session.parse("reject 1").unwrap();

    let transfer = receiver.join().unwrap();
    assert!(transfer.is_rejected());
    assert_eq!(
        f.display.system_lines().last().unwrap(),
        "You declined notes.txt from ola"
    );
    assert_eq!(
        invalid(session.parse("receive 1")),
        "No pending file transfer with id 1"
    );
}

#[test]
fn peer_cancel_releases_the_waiting_thread() {
    let f = logged_on();
    let session = f.frontend.session().clone();
    let receiver = {
        let session = session.clone();
        thread::spawn(move || session.receive_file("ola", "notes.txt", 2048))
    };
    wait_for_pending(&session, 1);
    // the peer aborts; no user command involved
    session.pending_transfers()[0].decision().cancel();

    let transfer = receiver.join().unwrap();
    assert!(transfer.is_canceled());
    assert_eq!(
        f.display.system_lines().last().unwrap(),
        "Transfer of notes.txt with ola was canceled"
    );
}

#[test]
fn unknown_transfer_ids_are_rejected() {
    let f = logged_on();
    assert_eq!(
        invalid(f.frontend.session().parse("cancel 7")),
        "No pending file transfer with id 7"
    );
}

#[test]
fn input_loop_drives_the_session() {
    let f = logged_on();
    let source = ScriptedLines::lines(&["hello world", "/nick ola", "/bogus", "/quit"]);
    f.frontend.input_loop(Box::new(source)).run();

    let lines = f.display.lines();
    assert!(lines.contains(&Shown::Own("hello world".to_string())));
    assert!(lines.contains(&Shown::System("You changed nick to ola".to_string())));
    assert!(lines.contains(&Shown::System(messages::unknown_command("bogus"))));
    // /quit exits with 0; the recording host returns, so EOF follows with 1
    assert_eq!(f.host.exits(), vec![0, 1]);
    assert_eq!(f.farewells.load(Ordering::SeqCst), 1);
}
