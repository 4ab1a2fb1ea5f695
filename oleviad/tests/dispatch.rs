mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{dispatcher, wait_for, Event};
use olevia::{Registry, StatusQuery, ALIASES, INIT, POWER_OFF};
use oleviad::{Outcome, Power, Session};

const NO_WARM_UP: Duration = Duration::from_millis(0);

fn powered() -> Session {
    let mut session = Session::new();
    session.mark_on();
    session
}

fn reply(text: &str) -> Outcome {
    Outcome::Reply(text.to_owned())
}

#[tokio::test]
async fn direct_commands_write_their_frame_once() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);

    for (keyword, frame) in Registry::standard().iter() {
        if matches!(keyword, "poweron" | "poweroff" | "init") {
            continue;
        }

        probe.clear();
        let mut session = powered();
        let outcome = dispatcher.dispatch(&mut session, keyword).await;

        assert_eq!(
            outcome,
            reply(&format!("Command {} found and executed.", keyword))
        );
        assert_eq!(probe.events(), vec![Event::Write(frame.as_bytes().to_vec())]);
        assert_eq!(session, powered(), "{} changed the session", keyword);
    }
}

#[tokio::test]
async fn aliases_write_the_same_bytes() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);

    for (alias, canonical) in ALIASES {
        probe.clear();
        dispatcher.dispatch(&mut powered(), alias).await;
        dispatcher.dispatch(&mut powered(), canonical).await;

        let writes = probe.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], writes[1], "{} vs {}", alias, canonical);
    }
}

#[tokio::test]
async fn direct_commands_need_power() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);
    let mut session = Session::new();

    for keyword in ["mute", "volumeup", "1", "hdmi1", "menu"] {
        let outcome = dispatcher.dispatch(&mut session, keyword).await;
        assert_eq!(
            outcome,
            reply(&format!("Couldn't send {} command; power is off.", keyword))
        );
    }

    // Initialized but off is still off.
    session.mark_initialized();
    dispatcher.dispatch(&mut session, "mute").await;

    assert!(probe.events().is_empty());
}

#[tokio::test]
async fn power_on_brackets_the_power_byte_with_baud_changes() {
    let warm_up = Duration::from_millis(50);
    let (dispatcher, probe) = dispatcher(warm_up);

    let mut initialized_only = Session::new();
    initialized_only.mark_initialized();

    for mut session in [Session::new(), powered(), initialized_only] {
        probe.clear();
        let outcome = dispatcher.dispatch(&mut session, "poweron").await;

        assert_eq!(outcome, reply("Power on sent, and TV initialized."));
        assert_eq!(session.power(), Power::On);
        assert!(session.is_initialized());

        let events = probe.timed_events();
        let kinds: Vec<_> = events.iter().map(|(_, e)| e.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                Event::Baud(110),
                Event::Write(vec![0x00]),
                Event::Baud(115_200),
                Event::Write(INIT.as_bytes().to_vec()),
            ]
        );
        assert!(events[2].0.duration_since(events[1].0) >= warm_up);
    }
}

#[test]
fn warm_up_is_ten_seconds() {
    assert_eq!(oleviad::WARM_UP, Duration::from_secs(10));
    assert_eq!(oleviad::LinkSettings::default().warm_up, oleviad::WARM_UP);
}

#[tokio::test]
async fn power_off_and_init() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);
    let mut session = powered();

    let outcome = dispatcher.dispatch(&mut session, "poweroff").await;
    assert_eq!(outcome, reply("Power off sent."));
    assert_eq!(session, Session::new());

    let outcome = dispatcher.dispatch(&mut session, "init").await;
    assert_eq!(outcome, reply("Initialization command sent."));
    assert_eq!(session.power(), Power::Off);
    assert!(session.is_initialized());

    assert_eq!(
        probe.writes(),
        vec![POWER_OFF.as_bytes().to_vec(), INIT.as_bytes().to_vec()]
    );
}

#[tokio::test]
async fn silent_power_query_means_off() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);
    let mut session = powered();

    let outcome = dispatcher.dispatch(&mut session, "readpowerstatus").await;

    assert!(outcome.text().contains("power off"), "{}", outcome.text());
    assert_eq!(session, Session::new());
    assert_eq!(
        probe.events(),
        vec![
            Event::Write(StatusQuery::Power.frame().as_bytes().to_vec()),
            Event::Read,
        ]
    );
}

#[tokio::test]
async fn any_silent_query_means_off() {
    let (dispatcher, _probe) = dispatcher(NO_WARM_UP);
    let mut session = powered();

    let outcome = dispatcher.dispatch(&mut session, "readmutestatus").await;

    assert_eq!(outcome, reply("readmutestatus: power off (no response received)"));
    assert_eq!(session.power(), Power::Off);
    assert!(!session.is_initialized());
}

#[tokio::test]
async fn answered_power_query_means_on() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);
    let mut session = Session::new();

    probe.reply(&[0x06, 0x06, 0x05, 0x90, 0x01, 0x9c]);
    let outcome = dispatcher.dispatch(&mut session, "readpowerstatus").await;

    assert_eq!(outcome, reply("readpowerstatus: power on"));
    assert_eq!(session, powered());
}

#[tokio::test]
async fn volume_query_leaves_session_alone() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);

    for start in [Session::new(), powered()] {
        let mut session = start;
        probe.reply(&[0x06, 0x05, 0x90, 0x32, 0xcd]);

        let outcome = dispatcher.dispatch(&mut session, "readvolumevalue").await;

        assert_eq!(outcome, reply("readvolumevalue: 50"));
        assert_eq!(session, start);
    }
}

#[tokio::test]
async fn input_source_query() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);
    let mut session = powered();

    probe.reply(&[0x06, 0x05, 0x90, 0x0e, 0xa9]);
    let outcome = dispatcher.dispatch(&mut session, "readinputsource").await;

    assert_eq!(outcome, reply("readinputsource: HDMI 2"));
}

#[tokio::test]
async fn unrecognized_reply_is_reported_in_hex() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);
    let mut session = Session::new();

    probe.reply(&[0x06, 0x06, 0x05, 0x90, 0x7f, 0x00]);
    let outcome = dispatcher.dispatch(&mut session, "readpowerstatus").await;

    assert_eq!(
        outcome,
        reply("readpowerstatus: received 0605907f00 but don't understand that reply.")
    );
    assert_eq!(session, powered());
}

#[tokio::test]
async fn unrecognized_reply_to_other_queries_leaves_session_alone() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);
    let mut session = Session::new();

    probe.reply(&[0x06, 0x05, 0x90, 0x7f, 0x00]);
    let outcome = dispatcher.dispatch(&mut session, "readvolumevalue").await;

    assert_eq!(
        outcome,
        reply("readvolumevalue: received 0605907f00 but don't understand that reply.")
    );
    assert_eq!(session, Session::new());
}

#[tokio::test]
async fn status_reports_the_session() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);

    let outcome = dispatcher.dispatch(&mut Session::new(), "status").await;
    assert_eq!(
        outcome,
        reply("TV power: off, initialized: false, serial: scripted")
    );

    let outcome = dispatcher.dispatch(&mut powered(), "status").await;
    assert_eq!(
        outcome,
        reply("TV power: on, initialized: true, serial: scripted")
    );

    assert!(probe.events().is_empty());
}

#[tokio::test]
async fn unknown_commands() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);
    let mut session = powered();

    for token in ["bogus", "MUTE", "PowerOn", ""] {
        let outcome = dispatcher.dispatch(&mut session, token).await;
        assert_eq!(outcome, reply(&format!("Received unknown command: {}", token)));
    }

    assert_eq!(session, powered());
    assert!(probe.events().is_empty());
}

#[tokio::test]
async fn quit() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);

    let outcome = dispatcher.dispatch(&mut powered(), "quit").await;

    assert!(outcome.is_quit());
    assert_eq!(outcome.text(), "Shutting down.");
    assert!(probe.events().is_empty());
}

#[tokio::test]
async fn serial_failure_is_a_reply() {
    let (dispatcher, probe) = dispatcher(NO_WARM_UP);
    let mut session = powered();

    probe.unplug();
    let outcome = dispatcher.dispatch(&mut session, "poweroff").await;

    assert_eq!(outcome, reply("poweroff: serial error: unplugged"));
    assert_eq!(session, powered());

    let outcome = dispatcher.dispatch(&mut session, "readpowerstatus").await;
    assert_eq!(outcome, reply("readpowerstatus: serial error: unplugged"));
    assert_eq!(session, powered());
}

#[tokio::test]
async fn power_on_holds_the_serial_line() {
    let (dispatcher, probe) = dispatcher(Duration::from_millis(200));
    let dispatcher = Arc::new(dispatcher);

    let first = {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            let mut session = Session::new();
            dispatcher.dispatch(&mut session, "poweron").await
        })
    };
    wait_for(|| probe.events().contains(&Event::Write(vec![0x00]))).await;

    let outcome = dispatcher.dispatch(&mut powered(), "mute").await;
    assert_eq!(outcome, reply("Command mute found and executed."));

    // The mute frame only went out once the power-on sequence was complete.
    let events = probe.events();
    assert_eq!(events.len(), 5);
    assert_eq!(events[3], Event::Write(INIT.as_bytes().to_vec()));
    assert_eq!(events[4], Event::Write(vec![0xbe, 0x05, 0x25, 0x09, 0xf1]));

    assert_eq!(
        first.await.unwrap(),
        reply("Power on sent, and TV initialized.")
    );
}

#[tokio::test]
async fn dropped_client_does_not_abort_power_on() {
    let (dispatcher, probe) = dispatcher(Duration::from_millis(100));
    let dispatcher = Arc::new(dispatcher);

    let task = {
        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            let mut session = Session::new();
            dispatcher.dispatch(&mut session, "poweron").await
        })
    };
    wait_for(|| probe.events().contains(&Event::Write(vec![0x00]))).await;
    task.abort();

    wait_for(|| probe.writes().len() == 2).await;
    assert_eq!(probe.writes()[1], INIT.as_bytes().to_vec());
}
