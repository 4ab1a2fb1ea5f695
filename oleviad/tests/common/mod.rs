#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::LevelFilter;
use olevia::Transport;
use oleviad::{Device, Dispatcher, LinkSettings};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Baud(u32),
    Write(Vec<u8>),
    Read,
}

/// Shared view into a [`ScriptedTransport`] after it moved into a device.
#[derive(Clone, Default)]
pub struct Probe {
    events: Arc<Mutex<Vec<(Instant, Event)>>>,
    replies: Arc<Mutex<VecDeque<Vec<u8>>>>,
    broken: Arc<AtomicBool>,
}

impl Probe {
    /// Queues the bytes returned by the next read.
    pub fn reply(&self, bytes: &[u8]) {
        self.replies.lock().unwrap().push_back(bytes.to_vec());
    }

    pub fn unplug(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<Event> {
        self.timed_events().into_iter().map(|(_, e)| e).collect()
    }

    pub fn timed_events(&self) -> Vec<(Instant, Event)> {
        self.events.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Write(bytes) => Some(bytes),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push((Instant::now(), event));
    }

    fn check(&self) -> Result<(), olevia::Error> {
        if self.broken.load(Ordering::SeqCst) {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "unplugged").into())
        } else {
            Ok(())
        }
    }
}

pub struct ScriptedTransport {
    probe: Probe,
}

impl Transport for ScriptedTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), olevia::Error> {
        self.probe.check()?;
        self.probe.record(Event::Write(bytes.to_vec()));
        Ok(())
    }

    fn read(&mut self, max_bytes: usize, _timeout: Duration) -> Result<Vec<u8>, olevia::Error> {
        self.probe.check()?;
        self.probe.record(Event::Read);

        let mut reply = self
            .probe
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        reply.truncate(max_bytes);
        Ok(reply)
    }

    fn set_baud(&mut self, rate: u32) -> Result<(), olevia::Error> {
        self.probe.check()?;
        self.probe.record(Event::Baud(rate));
        Ok(())
    }

    fn describe(&self) -> String {
        "scripted".to_owned()
    }
}

pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::max())
        .is_test(true)
        .try_init();
}

pub fn dispatcher(warm_up: Duration) -> (Dispatcher, Probe) {
    init_logger();

    let probe = Probe::default();
    let transport = ScriptedTransport {
        probe: probe.clone(),
    };
    let settings = LinkSettings {
        warm_up,
        ..LinkSettings::default()
    };

    (Dispatcher::new(Device::new(transport, settings)), probe)
}

/// Polls until `f` holds, giving up after a few seconds.
pub async fn wait_for(mut f: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !f() {
        assert!(Instant::now() < deadline, "condition not met in time");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
