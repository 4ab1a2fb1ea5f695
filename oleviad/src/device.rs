use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, info};
use olevia::{Frame, StatusQuery, Transport, INIT, POWER_ON};

use crate::Error;

/// Time the TV needs after the power-on byte before it accepts the init
/// sequence. Fixed by the hardware.
pub const WARM_UP: Duration = Duration::from_secs(10);
pub const READ_TIMEOUT: Duration = Duration::from_millis(250);
/// Replies are five bytes, but the TV may prepend any number of acks.
pub const READ_BUDGET: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkSettings {
    pub baud_rate: u32,
    pub power_on_baud_rate: u32,
    pub read_timeout: Duration,
    pub read_budget: usize,
    pub warm_up: Duration,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            baud_rate: olevia::BAUD_RATE,
            power_on_baud_rate: olevia::POWER_ON_BAUD_RATE,
            read_timeout: READ_TIMEOUT,
            read_budget: READ_BUDGET,
            warm_up: WARM_UP,
        }
    }
}

type SharedTransport = Arc<Mutex<Box<dyn Transport + Send>>>;

/// The one serial line, shared by every connection.
///
/// Each operation is a transaction that owns the line until it is done. The
/// transaction runs on the blocking pool, so dropping the returned future
/// does not interrupt it; its result is discarded instead.
#[derive(Clone)]
pub struct Device {
    transport: SharedTransport,
    settings: Arc<LinkSettings>,
    description: Arc<str>,
}

impl Device {
    pub fn new<T>(transport: T, settings: LinkSettings) -> Self
    where
        T: Transport + Send + 'static,
    {
        let description = transport.describe().into();
        let transport: Box<dyn Transport + Send> = Box::new(transport);

        Self {
            transport: Arc::new(Mutex::new(transport)),
            settings: Arc::new(settings),
            description,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    async fn transact<F, R>(&self, f: F) -> Result<R, Error>
    where
        F: FnOnce(&mut dyn Transport, &LinkSettings) -> Result<R, olevia::Error> + Send + 'static,
        R: Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        let settings = Arc::clone(&self.settings);

        let result = tokio::task::spawn_blocking(move || {
            // A panicking transaction leaves the line usable for the next one.
            let mut transport = transport.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut **transport, &settings)
        })
        .await??;

        Ok(result)
    }

    pub async fn send(&self, frame: Frame) -> Result<(), Error> {
        debug!("send {}", frame);
        self.transact(move |t, _| t.write(frame.as_bytes())).await
    }

    /// Writes the query frame and returns whatever the TV answered, possibly
    /// nothing.
    pub async fn query(&self, query: StatusQuery) -> Result<Vec<u8>, Error> {
        debug!("query {}", query);
        self.transact(move |t, settings| {
            t.write(query.frame().as_bytes())?;
            t.read(settings.read_budget, settings.read_timeout)
        })
        .await
    }

    /// Sends the power-on byte at the low baud rate, waits for the TV to warm
    /// up and sends the init sequence.
    ///
    /// The line stays locked for the whole warm-up, so every other connection
    /// waits for this to finish.
    pub async fn power_on(&self) -> Result<(), Error> {
        self.transact(|t, settings| {
            info!(
                "power on: holding serial line for {:?} warm-up",
                settings.warm_up
            );

            t.set_baud(settings.power_on_baud_rate)?;
            let sent = t.write(POWER_ON.as_bytes());
            if sent.is_ok() {
                std::thread::sleep(settings.warm_up);
            }
            t.set_baud(settings.baud_rate)?;
            sent?;

            t.write(INIT.as_bytes())
        })
        .await
    }
}
