use std::collections::HashMap;

use log::{debug, error, warn};
use olevia::{Decoded, Frame, Registry, StatusQuery, INIT, POWER_OFF};

use crate::{Device, Error, Power, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Quit,
    PowerOn,
    PowerOff,
    Init,
    Query(StatusQuery),
    Direct(Frame),
    Status,
}

/// Reply to a single command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    /// The client asked the daemon to shut down.
    Quit(String),
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Reply(text) | Outcome::Quit(text) => text,
        }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Outcome::Quit(_))
    }
}

pub struct Dispatcher {
    device: Device,
    actions: HashMap<&'static str, Action>,
}

impl Dispatcher {
    pub fn new(device: Device) -> Self {
        let mut actions = HashMap::new();

        // First insertion wins, so the registry's poweron/poweroff/init
        // entries stay state transitions.
        for (keyword, action) in [
            ("quit", Action::Quit),
            ("poweron", Action::PowerOn),
            ("poweroff", Action::PowerOff),
            ("init", Action::Init),
        ] {
            actions.entry(keyword).or_insert(action);
        }
        for query in StatusQuery::ALL {
            actions
                .entry(query.keyword())
                .or_insert(Action::Query(query));
        }
        for (keyword, frame) in Registry::standard().iter() {
            actions.entry(keyword).or_insert(Action::Direct(frame));
        }
        actions.entry("status").or_insert(Action::Status);

        Self { device, actions }
    }

    pub async fn dispatch(&self, session: &mut Session, token: &str) -> Outcome {
        let action = match self.actions.get(token) {
            Some(action) => *action,
            None => {
                warn!("unknown command: {:?}", token);
                return Outcome::Reply(format!("Received unknown command: {}", token));
            }
        };
        debug!("dispatch {} as {:?}", token, action);

        let result = match action {
            Action::Quit => return Outcome::Quit("Shutting down.".to_owned()),
            Action::PowerOn => self.power_on(session).await,
            Action::PowerOff => self.power_off(session).await,
            Action::Init => self.init(session).await,
            Action::Query(query) => self.query(session, query).await,
            Action::Direct(frame) => self.direct(session, token, frame).await,
            Action::Status => Ok(self.status(session)),
        };

        match result {
            Ok(reply) => Outcome::Reply(reply),
            Err(e) => {
                error!("{}: {}", token, e);
                Outcome::Reply(format!("{}: serial error: {}", token, e))
            }
        }
    }

    async fn power_on(&self, session: &mut Session) -> Result<String, Error> {
        self.device.power_on().await?;
        session.mark_on();
        Ok("Power on sent, and TV initialized.".to_owned())
    }

    async fn power_off(&self, session: &mut Session) -> Result<String, Error> {
        self.device.send(POWER_OFF).await?;
        session.mark_off();
        Ok("Power off sent.".to_owned())
    }

    async fn init(&self, session: &mut Session) -> Result<String, Error> {
        self.device.send(INIT).await?;
        session.mark_initialized();
        Ok("Initialization command sent.".to_owned())
    }

    async fn query(&self, session: &mut Session, query: StatusQuery) -> Result<String, Error> {
        let raw = self.device.query(query).await?;

        let decoded = query.decode(&raw);

        // Any answer to a power query means the TV is up, even one we can't
        // read.
        if query == StatusQuery::Power && decoded != Decoded::Silent {
            session.mark_on();
        }

        let reply = match &decoded {
            Decoded::Silent => {
                session.mark_off();
                format!("{}: power off (no response received)", query)
            }
            Decoded::Value(value) => format!("{}: {}", query, value),
            Decoded::Unrecognized(_) => {
                let hex = decoded.hex().unwrap_or_default();
                warn!("{}: unrecognized reply {}", query, hex);
                format!("{}: received {} but don't understand that reply.", query, hex)
            }
        };

        Ok(reply)
    }

    async fn direct(&self, session: &Session, keyword: &str, frame: Frame) -> Result<String, Error> {
        if session.power() != Power::On {
            warn!("rejected {}: power is off", keyword);
            return Ok(format!("Couldn't send {} command; power is off.", keyword));
        }

        self.device.send(frame).await?;
        Ok(format!("Command {} found and executed.", keyword))
    }

    fn status(&self, session: &Session) -> String {
        format!(
            "TV power: {}, initialized: {}, serial: {}",
            session.power(),
            session.is_initialized(),
            self.device.description()
        )
    }
}
