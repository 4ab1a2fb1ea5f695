mod device;
mod dispatch;
mod server;
mod session;

pub use device::{Device, LinkSettings, READ_BUDGET, READ_TIMEOUT, WARM_UP};
pub use dispatch::{Dispatcher, Outcome};
pub use server::{handle_client, serve, MAX_LINE_LENGTH};
pub use session::{Power, Session};

pub const DEFAULT_PORT: u16 = 53535;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Olevia(#[from] olevia::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Lines(#[from] tokio_util::codec::LinesCodecError),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, clap::Parser)]
#[command(name = "oleviad", about = "Control an Olevia TV over its serial port")]
pub struct Config {
    /// Address to listen on unless a socket is passed in via socket activation.
    #[arg(long, default_value_t = std::net::SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)))]
    pub listen: std::net::SocketAddr,

    #[arg(long, default_value = "/dev/ttyS0")]
    pub serial_port: String,

    #[arg(long, default_value_t = olevia::BAUD_RATE)]
    pub baud_rate: u32,

    #[arg(long, default_value_t = olevia::POWER_ON_BAUD_RATE)]
    pub power_on_baud_rate: u32,

    /// How long to wait for a status reply. Must stay below one second.
    #[arg(
        long,
        default_value_t = 250,
        value_parser = clap::value_parser!(u64).range(1..1000)
    )]
    pub read_timeout_ms: u64,

    /// Upper bound of bytes read per status reply, at least one reply frame.
    #[arg(
        long,
        default_value_t = READ_BUDGET,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(olevia::REPLY_LEN as u64..)
    )]
    pub read_budget: usize,
}

impl Config {
    pub fn link_settings(&self) -> LinkSettings {
        LinkSettings {
            baud_rate: self.baud_rate,
            power_on_baud_rate: self.power_on_baud_rate,
            read_timeout: std::time::Duration::from_millis(self.read_timeout_ms),
            read_budget: self.read_budget,
            ..LinkSettings::default()
        }
    }
}
