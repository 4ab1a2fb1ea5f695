mod frame;
mod registry;
mod status;
mod transport;

pub use frame::{Frame, ReplyFrame, REPLY_LEN};
pub use registry::{Registry, ALIASES, INIT, POWER_OFF, POWER_ON};
pub use status::{Decoded, ReplyTable, StatusQuery};
pub use transport::{SerialTransport, Transport};

/// Rate the TV expects for every frame except the power-on byte.
pub const BAUD_RATE: u32 = 115_200;
/// The power-on byte is only understood at this rate.
pub const POWER_ON_BAUD_RATE: u32 = 110;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serial(#[from] serialport::Error),
}
