use std::io::{Read, Write};
use std::time::{Duration, Instant};

use log::trace;

use crate::Error;

/// Byte-oriented access to the TV's serial line.
pub trait Transport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Reads until `max_bytes` arrived or `timeout` elapsed. An empty result
    /// means the device stayed silent.
    fn read(&mut self, max_bytes: usize, timeout: Duration) -> Result<Vec<u8>, Error>;

    fn set_baud(&mut self, rate: u32) -> Result<(), Error>;

    fn describe(&self) -> String;
}

pub struct SerialTransport {
    path: String,
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, Error> {
        let port = serialport::new(path, baud_rate).open()?;

        Ok(Self {
            path: path.to_owned(),
            port,
        })
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        trace!("write to {}: {:02x?}", self.path, bytes);
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    fn read(&mut self, max_bytes: usize, timeout: Duration) -> Result<Vec<u8>, Error> {
        let deadline = Instant::now() + timeout;
        let mut buf = vec![0u8; max_bytes];
        let mut len = 0;

        while len < max_bytes {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            self.port.set_timeout(remaining)?;
            match self.port.read(&mut buf[len..]) {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => break,
                Err(e) => return Err(e.into()),
            }
        }

        buf.truncate(len);
        trace!("read from {}: {:02x?}", self.path, buf);
        Ok(buf)
    }

    fn set_baud(&mut self, rate: u32) -> Result<(), Error> {
        trace!("set {} to {} baud", self.path, rate);
        self.port.set_baud_rate(rate)?;
        Ok(())
    }

    fn describe(&self) -> String {
        match self.port.baud_rate() {
            Ok(rate) => format!("{} @ {} baud", self.path, rate),
            Err(_) => self.path.clone(),
        }
    }
}
