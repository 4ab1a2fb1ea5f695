/// Length of every reply the TV sends to a status query.
pub const REPLY_LEN: usize = 5;

pub type ReplyFrame = [u8; REPLY_LEN];

/// A fixed byte sequence understood by the TV's serial interface.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame(&'static [u8]);

impl Frame {
    pub const fn new(bytes: &'static [u8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame({})", hex::encode(self.0))
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
