use std::collections::HashMap;
use std::sync::OnceLock;

use crate::{Frame, ReplyFrame, REPLY_LEN};

/// Queries the TV answers with a reply frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusQuery {
    Power,
    InputSource,
    Mute,
    Volume,
}

impl StatusQuery {
    pub const ALL: [StatusQuery; 4] = [
        StatusQuery::Power,
        StatusQuery::InputSource,
        StatusQuery::Mute,
        StatusQuery::Volume,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|q| q.keyword() == keyword)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            StatusQuery::Power => "readpowerstatus",
            StatusQuery::InputSource => "readinputsource",
            StatusQuery::Mute => "readmutestatus",
            StatusQuery::Volume => "readvolumevalue",
        }
    }

    pub fn frame(self) -> Frame {
        match self {
            StatusQuery::Power => Frame::new(&[0xbe, 0x05, 0x90, 0x00, 0x53]),
            StatusQuery::InputSource => Frame::new(&[0xbe, 0x05, 0x90, 0x01, 0x54]),
            StatusQuery::Mute => Frame::new(&[0xbe, 0x05, 0x90, 0x02, 0x55]),
            StatusQuery::Volume => Frame::new(&[0xbe, 0x05, 0x90, 0x03, 0x56]),
        }
    }

    pub fn replies(self) -> &'static ReplyTable {
        static TABLES: OnceLock<[ReplyTable; 4]> = OnceLock::new();
        let tables = TABLES.get_or_init(|| {
            [
                ReplyTable::new(POWER_REPLIES),
                ReplyTable::new(INPUT_SOURCE_REPLIES),
                ReplyTable::new(MUTE_REPLIES),
                ReplyTable::new(VOLUME_REPLIES),
            ]
        });

        match self {
            StatusQuery::Power => &tables[0],
            StatusQuery::InputSource => &tables[1],
            StatusQuery::Mute => &tables[2],
            StatusQuery::Volume => &tables[3],
        }
    }

    pub fn decode(self, raw: &[u8]) -> Decoded {
        self.replies().decode(raw)
    }
}

impl std::fmt::Display for StatusQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Outcome of matching a serial read against a reply table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// Nothing was read before the timeout. The TV does not answer while off.
    Silent,
    Value(&'static str),
    /// The trailing bytes of the read, which matched no known reply.
    Unrecognized(Vec<u8>),
}

impl Decoded {
    pub fn hex(&self) -> Option<String> {
        match self {
            Decoded::Unrecognized(raw) => Some(hex::encode(raw)),
            _ => None,
        }
    }
}

pub struct ReplyTable {
    entries: HashMap<ReplyFrame, &'static str>,
}

impl ReplyTable {
    fn new(entries: &[(ReplyFrame, &'static str)]) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
        }
    }

    pub fn get(&self, reply: &[u8]) -> Option<&'static str> {
        let reply: ReplyFrame = std::convert::TryInto::try_into(reply).ok()?;
        self.entries.get(&reply).copied()
    }

    pub fn decode(&self, raw: &[u8]) -> Decoded {
        if raw.is_empty() {
            return Decoded::Silent;
        }

        // The TV sometimes prepends an unpredictable number of 0x06 acks,
        // so only the last frame's worth of bytes is significant.
        let tail = &raw[raw.len().saturating_sub(REPLY_LEN)..];
        match self.get(tail) {
            Some(value) => Decoded::Value(value),
            None => Decoded::Unrecognized(tail.to_vec()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReplyFrame, &'static str)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// There is no reply at all while the TV is off.
const POWER_REPLIES: &[(ReplyFrame, &str)] = &[([0x06, 0x05, 0x90, 0x01, 0x9c], "power on")];

const INPUT_SOURCE_REPLIES: &[(ReplyFrame, &str)] = &[
    ([0x06, 0x05, 0x90, 0x00, 0x9b], "Tuner 1"),
    ([0x06, 0x05, 0x90, 0x01, 0x9c], "Tuner 2"),
    ([0x06, 0x05, 0x90, 0x02, 0x9d], "Composite 1"),
    ([0x06, 0x05, 0x90, 0x03, 0x9e], "Composite 2"),
    ([0x06, 0x05, 0x90, 0x05, 0xa0], "S-Video 1"),
    ([0x06, 0x05, 0x90, 0x06, 0xa1], "S-Video 2"),
    ([0x06, 0x05, 0x90, 0x08, 0xa3], "Component 1"),
    ([0x06, 0x05, 0x90, 0x09, 0xa4], "Component 2"),
    ([0x06, 0x05, 0x90, 0x0a, 0xa5], "VGA"),
    ([0x06, 0x05, 0x90, 0x0b, 0xa6], "VGA Component"),
    ([0x06, 0x05, 0x90, 0x0c, 0xa7], "HDMI 1"),
    ([0x06, 0x05, 0x90, 0x0e, 0xa9], "HDMI 2"),
];

const MUTE_REPLIES: &[(ReplyFrame, &str)] = &[
    ([0x06, 0x05, 0x90, 0x00, 0x9b], "mute off"),
    ([0x06, 0x05, 0x90, 0x01, 0x9c], "mute on"),
];

const VOLUME_REPLIES: &[(ReplyFrame, &str)] = &[
    ([0x06, 0x05, 0x90, 0x00, 0x9b], "0"),
    ([0x06, 0x05, 0x90, 0x01, 0x9c], "1"),
    ([0x06, 0x05, 0x90, 0x02, 0x9d], "2"),
    ([0x06, 0x05, 0x90, 0x03, 0x9e], "3"),
    ([0x06, 0x05, 0x90, 0x04, 0x9f], "4"),
    ([0x06, 0x05, 0x90, 0x05, 0xa0], "5"),
    ([0x06, 0x05, 0x90, 0x06, 0xa1], "6"),
    ([0x06, 0x05, 0x90, 0x07, 0xa2], "7"),
    ([0x06, 0x05, 0x90, 0x08, 0xa3], "8"),
    ([0x06, 0x05, 0x90, 0x09, 0xa4], "9"),
    ([0x06, 0x05, 0x90, 0x0a, 0xa5], "10"),
    ([0x06, 0x05, 0x90, 0x0b, 0xa6], "11"),
    ([0x06, 0x05, 0x90, 0x0c, 0xa7], "12"),
    ([0x06, 0x05, 0x90, 0x0d, 0xa8], "13"),
    ([0x06, 0x05, 0x90, 0x0e, 0xa9], "14"),
    ([0x06, 0x05, 0x90, 0x0f, 0xaa], "15"),
    ([0x06, 0x05, 0x90, 0x10, 0xab], "16"),
    ([0x06, 0x05, 0x90, 0x11, 0xac], "17"),
    ([0x06, 0x05, 0x90, 0x12, 0xad], "18"),
    ([0x06, 0x05, 0x90, 0x13, 0xae], "19"),
    ([0x06, 0x05, 0x90, 0x14, 0xaf], "20"),
    ([0x06, 0x05, 0x90, 0x15, 0xb0], "21"),
    ([0x06, 0x05, 0x90, 0x16, 0xb1], "22"),
    ([0x06, 0x05, 0x90, 0x17, 0xb2], "23"),
    ([0x06, 0x05, 0x90, 0x18, 0xb3], "24"),
    ([0x06, 0x05, 0x90, 0x19, 0xb4], "25"),
    ([0x06, 0x05, 0x90, 0x1a, 0xb5], "26"),
    ([0x06, 0x05, 0x90, 0x1b, 0xb6], "27"),
    ([0x06, 0x05, 0x90, 0x1c, 0xb7], "28"),
    ([0x06, 0x05, 0x90, 0x1d, 0xb8], "29"),
    ([0x06, 0x05, 0x90, 0x1e, 0xb9], "30"),
    ([0x06, 0x05, 0x90, 0x1f, 0xba], "31"),
    ([0x06, 0x05, 0x90, 0x20, 0xbb], "32"),
    ([0x06, 0x05, 0x90, 0x21, 0xbc], "33"),
    ([0x06, 0x05, 0x90, 0x22, 0xbd], "34"),
    ([0x06, 0x05, 0x90, 0x23, 0xbe], "35"),
    ([0x06, 0x05, 0x90, 0x24, 0xbf], "36"),
    ([0x06, 0x05, 0x90, 0x25, 0xc0], "37"),
    ([0x06, 0x05, 0x90, 0x26, 0xc1], "38"),
    ([0x06, 0x05, 0x90, 0x27, 0xc2], "39"),
    ([0x06, 0x05, 0x90, 0x28, 0xc3], "40"),
    ([0x06, 0x05, 0x90, 0x29, 0xc4], "41"),
    ([0x06, 0x05, 0x90, 0x2a, 0xc5], "42"),
    ([0x06, 0x05, 0x90, 0x2b, 0xc6], "43"),
    ([0x06, 0x05, 0x90, 0x2c, 0xc7], "44"),
    ([0x06, 0x05, 0x90, 0x2d, 0xc8], "45"),
    ([0x06, 0x05, 0x90, 0x2e, 0xc9], "46"),
    ([0x06, 0x05, 0x90, 0x2f, 0xca], "47"),
    ([0x06, 0x05, 0x90, 0x30, 0xcb], "48"),
    ([0x06, 0x05, 0x90, 0x31, 0xcc], "49"),
    ([0x06, 0x05, 0x90, 0x32, 0xcd], "50"),
    ([0x06, 0x05, 0x90, 0x33, 0xce], "51"),
    ([0x06, 0x05, 0x90, 0x34, 0xcf], "52"),
    ([0x06, 0x05, 0x90, 0x35, 0xd0], "53"),
    ([0x06, 0x05, 0x90, 0x36, 0xd1], "54"),
    ([0x06, 0x05, 0x90, 0x37, 0xd2], "55"),
    ([0x06, 0x05, 0x90, 0x38, 0xd3], "56"),
    ([0x06, 0x05, 0x90, 0x39, 0xd4], "57"),
    ([0x06, 0x05, 0x90, 0x3a, 0xd5], "58"),
    ([0x06, 0x05, 0x90, 0x3b, 0xd6], "59"),
    ([0x06, 0x05, 0x90, 0x3c, 0xd7], "60"),
    ([0x06, 0x05, 0x90, 0x3d, 0xd8], "61"),
    ([0x06, 0x05, 0x90, 0x3e, 0xd9], "62"),
    ([0x06, 0x05, 0x90, 0x3f, 0xda], "63"),
    ([0x06, 0x05, 0x90, 0x40, 0xdb], "64"),
    ([0x06, 0x05, 0x90, 0x41, 0xdc], "65"),
    ([0x06, 0x05, 0x90, 0x42, 0xdd], "66"),
    ([0x06, 0x05, 0x90, 0x43, 0xde], "67"),
    ([0x06, 0x05, 0x90, 0x44, 0xdf], "68"),
    ([0x06, 0x05, 0x90, 0x45, 0xe0], "69"),
    ([0x06, 0x05, 0x90, 0x46, 0xe1], "70"),
    ([0x06, 0x05, 0x90, 0x47, 0xe2], "71"),
    ([0x06, 0x05, 0x90, 0x48, 0xe3], "72"),
    ([0x06, 0x05, 0x90, 0x49, 0xe4], "73"),
    ([0x06, 0x05, 0x90, 0x4a, 0xe5], "74"),
    ([0x06, 0x05, 0x90, 0x4b, 0xe6], "75"),
    ([0x06, 0x05, 0x90, 0x4c, 0xe7], "76"),
    ([0x06, 0x05, 0x90, 0x4d, 0xe8], "77"),
    ([0x06, 0x05, 0x90, 0x4e, 0xe9], "78"),
    ([0x06, 0x05, 0x90, 0x4f, 0xea], "79"),
    ([0x06, 0x05, 0x90, 0x50, 0xeb], "80"),
    ([0x06, 0x05, 0x90, 0x51, 0xec], "81"),
    ([0x06, 0x05, 0x90, 0x52, 0xed], "82"),
    ([0x06, 0x05, 0x90, 0x53, 0xee], "83"),
    ([0x06, 0x05, 0x90, 0x54, 0xef], "84"),
    ([0x06, 0x05, 0x90, 0x55, 0xf0], "85"),
    ([0x06, 0x05, 0x90, 0x56, 0xf1], "86"),
    ([0x06, 0x05, 0x90, 0x57, 0xf2], "87"),
    ([0x06, 0x05, 0x90, 0x58, 0xf3], "88"),
    ([0x06, 0x05, 0x90, 0x59, 0xf4], "89"),
    ([0x06, 0x05, 0x90, 0x5a, 0xf5], "90"),
    ([0x06, 0x05, 0x90, 0x5b, 0xf6], "91"),
];
