use std::collections::HashMap;
use std::sync::OnceLock;

use crate::Frame;

// Remote keys share the `be 05 25` preamble, input selection `be 05 26`.
macro_rules! key {
    ($code:literal, $check:literal) => {
        Frame::new(&[0xbe, 0x05, 0x25, $code, $check])
    };
}

macro_rules! input {
    ($code:literal, $check:literal) => {
        Frame::new(&[0xbe, 0x05, 0x26, $code, $check])
    };
}

/// Single byte sent at the power-on baud rate.
pub const POWER_ON: Frame = Frame::new(&[0x00]);

pub const INIT: Frame = Frame::new(&[
    0x80, 0x80, 0x00, 0x00, 0x01, 0x00, 0x80, 0x80, 0x30, 0x0d, 0x30, 0x30, 0x30, 0x2e, 0x30,
    0x65, 0x30, 0x74, 0x30, 0x0d,
]);

pub const POWER_OFF: Frame = Frame::new(&[0xbe, 0x05, 0x27, 0x00, 0xea]);

// Not every model implements every command. Unsupported ones are ignored by
// the TV, so it is safe to send them.
static COMMANDS: &[(&str, Frame)] = &[
    ("poweron", POWER_ON),
    ("init", INIT),
    ("poweroff", POWER_OFF),
    ("mute", key!(0x09, 0xf1)),
    ("one", key!(0x11, 0xf9)),
    ("two", key!(0x12, 0xfa)),
    ("three", key!(0x13, 0xfb)),
    ("four", key!(0x14, 0xfc)),
    ("five", key!(0x15, 0xfd)),
    ("six", key!(0x16, 0xfe)),
    ("seven", key!(0x17, 0xff)),
    ("eight", key!(0x18, 0x00)),
    ("nine", key!(0x19, 0x01)),
    ("zero", key!(0x10, 0xf8)),
    ("channelreturn", key!(0x1a, 0x02)),
    ("dash", key!(0x59, 0x41)),
    ("mts", key!(0x40, 0x28)),
    ("menu", key!(0x04, 0xec)),
    ("enter", key!(0x1b, 0x03)),
    ("up", key!(0x45, 0x2d)),
    ("down", key!(0x4a, 0x32)),
    ("right", key!(0x07, 0xef)),
    ("left", key!(0x0a, 0xf2)),
    ("favorite", key!(0x46, 0x2e)),
    ("display", key!(0x1e, 0x06)),
    ("volumeup", key!(0x02, 0xea)),
    ("volumedown", key!(0x03, 0xeb)),
    ("channelup", key!(0x00, 0xe8)),
    ("channeldown", key!(0x01, 0xe9)),
    ("source", key!(0x0b, 0xf3)),
    ("view", key!(0x0e, 0xf6)),
    ("swap", key!(0x0f, 0xf7)),
    ("freeze", key!(0x55, 0x3d)),
    ("closedcaption", key!(0x48, 0x30)),
    ("aspect", key!(0x56, 0x3e)),
    ("vgaautosync", key!(0x50, 0x38)),
    ("lighting", key!(0x20, 0x08)),
    ("sleep", key!(0x22, 0x0a)),
    ("info", key!(0x23, 0x0b)),
    ("tuner1", input!(0x00, 0xe9)),
    ("tuner2", input!(0x01, 0xea)),
    ("composite1", input!(0x02, 0xeb)),
    ("composite2", input!(0x03, 0xec)),
    ("svideo1", input!(0x05, 0xee)),
    ("svideo2", input!(0x06, 0xef)),
    ("component1", input!(0x08, 0xf1)),
    ("component2", input!(0x09, 0xf2)),
    ("vga", input!(0x0a, 0xf3)),
    ("vgacomponent", input!(0x0b, 0xf4)),
    ("hdmi1", input!(0x0c, 0xf5)),
    ("hdmi2", input!(0x0e, 0xf7)),
];

/// Shortcut keywords and the canonical command they resolve to.
pub const ALIASES: &[(&str, &str)] = &[
    ("1", "one"),
    ("2", "two"),
    ("3", "three"),
    ("4", "four"),
    ("5", "five"),
    ("6", "six"),
    ("7", "seven"),
    ("8", "eight"),
    ("9", "nine"),
    ("0", "zero"),
    ("previous", "channelreturn"),
    ("cc", "closedcaption"),
];

/// Keyword to frame table. Built once, read-only afterwards.
pub struct Registry {
    entries: HashMap<&'static str, Frame>,
}

impl Registry {
    fn new() -> Self {
        let mut entries: HashMap<&'static str, Frame> = COMMANDS.iter().copied().collect();

        for (alias, canonical) in ALIASES {
            if let Some(frame) = entries.get(canonical).copied() {
                entries.insert(*alias, frame);
            }
        }

        Self { entries }
    }

    pub fn standard() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(Registry::new)
    }

    pub fn lookup(&self, keyword: &str) -> Option<Frame> {
        self.entries.get(keyword).copied()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.entries.contains_key(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Frame)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
