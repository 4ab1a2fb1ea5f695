#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Power {
    On,
    Off,
}

impl std::fmt::Display for Power {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Power::On => write!(f, "on"),
            Power::Off => write!(f, "off"),
        }
    }
}

/// What one client connection believes about the TV.
///
/// Every connection starts out assuming the TV is off and uninitialized. Only
/// power transitions, `init` and status queries change this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    power: Power,
    initialized: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            power: Power::Off,
            initialized: false,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn power(&self) -> Power {
        self.power
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The TV was powered on and sent the init sequence, or answered a
    /// power status query.
    pub fn mark_on(&mut self) {
        self.power = Power::On;
        self.initialized = true;
    }

    pub fn mark_off(&mut self) {
        self.power = Power::Off;
        self.initialized = false;
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }
}
