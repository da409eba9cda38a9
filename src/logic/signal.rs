use std::fmt;

/// A value carried by a terminal: low, high, or not yet determined.
///
/// `Undefined` is a real state, not a stand-in for `Low`. A gate with an
/// unwired input produces `Undefined`, and so does anything downstream of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(into = "Option<u8>"))]
pub enum Signal {
    Low,
    High,
    #[default]
    Undefined,
}

impl Signal {
    /// Returns the boolean reading, or `None` when the signal is undefined.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Signal::Low => Some(false),
            Signal::High => Some(true),
            Signal::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        !matches!(self, Signal::Undefined)
    }
}

impl From<bool> for Signal {
    fn from(value: bool) -> Self {
        if value { Signal::High } else { Signal::Low }
    }
}

impl From<Option<bool>> for Signal {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Signal::Undefined, Signal::from)
    }
}

impl From<Signal> for Option<u8> {
    fn from(signal: Signal) -> Self {
        signal.as_bool().map(u8::from)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Low => write!(f, "0"),
            Signal::High => write!(f, "1"),
            Signal::Undefined => write!(f, "?"),
        }
    }
}
