//! Macro event sequences and their display.
//!
//! A [`MacroSequence`] is the ordered list of key and wait events that a
//! button plays back. Appending an event identical to the last one is a
//! silent no-op, so a sequence never holds two equal neighbours.
//!
//! # Rendering
//!
//! ```text
//! ↓KEY_LEFTCTRL ♦KEY_C ↑KEY_LEFTCTRL 50ms ♦KEY_V
//! ```
//!
//! A press immediately followed by the release of the same key renders as a
//! single tap (`♦`); every other press (`↓`) and release (`↑`) stands
//! alone, and waits render as `{n}ms`. An empty sequence renders as `None`.
//!
//! # Text syntax
//!
//! ```text
//! KEY_A          tap (press + release)
//! +KEY_A, -a     explicit press / release (KEY_ prefix optional)
//! press:30       numeric keycode
//! 50ms, wait:50  wait in milliseconds
//! ```

use ratbag_model::input_codes::{self, KEY_MAX};
use ratbag_model::native::macro_event;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Rendering of an empty sequence
pub const EMPTY_PLACEHOLDER: &str = "None";

const PRESS_GLYPH: char = '↓';
const RELEASE_GLYPH: char = '↑';
const TAP_GLYPH: char = '♦';

/// Kind of a macro event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MacroEventKind {
    KeyPress,
    KeyRelease,
    Wait,
}

impl MacroEventKind {
    /// Convert a native event kind code. Code 0 (no event) and unknown codes
    /// return `None`.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            macro_event::KEY_PRESSED => Some(Self::KeyPress),
            macro_event::KEY_RELEASED => Some(Self::KeyRelease),
            macro_event::WAIT => Some(Self::Wait),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::KeyPress => macro_event::KEY_PRESSED,
            Self::KeyRelease => macro_event::KEY_RELEASED,
            Self::Wait => macro_event::WAIT,
        }
    }
}

/// One macro event: a keycode for presses and releases, milliseconds for waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacroEvent {
    pub kind: MacroEventKind,
    pub value: u32,
}

impl MacroEvent {
    pub fn new(kind: MacroEventKind, value: u32) -> Self {
        Self { kind, value }
    }

    pub fn press(keycode: u32) -> Self {
        Self::new(MacroEventKind::KeyPress, keycode)
    }

    pub fn release(keycode: u32) -> Self {
        Self::new(MacroEventKind::KeyRelease, keycode)
    }

    pub fn wait(ms: u32) -> Self {
        Self::new(MacroEventKind::Wait, ms)
    }

    /// Format in the text syntax accepted by [`parse_event_list`]
    pub fn to_syntax(&self) -> String {
        match self.kind {
            MacroEventKind::KeyPress => format!("+{}", input_codes::display_name(self.value)),
            MacroEventKind::KeyRelease => format!("-{}", input_codes::display_name(self.value)),
            MacroEventKind::Wait => format!("{}ms", self.value),
        }
    }
}

/// Single-event rendering (`↓KEY_A`, `↑KEY_A`, `50ms`)
impl fmt::Display for MacroEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MacroEventKind::KeyPress => {
                write!(f, "{PRESS_GLYPH}{}", input_codes::display_name(self.value))
            }
            MacroEventKind::KeyRelease => {
                write!(f, "{RELEASE_GLYPH}{}", input_codes::display_name(self.value))
            }
            MacroEventKind::Wait => write!(f, "{}ms", self.value),
        }
    }
}

/// Change callback, called with the new event list after each real mutation
pub type MacroObserver = Box<dyn FnMut(&[MacroEvent]) + Send>;

/// Ordered macro events with adjacent-duplicate suppression.
#[derive(Default)]
pub struct MacroSequence {
    events: Vec<MacroEvent>,
    observer: Option<MacroObserver>,
}

impl MacroSequence {
    /// Empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence by appending each event in order, dropping adjacent
    /// duplicates.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = MacroEvent>,
    {
        let mut seq = Self::new();
        for event in events {
            seq.push(event);
        }
        seq
    }

    /// Register a callback that fires after every append that changed the
    /// sequence.
    pub fn with_observer(mut self, observer: impl FnMut(&[MacroEvent]) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Append an event unless it equals the current last event.
    ///
    /// Returns `true` when the sequence changed.
    pub fn append(&mut self, kind: MacroEventKind, value: u32) -> bool {
        self.push(MacroEvent::new(kind, value))
    }

    /// [`append`](Self::append) taking a whole event
    pub fn push(&mut self, event: MacroEvent) -> bool {
        if self.events.last() == Some(&event) {
            debug!("Dropping duplicate macro event {event}");
            return false;
        }
        self.events.push(event);
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.events);
        }
        true
    }

    /// Current events in playback order
    pub fn events(&self) -> &[MacroEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// One-line human-readable description (see module docs)
    pub fn render(&self) -> String {
        if self.events.is_empty() {
            return EMPTY_PLACEHOLDER.to_string();
        }

        let mut tokens = Vec::with_capacity(self.events.len());
        let mut i = 0;
        while i < self.events.len() {
            let event = self.events[i];
            if event.kind == MacroEventKind::KeyPress {
                if let Some(next) = self.events.get(i + 1) {
                    if *next == MacroEvent::release(event.value) {
                        tokens.push(format!(
                            "{TAP_GLYPH}{}",
                            input_codes::display_name(event.value)
                        ));
                        i += 2;
                        continue;
                    }
                }
            }
            tokens.push(event.to_string());
            i += 1;
        }
        tokens.join(" ")
    }

    /// Events in text syntax, comma separated
    pub fn to_syntax(&self) -> String {
        self.events
            .iter()
            .map(MacroEvent::to_syntax)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Clone for MacroSequence {
    /// Clones the events; the observer stays with the original.
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            observer: None,
        }
    }
}

impl PartialEq for MacroSequence {
    fn eq(&self, other: &Self) -> bool {
        self.events == other.events
    }
}

impl Eq for MacroSequence {}

impl fmt::Debug for MacroSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroSequence")
            .field("events", &self.events)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl fmt::Display for MacroSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromIterator<MacroEvent> for MacroSequence {
    fn from_iter<I: IntoIterator<Item = MacroEvent>>(iter: I) -> Self {
        Self::from_events(iter)
    }
}

/// Error type for parsing macro text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMacroError {
    EmptySequence,
    UnknownKey(String),
    InvalidWait(String),
    InvalidDirection(String),
}

impl fmt::Display for ParseMacroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySequence => write!(f, "empty macro sequence"),
            Self::UnknownKey(s) => write!(f, "unknown key: \"{s}\""),
            Self::InvalidWait(s) => write!(f, "invalid wait: \"{s}\""),
            Self::InvalidDirection(s) => {
                write!(f, "invalid direction: \"{s}\" (expected press, release or wait)")
            }
        }
    }
}

impl std::error::Error for ParseMacroError {}

/// Resolve a key name or numeric keycode (`30`, `0x1e`, `KEY_30`).
///
/// Plain digits are always a keycode: `1` is `KEY_ESC`, the number row
/// needs its full name (`KEY_1`).
pub fn parse_keycode(s: &str) -> Result<u32, ParseMacroError> {
    let s = s.trim();
    let numeric = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !numeric {
        if let Some(code) = input_codes::key_code_from_name(s) {
            return Ok(code);
        }
    }
    // unnamed codes are displayed as KEY_<n>
    let num = s
        .strip_prefix("KEY_")
        .or_else(|| s.strip_prefix("key_"))
        .unwrap_or(s);
    let parsed = match num.strip_prefix("0x").or_else(|| num.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => num.parse::<u32>(),
    };
    match parsed {
        Ok(code) if code <= KEY_MAX => Ok(code),
        _ => Err(ParseMacroError::UnknownKey(s.to_string())),
    }
}

fn parse_wait(s: &str) -> Result<u32, ParseMacroError> {
    let s = s.trim();
    let num = s.strip_suffix("ms").unwrap_or(s).trim();
    num.parse::<u32>()
        .map_err(|_| ParseMacroError::InvalidWait(s.to_string()))
}

fn is_wait_token(s: &str) -> bool {
    s.strip_suffix("ms")
        .is_some_and(|n| !n.is_empty() && n.trim().chars().all(|c| c.is_ascii_digit()))
}

/// Parse one token into one event (taps produce two, see [`parse_event_list`]).
impl FromStr for MacroEvent {
    type Err = ParseMacroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if is_wait_token(s) {
            return Ok(Self::wait(parse_wait(s)?));
        }
        if let Some(key) = s.strip_prefix('+') {
            return Ok(Self::press(parse_keycode(key)?));
        }
        if let Some(key) = s.strip_prefix('-') {
            return Ok(Self::release(parse_keycode(key)?));
        }
        let (dir, arg) = s
            .split_once(':')
            .ok_or_else(|| ParseMacroError::InvalidDirection(s.to_string()))?;
        match dir.trim().to_ascii_lowercase().as_str() {
            "press" | "down" => Ok(Self::press(parse_keycode(arg)?)),
            "release" | "up" => Ok(Self::release(parse_keycode(arg)?)),
            "wait" => Ok(Self::wait(parse_wait(arg)?)),
            _ => Err(ParseMacroError::InvalidDirection(dir.to_string())),
        }
    }
}

/// Parse a comma-separated macro into events.
///
/// Bare key names expand to a press followed by a release. The result is
/// not deduplicated; feed it to [`MacroSequence::from_events`] for that.
pub fn parse_event_list(s: &str) -> Result<Vec<MacroEvent>, ParseMacroError> {
    let mut events = Vec::new();
    for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let explicit = is_wait_token(token)
            || token.starts_with('+')
            || token.starts_with('-')
            || token.contains(':');
        if explicit {
            events.push(token.parse()?);
        } else {
            let key = parse_keycode(token)?;
            events.push(MacroEvent::press(key));
            events.push(MacroEvent::release(key));
        }
    }
    if events.is_empty() {
        return Err(ParseMacroError::EmptySequence);
    }
    Ok(events)
}
