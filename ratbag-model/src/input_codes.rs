//! Linux input-event keycode names
//!
//! Canonical names come from [`evdev::Key`], which mirrors
//! `linux/input-event-codes.h`. The header also defines a few aliases for
//! codes that already have a name; those are listed here after the
//! canonical name.

use evdev::Key;
use std::str::FromStr;

/// Highest code in the key range that macros may contain
pub const KEY_MAX: u32 = 0x2ff;

/// Alternative names, in header order
#[rustfmt::skip]
static ALIASES: &[(u32, &str)] = &[
    (113, "KEY_MIN_INTERESTING"),
    (122, "KEY_HANGUEL"),
    (152, "KEY_COFFEE"), (152, "KEY_SCREENLOCK"),
    (0x100, "BTN_MISC"),
    (0x110, "BTN_MOUSE"),
];

fn evdev_key(code: u32) -> Option<Key> {
    if code > KEY_MAX {
        return None;
    }
    u16::try_from(code).ok().map(Key::new)
}

/// Canonical name of a keycode
pub fn key_name(code: u32) -> Option<String> {
    let name = format!("{:?}", evdev_key(code)?);
    // evdev prints codes without a name as a sentence, not an identifier
    let is_ident = name
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_');
    is_ident.then_some(name)
}

/// All names of a keycode, canonical name first
pub fn key_names(code: u32) -> Vec<String> {
    let mut names: Vec<String> = key_name(code).into_iter().collect();
    for &(_, alias) in ALIASES.iter().filter(|&&(c, _)| c == code) {
        if !names.iter().any(|n| n == alias) {
            names.push(alias.to_string());
        }
    }
    names
}

/// Name for display; unnamed codes come out as `KEY_<code>`
pub fn display_name(code: u32) -> String {
    key_names(code)
        .into_iter()
        .next()
        .unwrap_or_else(|| format!("KEY_{code}"))
}

fn lookup(name: &str) -> Option<u32> {
    if let Ok(key) = Key::from_str(name) {
        return Some(u32::from(key.code()));
    }
    ALIASES
        .iter()
        .find(|&&(_, alias)| alias == name)
        .map(|&(code, _)| code)
}

/// Resolve a name to its keycode.
///
/// Case-insensitive; the `KEY_` prefix is optional (`a`, `KEY_A` and
/// `key_a` all resolve to 30). Aliases resolve to the same code as the
/// canonical name.
pub fn key_code_from_name(name: &str) -> Option<u32> {
    let upper = name.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return None;
    }
    lookup(&upper)
        .or_else(|| lookup(&format!("KEY_{upper}")))
        .filter(|&code| code <= KEY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        assert_eq!(key_name(30).as_deref(), Some("KEY_A"));
        assert_eq!(key_name(1).as_deref(), Some("KEY_ESC"));
        assert_eq!(key_name(0x110).as_deref(), Some("BTN_LEFT"));
        assert_eq!(key_name(84), None);
        assert_eq!(key_name(KEY_MAX + 1), None);
    }

    #[test]
    fn codes_above_the_keyboard_block() {
        assert_eq!(display_name(0x160), "KEY_OK");
        assert_eq!(display_name(0x1d0), "KEY_FN");
        assert_eq!(display_name(0x1a2), "KEY_ZOOMIN");
        assert_eq!(display_name(0x100), "BTN_0");
        assert_eq!(key_code_from_name("KEY_OK"), Some(0x160));
        assert_eq!(key_code_from_name("zoomin"), Some(0x1a2));
    }

    #[test]
    fn canonical_name_comes_before_aliases() {
        assert_eq!(key_name(113).as_deref(), Some("KEY_MUTE"));
        assert_eq!(key_names(113), ["KEY_MUTE", "KEY_MIN_INTERESTING"]);
        let names = key_names(152);
        assert!(names.iter().any(|n| n == "KEY_COFFEE"));
        assert!(names.iter().any(|n| n == "KEY_SCREENLOCK"));
        assert_eq!(names.iter().filter(|n| *n == "KEY_COFFEE").count(), 1);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(key_code_from_name("KEY_A"), Some(30));
        assert_eq!(key_code_from_name("a"), Some(30));
        assert_eq!(key_code_from_name(" key_leftctrl "), Some(29));
        assert_eq!(key_code_from_name("KEY_SCREENLOCK"), Some(152));
        assert_eq!(key_code_from_name("KEY_MIN_INTERESTING"), Some(113));
        assert_eq!(key_code_from_name("btn_side"), Some(0x113));
        assert_eq!(key_code_from_name("btn_mouse"), Some(0x110));
        assert_eq!(key_code_from_name("nope"), None);
        assert_eq!(key_code_from_name(""), None);
    }

    #[test]
    fn unnamed_codes_display_numerically() {
        assert_eq!(display_name(57), "KEY_SPACE");
        assert_eq!(display_name(84), "KEY_84");
        assert_eq!(display_name(999), "KEY_999");
    }

    #[test]
    fn aliases_stay_in_key_range() {
        assert!(ALIASES.iter().all(|&(c, _)| c <= KEY_MAX));
    }
}
