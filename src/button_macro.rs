//! Loading and storing macros through a native button.

use crate::macro_seq::{MacroEventKind, MacroSequence};
use ratbag_model::native::macro_event;
use ratbag_model::{ActionType, NativeButton, NativeMacro, RatbagError};
use tracing::{debug, warn};

/// Read the macro currently bound to `button`.
///
/// Events go through [`MacroSequence::append`], so adjacent duplicates in
/// the native list are collapsed. Buttons without a macro yield an empty
/// sequence. Native "none" events are skipped; any other unknown event
/// kind is an [`RatbagError::Implementation`] error.
pub fn load_macro<B: NativeButton>(button: &B) -> Result<MacroSequence, RatbagError> {
    let Some(native) = button.macro_events() else {
        debug!("Button has no macro (action type {})", button.action_type());
        return Ok(MacroSequence::new());
    };

    let mut seq = MacroSequence::new();
    for i in 0..native.num_events() {
        let raw_kind = native.event_kind(i)?;
        let value = native.event_value(i)?;
        match MacroEventKind::from_raw(raw_kind) {
            Some(kind) => {
                seq.append(kind, value);
            }
            None if raw_kind == macro_event::NONE => {
                warn!("Skipping empty macro event at position {i}");
            }
            None => {
                return Err(RatbagError::Implementation(format!(
                    "macro event {i} has unknown kind {raw_kind}"
                )));
            }
        }
    }

    debug!(
        "Loaded macro: {} native events -> {} events",
        native.num_events(),
        seq.len()
    );
    Ok(seq)
}

/// Bind `seq` to `button` as its macro action.
///
/// The native list is built from scratch; nothing reaches the device
/// until the owning device is committed.
pub fn store_macro<B: NativeButton>(
    button: &mut B,
    seq: &MacroSequence,
) -> Result<(), RatbagError> {
    if !button.has_action_type(ActionType::Macro.raw()) {
        return Err(RatbagError::Capability("button cannot be assigned a macro".into()));
    }

    let mut native = B::Macro::default();
    for event in seq.events() {
        native.push_event(event.kind.raw(), event.value)?;
    }
    button.set_macro(native)?;
    debug!("Stored macro: {}", seq);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macro_seq::MacroEvent;
    use ratbag_model::memory::{MemoryAction, MemoryButton, MemoryMacro};

    fn macro_button(json_events: &str) -> MemoryButton {
        let events: MemoryMacro = serde_json::from_str(json_events).unwrap();
        MemoryButton {
            action: MemoryAction::Macro { events },
            ..Default::default()
        }
    }

    #[test]
    fn load_from_non_macro_button_is_empty() {
        let button = MemoryButton {
            action: MemoryAction::Key { key: 30 },
            ..Default::default()
        };
        assert!(load_macro(&button).unwrap().is_empty());
    }

    #[test]
    fn load_collapses_native_duplicates() {
        let button = macro_button(
            r#"[{"kind":1,"value":30},{"kind":1,"value":30},{"kind":2,"value":30}]"#,
        );
        let seq = load_macro(&button).unwrap();
        assert_eq!(seq.events(), &[MacroEvent::press(30), MacroEvent::release(30)]);
    }

    #[test]
    fn load_skips_none_events() {
        let button = macro_button(r#"[{"kind":3,"value":10},{"kind":0,"value":0}]"#);
        let seq = load_macro(&button).unwrap();
        assert_eq!(seq.events(), &[MacroEvent::wait(10)]);
    }

    #[test]
    fn load_rejects_unknown_kind() {
        let button = macro_button(r#"[{"kind":7,"value":1}]"#);
        let err = load_macro(&button).unwrap_err();
        assert!(matches!(err, RatbagError::Implementation(_)));
    }

    #[test]
    fn store_then_load() {
        let mut button = MemoryButton::default();
        let seq = MacroSequence::from_events([
            MacroEvent::press(29),
            MacroEvent::press(46),
            MacroEvent::release(46),
            MacroEvent::release(29),
        ]);
        store_macro(&mut button, &seq).unwrap();
        assert_eq!(button.action_type(), ActionType::Macro.raw());
        assert_eq!(load_macro(&button).unwrap(), seq);
    }

    #[test]
    fn store_empty_macro() {
        let mut button = MemoryButton::default();
        store_macro(&mut button, &MacroSequence::new()).unwrap();
        assert_eq!(button.macro_events().unwrap().num_events(), 0);
    }

    #[test]
    fn store_needs_macro_support() {
        let mut button = MemoryButton {
            action_types: vec![ActionType::Button],
            ..Default::default()
        };
        let seq = MacroSequence::from_events([MacroEvent::press(30)]);
        assert!(matches!(
            store_macro(&mut button, &seq),
            Err(RatbagError::Capability(_))
        ));
        assert_eq!(button.action, MemoryAction::None);
    }

    #[test]
    fn store_propagates_native_range_errors() {
        let mut button = MemoryButton::default();
        let seq = MacroSequence::from_events([MacroEvent::press(0x1000)]);
        assert!(matches!(
            store_macro(&mut button, &seq),
            Err(RatbagError::Value(_))
        ));
        assert!(button.macro_events().is_none());
    }
}
