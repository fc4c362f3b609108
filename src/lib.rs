//! Macro binding for ratbag-style configurable mice
//!
//! [`MacroSequence`] is the editable form of a button macro. The
//! [`button_macro`] bridge converts it to and from a native button's event
//! list, and [`library`] keeps named macros on disk.

pub mod button_macro;
pub mod library;
pub mod macro_seq;

pub use button_macro::{load_macro, store_macro};
pub use library::{LibraryError, MacroLibrary, NamedMacro};
pub use macro_seq::{
    parse_event_list, MacroEvent, MacroEventKind, MacroSequence, ParseMacroError,
    EMPTY_PLACEHOLDER,
};
