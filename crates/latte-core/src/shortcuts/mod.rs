//! Global shortcut definitions.
//!
//! Only the static part lives here: which key sequence belongs to which
//! action.  Deciding which view answers a shortcut needs the live view set and
//! is done by the shortcut coordinator in `latte-dock`.

/// Key table for task entries and the fixed shell actions.
pub mod keys;
