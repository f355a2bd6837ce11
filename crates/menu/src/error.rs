//! Menu registry errors.

use thiserror::Error;

/// Contract violations raised by the menu registry.
///
/// All of these are synchronous, locally raised programming errors, not
/// transient conditions. Unregistering an id that does not exist is a
/// silent no-op, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
	/// `register_submenu` was called with an empty path.
	#[error("the submenu path cannot be empty")]
	EmptyPath,
	/// A submenu id was re-registered with a different label.
	#[error("menu group '{path}' already has label \"{existing}\", refusing \"{proposed}\"")]
	LabelConflict {
		/// Full path of the conflicting submenu.
		path: String,
		/// Label already carried by the group.
		existing: String,
		/// Label the rejected registration asked for.
		proposed: String,
	},
	/// A path segment or submenu id is held by a non-composite node.
	#[error("menu node '{id}' is not a group")]
	NotAGroup {
		/// Identifier of the offending node.
		id: String,
	},
	/// An action's label or icon was requested, no override was given,
	/// and the command id does not resolve.
	#[error("command '{id}' does not exist")]
	UnknownCommand {
		/// The unresolved command id.
		id: String,
	},
}
