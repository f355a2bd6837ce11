//! Command metadata and lookup.
//!
//! Menu items do not carry presentation by themselves: an action node
//! resolves its label and icon through [`CommandLookup`] on every read.
//! [`CommandRegistry`] is the in-memory implementation applications
//! populate at startup.

use std::sync::Arc;

use menura_core::Disposable;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::warn;

/// Identity and presentation metadata for an invokable command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
	/// Unique technical identifier (e.g., "file.open").
	pub id: String,
	/// Human-readable name for UI display.
	pub label: Option<String>,
	/// Icon class understood by the rendering surface.
	pub icon_class: Option<String>,
}

impl Command {
	/// Creates a command with neither label nor icon.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: None,
			icon_class: None,
		}
	}

	/// Sets the display label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets the icon class.
	pub fn with_icon_class(mut self, icon_class: impl Into<String>) -> Self {
		self.icon_class = Some(icon_class.into());
		self
	}
}

/// Resolves command metadata by identifier.
///
/// Implementations look the command up on every call; callers rely on
/// this to observe metadata registered after a menu item was created.
pub trait CommandLookup: Send + Sync {
	/// Returns the command registered under `id`, if any.
	fn get_command(&self, id: &str) -> Option<Command>;
}

/// Conversion to a command identifier.
///
/// Lets unregistration accept a raw id, a [`Command`], or any other value
/// that knows which command it refers to.
pub trait CommandId {
	/// The identifier of the referenced command.
	fn command_id(&self) -> &str;
}

impl CommandId for str {
	fn command_id(&self) -> &str {
		self
	}
}

impl CommandId for String {
	fn command_id(&self) -> &str {
		self
	}
}

impl CommandId for Command {
	fn command_id(&self) -> &str {
		&self.id
	}
}

/// In-memory command registry.
///
/// Registrations are revoked through the returned [`Disposable`]; a
/// duplicate id is tolerated (the existing entry wins, with a warning)
/// rather than failing startup.
#[derive(Default)]
pub struct CommandRegistry {
	commands: Arc<RwLock<FxHashMap<String, Command>>>,
}

impl CommandRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `command`, returning the handle that removes it.
	///
	/// Re-registering an existing id keeps the current entry and returns
	/// an inert handle.
	pub fn register_command(&self, command: Command) -> Disposable {
		let mut commands = self.commands.write();
		if commands.contains_key(&command.id) {
			warn!(id = %command.id, "command is already registered");
			return Disposable::noop();
		}
		let id = command.id.clone();
		commands.insert(id.clone(), command);
		drop(commands);

		let map = Arc::downgrade(&self.commands);
		Disposable::new(move || {
			if let Some(map) = map.upgrade() {
				map.write().remove(&id);
			}
		})
	}

	/// Removes the command registered under `id`; absent ids are a
	/// silent no-op.
	pub fn unregister_command(&self, id: &str) {
		self.commands.write().remove(id);
	}

	pub fn len(&self) -> usize {
		self.commands.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.read().is_empty()
	}
}

impl CommandLookup for CommandRegistry {
	fn get_command(&self, id: &str) -> Option<Command> {
		self.commands.read().get(id).cloned()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn register_and_lookup() {
		let registry = CommandRegistry::new();
		assert!(registry.get_command("file.open").is_none());

		let _handle = registry.register_command(
			Command::new("file.open")
				.with_label("Open File")
				.with_icon_class("fa-folder-open"),
		);

		let command = registry.get_command("file.open").unwrap();
		assert_eq!(command.label.as_deref(), Some("Open File"));
		assert_eq!(command.icon_class.as_deref(), Some("fa-folder-open"));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn duplicate_registration_keeps_first() {
		let registry = CommandRegistry::new();
		let _first = registry.register_command(Command::new("x").with_label("First"));
		let second = registry.register_command(Command::new("x").with_label("Second"));

		assert!(second.is_disposed());
		assert_eq!(
			registry.get_command("x").unwrap().label.as_deref(),
			Some("First")
		);

		// Disposing the inert duplicate handle must not remove the
		// surviving registration.
		second.dispose();
		assert!(registry.get_command("x").is_some());
	}

	#[test]
	fn dispose_removes_registration() {
		let registry = CommandRegistry::new();
		let handle = registry.register_command(Command::new("edit.copy"));

		handle.dispose();
		handle.dispose();
		assert!(registry.get_command("edit.copy").is_none());
		assert!(registry.is_empty());
	}

	#[test]
	fn unregister_absent_is_silent() {
		let registry = CommandRegistry::new();
		registry.unregister_command("never.registered");
	}

	#[test]
	fn command_id_conversions() {
		let command = Command::new("view.zoom");
		assert_eq!("view.zoom".command_id(), "view.zoom");
		assert_eq!(String::from("view.zoom").command_id(), "view.zoom");
		assert_eq!(command.command_id(), "view.zoom");
	}
}
