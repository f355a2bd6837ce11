//! The menu model registry.
//!
//! [`MenuModelRegistry`] owns the tree, resolves and creates paths,
//! registers and unregisters actions, raw nodes and submenus, and
//! broadcasts a change notification after each structural registration.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use menura_command::{CommandId, CommandLookup};
use menura_core::{ContributionProvider, Disposable, Emitter, Event};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::contribution::MenuContribution;
use crate::error::MenuError;
use crate::node::{
	ActionMenuNode, CompositeMenuNode, MenuAction, MenuNode, NodeToken, SubmenuOptions,
};


struct RegistryInner {
	root: RwLock<CompositeMenuNode>,
	commands: Arc<dyn CommandLookup>,
	changed: Emitter,
	next_token: AtomicU64,
}

/// Mutable tree of menu contributions.
///
/// One instance is constructed by the application bootstrap and handed to
/// every contributor; there is no ambient global. Every operation runs to
/// completion synchronously. The change broadcast fires after the tree
/// lock is released, so listeners may re-enter the registry.
///
/// Cloning yields another handle onto the same tree.
#[derive(Clone)]
pub struct MenuModelRegistry {
	inner: Arc<RegistryInner>,
}

impl MenuModelRegistry {
	/// Creates a registry resolving labels and icons through `commands`.
	///
	/// The tree is rooted at a single unnamed group that is never
	/// removed.
	pub fn new(commands: Arc<dyn CommandLookup>) -> Self {
		Self {
			inner: Arc::new(RegistryInner {
				root: RwLock::new(CompositeMenuNode::new("")),
				commands,
				changed: Emitter::new(),
				next_token: AtomicU64::new(1),
			}),
		}
	}

	/// Registers a leaf action under `path`.
	///
	/// The composite chain for `path` is created as needed. The returned
	/// handle removes exactly this node; disposing it twice is a no-op.
	pub fn register_menu_action(
		&self,
		path: &[&str],
		action: MenuAction,
	) -> Result<Disposable, MenuError> {
		let node = ActionMenuNode::new(action, Arc::clone(&self.inner.commands));
		self.register_menu_node(path, MenuNode::Action(node))
	}

	/// Registers a pre-built node under `path`.
	///
	/// Escape hatch for composite or otherwise custom nodes; insertion,
	/// notification and disposal behave as for
	/// [`register_menu_action`](Self::register_menu_action).
	pub fn register_menu_node(
		&self,
		path: &[&str],
		mut node: MenuNode,
	) -> Result<Disposable, MenuError> {
		let token = self.next_token();
		node.set_token(token);
		let id = node.id().to_string();
		{
			let mut root = self.inner.root.write();
			find_group(&mut root, path)?.add_node(node);
		}
		debug!(path = %path.join("/"), id = %id, "registered menu node");
		self.inner.changed.fire();
		Ok(self.removal_handle(token))
	}

	/// Registers a submenu whose id is the last segment of `path`,
	/// merging with whatever already sits there.
	///
	/// - no child with that id: a labeled group is created and a real
	///   disposal handle returned;
	/// - an unlabeled group (auto-created by path traversal): upgraded in
	///   place — label set, icon class and order filled where absent; the
	///   returned handle is inert because ownership is now shared;
	/// - a group already carrying the same label: idempotent, inert
	///   handle, absent options still merged;
	/// - a group carrying a different label: [`MenuError::LabelConflict`],
	///   tree unchanged;
	/// - a leaf: [`MenuError::NotAGroup`].
	pub fn register_submenu(
		&self,
		path: &[&str],
		label: impl Into<String>,
		options: SubmenuOptions,
	) -> Result<Disposable, MenuError> {
		let Some((&menu_id, prefix)) = path.split_last() else {
			return Err(MenuError::EmptyPath);
		};
		let label = label.into();
		let token = self.next_token();

		let created = {
			let mut root = self.inner.root.write();
			let parent = find_group(&mut root, prefix)?;
			match parent.child_position(menu_id) {
				None => {
					let mut node =
						MenuNode::Composite(CompositeMenuNode::submenu(menu_id, label, options));
					node.set_token(token);
					parent.add_node(node);
					true
				}
				Some(position) => {
					let MenuNode::Composite(existing) = parent.child_mut(position) else {
						return Err(MenuError::NotAGroup {
							id: menu_id.to_string(),
						});
					};
					let current = existing
						.label()
						.filter(|existing| !existing.is_empty())
						.map(str::to_string);
					match current {
						None => {
							existing.set_label(label);
							existing.merge_options(&options);
						}
						Some(current) if current == label => existing.merge_options(&options),
						Some(current) => {
							return Err(MenuError::LabelConflict {
								path: path.join("/"),
								existing: current,
								proposed: label,
							});
						}
					}
					false
				}
			}
		};

		if created {
			debug!(path = %path.join("/"), "registered submenu");
			self.inner.changed.fire();
			Ok(self.removal_handle(token))
		} else {
			Ok(Disposable::noop())
		}
	}

	/// Removes action nodes registered for `command`, which may be a raw
	/// id, a [`MenuAction`] or a `Command`.
	///
	/// With a path, only the matching direct children of that path's
	/// composite are touched; without one, every matching node anywhere
	/// in the tree is removed. Absent ids are a silent no-op.
	pub fn unregister_menu_action<C>(
		&self,
		command: &C,
		path: Option<&[&str]>,
	) -> Result<(), MenuError>
	where
		C: CommandId + ?Sized,
	{
		let id = command.command_id();
		match path {
			Some(path) => {
				let mut root = self.inner.root.write();
				find_group(&mut root, path)?.remove_node(id);
				Ok(())
			}
			None => {
				self.unregister_menu_node(id);
				Ok(())
			}
		}
	}

	/// Removes every node with `id` anywhere in the tree.
	pub fn unregister_menu_node(&self, id: &str) {
		self.inner.root.write().remove_all(id);
	}

	/// The composite at `path`, creating intermediate groups as needed —
	/// a read that may write, matching the path resolution used by
	/// registration.
	///
	/// Returns a clone of the subtree; action nodes in it keep resolving
	/// label and icon live through the shared command lookup.
	pub fn get_menu(&self, path: &[&str]) -> Result<CompositeMenuNode, MenuError> {
		let mut root = self.inner.root.write();
		Ok(find_group(&mut root, path)?.clone())
	}

	/// Invokes `register_menus` on every contribution, in provider order.
	///
	/// A failing contribution is logged and skipped; the remaining
	/// contributions still run.
	pub fn on_start(&self, contributions: &ContributionProvider<dyn MenuContribution>) {
		for contribution in contributions.get_contributions() {
			if let Err(error) = contribution.register_menus(self) {
				warn!(%error, "menu contribution failed");
			}
		}
	}

	/// Subscribes to the structural-change broadcast.
	///
	/// The notification fires once per structural registration, not for
	/// unregistrations or in-place submenu merges.
	pub fn on_menu_changed(&self, listener: impl Fn() + Send + Sync + 'static) -> Disposable {
		self.menu_changed_event().subscribe(listener)
	}

	/// The structural-change event, for observers that pass the
	/// subscription surface around.
	pub fn menu_changed_event(&self) -> Event {
		self.inner.changed.event()
	}

	fn next_token(&self) -> NodeToken {
		NodeToken::new(self.inner.next_token.fetch_add(1, Ordering::Relaxed))
	}

	fn removal_handle(&self, token: NodeToken) -> Disposable {
		let inner = Arc::downgrade(&self.inner);
		Disposable::new(move || {
			if let Some(inner) = inner.upgrade() {
				inner.root.write().remove_token(token);
			}
		})
	}
}

/// Single source of truth for tree shape: walks `path` from `node`,
/// finding or creating the composite for each segment.
fn find_group<'a>(
	node: &'a mut CompositeMenuNode,
	path: &[&str],
) -> Result<&'a mut CompositeMenuNode, MenuError> {
	match path.split_first() {
		None => Ok(node),
		Some((segment, rest)) => find_group(node.find_or_create_group(segment)?, rest),
	}
}
