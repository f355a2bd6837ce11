//! Menu tree nodes.
//!
//! The tree is a closed variant type: [`CompositeMenuNode`] for groups
//! and submenus, [`ActionMenuNode`] for leaves bound to a command. Both
//! expose the shared capabilities every tree element has, a stable
//! [`id`](MenuNode::id) and a [`sort_string`](MenuNode::sort_string).

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use menura_command::{CommandId, CommandLookup};

use crate::error::MenuError;

/// Reserved sibling id always ordered first within its group, regardless
/// of sort key.
pub const NAVIGATION_GROUP: &str = "navigation";

/// Identity of a node inserted through the registry.
///
/// Tokens increase monotonically and are never reused; disposal removes
/// by token, so two siblings carrying the same command id stay
/// independently revocable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeToken(u64);

impl NodeToken {
	pub(crate) const fn new(value: u64) -> Self {
		Self(value)
	}
}

/// A menu item contribution: one command, plus optional presentation
/// overrides and placement hints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuAction {
	/// Command executed when the item is invoked.
	pub command_id: String,
	/// Command executed instead when the modifier is held.
	pub alt: Option<String>,
	/// Label override; falls back to the command's label.
	pub label: Option<String>,
	/// Icon override; falls back to the command's icon class.
	pub icon: Option<String>,
	/// Sort key override; falls back to the resolved label.
	pub order: Option<String>,
	/// Rendering condition, carried but not interpreted by the registry.
	pub when: Option<String>,
}

impl MenuAction {
	/// Creates an action for `command_id` with no overrides.
	pub fn new(command_id: impl Into<String>) -> Self {
		Self {
			command_id: command_id.into(),
			..Self::default()
		}
	}

	/// Sets the modifier-triggered alternate command.
	pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
		self.alt = Some(alt.into());
		self
	}

	/// Sets the label override.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets the icon override.
	pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	/// Sets the sort key override.
	pub fn with_order(mut self, order: impl Into<String>) -> Self {
		self.order = Some(order.into());
		self
	}

	/// Sets the rendering condition.
	pub fn with_when(mut self, when: impl Into<String>) -> Self {
		self.when = Some(when.into());
		self
	}
}

impl CommandId for MenuAction {
	fn command_id(&self) -> &str {
		&self.command_id
	}
}

/// Presentation options for submenu registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmenuOptions {
	/// Icon class for the submenu entry.
	pub icon_class: Option<String>,
	/// Sort key override for the submenu among its siblings.
	pub order: Option<String>,
}

impl SubmenuOptions {
	/// Sets the icon class.
	pub fn with_icon_class(mut self, icon_class: impl Into<String>) -> Self {
		self.icon_class = Some(icon_class.into());
		self
	}

	/// Sets the sort key override.
	pub fn with_order(mut self, order: impl Into<String>) -> Self {
		self.order = Some(order.into());
		self
	}
}

/// Tree element: a composite group/submenu, or a leaf action.
#[derive(Debug, Clone)]
pub enum MenuNode {
	/// Internal node owning an ordered list of children.
	Composite(CompositeMenuNode),
	/// Leaf bound to a command.
	Action(ActionMenuNode),
}

impl MenuNode {
	/// Stable technical identifier used for lookup and removal.
	pub fn id(&self) -> &str {
		match self {
			Self::Composite(node) => node.id(),
			Self::Action(node) => node.id(),
		}
	}

	/// Key ordering this node among its siblings.
	pub fn sort_string(&self) -> Cow<'_, str> {
		match self {
			Self::Composite(node) => node.sort_string(),
			Self::Action(node) => node.sort_string(),
		}
	}

	pub fn as_composite(&self) -> Option<&CompositeMenuNode> {
		match self {
			Self::Composite(node) => Some(node),
			Self::Action(_) => None,
		}
	}

	pub fn as_composite_mut(&mut self) -> Option<&mut CompositeMenuNode> {
		match self {
			Self::Composite(node) => Some(node),
			Self::Action(_) => None,
		}
	}

	pub fn as_action(&self) -> Option<&ActionMenuNode> {
		match self {
			Self::Action(node) => Some(node),
			Self::Composite(_) => None,
		}
	}

	pub(crate) fn token(&self) -> Option<NodeToken> {
		match self {
			Self::Composite(node) => node.token,
			Self::Action(node) => node.token,
		}
	}

	pub(crate) fn set_token(&mut self, token: NodeToken) {
		match self {
			Self::Composite(node) => node.token = Some(token),
			Self::Action(node) => node.token = Some(token),
		}
	}
}

/// Sibling order: the navigation group first, everything else ascending
/// by sort key; stable sorting preserves insertion order on ties.
fn compare_siblings(a: &MenuNode, b: &MenuNode) -> Ordering {
	match (a.id() == NAVIGATION_GROUP, b.id() == NAVIGATION_GROUP) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Less,
		(false, true) => Ordering::Greater,
		(false, false) => a.sort_string().cmp(&b.sort_string()),
	}
}

/// Internal tree node: a plain grouping, or a submenu once it carries a
/// label.
#[derive(Debug, Clone)]
pub struct CompositeMenuNode {
	id: String,
	label: Option<String>,
	icon_class: Option<String>,
	order: Option<String>,
	children: Vec<MenuNode>,
	pub(crate) token: Option<NodeToken>,
}

impl CompositeMenuNode {
	/// Creates an unlabeled grouping node.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: None,
			icon_class: None,
			order: None,
			children: Vec::new(),
			token: None,
		}
	}

	/// Creates a labeled submenu node.
	pub fn submenu(
		id: impl Into<String>,
		label: impl Into<String>,
		options: SubmenuOptions,
	) -> Self {
		Self {
			id: id.into(),
			label: Some(label.into()),
			icon_class: options.icon_class,
			order: options.order,
			children: Vec::new(),
			token: None,
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	pub fn icon_class(&self) -> Option<&str> {
		self.icon_class.as_deref()
	}

	pub fn order(&self) -> Option<&str> {
		self.order.as_deref()
	}

	/// Children, always in sibling order.
	pub fn children(&self) -> &[MenuNode] {
		&self.children
	}

	/// True iff the node carries a non-empty label and therefore renders
	/// as a nested submenu rather than a flat group.
	pub fn is_submenu(&self) -> bool {
		self.label.as_deref().is_some_and(|label| !label.is_empty())
	}

	/// Sibling sort key: explicit order, else the id.
	pub fn sort_string(&self) -> Cow<'_, str> {
		Cow::Borrowed(self.order.as_deref().unwrap_or(&self.id))
	}

	/// Inserts `node` and restores sibling order.
	///
	/// The whole child list is re-sorted so nodes whose keys changed
	/// since their insertion (a merged submenu gaining an order, a
	/// command registered late) settle into place.
	pub fn add_node(&mut self, node: MenuNode) {
		self.children.push(node);
		self.children.sort_by(compare_siblings);
	}

	/// Removes the first child with `id`; absent ids are a no-op.
	pub fn remove_node(&mut self, id: &str) {
		if let Some(position) = self.children.iter().position(|child| child.id() == id) {
			self.children.remove(position);
		}
	}

	pub(crate) fn set_label(&mut self, label: String) {
		self.label = Some(label);
	}

	/// Fills icon class and order from `options` where still unset.
	pub(crate) fn merge_options(&mut self, options: &SubmenuOptions) {
		if self.icon_class.is_none() {
			self.icon_class = options.icon_class.clone();
		}
		if self.order.is_none() {
			self.order = options.order.clone();
		}
	}

	pub(crate) fn child_position(&self, id: &str) -> Option<usize> {
		self.children.iter().position(|child| child.id() == id)
	}

	pub(crate) fn child_mut(&mut self, position: usize) -> &mut MenuNode {
		&mut self.children[position]
	}

	/// Walks one path segment: the existing composite child with `id`,
	/// or a freshly inserted unlabeled group.
	pub(crate) fn find_or_create_group(
		&mut self,
		id: &str,
	) -> Result<&mut CompositeMenuNode, MenuError> {
		match self.child_position(id) {
			Some(position) => match &mut self.children[position] {
				MenuNode::Composite(group) => Ok(group),
				MenuNode::Action(_) => Err(MenuError::NotAGroup { id: id.to_string() }),
			},
			None => {
				self.add_node(MenuNode::Composite(CompositeMenuNode::new(id)));
				self.children
					.iter_mut()
					.find(|child| child.id() == id)
					.and_then(MenuNode::as_composite_mut)
					.ok_or_else(|| MenuError::NotAGroup { id: id.to_string() })
			}
		}
	}

	/// Removes the node carrying `token` from this subtree. Returns true
	/// once it was found.
	pub(crate) fn remove_token(&mut self, token: NodeToken) -> bool {
		let before = self.children.len();
		self.children.retain(|child| child.token() != Some(token));
		if self.children.len() != before {
			return true;
		}
		self.children
			.iter_mut()
			.filter_map(MenuNode::as_composite_mut)
			.any(|group| group.remove_token(token))
	}

	/// Removes every node with `id` in this subtree.
	pub(crate) fn remove_all(&mut self, id: &str) {
		for child in &mut self.children {
			if let MenuNode::Composite(group) = child {
				group.remove_all(id);
			}
		}
		self.children.retain(|child| child.id() != id);
	}
}

/// Leaf node bound to one command.
///
/// Pure derivation node: label, icon and sort key are computed on every
/// read from the action and the command lookup, never cached, so later
/// changes to the command's metadata are reflected live.
#[derive(Clone)]
pub struct ActionMenuNode {
	action: MenuAction,
	commands: Arc<dyn CommandLookup>,
	alt: Option<Box<ActionMenuNode>>,
	pub(crate) token: Option<NodeToken>,
}

impl ActionMenuNode {
	/// Creates a leaf for `action`, resolving presentation through
	/// `commands`. When the action names an alternate command, an
	/// internal alternate node is built under the same resolution rules.
	pub fn new(action: MenuAction, commands: Arc<dyn CommandLookup>) -> Self {
		let alt = action.alt.clone().map(|alt_id| {
			Box::new(ActionMenuNode::new(
				MenuAction {
					command_id: alt_id,
					when: action.when.clone(),
					..MenuAction::default()
				},
				Arc::clone(&commands),
			))
		});
		Self {
			action,
			commands,
			alt,
			token: None,
		}
	}

	/// The bound command id; doubles as the node id.
	pub fn id(&self) -> &str {
		&self.action.command_id
	}

	pub fn action(&self) -> &MenuAction {
		&self.action
	}

	/// The alternate (modifier-triggered) node, when the action has one.
	pub fn alt_node(&self) -> Option<&ActionMenuNode> {
		self.alt.as_deref()
	}

	/// Display label: the action's override, else the command's label.
	pub fn label(&self) -> Result<String, MenuError> {
		if let Some(label) = &self.action.label {
			return Ok(label.clone());
		}
		match self.commands.get_command(self.id()) {
			Some(command) => Ok(command.label.unwrap_or_default()),
			None => Err(MenuError::UnknownCommand {
				id: self.id().to_string(),
			}),
		}
	}

	/// Icon class: the action's override, else the command's icon.
	pub fn icon(&self) -> Result<Option<String>, MenuError> {
		if let Some(icon) = &self.action.icon {
			return Ok(Some(icon.clone()));
		}
		match self.commands.get_command(self.id()) {
			Some(command) => Ok(command.icon_class),
			None => Err(MenuError::UnknownCommand {
				id: self.id().to_string(),
			}),
		}
	}

	/// Rendering condition carried over from the action.
	pub fn when(&self) -> Option<&str> {
		self.action.when.as_deref()
	}

	/// Sibling sort key: explicit order, else the resolved label, else
	/// the command id when no label resolves.
	pub fn sort_string(&self) -> Cow<'_, str> {
		if let Some(order) = &self.action.order {
			return Cow::Borrowed(order);
		}
		match self.label() {
			Ok(label) => Cow::Owned(label),
			Err(_) => Cow::Borrowed(self.id()),
		}
	}
}

impl fmt::Debug for ActionMenuNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActionMenuNode")
			.field("action", &self.action)
			.field("alt", &self.alt)
			.finish_non_exhaustive()
	}
}
