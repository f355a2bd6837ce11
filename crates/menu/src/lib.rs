//! Menu composition registry.
//!
//! A mutable tree of named, ordered nodes that independent contributors
//! populate at startup and a host UI reads back as nested menus (menu
//! bar, context menus, submenus). Contributors register paths and leaf
//! actions in arbitrary order; paths come into existence the first time
//! they are referenced; conflicting submenu registrations are detected
//! deterministically; siblings keep a stable, overridable order; and
//! every registration is revocable on its own through the returned
//! [`Disposable`](menura_core::Disposable).
//!
//! ```
//! use std::sync::Arc;
//!
//! use menura_command::{Command, CommandRegistry};
//! use menura_menu::{MenuAction, MenuModelRegistry};
//!
//! let commands = Arc::new(CommandRegistry::new());
//! let _new_file = commands.register_command(Command::new("file.new").with_label("New File"));
//!
//! let menus = MenuModelRegistry::new(commands);
//! menus.register_menu_action(&["menubar", "file"], MenuAction::new("file.new"))?;
//!
//! let file_menu = menus.get_menu(&["menubar", "file"])?;
//! assert_eq!(file_menu.children().len(), 1);
//! # Ok::<(), menura_menu::MenuError>(())
//! ```

mod contribution;
mod error;
mod node;
mod registry;

pub use contribution::MenuContribution;
pub use error::MenuError;
pub use node::{
	ActionMenuNode, CompositeMenuNode, MenuAction, MenuNode, NAVIGATION_GROUP, SubmenuOptions,
};
pub use registry::MenuModelRegistry;
