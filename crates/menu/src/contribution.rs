//! Menu contribution contract.

use crate::error::MenuError;
use crate::registry::MenuModelRegistry;

/// Startup contributor populating the menu tree.
///
/// Implementations are collected in a
/// [`ContributionProvider`](menura_core::ContributionProvider) and
/// invoked once, in provider order, by
/// [`MenuModelRegistry::on_start`]. Contribution order determines
/// first-registration order; visual order among siblings is still decided
/// by the sort keys, with ties kept in registration order.
pub trait MenuContribution {
	/// Registers this contributor's menu entries.
	fn register_menus(&self, registry: &MenuModelRegistry) -> Result<(), MenuError>;
}
