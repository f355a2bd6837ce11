//! Ordered contribution discovery.

/// Ordered collection of startup contributions.
///
/// Contributions are handed to a registry's startup hook in insertion
/// order; the provider never deduplicates or reorders. `T` is typically a
/// `dyn` contribution trait.
pub struct ContributionProvider<T: ?Sized> {
	contributions: Vec<Box<T>>,
}

impl<T: ?Sized> ContributionProvider<T> {
	/// Creates an empty provider.
	pub fn new() -> Self {
		Self {
			contributions: Vec::new(),
		}
	}

	/// Appends a contribution.
	pub fn push(&mut self, contribution: Box<T>) {
		self.contributions.push(contribution);
	}

	/// Appends every contribution from `iter`.
	pub fn extend(&mut self, iter: impl IntoIterator<Item = Box<T>>) {
		self.contributions.extend(iter);
	}

	/// All contributions, in registration order.
	pub fn get_contributions(&self) -> &[Box<T>] {
		&self.contributions
	}

	pub fn len(&self) -> usize {
		self.contributions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contributions.is_empty()
	}
}

impl<T: ?Sized> Default for ContributionProvider<T> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	trait Named {
		fn name(&self) -> &str;
	}

	struct Fixed(&'static str);

	impl Named for Fixed {
		fn name(&self) -> &str {
			self.0
		}
	}

	#[test]
	fn contributions_keep_insertion_order() {
		let mut provider: ContributionProvider<dyn Named> = ContributionProvider::new();
		provider.push(Box::new(Fixed("first")));
		provider.extend([
			Box::new(Fixed("second")) as Box<dyn Named>,
			Box::new(Fixed("third")),
		]);

		let names: Vec<_> = provider
			.get_contributions()
			.iter()
			.map(|c| c.name())
			.collect();
		assert_eq!(names, ["first", "second", "third"]);
		assert_eq!(provider.len(), 3);
		assert!(!provider.is_empty());
	}
}
