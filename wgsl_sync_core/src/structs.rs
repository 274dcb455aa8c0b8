use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::NoExpand;
use regex::Regex;

use crate::SyncError;
use crate::SyncResult;

/// Matches `struct Name { ... }` up to the first closing brace. Bodies with
/// nested braces are cut short at the inner `}`.
static STRUCT_BLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"struct\s+(\w+)\s*\{[^}]*\}").expect("struct block pattern is valid")
});

/// A struct definition exactly as it appears in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructBlock {
	/// The identifier following the `struct` keyword.
	pub name: String,
	/// The full matched text, from `struct` through the first `}`.
	pub text: String,
}

/// The canonical struct definitions read from a single types file.
///
/// Names are unique. Inserting a block whose name already exists replaces the
/// stored text but keeps the position at which the name was first seen, so
/// iteration follows document order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalSet {
	blocks: Vec<StructBlock>,
	index: HashMap<String, usize>,
}

impl CanonicalSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a block, overwriting any existing block with the same name.
	pub fn insert(&mut self, block: StructBlock) {
		if let Some(&position) = self.index.get(&block.name) {
			self.blocks[position] = block;
		} else {
			self.index.insert(block.name.clone(), self.blocks.len());
			self.blocks.push(block);
		}
	}

	pub fn get(&self, name: &str) -> Option<&StructBlock> {
		self.index.get(name).map(|&position| &self.blocks[position])
	}

	pub fn contains(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.blocks.iter().map(|block| block.name.as_str())
	}

	pub fn iter(&self) -> std::slice::Iter<'_, StructBlock> {
		self.blocks.iter()
	}
}

impl<'a> IntoIterator for &'a CanonicalSet {
	type IntoIter = std::slice::Iter<'a, StructBlock>;
	type Item = &'a StructBlock;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Extract every `struct Name { ... }` block from `content`.
///
/// Returns an empty set when nothing matches. When a name appears more than
/// once the later block wins.
pub fn extract_structs(content: &str) -> CanonicalSet {
	let mut set = CanonicalSet::new();

	for captures in STRUCT_BLOCK_PATTERN.captures_iter(content) {
		let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
			continue;
		};

		set.insert(StructBlock {
			name: name.as_str().to_string(),
			text: whole.as_str().to_string(),
		});
	}

	set
}

/// Compiled matchers for a single struct name.
#[derive(Debug, Clone)]
pub struct StructPattern {
	name: String,
	opening: Regex,
	block: Regex,
}

impl StructPattern {
	pub fn new(name: &str) -> SyncResult<Self> {
		let escaped = regex::escape(name);
		let opening = Regex::new(&format!(r"struct\s+{escaped}\s*\{{"))
			.map_err(|e| SyncError::InvalidPattern(e.to_string()))?;
		let block = Regex::new(&format!(r"struct\s+{escaped}\s*\{{[^}}]*\}}"))
			.map_err(|e| SyncError::InvalidPattern(e.to_string()))?;

		Ok(Self {
			name: name.to_string(),
			opening,
			block,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Whether `content` declares this struct. Only the opening
	/// `struct Name {` is required.
	pub fn is_present(&self, content: &str) -> bool {
		self.opening.is_match(content)
	}

	/// Replace every block of this struct in `content` with `replacement`,
	/// inserted verbatim.
	pub fn replace_all<'t>(&self, content: &'t str, replacement: &str) -> Cow<'t, str> {
		self.block.replace_all(content, NoExpand(replacement))
	}
}

/// Whether `content` contains a declaration of the struct `name`.
pub fn contains_struct(content: &str, name: &str) -> SyncResult<bool> {
	Ok(StructPattern::new(name)?.is_present(content))
}

/// Replace every `struct <name> { ... }` block in `content` with
/// `definition`. Returns the input unchanged if the struct is absent.
pub fn replace_struct(content: &str, name: &str, definition: &str) -> SyncResult<String> {
	Ok(StructPattern::new(name)?
		.replace_all(content, definition)
		.into_owned())
}

/// Result of applying every canonical block to one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
	/// The rewritten text.
	pub content: String,
	/// Canonical struct names declared in the text, in canonical order.
	pub matched: Vec<String>,
}

/// Applies a whole [`CanonicalSet`] to target text, compiling each name's
/// pattern once.
#[derive(Debug, Clone)]
pub struct Synchronizer {
	entries: Vec<(StructPattern, StructBlock)>,
}

impl Synchronizer {
	pub fn new(canonical: &CanonicalSet) -> SyncResult<Self> {
		let entries = canonical
			.iter()
			.map(|block| StructPattern::new(&block.name).map(|pattern| (pattern, block.clone())))
			.collect::<SyncResult<Vec<_>>>()?;

		Ok(Self { entries })
	}

	/// Substitute each canonical block that `content` declares. Presence is
	/// checked against the text as rewritten so far.
	pub fn apply(&self, content: &str) -> Substitution {
		let mut current = content.to_string();
		let mut matched = Vec::new();

		for (pattern, block) in &self.entries {
			if !pattern.is_present(&current) {
				continue;
			}

			tracing::debug!(name = pattern.name(), "struct declared in target");
			current = pattern.replace_all(&current, &block.text).into_owned();
			matched.push(block.name.clone());
		}

		Substitution {
			content: current,
			matched,
		}
	}
}
