/*
 * Access Paths
 *
 * A chain of member names read from the copy parameter, rooted implicitly
 * at the parameter. The last component may be the ALL_ITEMS sentinel
 * (element iteration). A bare sentinel means the parameter itself was
 * iterated.
 */

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Rendered name of the element-iteration sentinel
pub const ALL_ITEMS: &str = "ALL_ITEMS";

/// One component of an access path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    Member(String),
    AllItems,
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Member(name) => f.write_str(name),
            PathSegment::AllItems => f.write_str(ALL_ITEMS),
        }
    }
}

/// Dot-separated member path rooted at the parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AccessPath {
    segments: Vec<PathSegment>,
}

impl AccessPath {
    /// The parameter itself (no components)
    pub fn root() -> Self {
        Self::default()
    }

    /// The bare sentinel: the parameter itself was iterated
    pub fn global_all_items() -> Self {
        Self {
            segments: vec![PathSegment::AllItems],
        }
    }

    /// Build from member names, e.g. `["I", "X"]`
    pub fn from_members<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: names
                .into_iter()
                .map(|name| PathSegment::Member(name.into()))
                .collect(),
        }
    }

    /// Parse a rendered path (`"Items.ALL_ITEMS"`)
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::root();
        }
        Self {
            segments: text
                .split('.')
                .map(|part| {
                    if part == ALL_ITEMS {
                        PathSegment::AllItems
                    } else {
                        PathSegment::Member(part.to_string())
                    }
                })
                .collect(),
        }
    }

    /// This path extended by one member
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Member(name.into()));
        Self { segments }
    }

    /// This path suffixed with the sentinel
    pub fn all_items(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::AllItems);
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn ends_with_all_items(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::AllItems))
    }

    pub fn is_global_all_items(&self) -> bool {
        self.segments == [PathSegment::AllItems]
    }
}

impl std::fmt::Display for AccessPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Set of paths observed in one procedure body
///
/// Monotone: paths are only ever added; duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPathSet {
    paths: FxHashSet<AccessPath>,
}

impl AccessPathSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: AccessPath) -> bool {
        self.paths.insert(path)
    }

    pub fn contains(&self, path: &AccessPath) -> bool {
        self.paths.contains(path)
    }

    /// Whether the parameter itself was iterated
    pub fn has_global_all_items(&self) -> bool {
        self.paths.contains(&AccessPath::global_all_items())
    }

    pub fn remove(&mut self, path: &AccessPath) -> bool {
        self.paths.remove(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccessPath> {
        self.paths.iter()
    }

    /// Rendered paths, sorted (for logs and assertions)
    pub fn to_sorted_strings(&self) -> Vec<String> {
        let mut rendered: Vec<String> = self.paths.iter().map(|p| p.to_string()).collect();
        rendered.sort();
        rendered
    }
}

impl FromIterator<AccessPath> for AccessPathSet {
    fn from_iter<I: IntoIterator<Item = AccessPath>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl Extend<AccessPath> for AccessPathSet {
    fn extend<I: IntoIterator<Item = AccessPath>>(&mut self, iter: I) {
        self.paths.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paths() {
        let path = AccessPath::from_members(["I", "Y"]);
        assert_eq!(path.to_string(), "I.Y");
        assert_eq!(path.all_items().to_string(), "I.Y.ALL_ITEMS");
        assert_eq!(AccessPath::global_all_items().to_string(), "ALL_ITEMS");
        assert_eq!(AccessPath::root().to_string(), "");
    }

    #[test]
    fn test_parse_matches_builders() {
        assert_eq!(
            AccessPath::parse("Items.ALL_ITEMS"),
            AccessPath::from_members(["Items"]).all_items()
        );
        assert!(AccessPath::parse("ALL_ITEMS").is_global_all_items());
        assert!(AccessPath::parse("").is_root());
    }

    #[test]
    fn test_sentinel_is_not_a_member_named_all_items() {
        let sentinel = AccessPath::root().all_items();
        let member = AccessPath::root().child("Items");
        assert_ne!(sentinel, member);
        assert!(sentinel.ends_with_all_items());
        assert!(!member.ends_with_all_items());
    }

    #[test]
    fn test_set_collapses_duplicates() {
        let mut set = AccessPathSet::new();
        assert!(set.insert(AccessPath::parse("A")));
        assert!(!set.insert(AccessPath::parse("A")));
        set.insert(AccessPath::global_all_items());
        assert_eq!(set.len(), 2);
        assert!(set.has_global_all_items());
        assert_eq!(set.to_sorted_strings(), vec!["A", "ALL_ITEMS"]);
    }
}
