//! Breadth-first structural search shared by the Lens and Prism synthesizers.
//!
//! Levels are explored one at a time. Within a level, candidates are visited
//! in the order their parents were discovered and, below a parent, in
//! declaration order, so the result depends only on declared order.
//!
//! The search works on types, not paths. A type is expanded once, at the
//! first level it is reached on. Paths that reach the same type on the same
//! level are merged into one node that counts them, so a shape that fans out
//! into the same types over and over costs no more than the number of
//! distinct types it contains.

use std::collections::{HashMap, HashSet};

use smallvec::{SmallVec, smallvec};
use tracing::trace;

use super::error::OpticPath;
use crate::shape::TypeKey;

/// Ambiguity reports list at most this many conflicting paths.
pub const MAX_REPORTED_PATHS: usize = 8;

/// A path of steps from the outer type, outermost first.
pub type Path<E> = SmallVec<[E; 4]>;

/// One structural step: a record field or a union variant.
pub trait Edge: Copy {
    fn name(&self) -> &'static str;

    /// The type this step leads to.
    fn type_key(&self) -> TypeKey;

    /// Steps available below this one, when the type it leads to has the
    /// same kind of structure as the one being searched.
    fn descend(&self) -> Option<Vec<Self>>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum SearchFailure {
    Ambiguous { depth: usize, paths: Vec<OpticPath> },
    NotFound { depth: usize },
}

/// One type reached on the current level.
struct Node<E> {
    /// How many distinct paths reach the type on this level.
    count: usize,
    /// The first of those paths, in discovery order.
    witnesses: SmallVec<[Path<E>; 2]>,
    edges: Vec<E>,
}

/// Finds the unique shallowest path from `root` to `target`.
///
/// A type already reached on an earlier level is never expanded again,
/// which keeps self-referential shapes finite. Such a type can only lead to
/// matches deeper than the ones its first expansion already found.
pub fn breadth_first<E: Edge>(
    root: TypeKey,
    edges: Vec<E>,
    target: TypeKey,
    max_depth: usize,
) -> Result<Path<E>, SearchFailure> {
    let mut searched = HashSet::from([root]);
    let mut frontier = vec![Node {
        count: 1,
        witnesses: smallvec![Path::new()],
        edges,
    }];
    let mut depth = 0;

    loop {
        let mut count = 0_usize;
        let mut matches: Vec<Path<E>> = Vec::new();
        for node in &frontier {
            for edge in node.edges.iter().filter(|edge| edge.type_key() == target) {
                count = count.saturating_add(node.count);
                extend_witnesses(&mut matches, &node.witnesses, *edge);
            }
        }
        trace!(
            depth,
            types = frontier.len(),
            matches = count,
            "searched level"
        );

        if count > 1 {
            return Err(SearchFailure::Ambiguous {
                depth,
                paths: matches.iter().map(|path| path_names(path)).collect(),
            });
        }
        if let Some(path) = matches.pop() {
            return Ok(path);
        }

        if depth >= max_depth {
            return Err(SearchFailure::NotFound { depth });
        }
        let next = expand(frontier, &mut searched);
        if next.is_empty() {
            return Err(SearchFailure::NotFound { depth });
        }
        frontier = next;
        depth += 1;
    }
}

fn expand<E: Edge>(frontier: Vec<Node<E>>, searched: &mut HashSet<TypeKey>) -> Vec<Node<E>> {
    let mut next: Vec<Node<E>> = Vec::new();
    let mut slots: HashMap<TypeKey, usize> = HashMap::new();
    for node in frontier {
        for edge in &node.edges {
            let key = edge.type_key();
            if searched.contains(&key) {
                trace!(%key, step = edge.name(), "already searched");
                continue;
            }
            let slot = if let Some(&slot) = slots.get(&key) {
                slot
            } else {
                let Some(children) = edge.descend() else {
                    searched.insert(key);
                    continue;
                };
                next.push(Node {
                    count: 0,
                    witnesses: SmallVec::new(),
                    edges: children,
                });
                slots.insert(key, next.len() - 1);
                next.len() - 1
            };
            let child = &mut next[slot];
            child.count = child.count.saturating_add(node.count);
            extend_witnesses(&mut child.witnesses, &node.witnesses, *edge);
        }
    }
    searched.extend(slots.into_keys());
    next
}

/// Appends `edge` to each parent path, keeping at most
/// [`MAX_REPORTED_PATHS`] paths overall.
fn extend_witnesses<E: Edge, C>(into: &mut C, parents: &[Path<E>], edge: E)
where
    C: Extend<Path<E>> + AsRef<[Path<E>]>,
{
    let room = MAX_REPORTED_PATHS.saturating_sub(into.as_ref().len());
    into.extend(parents.iter().take(room).map(|parent| {
        let mut path = parent.clone();
        path.push(edge);
        path
    }));
}

pub fn path_names<E: Edge>(path: &[E]) -> OpticPath {
    OpticPath::new(path.iter().map(Edge::name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Root;
    struct Left;
    struct Right;
    struct Leaf;
    struct Looping;

    #[derive(Clone, Copy, Debug)]
    struct TestEdge {
        name: &'static str,
        key: fn() -> TypeKey,
        children: fn() -> Option<Vec<TestEdge>>,
    }

    impl Edge for TestEdge {
        fn name(&self) -> &'static str {
            self.name
        }

        fn type_key(&self) -> TypeKey {
            (self.key)()
        }

        fn descend(&self) -> Option<Vec<Self>> {
            (self.children)()
        }
    }

    fn leaf(name: &'static str) -> TestEdge {
        TestEdge {
            name,
            key: TypeKey::of::<Leaf>,
            children: || None,
        }
    }

    fn left_children() -> Option<Vec<TestEdge>> {
        Some(vec![leaf("value")])
    }

    fn looping_children() -> Option<Vec<TestEdge>> {
        Some(vec![TestEdge {
            name: "again",
            key: TypeKey::of::<Looping>,
            children: looping_children,
        }])
    }

    fn names(path: &Path<TestEdge>) -> Vec<&'static str> {
        path.iter().map(|edge| edge.name).collect()
    }

    #[test]
    fn test_direct_match_at_depth_zero() {
        let edges = vec![leaf("value")];
        let path = breadth_first(TypeKey::of::<Root>(), edges, TypeKey::of::<Leaf>(), 4).unwrap();
        assert_eq!(names(&path), vec!["value"]);
    }

    #[test]
    fn test_nested_match_records_full_path() {
        let edges = vec![TestEdge {
            name: "left",
            key: TypeKey::of::<Left>,
            children: left_children,
        }];
        let path = breadth_first(TypeKey::of::<Root>(), edges, TypeKey::of::<Leaf>(), 4).unwrap();
        assert_eq!(names(&path), vec!["left", "value"]);
    }

    #[test]
    fn test_two_matches_on_one_level_are_ambiguous() {
        let edges = vec![
            TestEdge {
                name: "left",
                key: TypeKey::of::<Left>,
                children: left_children,
            },
            TestEdge {
                name: "right",
                key: TypeKey::of::<Right>,
                children: left_children,
            },
        ];
        let failure =
            breadth_first(TypeKey::of::<Root>(), edges, TypeKey::of::<Leaf>(), 4).unwrap_err();
        assert_eq!(
            failure,
            SearchFailure::Ambiguous {
                depth: 1,
                paths: vec![
                    OpticPath::new(vec!["left", "value"]),
                    OpticPath::new(vec!["right", "value"]),
                ],
            }
        );
    }

    #[test]
    fn test_cycle_terminates_with_not_found() {
        let failure = breadth_first(
            TypeKey::of::<Root>(),
            looping_children().unwrap(),
            TypeKey::of::<Leaf>(),
            64,
        )
        .unwrap_err();
        assert_eq!(failure, SearchFailure::NotFound { depth: 1 });
    }

    #[test]
    fn test_depth_bound_stops_search() {
        let edges = vec![TestEdge {
            name: "left",
            key: TypeKey::of::<Left>,
            children: left_children,
        }];
        let failure =
            breadth_first(TypeKey::of::<Root>(), edges, TypeKey::of::<Leaf>(), 0).unwrap_err();
        assert_eq!(failure, SearchFailure::NotFound { depth: 0 });
    }

    fn both_lefts() -> Vec<TestEdge> {
        ["first", "second"]
            .into_iter()
            .map(|name| TestEdge {
                name,
                key: TypeKey::of::<Left>,
                children: left_children,
            })
            .collect()
    }

    #[test]
    fn test_paths_merged_into_one_type_still_count_separately() {
        let failure = breadth_first(
            TypeKey::of::<Root>(),
            both_lefts(),
            TypeKey::of::<Leaf>(),
            4,
        )
        .unwrap_err();
        assert_eq!(
            failure,
            SearchFailure::Ambiguous {
                depth: 1,
                paths: vec![
                    OpticPath::new(vec!["first", "value"]),
                    OpticPath::new(vec!["second", "value"]),
                ],
            }
        );
    }

    #[test]
    fn test_reported_paths_are_capped() {
        let edges: Vec<TestEdge> = (0..MAX_REPORTED_PATHS + 3).map(|_| leaf("value")).collect();
        let Err(SearchFailure::Ambiguous { depth, paths }) =
            breadth_first(TypeKey::of::<Root>(), edges, TypeKey::of::<Leaf>(), 4)
        else {
            panic!("expected ambiguity");
        };
        assert_eq!(depth, 0);
        assert_eq!(paths.len(), MAX_REPORTED_PATHS);
    }
}
