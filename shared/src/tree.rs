//! Category tree builder
//!
//! Turns the flat, parent-referencing category list returned by the API
//! into an ordered forest for navigation. The tree is a derived view: it is
//! rebuilt from the category list on every read and never edited in place.
//!
//! Malformed parent links never fail the build:
//! - missing parent, self-reference -> the category becomes a root
//! - longer cycles (A -> B -> A) -> broken at the member with the smallest id,
//!   which becomes a root
//!
//! Every input category appears exactly once in the output.
//!
//! Parent chains can be arbitrarily deep, so building, walking, comparing
//! and dropping never recurse per level. `Clone`, `Debug` and `Serialize`
//! are derived and do recurse.

use icu_collator::{Collator, CollatorOptions, Strength};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::Category;

/// A category with its ordered children
#[derive(Debug, Clone, Eq, Serialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    /// Stable display key (the category id as a string)
    pub key: String,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn id(&self) -> i64 {
        self.category.id
    }

    pub fn name(&self) -> &str {
        &self.category.name
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order search of this subtree
    pub fn find(&self, id: i64) -> Option<&CategoryNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id() == id {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Pre-order walk of this subtree; `depth` is 0 for `self`
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&CategoryNode, usize),
    {
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            f(node, depth);
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }
}

impl PartialEq for CategoryNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.category != b.category || a.key != b.key || a.children.len() != b.children.len() {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Drop for CategoryNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Total number of nodes in a forest
pub fn count_nodes(forest: &[CategoryNode]) -> usize {
    let mut stack: Vec<&CategoryNode> = forest.iter().collect();
    let mut count = 0;
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children.iter());
    }
    count
}

/// Find a node anywhere in a forest
pub fn find_node(forest: &[CategoryNode], id: i64) -> Option<&CategoryNode> {
    forest.iter().find_map(|node| node.find(id))
}

/// Build the category forest from a flat list.
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let count = categories.len();

    // id -> index; later duplicates win, like a map insert
    let index: HashMap<i64, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| (category.id, i))
        .collect();

    let mut parent: Vec<Option<usize>> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            category
                .effective_parent_id()
                .and_then(|id| index.get(&id).copied())
                .filter(|&p| p != i)
        })
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut roots: Vec<usize> = Vec::new();
    for (i, p) in parent.iter().enumerate() {
        match p {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }

    let mut reached = vec![false; count];
    for &root in &roots {
        mark_reachable(root, &children, &mut reached);
    }

    // Whatever is still unreached sits on (or hangs below) a parent cycle
    let mut unreached: Vec<usize> = (0..count).filter(|&i| !reached[i]).collect();
    unreached.sort_by_key(|&i| (categories[i].id, i));
    for start in unreached {
        if reached[start] {
            continue;
        }
        let cycle = find_cycle(start, &parent);
        let Some(&breaker) = cycle.iter().min_by_key(|&&i| (categories[i].id, i)) else {
            continue;
        };
        if let Some(p) = parent[breaker].take() {
            children[p].retain(|&c| c != breaker);
        }
        roots.push(breaker);
        mark_reachable(breaker, &children, &mut reached);
    }

    // Order siblings on the index arena, then assemble
    let collator = name_collator();
    let order = |a: &usize, b: &usize| compare_names(collator.as_ref(), &categories[*a], &categories[*b]);
    roots.sort_by(order);
    for siblings in &mut children {
        siblings.sort_by(order);
    }

    assemble(categories, &roots, children)
}

fn mark_reachable(start: usize, children: &[Vec<usize>], reached: &mut [bool]) {
    let mut stack = vec![start];
    while let Some(i) = stack.pop() {
        if reached[i] {
            continue;
        }
        reached[i] = true;
        stack.extend(children[i].iter().copied());
    }
}

/// Follow parent links from an unreachable node until a node repeats.
/// Unreachable nodes always have a parent, so the walk ends on a cycle.
fn find_cycle(start: usize, parent: &[Option<usize>]) -> Vec<usize> {
    let mut path: Vec<usize> = Vec::new();
    let mut position: HashMap<usize, usize> = HashMap::new();
    let mut current = Some(start);

    while let Some(i) = current {
        if let Some(&at) = position.get(&i) {
            return path.split_off(at);
        }
        position.insert(i, path.len());
        path.push(i);
        current = parent[i];
    }

    // Reached a root after all; treat the start as its own cycle
    vec![start]
}

/// Build nodes bottom-up: a node is created once all its children exist
fn assemble(categories: &[Category], roots: &[usize], children: Vec<Vec<usize>>) -> Vec<CategoryNode> {
    let mut built: Vec<Option<CategoryNode>> = (0..categories.len()).map(|_| None).collect();

    for &root in roots {
        let mut stack = vec![(root, false)];
        while let Some((i, expanded)) = stack.pop() {
            if expanded {
                let category = categories[i].clone();
                let node = CategoryNode {
                    key: category.id.to_string(),
                    category,
                    children: children[i].iter().filter_map(|&c| built[c].take()).collect(),
                };
                built[i] = Some(node);
            } else {
                stack.push((i, true));
                stack.extend(children[i].iter().map(|&c| (c, false)));
            }
        }
    }

    roots.iter().filter_map(|&root| built[root].take()).collect()
}

/// Root-locale collator that ignores case but not accents
fn name_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    Collator::try_new(&Default::default(), options).ok()
}

/// Collated name, then exact name, then id
fn compare_names(collator: Option<&Collator>, a: &Category, b: &Category) -> Ordering {
    let folded = match collator {
        Some(collator) => collator.compare(&a.name, &b.name),
        None => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    };
    folded
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
