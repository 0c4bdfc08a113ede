//! Item sets, style pools and cycle-safe resolution.
//!
//! Item sets live in an [`ItemSetArena`] and refer to each other by
//! [`ItemSetId`]. A set may name a pool style; resolving it overlays the
//! style chain beneath the local items before projecting everything onto a
//! [`StyleTarget`]. Set-valued attributes recurse into their nested set with
//! the same visited guard, so self-referencing sets terminate.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

use fixedbitset::FixedBitSet;
use tracing::{debug, warn};

use super::style::StyleTarget;
use super::types::{Attribute, AttributeValue};

/// Index of an item set inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemSetId(usize);

impl ItemSetId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Reference from an item set to the pool style it inherits from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRef {
    pub name: String,
    pub family: u16,
}

/// Attributes keyed by identifier, plus an optional parent style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSet {
    items: BTreeMap<u32, Attribute>,
    style: Option<StyleRef>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `attribute`, returning the one it replaces.
    pub fn insert(&mut self, attribute: Attribute) -> Option<Attribute> {
        self.items.insert(attribute.identifier(), attribute)
    }

    pub fn get(&self, which: u32) -> Option<&Attribute> {
        self.items.get(&which)
    }

    pub fn get_mut(&mut self, which: u32) -> Option<&mut Attribute> {
        self.items.get_mut(&which)
    }

    pub fn remove(&mut self, which: u32) -> Option<Attribute> {
        self.items.remove(&which)
    }

    pub fn contains(&self, which: u32) -> bool {
        self.items.contains_key(&which)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.items.values()
    }

    pub fn style(&self) -> Option<&StyleRef> {
        self.style.as_ref()
    }

    pub fn set_style(&mut self, style: Option<StyleRef>) {
        self.style = style;
    }
}

/// Owner of every item set read from one document.
#[derive(Debug, Default)]
pub struct ItemSetArena {
    sets: Vec<ItemSet>,
}

impl ItemSetArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, set: ItemSet) -> ItemSetId {
        self.sets.push(set);
        ItemSetId(self.sets.len() - 1)
    }

    pub fn get(&self, id: ItemSetId) -> Option<&ItemSet> {
        self.sets.get(id.0)
    }

    pub fn get_mut(&mut self, id: ItemSetId) -> Option<&mut ItemSet> {
        self.sets.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Index of a pool inside its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(pub(crate) usize);

/// The application a pool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Writer,
    EditEngine,
    Draw,
    Chart,
    Spreadsheet,
    Unknown,
}

/// A named style of a pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolStyle {
    pub name: String,
    pub parent: Option<String>,
    pub family: u16,
    pub item_set: ItemSetId,
}

/// Named styles sharing one attribute table.
#[derive(Debug, Clone)]
pub struct ItemPool {
    kind: PoolKind,
    styles: Vec<PoolStyle>,
}

impl ItemPool {
    pub fn new(kind: PoolKind) -> Self {
        Self {
            kind,
            styles: Vec::new(),
        }
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    /// Add `style`; a style with the same name and family is replaced.
    pub fn add_style(&mut self, style: PoolStyle) {
        match self
            .styles
            .iter_mut()
            .find(|s| s.name == style.name && s.family == style.family)
        {
            Some(slot) => *slot = style,
            None => self.styles.push(style),
        }
    }

    /// Find a style by name; a `family` of 0 matches any family.
    pub fn find_style(&self, name: &str, family: u16) -> Option<&PoolStyle> {
        self.styles
            .iter()
            .find(|s| s.name == name && (family == 0 || s.family == family))
    }

    pub fn styles(&self) -> &[PoolStyle] {
        &self.styles
    }

    /// Merge `set` with the attributes of its style chain.
    ///
    /// Nearer styles override farther ones and the local items override all
    /// of them. A style name met twice ends the walk.
    pub fn update_using_styles(&self, set: &ItemSet, arena: &ItemSetArena) -> ItemSet {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut next = set.style().map(|s| (s.name.clone(), s.family));
        while let Some((name, family)) = next.take() {
            let Some(style) = self.find_style(&name, family) else {
                debug!(style = %name, "ItemPool: can not find a style");
                break;
            };
            if !seen.insert(style.name.clone()) {
                warn!(style = %name, "ItemPool: find a loop in the style chain");
                break;
            }
            chain.push(style.item_set);
            next = style
                .parent
                .as_ref()
                .filter(|parent| !parent.is_empty())
                .map(|parent| (parent.clone(), style.family));
        }

        let mut merged = ItemSet {
            items: BTreeMap::new(),
            style: set.style.clone(),
        };
        for id in chain.iter().rev() {
            let Some(inherited) = arena.get(*id) else {
                continue;
            };
            for attribute in inherited.iter() {
                merged.insert(attribute.clone());
            }
        }
        for attribute in set.iter() {
            merged.insert(attribute.clone());
        }
        merged
    }
}

/// One resolution pass over the item sets of an arena.
///
/// The visited guard lives as long as the resolver, so a set reached twice
/// (through a cycle or through two references) is projected only once.
#[derive(Debug)]
pub struct Resolver<'a> {
    arena: &'a ItemSetArena,
    pool: Option<&'a ItemPool>,
    visited: FixedBitSet,
    visits: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(arena: &'a ItemSetArena, pool: Option<&'a ItemPool>) -> Self {
        Self {
            arena,
            pool,
            visited: FixedBitSet::with_capacity(arena.len()),
            visits: 0,
        }
    }

    /// Number of sets entered so far.
    pub fn visits(&self) -> usize {
        self.visits
    }

    pub fn is_visited(&self, id: ItemSetId) -> bool {
        self.visited.contains(id.0)
    }

    /// Mark `id`; false when it was already marked.
    fn mark(&mut self, id: ItemSetId) -> bool {
        if id.0 >= self.visited.len() {
            self.visited.grow(id.0 + 1);
        }
        !self.visited.put(id.0)
    }

    /// Project set `id` and everything nested in it onto `target`.
    ///
    /// Returns false when the set is unknown or was already visited.
    pub fn resolve(&mut self, id: ItemSetId, target: &mut dyn StyleTarget) -> bool {
        let arena = self.arena;
        let Some(set) = arena.get(id) else {
            warn!(set = id.0, "Resolver: unknown item set");
            return false;
        };
        if !self.mark(id) {
            debug!(set = id.0, "Resolver: find a cycle");
            return false;
        }
        self.visits += 1;

        let merged;
        let items = match (self.pool, set.style()) {
            (Some(pool), Some(_)) => {
                merged = pool.update_using_styles(set, arena);
                &merged
            },
            _ => set,
        };
        for attribute in items.iter() {
            match attribute.value() {
                AttributeValue::ItemSet(Some(child)) => {
                    self.resolve(*child, target);
                },
                _ => {
                    attribute.project_onto(target);
                },
            }
        }
        true
    }

    /// Debug description of set `id`, nested sets inline.
    pub fn describe(&mut self, id: ItemSetId) -> String {
        let mut out = String::new();
        self.describe_into(id, &mut out);
        out
    }

    fn describe_into(&mut self, id: ItemSetId, out: &mut String) {
        let arena = self.arena;
        let Some(set) = arena.get(id) else {
            out.push_str("###unknownSet,");
            return;
        };
        if !self.mark(id) {
            out.push_str("###cycle,");
            return;
        }
        self.visits += 1;
        if let Some(style) = set.style() {
            let _ = write!(out, "style={},", style.name);
        }
        for attribute in set.iter() {
            match attribute.value() {
                AttributeValue::ItemSet(Some(child)) if self.is_visited(*child) => {
                    let _ = write!(out, "###cycle[{}],", attribute.name());
                },
                AttributeValue::ItemSet(Some(child)) => {
                    let _ = write!(out, "{}[", attribute.name());
                    self.describe_into(*child, out);
                    out.push_str("],");
                },
                _ => {
                    let _ = write!(out, "{attribute},");
                },
            }
        }
    }
}
