//! The document-side collaborator of the attribute decoders.
//!
//! Decoders never own style pools or item sets: they call back into a
//! [`DocumentContext`] to read nested item sets, find or create pools and
//! hand over the sub-objects (fields, number formats, text content) that
//! belong to the enclosing document. [`StarDocument`] is a small reference
//! implementation that keeps everything in memory.

use tracing::debug;

use super::attribute::item_set::{
    ItemPool, ItemSet, ItemSetArena, ItemSetId, PoolId, PoolKind, PoolStyle, Resolver,
};
use super::attribute::registry::AttributeRegistry;
use super::attribute::style::StyleTarget;
use super::zone::StarZone;
use crate::common::Result;

/// Services a document offers to the decoders working on its streams.
///
/// Item-set and pool handling must be provided. The other entry points
/// default to reporting "not implemented" and returning failure.
pub trait DocumentContext {
    /// Read an item set whose items must fall in `limits` (every identifier
    /// when empty) and must end before `last_pos`.
    fn read_item_set(
        &mut self,
        zone: &mut StarZone,
        limits: &[(u32, u32)],
        last_pos: usize,
        pool: Option<PoolId>,
    ) -> Option<ItemSetId>;

    fn item_set(&self, id: ItemSetId) -> Option<&ItemSet>;

    fn item_set_mut(&mut self, id: ItemSetId) -> Option<&mut ItemSet>;

    /// The pool used by item sets read without an explicit one.
    fn current_pool(&self) -> Option<PoolId>;

    fn find_pool(&self, kind: PoolKind) -> Option<PoolId>;

    fn new_pool(&mut self, kind: PoolKind) -> PoolId;

    fn pool(&self, id: PoolId) -> Option<&ItemPool>;

    /// Read the styles of `pool` at the current position.
    fn read_pool(&mut self, zone: &mut StarZone, pool: PoolId) -> bool;

    /// Persisted (indirect) data, such as an edit engine field.
    fn read_persist_data(&mut self, zone: &mut StarZone, _last_pos: usize) -> bool {
        not_implemented(zone, "persistData")
    }

    /// A writer format definition; `kind` is the record tag expected.
    fn read_format_def(&mut self, zone: &mut StarZone, kind: u8) -> bool {
        not_implemented(zone, &format!("formatDef[{}]", char::from(kind)))
    }

    fn read_number_format(&mut self, zone: &mut StarZone, _last_pos: usize) -> bool {
        not_implemented(zone, "numberFormat")
    }

    /// Writer text content (footnotes, headers, frames).
    fn read_sw_content(&mut self, zone: &mut StarZone) -> bool {
        not_implemented(zone, "swContent")
    }

    fn read_sw_image_map(&mut self, zone: &mut StarZone) -> bool {
        not_implemented(zone, "swImageMap")
    }

    /// A writer text field.
    fn read_field(&mut self, zone: &mut StarZone) -> bool {
        not_implemented(zone, "field")
    }
}

fn not_implemented(zone: &mut StarZone, what: &str) -> bool {
    debug!(what, "document entry point not implemented");
    let label = zone.label("StarDocument");
    zone.note(zone.tell(), format!("{label}#unimplemented[{what}],"));
    false
}

/// In-memory document holding the arena and the pools.
///
/// Item set layout: u16 count, then per item u16 which, u16 version,
/// u32 payload length and the payload. Pool layout: u16 style count, then per
/// style its name, its parent name (empty when none), u16 family and an item
/// set.
#[derive(Debug)]
pub struct StarDocument<'r> {
    registry: &'r AttributeRegistry,
    arena: ItemSetArena,
    pools: Vec<ItemPool>,
    current_pool: Option<PoolId>,
}

impl<'r> StarDocument<'r> {
    pub fn new(registry: &'r AttributeRegistry) -> Self {
        Self {
            registry,
            arena: ItemSetArena::new(),
            pools: Vec::new(),
            current_pool: None,
        }
    }

    pub fn registry(&self) -> &'r AttributeRegistry {
        self.registry
    }

    pub fn arena(&self) -> &ItemSetArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut ItemSetArena {
        &mut self.arena
    }

    pub fn set_current_pool(&mut self, pool: Option<PoolId>) {
        self.current_pool = pool;
    }

    /// Project set `id`, resolved against `pool`, onto `target`.
    pub fn resolve(
        &self,
        id: ItemSetId,
        pool: Option<PoolId>,
        target: &mut dyn StyleTarget,
    ) -> bool {
        let pool = pool.and_then(|p| self.pools.get(p.0));
        Resolver::new(&self.arena, pool).resolve(id, target)
    }

    /// Debug description of set `id`.
    pub fn describe(&self, id: ItemSetId) -> String {
        Resolver::new(&self.arena, None).describe(id)
    }

    fn read_items(
        &mut self,
        zone: &mut StarZone,
        limits: &[(u32, u32)],
        last_pos: usize,
    ) -> Option<ItemSetId> {
        let label = zone.label("StarItemSet");
        let pos = zone.tell();
        if pos + 2 > last_pos {
            zone.error(pos, format!("{label}the zone seems too short,"));
            return None;
        }
        let count = zone.input().read_u16().ok()?;
        let registry = self.registry;
        let mut set = ItemSet::new();
        for _ in 0..count {
            let item_pos = zone.tell();
            let header = if item_pos + 8 <= last_pos {
                read_item_header(zone).ok()
            } else {
                None
            };
            let Some((which, version, len)) = header else {
                zone.error(item_pos, format!("{label}can not read an item header,"));
                let _ = zone.input().seek(last_pos);
                return None;
            };
            let end = item_pos + 8 + len as usize;
            if end > last_pos {
                zone.error(item_pos, format!("{label}item {which} is too long,"));
                let _ = zone.input().seek(last_pos);
                return None;
            }
            let which = u32::from(which);
            let allowed = limits.is_empty()
                || limits
                    .iter()
                    .any(|&(first, last)| (first..=last).contains(&which));
            if !allowed {
                zone.note(item_pos, format!("{label}###which={which} outside the limits,"));
            } else if let Some(attribute) =
                registry.read_instance(zone, which, version, end, self)
            {
                set.insert(attribute);
            }
            if zone.input().seek(end).is_err() {
                return None;
            }
        }
        Some(self.arena.alloc(set))
    }
}

fn read_item_header(zone: &mut StarZone) -> Result<(u16, u16, u32)> {
    let input = zone.input();
    Ok((input.read_u16()?, input.read_u16()?, input.read_u32()?))
}

impl DocumentContext for StarDocument<'_> {
    fn read_item_set(
        &mut self,
        zone: &mut StarZone,
        limits: &[(u32, u32)],
        last_pos: usize,
        pool: Option<PoolId>,
    ) -> Option<ItemSetId> {
        if let Err(err) = zone.enter() {
            let label = zone.label("StarItemSet");
            zone.error(zone.tell(), format!("{label}{err},"));
            return None;
        }
        let previous = self.current_pool;
        if pool.is_some() {
            self.current_pool = pool;
        }
        let id = self.read_items(zone, limits, last_pos);
        self.current_pool = previous;
        zone.leave();
        id
    }

    fn item_set(&self, id: ItemSetId) -> Option<&ItemSet> {
        self.arena.get(id)
    }

    fn item_set_mut(&mut self, id: ItemSetId) -> Option<&mut ItemSet> {
        self.arena.get_mut(id)
    }

    fn current_pool(&self) -> Option<PoolId> {
        self.current_pool
    }

    fn find_pool(&self, kind: PoolKind) -> Option<PoolId> {
        self.pools.iter().position(|p| p.kind() == kind).map(PoolId)
    }

    fn new_pool(&mut self, kind: PoolKind) -> PoolId {
        self.pools.push(ItemPool::new(kind));
        PoolId(self.pools.len() - 1)
    }

    fn pool(&self, id: PoolId) -> Option<&ItemPool> {
        self.pools.get(id.0)
    }

    fn read_pool(&mut self, zone: &mut StarZone, pool: PoolId) -> bool {
        if pool.0 >= self.pools.len() {
            return false;
        }
        let label = zone.label("StarPool");
        let last_pos = zone.record_last_position();
        let Ok(count) = zone.input().read_u16() else {
            zone.error(zone.tell(), format!("{label}can not read the number of styles,"));
            return false;
        };
        for _ in 0..count {
            let pos = zone.tell();
            let header = (|| -> Result<(String, String, u16)> {
                Ok((zone.read_string()?, zone.read_string()?, zone.input().read_u16()?))
            })();
            let Ok((name, parent, family)) = header else {
                zone.error(pos, format!("{label}can not read a style,"));
                return false;
            };
            let Some(item_set) = self.read_item_set(zone, &[], last_pos, Some(pool)) else {
                zone.error(pos, format!("{label}can not read the item set of {name},"));
                return false;
            };
            zone.note(pos, format!("{label}style={name},family={family},"));
            self.pools[pool.0].add_style(PoolStyle {
                name,
                parent: (!parent.is_empty()).then_some(parent),
                family,
                item_set,
            });
        }
        true
    }
}
