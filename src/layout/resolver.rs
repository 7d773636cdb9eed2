//! Parent-chain resolution for attachment offsets.
//!
//! Each attachment is offset from its parent: the primary body by default,
//! or the attachment named by `attached_to`. Resolving a layer walks up
//! that chain, summing offsets, with a visited map so that cyclic
//! references terminate.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::LayerCollection;

use super::Position;

/// Identifies a layer within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerRef {
    Primary,
    /// 1-based slot among the surviving attachments.
    Attachment(usize),
}

/// What a layer's parent chain ended on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Anchor {
    /// The layer is the primary body itself.
    Origin,
    /// The chain reached an attachment with no parent.
    Primary,
    /// The chain hit a reference to a slot that does not exist.
    Dangling { slot: usize },
    /// The chain entered a reference cycle. Members are listed in the order
    /// they were reached; the first one is where the chain stopped.
    Cycle { members: Vec<usize> },
}

/// Resolved position of one layer, with the chain that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Offset from the primary's anchor point.
    pub position: Position,
    /// Slots whose offsets were summed, starting with the layer itself.
    pub chain: Vec<usize>,
    pub anchor: Anchor,
}

impl Resolution {
    fn origin() -> Self {
        Self {
            position: Position::ORIGIN,
            chain: Vec::new(),
            anchor: Anchor::Origin,
        }
    }
}

/// Resolved positions for every layer of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLayout {
    pub primary: Resolution,
    /// One entry per attachment, in collection order.
    pub attachments: Vec<Resolution>,
}

impl ResolvedLayout {
    /// Resolution of a layer, if it exists.
    pub fn get(&self, layer: LayerRef) -> Option<&Resolution> {
        match layer {
            LayerRef::Primary => Some(&self.primary),
            LayerRef::Attachment(slot) => slot.checked_sub(1).and_then(|i| self.attachments.get(i)),
        }
    }

    /// Positions of every layer, primary first.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.primary.position).chain(self.attachments.iter().map(|r| r.position))
    }
}

/// Resolve a single layer.
///
/// The primary always sits at the origin. Returns `None` for a slot outside
/// the collection.
pub fn resolve(collection: &LayerCollection, layer: LayerRef) -> Option<Resolution> {
    let slot = match layer {
        LayerRef::Primary => return Some(Resolution::origin()),
        LayerRef::Attachment(slot) => slot,
    };
    collection.attachment(slot)?;

    let mut chain: Vec<usize> = Vec::new();
    let mut visited: HashMap<usize, usize> = HashMap::new();
    let mut current = slot;

    let anchor = loop {
        if let Some(&at) = visited.get(&current) {
            let members = chain[at..].to_vec();
            chain.truncate(at + 1);
            break Anchor::Cycle { members };
        }

        let Some(attrs) = collection.attachment(current) else {
            break Anchor::Dangling { slot: current };
        };
        visited.insert(current, chain.len());
        chain.push(current);

        match attrs.attached_to {
            None => break Anchor::Primary,
            Some(parent) if collection.attachment(parent).is_none() => {
                break Anchor::Dangling { slot: parent };
            }
            Some(parent) => current = parent,
        }
    };

    let position = chain
        .iter()
        .filter_map(|&s| collection.attachment(s))
        .fold(Position::ORIGIN, |acc, a| acc + Position::new(a.x, a.y));

    Some(Resolution {
        position,
        chain,
        anchor,
    })
}

/// Resolve a layer's position only.
pub fn resolve_position(collection: &LayerCollection, layer: LayerRef) -> Option<Position> {
    resolve(collection, layer).map(|r| r.position)
}

/// Resolve every layer of a collection.
pub fn resolve_layout(collection: &LayerCollection) -> ResolvedLayout {
    let attachments = (1..=collection.attachments().len())
        .filter_map(|slot| resolve(collection, LayerRef::Attachment(slot)))
        .collect();

    ResolvedLayout {
        primary: Resolution::origin(),
        attachments,
    }
}
