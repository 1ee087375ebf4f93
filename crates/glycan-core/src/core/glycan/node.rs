use super::connectivity::{
    distance_to_root, find_mainchain_child, has_exocyclic_linkage, linkage_position,
    position_in_tree, saccharide, tree_parent,
};
use super::error::GlycanError;
use crate::core::models::conformation::Conformation;
use crate::core::models::ids::ResidueId;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One resolved parent-to-child edge of a glycan tree.
///
/// `upstream_slot` is the slot index on the parent residue; `downstream_slot`
/// is the child's own slot index for the same bond. The two sides of a bond
/// number their slots independently, so the indices need not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub upstream_slot: usize,
    pub child: ResidueId,
    pub downstream_slot: usize,
}

/// Per-residue record of one node within a glycan tree.
///
/// A node holds the residue's identity, its adjacency (parent, children and
/// the resolved connections behind them) and a handful of derived scalars:
/// its breadth-first ordinal in the tree, its hop count to the root, and how
/// it is linked to its parent. All fields are populated once by
/// [`build`](GlycanNode::build) against a conformation snapshot and are never
/// recomputed behind the caller's back — after a structural edit the owner
/// must [`rebuild`](GlycanNode::rebuild) affected nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlycanNode {
    residue: ResidueId,
    tree_root: ResidueId,
    parent: Option<ResidueId>,
    children: Vec<ResidueId>,
    connections: Vec<Connection>,
    tree_position: usize,
    distance_to_root: usize,
    exocyclic_linkage: bool,
    linkage_position: usize,
    mainchain_child: Option<ResidueId>,
}

impl GlycanNode {
    /// Derives the node record for `residue` within the tree rooted at
    /// `tree_root`.
    ///
    /// This is a pure read of the conformation: one pass over the residue's
    /// connection slots classifies each neighbor as parent, child or
    /// irrelevant, then the derived scalars are computed by the free
    /// algorithms in [`connectivity`](super::connectivity).
    ///
    /// A child is recorded only if the neighbor is occupied, is not the
    /// parent, and is itself a saccharide; a protein attachment point is
    /// silently excluded. For each child the downstream slot index defaults
    /// to the upstream index, corrected to the reciprocal index the
    /// connection record reports when the two residues number their slots
    /// differently.
    ///
    /// # Errors
    ///
    /// `InvalidResidue`/`NotASaccharide` if `residue`, `tree_root` or a
    /// reported parent does not resolve to a saccharide in the conformation;
    /// `NotInTree` if `residue` is unreachable from `tree_root`;
    /// `CyclicTopology` if parent links do not terminate. On error no node is
    /// returned at all.
    pub fn build(
        conf: &Conformation,
        tree_root: ResidueId,
        residue: ResidueId,
    ) -> Result<Self, GlycanError> {
        let this = saccharide(conf, residue)?;
        saccharide(conf, tree_root)?;

        let parent = tree_parent(conf, this)?;

        let mut children = Vec::new();
        let mut connections = Vec::new();
        for slot in 1..=this.slot_count() {
            let Some(neighbor) = this.neighbor_at_slot(slot) else {
                continue;
            };
            if Some(neighbor) == parent {
                continue;
            }
            if !conf.residue(neighbor).is_some_and(|r| r.is_saccharide()) {
                continue;
            }

            children.push(neighbor);

            let mut downstream_slot = slot;
            if let Some(record) = this.connect_record(slot) {
                if record.residue == neighbor {
                    downstream_slot = record.slot;
                }
            }
            connections.push(Connection {
                upstream_slot: slot,
                child: neighbor,
                downstream_slot,
            });
        }

        let tree_position = position_in_tree(conf, tree_root, residue)?;
        let distance = distance_to_root(conf, residue)?;
        let mainchain_child = find_mainchain_child(this);
        let exocyclic_linkage = has_exocyclic_linkage(conf, residue)?;
        let linkage_position = match parent {
            Some(parent_id) => {
                let parent_residue = conf
                    .residue(parent_id)
                    .ok_or(GlycanError::InvalidResidue { residue: parent_id })?;
                linkage_position(residue, parent_residue)
            }
            None => 0,
        };

        trace!(
            ?residue,
            ?parent,
            n_children = children.len(),
            tree_position,
            distance,
            "derived glycan node"
        );

        Ok(Self {
            residue,
            tree_root,
            parent,
            children,
            connections,
            tree_position,
            distance_to_root: distance,
            exocyclic_linkage,
            linkage_position,
            mainchain_child,
        })
    }

    /// Relabels the identity fields of this node.
    ///
    /// Only the residue id and tree root id change; adjacency and derived
    /// fields are left untouched. This is valid only when residues have been
    /// renumbered without any change to the glycan's topology — after a real
    /// topology change use [`rebuild`](GlycanNode::rebuild) instead, or the
    /// cached fields will silently disagree with the conformation.
    pub fn remap(&mut self, new_root: ResidueId, new_residue: ResidueId) {
        self.tree_root = new_root;
        self.residue = new_residue;
    }

    /// Re-derives every field from the conformation, keeping this node's
    /// current identity.
    pub fn rebuild(&mut self, conf: &Conformation) -> Result<(), GlycanError> {
        *self = Self::build(conf, self.tree_root, self.residue)?;
        Ok(())
    }

    /// The residue this node represents.
    pub fn residue(&self) -> ResidueId {
        self.residue
    }

    /// The root residue of the tree this node belongs to.
    pub fn tree_root(&self) -> ResidueId {
        self.tree_root
    }

    /// The parent residue, or `None` if this node is the root.
    pub fn parent(&self) -> Option<ResidueId> {
        self.parent
    }

    /// Child residues in slot-enumeration order.
    pub fn children(&self) -> &[ResidueId] {
        &self.children
    }

    /// Resolved parent-to-child connections, index-aligned with
    /// [`children`](GlycanNode::children).
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// 1-based breadth-first ordinal of this residue within its tree.
    pub fn tree_position(&self) -> usize {
        self.tree_position
    }

    /// Hop count along tree edges from the root to this residue.
    pub fn distance_to_root(&self) -> usize {
        self.distance_to_root
    }

    /// Whether the glycosidic bond to the parent attaches outside the
    /// parent's sugar ring.
    pub fn has_exocyclic_linkage(&self) -> bool {
        self.exocyclic_linkage
    }

    /// Attachment position on the parent, or 0 if this node has no parent.
    pub fn linkage_position(&self) -> usize {
        self.linkage_position
    }

    /// The child continuing the principal chain, or `None` if there is none.
    pub fn mainchain_child(&self) -> Option<ResidueId> {
        self.mainchain_child
    }
}
