use super::connectivity::glycan_residues;
use super::error::GlycanError;
use super::node::GlycanNode;
use crate::core::models::conformation::Conformation;
use crate::core::models::ids::ResidueId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A rooted tree of saccharide residues, one [`GlycanNode`] per residue.
///
/// The tree owns its node records and nothing else; all residue ids are
/// non-owning handles into the conformation the tree was built from. Nodes
/// are derived once at build time and go stale the moment the conformation's
/// topology changes — the owner of the conformation is responsible for
/// calling [`rebuild`](GlycanTree::rebuild) after any structural edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlycanTree {
    root: ResidueId,
    residues: Vec<ResidueId>,
    nodes: HashMap<ResidueId, GlycanNode>,
}

impl GlycanTree {
    /// Builds the full tree rooted at `root` from the conformation.
    ///
    /// Residues are collected breadth-first along tree edges and one node is
    /// derived per residue. Any failure aborts the whole build; a partially
    /// populated tree is never returned.
    pub fn build(conf: &Conformation, root: ResidueId) -> Result<Self, GlycanError> {
        let residues = glycan_residues(conf, root)?;

        let mut nodes = HashMap::with_capacity(residues.len());
        for &residue in &residues {
            nodes.insert(residue, GlycanNode::build(conf, root, residue)?);
        }

        debug!(?root, n_residues = residues.len(), "built glycan tree");
        Ok(Self {
            root,
            residues,
            nodes,
        })
    }

    /// The root residue of this tree.
    pub fn root(&self) -> ResidueId {
        self.root
    }

    /// Retrieves the node record for a residue.
    pub fn node(&self, residue: ResidueId) -> Option<&GlycanNode> {
        self.nodes.get(&residue)
    }

    /// Residue ids in breadth-first order, root first.
    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }

    /// Returns an iterator over node records in breadth-first order.
    pub fn nodes_iter(&self) -> impl Iterator<Item = &GlycanNode> {
        self.residues.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Returns the number of residues in the tree.
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn contains(&self, residue: ResidueId) -> bool {
        self.nodes.contains_key(&residue)
    }

    /// Relabels every node's identity after a residue renumbering.
    ///
    /// Ids absent from `mapping` are kept as they are. Like
    /// [`GlycanNode::remap`], this touches identity fields and the key set
    /// only — it must not be used when the topology itself has changed; use
    /// [`rebuild`](GlycanTree::rebuild) for that.
    pub fn remap(&mut self, mapping: &HashMap<ResidueId, ResidueId>) {
        let map = |id: ResidueId| mapping.get(&id).copied().unwrap_or(id);

        self.root = map(self.root);
        for residue in &mut self.residues {
            *residue = map(*residue);
        }
        let root = self.root;
        self.nodes = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(|(id, mut node)| {
                let new_id = map(id);
                node.remap(root, new_id);
                (new_id, node)
            })
            .collect();
    }

    /// Re-derives the whole tree from the conformation.
    pub fn rebuild(&mut self, conf: &Conformation) -> Result<(), GlycanError> {
        *self = Self::build(conf, self.root)?;
        Ok(())
    }

    /// Post-build validation pass over the full tree.
    ///
    /// Each node derived its parent independently of the node that claims it
    /// as a child, so cross-checking the two catches a tree whose cached
    /// records disagree — typically the aftermath of a `remap` applied after
    /// a real topology change. Checks, for every recorded parent-child edge:
    /// the child has a node, the child's parent is the recording node, and
    /// the child's distance to root extends its parent's by exactly one.
    ///
    /// # Errors
    ///
    /// `InconsistentTopology` naming the offending residue pair, or
    /// `BrokenDistanceLaw` with both distances.
    pub fn validate(&self) -> Result<(), GlycanError> {
        for node in self.nodes_iter() {
            for &child in node.children() {
                let child_node =
                    self.nodes
                        .get(&child)
                        .ok_or(GlycanError::InconsistentTopology {
                            parent: node.residue(),
                            child,
                            actual: None,
                        })?;
                if child_node.parent() != Some(node.residue()) {
                    return Err(GlycanError::InconsistentTopology {
                        parent: node.residue(),
                        child,
                        actual: child_node.parent(),
                    });
                }
                if child_node.distance_to_root() != node.distance_to_root() + 1 {
                    return Err(GlycanError::BrokenDistanceLaw {
                        parent: node.residue(),
                        child,
                        parent_distance: node.distance_to_root(),
                        child_distance: child_node.distance_to_root(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::{Residue, ResidueKind};
    use std::collections::HashSet;

    fn pyranose(number: isize, name: &str) -> Residue {
        let mut residue = Residue::new(number, name, ResidueKind::Saccharide, 5);
        residue.add_slot(1);
        residue.add_slot(4);
        residue.add_slot(6);
        residue.set_parent_slot(1);
        residue.set_mainchain_slot(2);
        residue
    }

    /// Root - R2 - R3 mainchain with R4 branching off the root's 6-position,
    /// anchored to an ASN on the root's anomeric carbon.
    fn branched_glycan() -> (Conformation, [ResidueId; 4]) {
        let mut conf = Conformation::new();
        let root = conf.add_residue(pyranose(1, "Glc"));
        let r2 = conf.add_residue(pyranose(2, "Man"));
        let r3 = conf.add_residue(pyranose(3, "Man"));
        let r4 = conf.add_residue(pyranose(4, "Fuc"));
        let mut asn = Residue::new(5, "ASN", ResidueKind::AminoAcid, 0);
        asn.add_slot(1);
        let anchor = conf.add_residue(asn);

        conf.connect(root, 2, r2, 1).unwrap();
        conf.connect(r2, 2, r3, 1).unwrap();
        conf.connect(root, 3, r4, 1).unwrap();
        conf.connect(root, 1, anchor, 1).unwrap();
        (conf, [root, r2, r3, r4])
    }

    #[test]
    fn build_collects_every_reachable_saccharide() {
        let (conf, [root, r2, r3, r4]) = branched_glycan();
        let tree = GlycanTree::build(&conf, root).unwrap();

        assert_eq!(tree.root(), root);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.residues(), &[root, r2, r4, r3]);
        for residue in [root, r2, r3, r4] {
            assert!(tree.contains(residue));
        }
        assert_eq!(tree.nodes_iter().count(), 4);
    }

    #[test]
    fn child_counts_account_for_every_non_root_residue() {
        let (conf, [root, ..]) = branched_glycan();
        let tree = GlycanTree::build(&conf, root).unwrap();

        let total_children: usize = tree.nodes_iter().map(|n| n.children().len()).sum();
        assert_eq!(total_children, tree.len() - 1);

        // Every non-root residue appears as a child of exactly one node.
        let mut seen = HashSet::new();
        for node in tree.nodes_iter() {
            for &child in node.children() {
                assert!(seen.insert(child), "residue claimed by two parents");
            }
        }
        assert!(!seen.contains(&root));
        assert_eq!(seen.len(), tree.len() - 1);
    }

    #[test]
    fn freshly_built_tree_validates() {
        let (conf, [root, ..]) = branched_glycan();
        let tree = GlycanTree::build(&conf, root).unwrap();
        tree.validate().unwrap();
    }

    #[test]
    fn depth_law_holds_on_every_edge() {
        let (conf, [root, ..]) = branched_glycan();
        let tree = GlycanTree::build(&conf, root).unwrap();

        assert_eq!(tree.node(root).unwrap().distance_to_root(), 0);
        for node in tree.nodes_iter() {
            for &child in node.children() {
                assert_eq!(
                    tree.node(child).unwrap().distance_to_root(),
                    node.distance_to_root() + 1
                );
            }
        }
    }

    #[test]
    fn remap_relabels_identities_and_keys() {
        let (mut conf, [root, r2, r3, r4]) = branched_glycan();
        let mut tree = GlycanTree::build(&conf, root).unwrap();

        // Fresh ids standing in for a renumbered conformation.
        let new_root = conf.add_residue(pyranose(11, "Glc"));
        let new_r2 = conf.add_residue(pyranose(12, "Man"));
        let mapping = HashMap::from([(root, new_root), (r2, new_r2)]);

        tree.remap(&mapping);

        assert_eq!(tree.root(), new_root);
        assert_eq!(tree.residues(), &[new_root, new_r2, r4, r3]);
        assert!(tree.contains(new_r2));
        assert!(!tree.contains(r2));
        let node = tree.node(new_r2).unwrap();
        assert_eq!(node.residue(), new_r2);
        assert_eq!(node.tree_root(), new_root);
        // Adjacency is deliberately untouched; only identity moved.
        assert_eq!(node.children(), &[r3]);
    }

    #[test]
    fn validate_catches_a_misused_remap() {
        let (conf, [root, r2, r3, _]) = branched_glycan();
        let mut tree = GlycanTree::build(&conf, root).unwrap();
        tree.validate().unwrap();

        // Swapping two residues' identities without the topology having
        // changed in the conformation leaves every cached child list stale.
        let mapping = HashMap::from([(r2, r3), (r3, r2)]);
        tree.remap(&mapping);

        assert!(matches!(
            tree.validate(),
            Err(GlycanError::InconsistentTopology { .. })
        ));
    }

    #[test]
    fn rebuild_follows_a_topology_change() {
        let (mut conf, [root, _, r3, _]) = branched_glycan();
        let mut tree = GlycanTree::build(&conf, root).unwrap();
        assert_eq!(tree.len(), 4);

        let r5 = conf.add_residue(pyranose(6, "Gal"));
        conf.connect(r3, 2, r5, 1).unwrap();

        tree.rebuild(&conf).unwrap();
        assert_eq!(tree.len(), 5);
        assert!(tree.contains(r5));
        assert_eq!(tree.node(r3).unwrap().children(), &[r5]);
        tree.validate().unwrap();
    }

    #[test]
    fn build_rejects_a_non_saccharide_root() {
        let mut conf = Conformation::new();
        let mut asn = Residue::new(1, "ASN", ResidueKind::AminoAcid, 0);
        asn.add_slot(1);
        let anchor = conf.add_residue(asn);

        assert!(matches!(
            GlycanTree::build(&conf, anchor),
            Err(GlycanError::NotASaccharide { .. })
        ));
    }
}
