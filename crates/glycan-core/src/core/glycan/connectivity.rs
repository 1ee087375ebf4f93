//! Free connectivity algorithms over a [`Conformation`].
//!
//! These are the small pure lookups node construction delegates to: parent
//! and mainchain-child identification, breadth-first tree ordinals, hop
//! counts to the root, and linkage classification. None of them mutate the
//! conformation.

use super::error::GlycanError;
use crate::core::models::conformation::Conformation;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::Residue;
use std::collections::{HashSet, VecDeque};

/// Returns the residue bonded through the designated parent slot, if any.
///
/// This is the raw slot lookup; it does not check whether the neighbor is a
/// saccharide. A glycan root attached to a host molecule (e.g. an ASN side
/// chain) still reports that anchor here.
pub fn find_parent(residue: &Residue) -> Option<ResidueId> {
    residue.neighbor_at_slot(residue.parent_slot()?)
}

/// Returns the child continuing the principal chain, if any.
///
/// Looks through the designated mainchain slot and excludes the parent, so a
/// terminal residue whose mainchain slot is unoccupied reports `None`.
pub fn find_mainchain_child(residue: &Residue) -> Option<ResidueId> {
    let child = residue.neighbor_at_slot(residue.mainchain_slot()?)?;
    (Some(child) != find_parent(residue)).then_some(child)
}

/// Collects every saccharide residue reachable from `root` along tree edges,
/// in breadth-first order starting at the root itself.
///
/// Children are visited in slot-enumeration order, so the result is
/// deterministic for a given conformation. Non-saccharide neighbors are
/// never entered.
pub fn glycan_residues(
    conf: &Conformation,
    root: ResidueId,
) -> Result<Vec<ResidueId>, GlycanError> {
    saccharide(conf, root)?;

    let mut order = Vec::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        if !seen.insert(current) {
            continue;
        }
        order.push(current);

        let residue = conf
            .residue(current)
            .ok_or(GlycanError::InvalidResidue { residue: current })?;
        let parent = tree_parent(conf, residue)?;
        for slot in 1..=residue.slot_count() {
            let Some(neighbor) = residue.neighbor_at_slot(slot) else {
                continue;
            };
            if Some(neighbor) == parent {
                continue;
            }
            if conf.residue(neighbor).is_some_and(|r| r.is_saccharide()) {
                queue.push_back(neighbor);
            }
        }
    }
    Ok(order)
}

/// Returns the 1-based breadth-first ordinal of `residue` within the tree
/// rooted at `root` (the root itself is position 1).
pub fn position_in_tree(
    conf: &Conformation,
    root: ResidueId,
    residue: ResidueId,
) -> Result<usize, GlycanError> {
    glycan_residues(conf, root)?
        .iter()
        .position(|&id| id == residue)
        .map(|index| index + 1)
        .ok_or(GlycanError::NotInTree { residue, root })
}

/// Counts tree edges from `residue` up to its glycan root.
///
/// Walks parent links until a residue with no saccharide parent is reached;
/// that residue is the root and has distance 0.
pub fn distance_to_root(conf: &Conformation, residue: ResidueId) -> Result<usize, GlycanError> {
    let mut current = residue;
    let mut hops = 0;
    loop {
        let descriptor = conf
            .residue(current)
            .ok_or(GlycanError::InvalidResidue { residue: current })?;
        match tree_parent(conf, descriptor)? {
            None => return Ok(hops),
            Some(parent) => {
                hops += 1;
                if hops > conf.len() {
                    return Err(GlycanError::CyclicTopology { residue });
                }
                current = parent;
            }
        }
    }
}

/// Reports whether the glycosidic bond to the parent attaches outside the
/// parent's sugar ring (e.g. the 6-position of a pyranose).
///
/// A residue with no saccharide parent has no glycosidic linkage and reports
/// `false`.
pub fn has_exocyclic_linkage(
    conf: &Conformation,
    residue: ResidueId,
) -> Result<bool, GlycanError> {
    let descriptor = conf
        .residue(residue)
        .ok_or(GlycanError::InvalidResidue { residue })?;
    match tree_parent(conf, descriptor)? {
        None => Ok(false),
        Some(parent_id) => {
            let parent = conf
                .residue(parent_id)
                .ok_or(GlycanError::InvalidResidue { residue: parent_id })?;
            Ok(linkage_position(residue, parent) > parent.ring_size)
        }
    }
}

/// Returns the attachment position on `parent` through which `child` is
/// bonded, or 0 if the two residues are not bonded.
pub fn linkage_position(child: ResidueId, parent: &Residue) -> usize {
    parent
        .slot_bonded_to(child)
        .and_then(|slot| parent.position_of_slot(slot))
        .unwrap_or(0)
}

/// Resolves `id` to a saccharide residue descriptor.
pub(crate) fn saccharide(
    conf: &Conformation,
    id: ResidueId,
) -> Result<&Residue, GlycanError> {
    let residue = conf
        .residue(id)
        .ok_or(GlycanError::InvalidResidue { residue: id })?;
    if !residue.is_saccharide() {
        return Err(GlycanError::NotASaccharide {
            residue: id,
            name: residue.name.clone(),
        });
    }
    Ok(residue)
}

/// The parent used for tree semantics: the residue through the parent slot,
/// but only if it is itself a saccharide. A non-carbohydrate anchor makes
/// this residue a tree root.
pub(crate) fn tree_parent(
    conf: &Conformation,
    residue: &Residue,
) -> Result<Option<ResidueId>, GlycanError> {
    match find_parent(residue) {
        None => Ok(None),
        Some(id) => {
            let parent = conf
                .residue(id)
                .ok_or(GlycanError::InvalidResidue { residue: id })?;
            Ok(parent.is_saccharide().then_some(id))
        }
    }
}
