use crate::core::models::ids::ResidueId;
use thiserror::Error;

/// Structural errors raised while deriving or validating a glycan tree.
///
/// Construction either fully succeeds or fails with one of these; a partially
/// populated node is never exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlycanError {
    #[error("residue {residue:?} is not present in the conformation")]
    InvalidResidue { residue: ResidueId },

    #[error("residue {residue:?} ({name}) is not a saccharide")]
    NotASaccharide { residue: ResidueId, name: String },

    #[error("residue {residue:?} is not reachable from tree root {root:?}")]
    NotInTree { residue: ResidueId, root: ResidueId },

    #[error("cycle detected while walking toward the tree root from residue {residue:?}")]
    CyclicTopology { residue: ResidueId },

    #[error("residue {child:?} is recorded as a child of {parent:?} but reports {actual:?} as its parent")]
    InconsistentTopology {
        parent: ResidueId,
        child: ResidueId,
        actual: Option<ResidueId>,
    },

    #[error(
        "distance to root of {child:?} ({child_distance}) does not extend that of its parent {parent:?} ({parent_distance})"
    )]
    BrokenDistanceLaw {
        parent: ResidueId,
        child: ResidueId,
        parent_distance: usize,
        child_distance: usize,
    },
}
