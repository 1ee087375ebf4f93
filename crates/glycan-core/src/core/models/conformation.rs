use super::ids::ResidueId;
use super::residue::Residue;
use slotmap::SlotMap;

/// Residue-level connectivity snapshot of a whole modeled molecule.
///
/// This is the read-only collaborator glycan tree construction works against.
/// Residues live in a slot map keyed by stable [`ResidueId`]s; bonds are
/// recorded as reciprocal connection records on the two residues' slots.
/// Mutation exists only so an owner can assemble a snapshot — every tree
/// operation takes `&Conformation` and never writes back.
#[derive(Debug, Clone, Default)]
pub struct Conformation {
    residues: SlotMap<ResidueId, Residue>,
}

impl Conformation {
    /// Creates a new, empty conformation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a residue and returns its stable ID.
    pub fn add_residue(&mut self, residue: Residue) -> ResidueId {
        self.residues.insert(residue)
    }

    /// Retrieves an immutable reference to a residue by its ID.
    ///
    /// # Return
    ///
    /// Returns `Some(&Residue)` if the residue exists, otherwise `None`.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Retrieves a mutable reference to a residue by its ID.
    pub fn residue_mut(&mut self, id: ResidueId) -> Option<&mut Residue> {
        self.residues.get_mut(id)
    }

    /// Returns an iterator over all residues in the conformation.
    ///
    /// # Return
    ///
    /// An iterator yielding `(ResidueId, &Residue)` pairs.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Returns the number of residues in the conformation.
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Bonds two residues through the given slots.
    ///
    /// Writes reciprocal connection records on both sides, so each residue
    /// knows both its partner and the partner's own slot index for the bond.
    /// The two slot indices are independent; they do not have to match.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if both residues and both slots exist, otherwise
    /// `None` without modifying either residue.
    pub fn connect(&mut self, a: ResidueId, slot_a: usize, b: ResidueId, slot_b: usize) -> Option<()> {
        if a == b {
            return None;
        }
        self.residues.get(a)?.position_of_slot(slot_a)?;
        self.residues.get(b)?.position_of_slot(slot_b)?;

        self.residues.get_mut(a)?.set_slot_partner(slot_a, b, slot_b)?;
        self.residues.get_mut(b)?.set_slot_partner(slot_b, a, slot_a)?;
        Some(())
    }
}
