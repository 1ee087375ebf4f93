use super::ids::ResidueId;
use std::fmt;

/// Broad chemical classification of a residue.
///
/// Only [`Saccharide`](ResidueKind::Saccharide) residues participate in glycan
/// trees; any other kind is treated as a non-carbohydrate attachment point and
/// never appears inside a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueKind {
    Saccharide,
    AminoAcid,
    Ligand,
    Water,
    Other,
}

impl fmt::Display for ResidueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Saccharide => "Saccharide",
                Self::AminoAcid => "AminoAcid",
                Self::Ligand => "Ligand",
                Self::Water => "Water",
                Self::Other => "Other",
            }
        )
    }
}

/// Connection record stored on a residue for one of its occupied slots.
///
/// `slot` is the partner's own 1-based slot index for the same bond. The two
/// residues of a bond number their slots independently, so `slot` need not
/// equal the index of the slot this record is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectRecord {
    /// The residue on the other side of the bond.
    pub residue: ResidueId,
    /// The partner's reciprocal slot index.
    pub slot: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ConnectionSlot {
    position: usize,
    partner: Option<ConnectRecord>,
}

/// One residue descriptor inside a [`Conformation`](super::conformation::Conformation).
///
/// A residue exposes an ordered list of connection slots, addressed by 1-based
/// index. Each slot is anchored at an attachment position on the residue (a
/// ring position for the positions covered by `ring_size`, an exocyclic
/// position beyond it) and may hold a [`ConnectRecord`] naming the bonded
/// partner. Two designated slots carry tree semantics: the parent slot (the
/// anomeric attachment toward the residue's parent) and the mainchain slot
/// (the attachment continuing the principal chain).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    /// Residue sequence number from the source molecule.
    pub number: isize,
    /// Name of the residue (e.g., "Glc", "Man", "ASN").
    pub name: String,
    /// Chemical classification of the residue.
    pub kind: ResidueKind,
    /// Number of ring positions; attachment positions beyond this are exocyclic.
    pub ring_size: usize,
    slots: Vec<ConnectionSlot>,
    parent_slot: Option<usize>,
    mainchain_slot: Option<usize>,
}

impl Residue {
    pub fn new(number: isize, name: &str, kind: ResidueKind, ring_size: usize) -> Self {
        Self {
            number,
            name: name.to_string(),
            kind,
            ring_size,
            slots: Vec::new(),
            parent_slot: None,
            mainchain_slot: None,
        }
    }

    pub fn is_saccharide(&self) -> bool {
        self.kind == ResidueKind::Saccharide
    }

    /// Declares a new connection slot anchored at `position`.
    ///
    /// # Return
    ///
    /// The 1-based index of the new slot.
    pub fn add_slot(&mut self, position: usize) -> usize {
        self.slots.push(ConnectionSlot {
            position,
            partner: None,
        });
        self.slots.len()
    }

    /// Returns the number of declared connection slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the attachment position anchoring the given slot.
    pub fn position_of_slot(&self, slot: usize) -> Option<usize> {
        self.slot(slot).map(|s| s.position)
    }

    /// Returns the residue bonded through the given slot, if any.
    pub fn neighbor_at_slot(&self, slot: usize) -> Option<ResidueId> {
        self.slot(slot)?.partner.map(|record| record.residue)
    }

    /// Returns the full connection record for the given slot, if occupied.
    pub fn connect_record(&self, slot: usize) -> Option<ConnectRecord> {
        self.slot(slot)?.partner
    }

    /// Finds the slot through which this residue bonds `partner`, if any.
    pub fn slot_bonded_to(&self, partner: ResidueId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.partner.is_some_and(|record| record.residue == partner))
            .map(|index| index + 1)
    }

    /// Returns the slot designated as leading to this residue's parent.
    pub fn parent_slot(&self) -> Option<usize> {
        self.parent_slot
    }

    /// Designates the slot leading to this residue's parent.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if the slot exists, otherwise `None`.
    pub fn set_parent_slot(&mut self, slot: usize) -> Option<()> {
        self.slot(slot)?;
        self.parent_slot = Some(slot);
        Some(())
    }

    /// Returns the slot designated as continuing the principal chain.
    pub fn mainchain_slot(&self) -> Option<usize> {
        self.mainchain_slot
    }

    /// Designates the slot continuing the principal chain.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if the slot exists, otherwise `None`.
    pub fn set_mainchain_slot(&mut self, slot: usize) -> Option<()> {
        self.slot(slot)?;
        self.mainchain_slot = Some(slot);
        Some(())
    }

    pub(crate) fn set_slot_partner(
        &mut self,
        slot: usize,
        partner: ResidueId,
        partner_slot: usize,
    ) -> Option<()> {
        let index = slot.checked_sub(1)?;
        let entry = self.slots.get_mut(index)?;
        entry.partner = Some(ConnectRecord {
            residue: partner,
            slot: partner_slot,
        });
        Some(())
    }

    fn slot(&self, slot: usize) -> Option<&ConnectionSlot> {
        slot.checked_sub(1).and_then(|index| self.slots.get(index))
    }
}
