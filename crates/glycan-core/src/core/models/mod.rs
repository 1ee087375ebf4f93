//! # Core Models Module
//!
//! Data structures describing the molecule glycan trees are derived from.
//!
//! ## Key Components
//!
//! - [`ids`] - Stable identifier types for residues
//! - [`residue`] - Residue descriptor with its enumerated connection slots
//! - [`conformation`] - Whole-molecule residue-connectivity snapshot
//!
//! The conformation is the read-only collaborator of tree construction: it
//! owns the residues, answers per-residue connection queries, and is never
//! mutated by anything in [`glycan`](crate::core::glycan).

pub mod conformation;
pub mod ids;
pub mod residue;
