//! # Glycan Tree Core Library
//!
//! A library for deriving and representing branched carbohydrate (glycan)
//! structures as rooted trees of monosaccharide residues.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict read direction between
//! them:
//!
//! - **[`core::models`]: The Molecule.** Residue descriptors, connection
//!   slots and the [`Conformation`](core::models::conformation::Conformation)
//!   snapshot that owns them. This layer knows nothing about trees.
//!
//! - **[`core::glycan`]: The Trees.** Pure connectivity algorithms that read
//!   a conformation, the per-residue
//!   [`GlycanNode`](core::glycan::node::GlycanNode) record they populate, and
//!   the owning [`GlycanTree`](core::glycan::tree::GlycanTree) collection
//!   with rebuild, remap and validation.
//!
//! Tree records are snapshots: nothing invalidates them when the
//! conformation changes, and keeping them consistent after a structural edit
//! is the caller's responsibility.

pub mod core;
