//! # Glycan Tree Module
//!
//! Derivation and storage of branched carbohydrate trees.
//!
//! ## Overview
//!
//! A glycan attached to a host molecule is modeled as a rooted tree of
//! saccharide residues. The hard part is getting from the flat residue
//! connectivity of a [`Conformation`](crate::core::models::conformation::Conformation)
//! to a consistent per-residue record: which connection is the parent link,
//! which are children, how deep the residue sits, and how it is bonded to its
//! parent when the two residues number their connection slots differently.
//!
//! ## Key Components
//!
//! - [`connectivity`] - Pure lookup algorithms over the conformation
//! - [`node`] - The per-residue [`GlycanNode`](node::GlycanNode) record and
//!   its construction pass
//! - [`tree`] - The owning [`GlycanTree`](tree::GlycanTree) collection with
//!   rebuild, remap and post-build validation
//! - [`error`] - Structural error conditions

pub mod connectivity;
pub mod error;
pub mod node;
pub mod tree;
