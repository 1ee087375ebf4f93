//! # Core Module
//!
//! The computational core of the library: molecular data models and the
//! glycan tree machinery built on top of them.
//!
//! - **Molecular Representation** ([`models`]) - Residues, connection slots
//!   and the conformation snapshot they live in
//! - **Tree Derivation** ([`glycan`]) - Connectivity extraction, per-residue
//!   node records and the owning tree collection

pub mod glycan;
pub mod models;
