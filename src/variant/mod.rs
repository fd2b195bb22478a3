//! Variant-level data model.
//!
//! Per-individual calls ([`VariantCall`]), their identity keys
//! ([`VariantKey`]) and the consequence vocabulary ([`Consequence`]).

pub mod call;
pub mod consequence;

pub use call::{
    Chromosome, Genotype, InvalidGenotype, UnknownChromosome, VariantCall, VariantKey,
};
pub use consequence::{Consequence, UnknownConsequence};
