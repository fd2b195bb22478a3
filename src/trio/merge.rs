//! Merging per-individual call streams into trio records.
//!
//! Each family member supplies an independent, position-sorted stream of
//! [`VariantCall`]s. Streams are validated call by call (malformed calls
//! are skipped with a warning, never aborting the family), keyed by
//! [`VariantKey`], then unioned so that the output visits every locus seen
//! in any stream exactly once, in genomic order. An individual with no
//! call at a locus contributes an untested genotype, not a reference one.

use log::warn;
use std::collections::{BTreeMap, BTreeSet};

use crate::family::{Family, Role, Sex};
use crate::trio::record::TrioVariantRecord;
use crate::variant::{Genotype, VariantCall, VariantKey};

/// Per-individual call streams for one family.
///
/// Parent streams are optional; an absent stream is the "no VCF supplied"
/// case and downgrades classification confidence downstream rather than
/// blocking the child's variants.
#[derive(Debug, Clone, Default)]
pub struct FamilyCalls {
    /// The child's calls, sorted by position.
    pub child: Vec<VariantCall>,
    /// The mother's calls, if her data was supplied.
    pub mother: Option<Vec<VariantCall>>,
    /// The father's calls, if his data was supplied.
    pub father: Option<Vec<VariantCall>>,
}

impl FamilyCalls {
    /// Calls for the child only.
    pub fn child_only(child: Vec<VariantCall>) -> Self {
        Self {
            child,
            mother: None,
            father: None,
        }
    }
}

/// Merge a family's call streams into locus-ordered trio records.
///
/// Correct for any subset of supplied individuals: child-only,
/// child+one-parent, or the full trio.
pub fn merge_family_calls(family: &Family, calls: &FamilyCalls) -> Vec<TrioVariantRecord> {
    let child_keyed = key_stream(&calls.child, family.child().sex, Role::Child, &family.id);
    let mother_keyed = calls
        .mother
        .as_ref()
        .map(|calls| key_stream(calls, Sex::Female, Role::Mother, &family.id))
        .unwrap_or_default();
    let father_keyed = calls
        .father
        .as_ref()
        .map(|calls| key_stream(calls, Sex::Male, Role::Father, &family.id))
        .unwrap_or_default();

    // Union of loci across all streams; BTreeSet keeps genomic order.
    let loci: BTreeSet<VariantKey> = child_keyed
        .keys()
        .chain(mother_keyed.keys())
        .chain(father_keyed.keys())
        .cloned()
        .collect();

    loci.into_iter()
        .filter_map(|key| {
            let child = child_keyed.get(&key);
            let mother = mother_keyed.get(&key);
            let father = father_keyed.get(&key);
            // site annotation is shared across the trio; prefer the
            // child's copy when present
            let annotated = child.or(mother).or(father)?;
            Some(TrioVariantRecord {
                id: annotated.id.clone(),
                child: child.and_then(|c| c.genotype),
                mother: mother.and_then(|c| c.genotype),
                father: father.and_then(|c| c.genotype),
                allele_frequency: annotated.allele_frequency,
                consequence: annotated.consequence,
                gene: annotated.gene.clone(),
                site_filter: annotated.site_filter.clone(),
                denovo_support: annotated.denovo_support,
                key,
            })
        })
        .collect()
}

/// Validate one individual's stream and index it by variant key.
///
/// Skipped (with a warning): calls on unrecognised chromosomes, and
/// heterozygous male calls on the X chromosome, which cannot be real.
/// A duplicate key within one stream keeps the later call.
fn key_stream(
    calls: &[VariantCall],
    sex: Sex,
    role: Role,
    family_id: &str,
) -> BTreeMap<VariantKey, VariantCall> {
    let mut keyed = BTreeMap::new();
    for call in calls {
        let chrom = match call.chromosome() {
            Ok(chrom) => chrom,
            Err(e) => {
                warn!("family {family_id}: skipping {role} call at {}:{}: {e}", call.chrom, call.pos);
                continue;
            }
        };
        if chrom.is_x() && sex == Sex::Male && call.genotype == Some(Genotype::Het) {
            warn!(
                "family {family_id}: skipping heterozygous male X call at {}:{}",
                call.chrom, call.pos
            );
            continue;
        }
        let key = VariantKey::new(chrom, call.pos, &call.ref_allele, &call.alt_allele);
        if keyed.insert(key, call.clone()).is_some() {
            warn!(
                "family {family_id}: duplicate {role} call at {}:{}, keeping the later one",
                call.chrom, call.pos
            );
        }
    }
    keyed
}
