//! The per-family screening pipeline.
//!
//! Reference databases are loaded once into a [`ReferenceContext`] and
//! shared read-only across every family in the run; each family is then
//! processed by a synchronous pipeline with no hidden state: merge the
//! call streams, apply the rarity & functional filter, look up gene and
//! syndrome evidence, run the inheritance checks (including compound-het
//! pairing), and aggregate. Results preserve genomic position order and
//! are identical across re-runs on identical inputs.

use std::collections::{BTreeMap, HashMap};

use crate::aggregate::{build_result, CandidateResult, SyndromeMatch};
use crate::config::FilterConfig;
use crate::family::{Family, Sex};
use crate::filter;
use crate::filter::FilterVerdict;
use crate::genes::{InheritanceMode, KnownGeneDatabase};
use crate::inheritance::{classify_record, find_compound_hets, Classification};
use crate::regions::SyndromeRegionSet;
use crate::trio::{merge_family_calls, FamilyCalls, TrioVariantRecord};
use crate::variant::{Chromosome, VariantKey};

/// Read-only reference data shared across all families in a run.
///
/// Constructed once at startup and passed by reference into each family's
/// pipeline invocation; never ambient global state.
#[derive(Debug, Clone, Default)]
pub struct ReferenceContext {
    /// Curated known-gene table.
    pub known_genes: KnownGeneDatabase,
    /// Curated syndromic regions.
    pub syndrome_regions: SyndromeRegionSet,
}

impl ReferenceContext {
    /// Bundle loaded reference databases into a context.
    pub fn new(known_genes: KnownGeneDatabase, syndrome_regions: SyndromeRegionSet) -> Self {
        Self {
            known_genes,
            syndrome_regions,
        }
    }
}

/// Screen one family's variant calls into an ordered candidate list.
pub fn screen_family(
    ctx: &ReferenceContext,
    config: &FilterConfig,
    family: &Family,
    calls: &FamilyCalls,
) -> Vec<CandidateResult> {
    let records = merge_family_calls(family, calls);

    // rarity/functional filtering runs before any inheritance logic;
    // only loci where the child carries the alternate allele are
    // candidates
    let mut kept: Vec<(TrioVariantRecord, FilterVerdict)> = Vec::new();
    for record in records {
        if !record.child_carries_alt() {
            continue;
        }
        let verdict = filter::evaluate(&record, config);
        if verdict.is_pass() {
            kept.push((record, verdict));
        }
    }

    let paired = pair_compound_hets(&kept, ctx, family);

    let mut results = Vec::with_capacity(kept.len());
    for (record, verdict) in kept {
        let entries = record
            .gene
            .as_deref()
            .map(|gene| ctx.known_genes.lookup(gene))
            .unwrap_or(&[]);
        let mut classifications = classify_record(&record, family, entries);
        if let Some(extra) = paired.get(&record.key) {
            classifications.extend(extra.iter().cloned());
        }
        let syndromes: Vec<SyndromeMatch> = ctx
            .syndrome_regions
            .overlapping(record.key.chrom, record.key.pos)
            .into_iter()
            .map(SyndromeMatch::from)
            .collect();
        // a pattern incompatible with every listed mode, with no
        // syndromic overlap, is not a candidate
        if classifications.is_empty() && syndromes.is_empty() {
            continue;
        }
        results.push(build_result(record, verdict, classifications, syndromes, family));
    }
    results
}

/// Run the compound-het pairing search over every gene with a recessive
/// mode, returning extra classifications keyed by variant.
fn pair_compound_hets(
    kept: &[(TrioVariantRecord, FilterVerdict)],
    ctx: &ReferenceContext,
    family: &Family,
) -> HashMap<VariantKey, Vec<Classification>> {
    let mut by_gene: BTreeMap<&str, Vec<&TrioVariantRecord>> = BTreeMap::new();
    for (record, _) in kept {
        if let Some(gene) = record.gene.as_deref() {
            by_gene.entry(gene).or_default().push(record);
        }
    }

    let mut paired: HashMap<VariantKey, Vec<Classification>> = HashMap::new();
    for (gene, records) in by_gene {
        if records.len() < 2 {
            continue;
        }
        let entries = ctx.known_genes.lookup(gene);
        let mut modes: Vec<InheritanceMode> = Vec::new();
        for entry in entries {
            for mode in &entry.modes {
                if mode.is_recessive() && !modes.contains(mode) {
                    modes.push(*mode);
                }
            }
        }
        for mode in modes {
            let eligible: Vec<&TrioVariantRecord> = records
                .iter()
                .copied()
                .filter(|r| match mode {
                    InheritanceMode::AutosomalRecessive => {
                        matches!(r.key.chrom, Chromosome::Autosome(_))
                    }
                    InheritanceMode::XLinkedRecessive => {
                        // a hemizygous male needs no second variant
                        r.key.chrom.is_x() && family.child().sex != Sex::Male
                    }
                    _ => false,
                })
                .collect();
            for (key, classification) in find_compound_hets(&eligible, family, mode) {
                paired.entry(key).or_default().push(classification);
            }
        }
    }
    paired
}
