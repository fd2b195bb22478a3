//! Inheritance rules for autosomal loci.

use log::debug;

use crate::family::Role;
use crate::genes::InheritanceMode;
use crate::inheritance::{Classification, TrioContext};
use crate::variant::Genotype;

/// Evaluate one mode at an autosomal locus, appending every applicable
/// classification.
pub(crate) fn check(ctx: &TrioContext, mode: InheritanceMode, out: &mut Vec<Classification>) {
    if mode.is_dominant() {
        check_dominant(ctx, mode, out);
    }
    if mode == InheritanceMode::AutosomalRecessive {
        check_recessive(ctx, mode, out);
    }
}

/// Dominant-mode rules: de novo occurrence, or transmission from a
/// carrier parent. An unaffected carrier parent contradicts full
/// penetrance but is reported with a carrier tag, never discarded.
fn check_dominant(ctx: &TrioContext, mode: InheritanceMode, out: &mut Vec<Classification>) {
    let untested = ctx.untested_parents();
    let tested_carrier = [Role::Mother, Role::Father]
        .into_iter()
        .any(|role| ctx.parent_genotype(role).is_some_and(|g| g.carries_alt()));

    if untested.is_empty() {
        if ctx.mother == Some(Genotype::HomRef) && ctx.father == Some(Genotype::HomRef) {
            debug!("de novo: child carries alt, both parents homozygous reference");
            out.push(Classification::DeNovo { mode });
        }
    } else if !tested_carrier {
        debug!("possible de novo: {} parent(s) untested", untested.len());
        out.push(Classification::PossibleDeNovo {
            mode,
            untested: untested.clone(),
        });
    }

    for role in [Role::Mother, Role::Father] {
        let carries = ctx.parent_genotype(role).is_some_and(|g| g.carries_alt());
        if !carries {
            continue;
        }
        if ctx.parent_affected(role) {
            debug!("transmitted from affected {role}");
            out.push(Classification::DominantInherited { mode, origin: role });
        } else {
            debug!("carried by unaffected {role}: reduced penetrance or non-penetrant carrier");
            out.push(Classification::NonPenetrantCarrier { mode, origin: role });
        }
    }
}

/// Recessive-mode rule: a homozygous-alternate child with every tested
/// parent a heterozygous carrier. At least one parent must be tested;
/// untested parents lower the confidence downstream rather than blocking
/// the classification.
fn check_recessive(ctx: &TrioContext, mode: InheritanceMode, out: &mut Vec<Classification>) {
    if ctx.child != Some(Genotype::HomAlt) {
        return;
    }
    let tested: Vec<Genotype> = [ctx.mother, ctx.father].into_iter().flatten().collect();
    if tested.is_empty() {
        return;
    }
    if tested.iter().all(|g| *g == Genotype::Het) {
        debug!("biallelic: child homozygous, every tested parent heterozygous");
        out.push(Classification::RecessiveHomozygous { mode });
    }
}
