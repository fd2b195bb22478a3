//! Inheritance rules for X-chromosome loci.
//!
//! The child's sex is consulted before any X-linked mode is applied. A
//! male child is hemizygous: his single X allele comes from his mother,
//! so only her genotype bears on transmission, and a homozygous-alternate
//! call is a single-allele observation rather than a biallelic one.
//! Children of unknown sex are handled with the diploid (female) rules.

use log::debug;

use crate::family::{Role, Sex};
use crate::genes::InheritanceMode;
use crate::inheritance::{Classification, TrioContext};
use crate::variant::Genotype;

/// Evaluate one X-linked mode, appending every applicable classification.
pub(crate) fn check(ctx: &TrioContext, mode: InheritanceMode, out: &mut Vec<Classification>) {
    debug_assert!(mode.is_x_linked());
    if ctx.child_sex == Sex::Male {
        check_male(ctx, mode, out);
    } else {
        check_female(ctx, mode, out);
    }
}

/// Rules for a hemizygous male child.
fn check_male(ctx: &TrioContext, mode: InheritanceMode, out: &mut Vec<Classification>) {
    if ctx.child != Some(Genotype::HomAlt) {
        return;
    }
    match ctx.mother {
        None => {
            debug!("male X variant, mother untested");
            out.push(Classification::PossibleDeNovo {
                mode,
                untested: vec![Role::Mother],
            });
        }
        Some(Genotype::HomRef) => {
            debug!("male X chrom de novo");
            out.push(Classification::DeNovo { mode });
        }
        Some(Genotype::Het) | Some(Genotype::HomAlt) => {
            if mode == InheritanceMode::XLinkedRecessive {
                debug!("male X chrom inherited from carrier mother");
                out.push(Classification::XLinkedRecessiveHemizygous {
                    origin: Role::Mother,
                });
            } else if ctx.mother_affected {
                debug!("male X chrom transmitted from affected mother");
                out.push(Classification::DominantInherited {
                    mode,
                    origin: Role::Mother,
                });
            } else {
                debug!("male X chrom carried by unaffected mother");
                out.push(Classification::NonPenetrantCarrier {
                    mode,
                    origin: Role::Mother,
                });
            }
        }
    }
}

/// Rules for a female (or unknown-sex) child, who is diploid on X.
fn check_female(ctx: &TrioContext, mode: InheritanceMode, out: &mut Vec<Classification>) {
    match mode {
        InheritanceMode::XLinkedDominant => check_female_dominant(ctx, mode, out),
        InheritanceMode::XLinkedRecessive => check_female_recessive(ctx, mode, out),
        _ => {}
    }
}

/// X-linked dominant in a female child mirrors the autosomal dominant
/// rules; a carrier father is hemizygous, so he shows as
/// homozygous-alternate.
fn check_female_dominant(ctx: &TrioContext, mode: InheritanceMode, out: &mut Vec<Classification>) {
    let untested = ctx.untested_parents();
    let tested_carrier = [Role::Mother, Role::Father]
        .into_iter()
        .any(|role| ctx.parent_genotype(role).is_some_and(|g| g.carries_alt()));

    if untested.is_empty() {
        if ctx.mother == Some(Genotype::HomRef) && ctx.father == Some(Genotype::HomRef) {
            debug!("female x chrom de novo");
            out.push(Classification::DeNovo { mode });
        }
    } else if !tested_carrier {
        debug!("allosomal without parents");
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
            debug!("x chrom transmitted from affected {role}");
            out.push(Classification::DominantInherited { mode, origin: role });
        } else {
            debug!("x chrom carried by unaffected {role}");
            out.push(Classification::NonPenetrantCarrier { mode, origin: role });
        }
    }
}

/// X-linked recessive in a female child requires both X copies altered:
/// homozygous-alternate, with every tested parent a carrier.
fn check_female_recessive(ctx: &TrioContext, mode: InheritanceMode, out: &mut Vec<Classification>) {
    if ctx.child != Some(Genotype::HomAlt) {
        return;
    }
    let tested: Vec<Genotype> = [ctx.mother, ctx.father].into_iter().flatten().collect();
    if tested.is_empty() {
        return;
    }
    if tested.iter().all(|g| g.carries_alt()) {
        debug!("female x chrom biallelic, every tested parent a carrier");
        out.push(Classification::RecessiveHomozygous { mode });
    }
}
