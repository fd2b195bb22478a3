//! Compound-heterozygote pairing.
//!
//! Two distinct heterozygous variants in the same gene can act like a
//! biallelic genotype when one was inherited from each parent. Parental
//! origin is inferred from which parent carries each specific allele, not
//! from phasing; a pairing must never trace both variants to the same
//! parent. The search is exhaustive over all same-gene pairs, bounded by
//! the handful of rare variants a child carries in any one gene.

use log::debug;

use crate::family::{AffectionStatus, Family, Role};
use crate::genes::InheritanceMode;
use crate::inheritance::Classification;
use crate::trio::TrioVariantRecord;
use crate::variant::{Genotype, VariantKey};

/// Search same-gene records for compound-heterozygous pairs.
///
/// `records` must all lie in one gene and have individually passed the
/// rarity & functional filter; only records where the child is
/// heterozygous take part. Returns one classification per (record, pair)
/// combination, keyed by the record's variant key, each cross-referencing
/// its partner.
pub fn find_compound_hets(
    records: &[&TrioVariantRecord],
    family: &Family,
    mode: InheritanceMode,
) -> Vec<(VariantKey, Classification)> {
    let hets: Vec<&TrioVariantRecord> = records
        .iter()
        .copied()
        .filter(|r| r.child == Some(Genotype::Het))
        .collect();

    let mut out = Vec::new();
    for i in 0..hets.len() {
        for j in (i + 1)..hets.len() {
            let (a, b) = (hets[i], hets[j]);
            if a.key == b.key {
                continue;
            }
            if let Some((for_a, for_b)) = classify_pair(a, b, family, mode) {
                out.push((a.key.clone(), for_a));
                out.push((b.key.clone(), for_b));
            }
        }
    }
    out
}

/// The genotype that marks a parent as the carrier of one variant of a
/// pair. A father is hemizygous on X, so his carrier state there is
/// homozygous-alternate rather than heterozygous.
fn carrier_genotype(role: Role, on_x: bool) -> Genotype {
    if on_x && role == Role::Father {
        Genotype::HomAlt
    } else {
        Genotype::Het
    }
}

/// Try to pair two same-gene heterozygous child variants.
///
/// Full confirmation needs both parents tested at both loci, both
/// unaffected, and each carrying exactly one variant of the pair, on
/// opposite sides. With exactly one parent untested, a pairing where the
/// tested parent is an unaffected carrier of exactly one side is reported
/// with parental origin unconfirmed.
fn classify_pair(
    a: &TrioVariantRecord,
    b: &TrioVariantRecord,
    family: &Family,
    mode: InheritanceMode,
) -> Option<(Classification, Classification)> {
    let on_x = a.key.chrom.is_x();

    // an affected parent is outside the unaffected-carrier model
    for role in [Role::Mother, Role::Father] {
        if family
            .parent(role)
            .is_some_and(|p| p.affection == AffectionStatus::Affected)
        {
            debug!("no pairing: {role} affected");
            return None;
        }
    }

    let genotypes = |role: Role| (parent_genotype(a, role), parent_genotype(b, role));
    let (mother_a, mother_b) = genotypes(Role::Mother);
    let (father_a, father_b) = genotypes(Role::Father);
    let mother_tested = mother_a.is_some() && mother_b.is_some();
    let father_tested = father_a.is_some() && father_b.is_some();

    // which side of the pair a parent carries, if exactly one
    let carries_exactly = |role: Role, first: Option<Genotype>, second: Option<Genotype>| {
        let carrier = Some(carrier_genotype(role, on_x));
        match (first == carrier, second == carrier) {
            (true, false) if second == Some(Genotype::HomRef) => Some(0usize),
            (false, true) if first == Some(Genotype::HomRef) => Some(1usize),
            _ => None,
        }
    };

    match (mother_tested, father_tested) {
        (true, true) => {
            let mother_side = carries_exactly(Role::Mother, mother_a, mother_b)?;
            let father_side = carries_exactly(Role::Father, father_a, father_b)?;
            // opposite parental origin is the whole point
            if mother_side == father_side {
                return None;
            }
            debug!("compound het: {} / {}", a.key, b.key);
            Some((
                Classification::CompoundHet {
                    mode,
                    partner: b.key.clone(),
                },
                Classification::CompoundHet {
                    mode,
                    partner: a.key.clone(),
                },
            ))
        }
        (true, false) | (false, true) => {
            let (tested_role, untested_role, first, second) = if mother_tested {
                (Role::Mother, Role::Father, mother_a, mother_b)
            } else {
                (Role::Father, Role::Mother, father_a, father_b)
            };
            carries_exactly(tested_role, first, second)?;
            debug!(
                "possible compound het: {} / {}, {untested_role} untested",
                a.key, b.key
            );
            Some((
                Classification::PossibleCompoundHet {
                    mode,
                    partner: b.key.clone(),
                    untested: untested_role,
                },
                Classification::PossibleCompoundHet {
                    mode,
                    partner: a.key.clone(),
                    untested: untested_role,
                },
            ))
        }
        // child-only data cannot distinguish cis from trans
        (false, false) => None,
    }
}

fn parent_genotype(record: &TrioVariantRecord, role: Role) -> Option<Genotype> {
    match role {
        Role::Mother => record.mother,
        Role::Father => record.father,
        Role::Child => record.child,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::{Individual, Sex};
    use crate::variant::{Chromosome, Consequence};

    fn family(mother: Option<AffectionStatus>, father: Option<AffectionStatus>) -> Family {
        let mut fam = Family::new(
            "fam",
            Individual::new("child", Sex::Female, AffectionStatus::Affected, Role::Child),
        );
        if let Some(aff) = mother {
            fam = fam
                .with_mother(Individual::new("mum", Sex::Female, aff, Role::Mother))
                .unwrap();
        }
        if let Some(aff) = father {
            fam = fam
                .with_father(Individual::new("dad", Sex::Male, aff, Role::Father))
                .unwrap();
        }
        fam
    }

    fn record(
        pos: u64,
        mother: Option<Genotype>,
        father: Option<Genotype>,
    ) -> TrioVariantRecord {
        TrioVariantRecord {
            key: VariantKey::new(Chromosome::Autosome(2), pos, "C", "T"),
            id: None,
            child: Some(Genotype::Het),
            mother,
            father,
            allele_frequency: Some(0.0001),
            consequence: Consequence::MissenseVariant,
            gene: Some("TEST".to_string()),
            site_filter: None,
            denovo_support: false,
        }
    }

    fn unaffected_trio() -> Family {
        family(Some(AffectionStatus::Unaffected), Some(AffectionStatus::Unaffected))
    }

    #[test]
    fn test_confirmed_pair_opposite_origins() {
        let a = record(100, Some(Genotype::Het), Some(Genotype::HomRef));
        let b = record(200, Some(Genotype::HomRef), Some(Genotype::Het));
        let pairs = find_compound_hets(
            &[&a, &b],
            &unaffected_trio(),
            InheritanceMode::AutosomalRecessive,
        );
        assert_eq!(pairs.len(), 2);
        assert_eq!(
            pairs[0],
            (
                a.key.clone(),
                Classification::CompoundHet {
                    mode: InheritanceMode::AutosomalRecessive,
                    partner: b.key.clone(),
                }
            )
        );
        assert_eq!(
            pairs[1],
            (
                b.key.clone(),
                Classification::CompoundHet {
                    mode: InheritanceMode::AutosomalRecessive,
                    partner: a.key.clone(),
                }
            )
        );
    }

    #[test]
    fn test_same_parental_origin_rejected() {
        // both variants carried by the mother only
        let a = record(100, Some(Genotype::Het), Some(Genotype::HomRef));
        let b = record(200, Some(Genotype::Het), Some(Genotype::HomRef));
        let pairs = find_compound_hets(
            &[&a, &b],
            &unaffected_trio(),
            InheritanceMode::AutosomalRecessive,
        );
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_parent_carrying_both_sides_rejected() {
        let a = record(100, Some(Genotype::Het), Some(Genotype::HomRef));
        let b = record(200, Some(Genotype::Het), Some(Genotype::Het));
        let pairs = find_compound_hets(
            &[&a, &b],
            &unaffected_trio(),
            InheritanceMode::AutosomalRecessive,
        );
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_de_novo_member_cannot_pair() {
        // variant b traces to neither parent
        let a = record(100, Some(Genotype::Het), Some(Genotype::HomRef));
        let b = record(200, Some(Genotype::HomRef), Some(Genotype::HomRef));
        let pairs = find_compound_hets(
            &[&a, &b],
            &unaffected_trio(),
            InheritanceMode::AutosomalRecessive,
        );
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_one_parent_absent_gives_possible_pairing() {
        let fam = family(Some(AffectionStatus::Unaffected), None);
        let a = record(100, Some(Genotype::Het), None);
        let b = record(200, Some(Genotype::HomRef), None);
        let pairs = find_compound_hets(&[&a, &b], &fam, InheritanceMode::AutosomalRecessive);
        assert_eq!(pairs.len(), 2);
        assert!(matches!(
            &pairs[0].1,
            Classification::PossibleCompoundHet {
                untested: Role::Father,
                ..
            }
        ));
    }

    #[test]
    fn test_both_parents_absent_no_pairing() {
        let fam = family(None, None);
        let a = record(100, None, None);
        let b = record(200, None, None);
        let pairs = find_compound_hets(&[&a, &b], &fam, InheritanceMode::AutosomalRecessive);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_affected_parent_blocks_pairing() {
        let fam = family(Some(AffectionStatus::Affected), Some(AffectionStatus::Unaffected));
        let a = record(100, Some(Genotype::Het), Some(Genotype::HomRef));
        let b = record(200, Some(Genotype::HomRef), Some(Genotype::Het));
        let pairs = find_compound_hets(&[&a, &b], &fam, InheritanceMode::AutosomalRecessive);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_homozygous_child_records_do_not_pair() {
        let mut a = record(100, Some(Genotype::Het), Some(Genotype::HomRef));
        a.child = Some(Genotype::HomAlt);
        let b = record(200, Some(Genotype::HomRef), Some(Genotype::Het));
        let pairs = find_compound_hets(
            &[&a, &b],
            &unaffected_trio(),
            InheritanceMode::AutosomalRecessive,
        );
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_three_variants_all_pairs_searched() {
        // a pairs with b and with c; b and c share the maternal origin
        let a = record(100, Some(Genotype::HomRef), Some(Genotype::Het));
        let b = record(200, Some(Genotype::Het), Some(Genotype::HomRef));
        let c = record(300, Some(Genotype::Het), Some(Genotype::HomRef));
        let pairs = find_compound_hets(
            &[&a, &b, &c],
            &unaffected_trio(),
            InheritanceMode::AutosomalRecessive,
        );
        // (a,b) and (a,c) confirmed, each contributing two classifications
        assert_eq!(pairs.len(), 4);
        let a_partners: Vec<_> = pairs
            .iter()
            .filter(|(key, _)| *key == a.key)
            .map(|(_, c)| c.clone())
            .collect();
        assert_eq!(a_partners.len(), 2);
    }

    #[test]
    fn test_x_pairing_father_carrier_is_hemizygous() {
        let x_record = |pos, mother, father| {
            let mut r = record(pos, mother, father);
            r.key = VariantKey::new(Chromosome::X, pos, "C", "T");
            r
        };
        let a = x_record(100, Some(Genotype::Het), Some(Genotype::HomRef));
        let b = x_record(200, Some(Genotype::HomRef), Some(Genotype::HomAlt));
        let pairs = find_compound_hets(
            &[&a, &b],
            &unaffected_trio(),
            InheritanceMode::XLinkedRecessive,
        );
        assert_eq!(pairs.len(), 2);
        assert!(matches!(&pairs[0].1, Classification::CompoundHet { .. }));
    }
}
