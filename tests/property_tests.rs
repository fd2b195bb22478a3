//! Property-based tests for the merge, filter, region and pairing
//! invariants.

use proptest::prelude::*;

use trio_triage::inheritance::find_compound_hets;
use trio_triage::{
    filter, merge_family_calls, AffectionStatus, Chromosome, Classification, Consequence,
    CopyNumberDirection, Family, FamilyCalls, FilterConfig, FilterVerdict, Genotype, Individual,
    InheritanceMode, Role, Sex, SyndromeRegion, TrioVariantRecord, VariantCall, VariantKey,
};

fn arb_genotype() -> impl Strategy<Value = Option<Genotype>> {
    prop_oneof![
        Just(None),
        Just(Some(Genotype::HomRef)),
        Just(Some(Genotype::Het)),
        Just(Some(Genotype::HomAlt)),
    ]
}

fn arb_call() -> impl Strategy<Value = VariantCall> {
    (1u8..=5, 1u64..500, arb_genotype()).prop_map(|(chrom, pos, genotype)| {
        VariantCall::new(
            &chrom.to_string(),
            pos,
            "A",
            "G",
            genotype,
            Consequence::MissenseVariant,
        )
    })
}

fn trio() -> Family {
    Family::new(
        "fam",
        Individual::new("child", Sex::Female, AffectionStatus::Affected, Role::Child),
    )
    .with_mother(Individual::new(
        "mum",
        Sex::Female,
        AffectionStatus::Unaffected,
        Role::Mother,
    ))
    .unwrap()
    .with_father(Individual::new(
        "dad",
        Sex::Male,
        AffectionStatus::Unaffected,
        Role::Father,
    ))
    .unwrap()
}

fn het_record(pos: u64, mother: Option<Genotype>, father: Option<Genotype>) -> TrioVariantRecord {
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

proptest! {
    // Merged output is strictly ordered by locus with no duplicate keys,
    // for any combination of supplied streams.
    #[test]
    fn merge_output_is_sorted_and_unique(
        child in prop::collection::vec(arb_call(), 0..30),
        mother in prop::option::of(prop::collection::vec(arb_call(), 0..30)),
        father in prop::option::of(prop::collection::vec(arb_call(), 0..30)),
    ) {
        let calls = FamilyCalls { child, mother, father };
        let records = merge_family_calls(&trio(), &calls);
        prop_assert!(records.windows(2).all(|w| w[0].key < w[1].key));
    }

    // Merging twice gives the same records.
    #[test]
    fn merge_is_deterministic(
        child in prop::collection::vec(arb_call(), 0..20),
        mother in prop::option::of(prop::collection::vec(arb_call(), 0..20)),
    ) {
        let calls = FamilyCalls { child, mother, father: None };
        let family = trio();
        prop_assert_eq!(
            merge_family_calls(&family, &calls),
            merge_family_calls(&family, &calls)
        );
    }

    // A frequency strictly above the ceiling always fails; at or below,
    // the frequency check never fails.
    #[test]
    fn frequency_threshold_is_exclusive(af in 0.0f64..=1.0, max in 0.0f64..=1.0) {
        let mut record = het_record(100, Some(Genotype::HomRef), Some(Genotype::HomRef));
        record.allele_frequency = Some(af);
        let config = FilterConfig {
            max_allele_frequency: max,
            ..FilterConfig::default()
        };
        let verdict = filter::evaluate(&record, &config);
        if af > max {
            prop_assert!(!verdict.is_pass());
        } else {
            prop_assert_eq!(verdict, FilterVerdict::Pass { frequency_missing: false });
        }
    }

    // A missing frequency never fails on frequency grounds, whatever the
    // ceiling.
    #[test]
    fn missing_frequency_never_fails(max in 0.0f64..=1.0) {
        let mut record = het_record(100, None, None);
        record.allele_frequency = None;
        let config = FilterConfig {
            max_allele_frequency: max,
            ..FilterConfig::default()
        };
        let verdict = filter::evaluate(&record, &config);
        prop_assert_eq!(verdict, FilterVerdict::Pass { frequency_missing: true });
    }

    // Region containment is inclusive at both boundary coordinates.
    #[test]
    fn region_containment_inclusive(
        start in 1u64..10_000,
        len in 0u64..10_000,
        pos in 1u64..30_000,
    ) {
        let end = start + len;
        let region = SyndromeRegion::new(
            Chromosome::Autosome(1),
            start,
            end,
            "region",
            CopyNumberDirection::Either,
        ).unwrap();
        prop_assert!(region.contains(start));
        prop_assert!(region.contains(end));
        prop_assert_eq!(region.contains(pos), start <= pos && pos <= end);
    }

    // A confirmed compound-het pair always traces its two variants to
    // opposite parents, never the same one.
    #[test]
    fn compound_het_origins_are_opposite(
        mother_a in arb_genotype(),
        father_a in arb_genotype(),
        mother_b in arb_genotype(),
        father_b in arb_genotype(),
    ) {
        let a = het_record(100, mother_a, father_a);
        let b = het_record(200, mother_b, father_b);
        let pairs = find_compound_hets(
            &[&a, &b],
            &trio(),
            InheritanceMode::AutosomalRecessive,
        );
        let confirmed = pairs
            .iter()
            .any(|(_, c)| matches!(c, Classification::CompoundHet { .. }));
        if confirmed {
            let maternal_a = mother_a == Some(Genotype::Het)
                && mother_b == Some(Genotype::HomRef)
                && father_b == Some(Genotype::Het)
                && father_a == Some(Genotype::HomRef);
            let maternal_b = mother_b == Some(Genotype::Het)
                && mother_a == Some(Genotype::HomRef)
                && father_a == Some(Genotype::Het)
                && father_b == Some(Genotype::HomRef);
            prop_assert!(maternal_a || maternal_b);
        }
    }
}
