use cls_classifier::{
    CaseName, CaseTable, DrfTwist, REFERENCE_CASES, SymmetryNormalizer, case_for_sequence,
    classify,
};
use log::info;
use puzzle_kinematics::{CUBE3, CubeState, Face, MoveSequence};

fn sequence(alg: &str) -> MoveSequence {
    alg.parse().unwrap()
}

#[test_log::test]
fn test_reference_list_builds_without_skips() {
    let normalizer = SymmetryNormalizer::new(&CUBE3);
    let table = CaseTable::build(&CUBE3, &normalizer, REFERENCE_CASES);
    assert_eq!(table.variant_count(), REFERENCE_CASES.len());

    let mut names: Vec<String> = table.iter().map(|(name, _)| name.to_string()).collect();
    names.sort();
    let mut expected = vec!["+9", "-22", "C1", "C2", "C3", "O3", "O7"];
    expected.sort_unstable();
    assert_eq!(names, expected);
    info!("built {} cases", table.case_count());
}

#[test_log::test]
fn test_every_variant_reclassifies_to_its_key() {
    let normalizer = SymmetryNormalizer::new(&CUBE3);
    let table = CaseTable::build(&CUBE3, &normalizer, REFERENCE_CASES);
    for (name, records) in table.iter() {
        for record in records {
            let rederived =
                case_for_sequence(&CUBE3, &normalizer, &sequence(record.algorithm)).unwrap();
            assert_eq!(rederived, name, "{}", record.algorithm);
        }
    }
}

#[test_log::test]
fn test_variants_group_under_auf_and_rotation() {
    let normalizer = SymmetryNormalizer::new(&CUBE3);
    let sune = case_for_sequence(&CUBE3, &normalizer, &sequence("R U R' U R U2 R'")).unwrap();
    assert_eq!(sune.to_string(), "C1");
    for variant in [
        "U R U R' U R U2 R' U'",
        "U2 R U R' U R U2 R' U2",
        "R U R' U R U2 R' y",
        "R U R' U R U2 R' x2",
    ] {
        let name = case_for_sequence(&CUBE3, &normalizer, &sequence(variant)).unwrap();
        assert_eq!(name, sune, "{variant}");
    }
}

#[test_log::test]
fn test_solved_state_is_c0_even_when_rotated() {
    let normalizer = SymmetryNormalizer::new(&CUBE3);
    assert_eq!(
        classify(&CUBE3, &CubeState::solved()).unwrap().to_string(),
        "C0"
    );
    for rotation in ["y2", "x z'", "z y x2"] {
        let state = CUBE3
            .apply_sequence(&CubeState::solved(), &sequence(rotation))
            .unwrap();
        let canonical = normalizer.pre_normalize(&state);
        assert_eq!(
            classify(&CUBE3, &canonical).unwrap().to_string(),
            "C0",
            "{rotation}"
        );
    }
}

#[test_log::test]
fn test_adjustment_matches_independent_composition() {
    // Reference corner parked in the upper layer, two turns away from UFR
    let mut case = CubeState::solved();
    case.corners.permutation = [4, 2, 1, 3, 0, 5, 6, 7];
    case.corners.orientation = [0, 1, 2, 0, 0, 0, 0, 0];

    let shifted = CUBE3.apply_axis_turn(&case, Face::U, 2).unwrap();
    assert_eq!(shifted.corners.permutation[2], 4);

    let expected = CaseName::TopLayer {
        twist: DrfTwist::Oriented,
        shape: 7,
    };
    assert_eq!(classify(&CUBE3, &case).unwrap(), expected);
    assert_eq!(classify(&CUBE3, &shifted).unwrap(), expected);

    let u_turn = CUBE3.axis_transformation(Face::U).unwrap();
    let manually_adjusted = shifted.compose(u_turn).compose(u_turn);
    assert_eq!(manually_adjusted, case);
}

#[test_log::test]
fn test_normalization_properties_over_scrambles() {
    let normalizer = SymmetryNormalizer::new(&CUBE3);
    for alg in [
        "R U R' U R U2 R' y",
        "x R2 D' z F B' y2 U",
        "z' x' L U' y R D2",
    ] {
        let state = CUBE3
            .apply_sequence(&CubeState::solved(), &sequence(alg))
            .unwrap();
        let normalized = normalizer.normalize(&state);
        assert_eq!(normalized.centers.permutation, [0, 1, 2, 3, 4, 5], "{alg}");
        assert_eq!(normalizer.normalize(&normalized), normalized, "{alg}");
    }
}
