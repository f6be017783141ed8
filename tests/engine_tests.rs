//! End-to-end tests of the matching engine on small hand-built and randomized sides.

use std::collections::HashSet;

use lesk_match::matching::engine::eliminate;
use lesk_match::matching::scoring::trim;
use lesk_match::matching::SignatureSet;
use lesk_match::{
    MatchConfig, MatchEngine, MatchError, Point, Property, PropertySet, RawDistanceRecord, Resid,
    Side, TieBreak,
};

fn positive() -> PropertySet {
    PropertySet::empty().with(Property::Positive)
}

fn negative() -> PropertySet {
    PropertySet::empty().with(Property::Negative)
}

fn point(resid: &str, properties: PropertySet) -> Point {
    Point::new(resid, resid).with_properties(properties)
}

fn labelled(records: &[(&str, &str, &str, &str, usize)]) -> Side {
    Side::new(
        records
            .iter()
            .map(|&(la, ra, lb, rb, bin)| {
                RawDistanceRecord::new(Point::new(la, ra), Point::new(lb, rb), bin)
            })
            .collect(),
    )
}

/// Small xorshift generator so randomized cases are reproducible
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn random_side(rng: &mut XorShift, prefix: &str, n_points: usize) -> Side {
    let labels = ["LYS", "ASP", "PHE", "GLU", "ARG"];
    let points: Vec<Point> = (0..n_points)
        .map(|i| Point::new(labels[rng.below(labels.len())], format!("{prefix}{i}")))
        .collect();

    let mut side = Side::default();
    for i in 0..n_points {
        for j in i + 1..n_points {
            // Leave some pairs out so signatures differ
            if rng.below(4) == 0 {
                continue;
            }
            side.push(RawDistanceRecord::new(
                points[i].clone(),
                points[j].clone(),
                rng.below(12),
            ));
        }
    }
    side
}

#[test]
fn test_charged_pair_example() {
    let pattern = Side::new(vec![RawDistanceRecord::new(
        point("P1", positive()),
        point("P2", negative()),
        3,
    )]);
    // S3 only reaches the other points at bin 9, which the pattern never shows
    let structure = Side::new(vec![
        RawDistanceRecord::new(point("S1", positive()), point("S2", negative()), 3),
        RawDistanceRecord::new(point("S3", positive()), point("S1", positive()), 9),
        RawDistanceRecord::new(point("S3", positive()), point("S2", negative()), 9),
    ]);

    let mut engine = MatchEngine::new(pattern, structure);
    let outcome = engine.run().unwrap();

    let pairs: Vec<(&str, &str)> = outcome
        .matches
        .iter()
        .map(|m| (m.pattern_resid.as_str(), m.structure_resid.as_str()))
        .collect();
    assert_eq!(pairs, vec![("P1", "S1"), ("P2", "S2")]);
    assert_eq!(outcome.killed, vec![Resid::new("S3")]);
    assert_eq!(outcome.structure_points, 2);
    assert!(outcome
        .matches
        .iter()
        .all(|m| m.structure_resid.as_str() != "S3"));
}

#[test]
fn test_higher_accuracy_kills_more() {
    let pattern = labelled(&[("LYS", "P1", "ASP", "P2", 3), ("LYS", "P1", "ASP", "P3", 6)]);
    let structure = labelled(&[
        ("LYS", "S1", "ASP", "S2", 3),
        ("LYS", "S1", "ASP", "S3", 8),
        ("LYS", "S4", "ASP", "S3", 6),
    ]);

    let run = |accuracy: f64| {
        let config = MatchConfig {
            accuracy_threshold: accuracy,
            ..MatchConfig::default()
        };
        MatchEngine::with_config(pattern.clone(), structure.clone(), config)
            .run()
            .unwrap()
    };

    let lenient = run(50.0);
    let strict = run(100.0);

    assert!(lenient.killed.is_empty());
    assert_eq!(lenient.structure_points, 4);
    assert_eq!(strict.killed, vec![Resid::new("S1"), Resid::new("S4")]);
    assert!(strict.killed.len() > lenient.killed.len());
}

#[test]
fn test_invert_pairs_complementary_charges() {
    let pattern = labelled(&[("LYS", "P1", "PHE", "P2", 4)]);
    let structure = labelled(&[("ASP", "S1", "PHE", "S2", 4)]);

    // Without inversion ASP has no counterpart, and PHE loses its only record with it
    let plain = MatchEngine::new(pattern.clone(), structure.clone())
        .run()
        .unwrap();
    assert_eq!(plain.killed, vec![Resid::new("S1")]);
    assert!(plain.matches.is_empty());

    let config = MatchConfig {
        invert_pattern_properties: true,
        ..MatchConfig::default()
    };
    let inverted = MatchEngine::with_config(pattern, structure, config)
        .run()
        .unwrap();
    assert_eq!(inverted.matches.len(), 2);
    assert_eq!(inverted.matches[0].pattern_resid.as_str(), "P1");
    assert_eq!(inverted.matches[0].structure_resid.as_str(), "S1");
}

#[test]
fn test_tie_break_is_configurable() {
    let pattern = labelled(&[("LYS", "P1", "ASP", "P2", 3)]);
    let structure = labelled(&[("LYS", "S1", "ASP", "S2", 3), ("LYS", "S3", "ASP", "S4", 3)]);

    let config = MatchConfig {
        tie_break: TieBreak::LastEncountered,
        ..MatchConfig::default()
    };
    let outcome = MatchEngine::with_config(pattern.clone(), structure.clone(), config)
        .run()
        .unwrap();
    assert_eq!(outcome.matches[0].structure_resid.as_str(), "S3");

    let outcome = MatchEngine::new(pattern, structure).run().unwrap();
    assert_eq!(outcome.matches[0].structure_resid.as_str(), "S1");
}

#[test]
fn test_iteration_cap_returns_no_result() {
    let pattern = labelled(&[("LYS", "P1", "ASP", "P2", 3)]);
    let structure = labelled(&[("LYS", "S1", "ASP", "S2", 3), ("PHE", "S3", "ASP", "S2", 3)]);
    let config = MatchConfig {
        max_iterations: 2,
        ..MatchConfig::default()
    };

    let result = MatchEngine::with_config(pattern, structure, config).run();
    assert!(matches!(
        result,
        Err(MatchError::NonConvergence { iterations: 2 })
    ));
}

#[test]
fn test_pattern_side_is_never_eliminated() {
    let pattern = labelled(&[("LYS", "P1", "ASP", "P2", 3), ("PHE", "P3", "ASP", "P2", 5)]);
    let structure = labelled(&[("GLU", "S1", "ARG", "S2", 3)]);

    let mut engine = MatchEngine::new(pattern, structure);
    engine.run().unwrap();
    assert_eq!(engine.pattern().live_record_count(), 2);
}

#[test]
fn test_randomized_runs_reach_a_fixed_point() {
    let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);

    for case in 0..200 {
        let (n_pattern, n_structure) = (2 + rng.below(5), 2 + rng.below(10));
        let pattern = random_side(&mut rng, "P", n_pattern);
        let structure = random_side(&mut rng, "S", n_structure);
        let accuracy = [25.0, 50.0, 75.0, 100.0][rng.below(4)];
        let config = MatchConfig {
            accuracy_threshold: accuracy,
            ..MatchConfig::default()
        };

        let mut engine = MatchEngine::with_config(pattern, structure, config);
        let outcome = engine
            .run()
            .unwrap_or_else(|e| panic!("case {case}: {e}"));

        // An empty side ends the run early with nothing to pair
        if outcome.pattern_points == 0 || outcome.structure_points == 0 {
            assert!(outcome.matches.is_empty(), "case {case}");
            continue;
        }

        // One more round must not change anything
        let (p, s) = engine.signatures();
        assert_eq!((p.len(), s.len()), (outcome.pattern_points, outcome.structure_points));
        let mut structure = engine.structure().clone();
        let killed = eliminate(&p, &s, &mut structure, accuracy);
        assert!(killed.is_empty(), "case {case}: {killed:?} killed after convergence");
    }
}

#[test]
fn test_randomized_elimination_is_monotone() {
    let mut rng = XorShift(0x2545_f491_4f6c_dd1d);

    for case in 0..100 {
        let (n_pattern, n_structure) = (2 + rng.below(5), 2 + rng.below(10));
        let pattern = random_side(&mut rng, "P", n_pattern);
        let mut structure = random_side(&mut rng, "S", n_structure);
        let mut dead: HashSet<Resid> = HashSet::new();
        let mut previous: Option<HashSet<Resid>> = None;

        for _ in 0..20 {
            let mut p = SignatureSet::build(&pattern, false);
            let mut s = SignatureSet::build(&structure, false);

            let again = SignatureSet::build(&structure, false);
            assert_eq!(s, again, "case {case}: rebuilding changed the signatures");

            trim(&mut p, &mut s);

            let live: HashSet<Resid> = structure.live_resids().into_iter().collect();
            assert!(live.is_disjoint(&dead), "case {case}: a dead point came back");
            if let Some(previous) = &previous {
                assert!(live.is_subset(previous), "case {case}: live set grew");
            }

            dead.extend(eliminate(&p, &s, &mut structure, 50.0));
            previous = Some(live);
        }
    }
}
