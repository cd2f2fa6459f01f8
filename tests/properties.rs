//! End-to-end properties of diagram construction.
//!
//! Every diagram is cross-checked against the brute-force oracle on all
//! assignments; the structural tests walk the finished graph directly.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use dnf_bdd::diagram::full_node_count;
use dnf_bdd::formula::Formula;
use dnf_bdd::generate::{all_assignments, random_dnf};
use dnf_bdd::oracle::{evaluate_direct, verify};
use dnf_bdd::search::{best_order_with_stats, rotations};
use dnf_bdd::{best_order, build, Diagram, Error};

// ─── Fixtures ─────────────────────────────────────────────────────────────────

const FIXTURES: &[(&str, &str, usize)] = &[
    ("A", "A", 3),
    ("AB + AC + BC", "ABC", 6),
    ("ABCD + AB + BC + CD", "ABCD", 8),
    ("ABC + D!D + E!E", "DEABC", 5),
    ("ABC + AB + !AC + !ABC", "ABC", 5),
    ("AB + !AB + A!B + !A!B", "AB", 1),
    ("ABC + !A + !B + !C", "ABC", 1),
    ("A!A + B!B + C!C + D!D + E!E + F + G", "FGABCDE", 4),
];

#[test]
fn fixture_sizes() {
    for &(formula, order, size) in FIXTURES {
        let d = build(formula, order).unwrap();
        assert_eq!(d.size(), size, "{} under {}", formula, order);
    }
}

#[test]
fn fixtures_match_oracle() {
    for &(formula, order, _) in FIXTURES {
        let d = build(formula, order).unwrap();
        for bits in all_assignments(d.variable_count()) {
            assert_eq!(
                d.evaluate(&bits).unwrap(),
                evaluate_direct(formula, order, &bits).unwrap(),
                "{} under {} at {}",
                formula,
                order,
                bits
            );
        }
    }
}

#[test]
fn tautology_is_true_everywhere() {
    let d = build("AB + !AB + A!B + !A!B", "AB").unwrap();
    assert!(d.is_tautology());
    for bits in ["00", "01", "10", "11"] {
        assert!(d.evaluate(bits).unwrap());
    }
}

// ─── Equivalence ──────────────────────────────────────────────────────────────

#[test]
fn random_formulas_match_oracle() {
    let mut rng = StdRng::seed_from_u64(2022);
    for n in 1..=10 {
        for _ in 0..8 {
            let formula = random_dnf(&mut rng, n);
            let d = Diagram::with_sorted_order(&formula).unwrap();
            let v = verify(&d).unwrap();
            assert_eq!(v.checked, 1 << n);
            assert!(v.is_ok(), "{}: {:?}", formula, v.mismatches);
        }
    }
}

#[test]
fn random_orders_match_oracle() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [3, 6, 9] {
        for _ in 0..5 {
            let formula = random_dnf(&mut rng, n);
            let mut vars: Vec<char> = Formula::parse(&formula)
                .unwrap()
                .variables()
                .iter()
                .map(|v| v.upper())
                .collect();
            vars.shuffle(&mut rng);
            let order: String = vars.into_iter().collect();
            let d = build(&formula, &order).unwrap();
            assert!(verify(&d).unwrap().is_ok(), "{} under {}", formula, order);
        }
    }
}

#[test]
fn handwritten_formulas_match_oracle() {
    let cases = [
        ("A!B + !AB", "AB"),
        ("A!B + !AB", "BA"),
        ("ABC + !A!B!C", "CAB"),
        ("AB + CD + EF", "ACEBDF"),
        ("AB + CD + EF", "ABCDEF"),
        ("!A + !B + !C + ABC", "BCA"),
        ("A + B!B + !C", "CBA"),
        ("AA + !B!B", "BA"),
    ];
    for (formula, order) in cases {
        let d = build(formula, order).unwrap();
        assert!(verify(&d).unwrap().is_ok(), "{} under {}", formula, order);
    }
}

#[test]
fn semantics_do_not_depend_on_order() {
    let formula = "AB + CD + EF";
    let a = build(formula, "ABCDEF").unwrap();
    let b = build(formula, "ACEBDF").unwrap();
    assert_ne!(a.size(), b.size());

    let order_b: Vec<usize> = "ACEBDF".chars().map(|c| "ABCDEF".find(c).unwrap()).collect();
    for bits in all_assignments(6) {
        let bits_a: Vec<char> = bits.chars().collect();
        let bits_b: String = order_b.iter().map(|&i| bits_a[i]).collect();
        assert_eq!(a.evaluate(&bits).unwrap(), b.evaluate(&bits_b).unwrap(), "{}", bits);
    }
}

#[test]
fn fourteen_variables_match_oracle() {
    let d = build(
        "!AB!F + !C!D + E!F + AGH + I!JK + L!M!N + BJ!M",
        "ABCDEFGHIJKLMN",
    )
    .unwrap();
    let v = verify(&d).unwrap();
    assert_eq!(v.checked, 1 << 14);
    assert!(v.is_ok(), "{:?}", v.mismatches);

    let best = best_order("!AB!F + !C!D + E!F + AGH + I!JK + L!M!N + BJ!M").unwrap();
    assert!(best.size() <= d.size());
    assert!(verify(&best).unwrap().is_ok());
}

#[test]
#[ignore]
fn eighteen_variables_match_oracle() {
    let d = build(
        "!AB!F + !C!D + E!F + AGH + I!JK + L!M!N + XYZ + T",
        "ABCDEFGHIJKLMNXYZT",
    )
    .unwrap();
    let v = verify(&d).unwrap();
    assert_eq!(v.checked, 1 << 18);
    assert!(v.is_ok());
}

// ─── Structure ────────────────────────────────────────────────────────────────

fn check_structure(d: &Diagram) {
    let reachable = d.descendants();
    let terminals = reachable.iter().filter(|r| r.is_terminal()).count();
    assert!((1..=2).contains(&terminals));

    for &r in &reachable {
        let node = d.node(r);
        let Some((low, high)) = node.children() else {
            assert!(r.is_terminal());
            continue;
        };
        assert_ne!(low, high, "redundant node {}", r);
        assert!(node.level < d.node(low).level);
        assert!(node.level < d.node(high).level);
    }
}

#[test]
fn diagrams_are_reduced() {
    let mut rng = StdRng::seed_from_u64(99);
    for n in 2..=9 {
        for _ in 0..5 {
            let formula = random_dnf(&mut rng, n);
            let d = Diagram::with_sorted_order(&formula).unwrap();
            check_structure(&d);
        }
    }
    for &(formula, order, _) in FIXTURES {
        check_structure(&build(formula, order).unwrap());
    }
}

#[test]
fn size_never_exceeds_unreduced_tree() {
    let mut rng = StdRng::seed_from_u64(5);
    for n in 1..=8 {
        let formula = random_dnf(&mut rng, n);
        let d = Diagram::with_sorted_order(&formula).unwrap();
        assert!(d.size() as u64 <= full_node_count(n));
        assert!(d.reduction_ratio() >= 0.0);
    }
    // A single variable cannot be reduced at all.
    assert_eq!(build("A", "A").unwrap().size() as u64, full_node_count(1));
}

#[test]
fn terminals_are_shared() {
    let d = build("AB + CD + EF", "ACEBDF").unwrap();
    let tree = d.tree();
    assert_eq!(tree.terminals().count(), 2);
    let one_parents = d.node(dnf_bdd::reference::NodeRef::ONE).parents.len();
    assert!(one_parents > 1);
}

// ─── Order search ─────────────────────────────────────────────────────────────

#[test]
fn best_order_is_minimal_over_rotations() {
    let mut rng = StdRng::seed_from_u64(31);
    for n in 2..=8 {
        let formula = random_dnf(&mut rng, n);
        let (best, stats) = best_order_with_stats(&formula).unwrap();
        assert_eq!(stats.candidates, n);
        let sorted = Formula::parse(&formula).unwrap().sorted_order();
        let sizes: Vec<usize> = rotations(&sorted)
            .iter()
            .map(|o| build(&formula, &o.to_string()).unwrap().size())
            .collect();
        assert_eq!(best.size(), *sizes.iter().min().unwrap());
        assert_eq!(stats.best_index, sizes.iter().position(|&s| s == best.size()).unwrap());
        assert_eq!(best.order(), &rotations(&sorted)[stats.best_index]);
        assert!(verify(&best).unwrap().is_ok());
    }
}

#[test]
fn best_order_reports_the_order_used() {
    let d = best_order("AB + CD + EF").unwrap();
    let order = d.order().to_string();
    let direct = build("AB + CD + EF", &order).unwrap();
    assert_eq!(d.size(), direct.size());
}

// ─── Errors ───────────────────────────────────────────────────────────────────

#[test]
fn error_contracts() {
    assert_eq!(build("", "AB").unwrap_err(), Error::EmptyInput);
    assert_eq!(build("AB", "").unwrap_err(), Error::EmptyInput);
    assert!(matches!(build("AB", "BA C"), Err(Error::VariableMismatch { .. })));
    assert!(matches!(build("AB + C", "AB"), Err(Error::VariableMismatch { .. })));
    assert!(matches!(build("A & B", "AB"), Err(Error::InvalidFormat { found: '&', .. })));
    assert_eq!(best_order("").unwrap_err(), Error::EmptyInput);

    let d = build("AB", "AB").unwrap();
    assert!(matches!(d.evaluate("0"), Err(Error::InvalidInput { .. })));
    assert!(matches!(d.evaluate("012"), Err(Error::InvalidInput { .. })));
}

#[test]
fn invariant_violation_never_fires() {
    let mut rng = StdRng::seed_from_u64(1234);
    for n in 1..=8 {
        let formula = random_dnf(&mut rng, n);
        let d = Diagram::with_sorted_order(&formula).unwrap();
        for bits in all_assignments(n) {
            let result = d.evaluate(&bits);
            assert!(result.is_ok(), "{} at {}: {:?}", formula, bits, result);
        }
    }
}

#[test]
fn diagram_is_shareable_across_threads() {
    let d = std::sync::Arc::new(build("AB + !CD + E", "ABCDE").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let d = d.clone();
            std::thread::spawn(move || {
                all_assignments(5)
                    .skip(t)
                    .step_by(4)
                    .filter(|bits| d.evaluate(bits).unwrap())
                    .count()
            })
        })
        .collect();
    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let expected = all_assignments(5).filter(|bits| d.evaluate(bits).unwrap()).count();
    assert_eq!(total, expected);
    assert_eq!(d.size(), build("AB + !CD + E", "ABCDE").unwrap().size());
}
