//! End-to-end exercise of a diff session: build the correspondence stores
//! from one match set, derive the display order, filter with a criterion
//! tree, and delete a match interactively.

use diffscope::prelude::*;
use proptest::prelude::*;

fn addr(value: u64) -> Address {
    Address::new(value)
}

fn matched(p: u64, s: u64) -> AddressPair {
    AddressPair::matched(addr(p), addr(s))
}

#[test]
fn session_lifecycle() {
    // the upstream diffing stage hands over pairs and match metadata
    let pairs = [
        matched(0x1000, 0x8000),
        AddressPair::primary_only(addr(0x1400)),
        AddressPair::secondary_only(addr(0x8800)),
        matched(0x2000, 0x9000),
    ];

    let mut index = AddressCorrespondenceIndex::build(&pairs);
    let mut table = MatchTable::new();
    table
        .insert(addr(0x1000), addr(0x8000), "callgraph MD index")
        .unwrap();
    table
        .insert(addr(0x2000), addr(0x9000), "basic block hash")
        .unwrap();

    // click on a secondary node: find its counterpart and its match record
    assert_eq!(
        index.opposite_address(addr(0x9000), Side::Secondary),
        Some(addr(0x2000))
    );
    assert_eq!(
        table.get(addr(0x9000), Side::Secondary),
        Some(&"basic block hash")
    );

    // the table view renders the aligned order
    let ordered = align(&pairs, Side::Primary);
    assert_eq!(
        ordered,
        vec![
            matched(0x1000, 0x8000),
            AddressPair::primary_only(addr(0x1400)),
            AddressPair::secondary_only(addr(0x8800)),
            matched(0x2000, 0x9000),
        ]
    );

    // the user deletes one match; both stores agree afterwards
    assert!(index.remove(addr(0x1000), addr(0x8000)));
    assert_eq!(table.remove(addr(0x1000), addr(0x8000)), Some("callgraph MD index"));
    assert!(!index.contains_pair(addr(0x1000), addr(0x8000)));
    assert_eq!(table.len(), 1);

    // re-derive the display order from the surviving pairs
    let reordered = align(&index.pairs(), Side::Primary);
    assert_eq!(reordered.len(), 3);
    assert!(!reordered.contains(&matched(0x1000, 0x8000)));
}

#[test]
fn reference_alignment_scenario() {
    // pairs [(1,10), (2,-), (-,20), (3,30)] anchored on primary:
    // (-,20) lands between (1,10) and (3,30) because 10 < 20 < 30
    let pairs = [
        matched(1, 10),
        AddressPair::primary_only(addr(2)),
        AddressPair::secondary_only(addr(20)),
        matched(3, 30),
    ];

    let ordered = align(&pairs, Side::Primary);
    assert_eq!(
        ordered,
        vec![
            matched(1, 10),
            AddressPair::primary_only(addr(2)),
            AddressPair::secondary_only(addr(20)),
            matched(3, 30),
        ]
    );
}

#[test]
fn criterion_tree_filters_the_merged_node_set() {
    let pairs = [
        matched(0x1000, 0x8000),
        AddressPair::primary_only(addr(0x1400)),
        AddressPair::secondary_only(addr(0x8800)),
        matched(0x2000, 0x9000),
    ];
    let ordered = align(&pairs, Side::Primary);

    // select rows that are matched AND not below 0x2000 on the primary side
    let mut tree: CriterionTree<AddressPair> = CriterionTree::new();
    let and = tree
        .append_operator(tree.root(), CriterionOperator::And)
        .unwrap()
        .node();
    tree.append_condition(and, Box::new(|pair: &AddressPair| pair.is_matched()))
        .unwrap();
    let not = tree.append_operator(and, CriterionOperator::Not).unwrap().node();
    tree.append_condition(
        not,
        Box::new(|pair: &AddressPair| {
            pair.primary().is_some_and(|p| p < Address::new(0x2000))
        }),
    )
    .unwrap();

    let selected = CriterionExecutor::execute(&tree, &ordered).unwrap();
    assert_eq!(selected, vec![&matched(0x2000, 0x9000)]);

    // clearing the tree makes evaluation a typed arity error, not an
    // empty selection
    tree.remove_all().unwrap();
    assert!(matches!(
        CriterionExecutor::execute(&tree, &ordered),
        Err(Error::CriterionArity { .. })
    ));
}

#[test]
fn duplicate_match_aborts_the_batch_load() {
    let mut table = MatchTable::new();
    table.insert(addr(5), addr(50), ()).unwrap();

    assert!(matches!(
        table.insert(addr(5), addr(50), ()),
        Err(Error::DuplicateMatch { .. })
    ));
    assert_eq!(table.len(), 1);
}

/// Builds a pair set from two per-side unique address pools: a shared
/// prefix becomes matched pairs, the remainders stay unmatched.
fn pair_set(primaries: &[u64], secondaries: &[u64]) -> Vec<AddressPair> {
    let matched_count = primaries.len().min(secondaries.len()) / 2;
    let mut pairs = Vec::new();

    for i in 0..matched_count {
        pairs.push(matched(primaries[i], secondaries[i]));
    }
    for &p in &primaries[matched_count..] {
        pairs.push(AddressPair::primary_only(addr(p)));
    }
    for &s in &secondaries[matched_count..] {
        pairs.push(AddressPair::secondary_only(addr(s)));
    }

    pairs
}

fn sorted_key(pairs: &[AddressPair]) -> Vec<(Option<Address>, Option<Address>)> {
    let mut keys: Vec<_> = pairs.iter().map(|p| (p.primary(), p.secondary())).collect();
    keys.sort();
    keys
}

proptest! {
    #[test]
    fn alignment_is_a_permutation_for_any_input(
        primaries in proptest::collection::hash_set(0_u64..10_000, 0..64),
        secondaries in proptest::collection::hash_set(0_u64..10_000, 0..64),
    ) {
        let primaries: Vec<u64> = primaries.into_iter().collect();
        let secondaries: Vec<u64> = secondaries.into_iter().collect();
        let pairs = pair_set(&primaries, &secondaries);

        for anchor in [Side::Primary, Side::Secondary] {
            let ordered = align(&pairs, anchor);
            prop_assert_eq!(ordered.len(), pairs.len());
            prop_assert_eq!(sorted_key(&ordered), sorted_key(&pairs));
        }
    }

    #[test]
    fn alignment_preserves_anchor_order_of_matches(
        primaries in proptest::collection::hash_set(0_u64..10_000, 2..64),
        secondaries in proptest::collection::hash_set(0_u64..10_000, 2..64),
    ) {
        let primaries: Vec<u64> = primaries.into_iter().collect();
        let secondaries: Vec<u64> = secondaries.into_iter().collect();
        let pairs = pair_set(&primaries, &secondaries);

        for anchor in [Side::Primary, Side::Secondary] {
            let anchors: Vec<Address> = align(&pairs, anchor)
                .iter()
                .filter(|pair| pair.is_matched())
                .filter_map(|pair| pair.address(anchor))
                .collect();
            prop_assert!(anchors.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn index_bijection_holds_for_matched_pairs(
        primaries in proptest::collection::hash_set(0_u64..10_000, 0..64),
        secondaries in proptest::collection::hash_set(0_u64..10_000, 0..64),
    ) {
        let primaries: Vec<u64> = primaries.into_iter().collect();
        let secondaries: Vec<u64> = secondaries.into_iter().collect();
        let pairs = pair_set(&primaries, &secondaries);
        let index = AddressCorrespondenceIndex::build(&pairs);

        prop_assert_eq!(index.len(), pairs.len());
        for pair in &pairs {
            if let (Some(p), Some(s)) = (pair.primary(), pair.secondary()) {
                prop_assert_eq!(index.opposite_address(p, Side::Primary), Some(s));
                prop_assert_eq!(index.opposite_address(s, Side::Secondary), Some(p));
                prop_assert!(index.contains_pair(p, s));
            }
        }
    }
}
