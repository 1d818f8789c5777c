//! End-to-end fidelity tests: every supported kind must survive the trip
//! from source array, through the catalog, out of a client — element-wise
//! equal, same kind, same item width, same shape.
//!
//! Every scenario runs twice: against the local client and against a client
//! whose reads round-trip through the wire codec. The two must be
//! indistinguishable.

use num_complex::Complex32;
use trellis_rs::{
    from_tree, from_tree_with_codec, Array, Client, Entry, JsonWireCodec, Kind,
    SourceKind, Tree,
};

/// The §8 kind matrix: one 10-element array per supported kind.
fn array_cases() -> Vec<(&'static str, Array)> {
    vec![
        ("bool", Array::from_vec((0..10).map(|i| i % 2 == 1).collect())),
        ("int32", Array::from_vec((-10i32..10).collect::<Vec<_>>())),
        ("uint8", Array::from_vec((0u8..10).collect::<Vec<_>>())),
        ("uint16", Array::from_vec((0u16..10).collect::<Vec<_>>())),
        ("uint64", Array::from_vec((0u64..10).collect::<Vec<_>>())),
        ("float32", Array::from_vec((0..10).map(|i| i as f32).collect::<Vec<_>>())),
        (
            "complex64",
            Array::from_vec((0..10).map(|i| Complex32::new(0.0, i as f32)).collect::<Vec<_>>()),
        ),
        (
            "bytes3",
            Array::fixed_bytes(3, (b'a'..=b'j').map(|c| [c; 3]).collect::<Vec<_>>()).unwrap(),
        ),
    ]
}

/// A 0-d array holding the first element of each kind-case.
fn scalar_cases() -> Vec<(&'static str, Array)> {
    array_cases()
        .into_iter()
        .map(|(name, array)| {
            let width = array.dtype().size;
            let first = array.data()[..width].to_vec();
            (name, Array::from_raw_parts(array.dtype(), vec![], first).unwrap())
        })
        .collect()
}

fn tree_of(cases: &[(&'static str, Array)]) -> Tree {
    Tree::from_entries(
        cases
            .iter()
            .map(|(name, array)| (*name, Entry::array(array.clone()).unwrap())),
    )
}

fn clients_of(cases: &[(&'static str, Array)]) -> Vec<Client> {
    vec![
        from_tree(tree_of(cases)),
        from_tree_with_codec(tree_of(cases), JsonWireCodec::new()),
    ]
}

// ============================================================================
// 1. Full-array round trip preserves values, kind, and width
// ============================================================================

#[test]
fn test_array_round_trip_preserves_dtype() {
    let cases = array_cases();
    for client in clients_of(&cases) {
        for (name, expected) in &cases {
            let actual = client.get(name).unwrap().read_full().unwrap();
            assert_eq!(&actual, expected, "kind case {name}");
            assert_eq!(actual.dtype(), expected.dtype(), "kind case {name}");
            assert_eq!(actual.shape(), &[10], "kind case {name}");
        }
    }
}

// ============================================================================
// 2. The kinds stay distinguishable — no silent reinterpretation
// ============================================================================

#[test]
fn test_booleans_come_back_as_booleans() {
    let cases = array_cases();
    for client in clients_of(&cases) {
        let array = client.get("bool").unwrap().read_full().unwrap();
        assert_eq!(array.dtype().kind, SourceKind::Bool);
        assert_eq!(array.dtype().size, 1);
        assert_eq!(
            array.to_vec::<bool>().unwrap(),
            (0..10).map(|i| i % 2 == 1).collect::<Vec<_>>()
        );
        // a uint8 of the same width must stay a distinct kind
        let uint8 = client.get("uint8").unwrap().read_full().unwrap();
        assert_eq!(uint8.dtype().kind, SourceKind::UInt);
    }
}

#[test]
fn test_signed_values_survive() {
    let cases = array_cases();
    for client in clients_of(&cases) {
        let array = client.get("int32").unwrap().read_full().unwrap();
        assert_eq!(array.to_vec::<i32>().unwrap(), (-10..10).collect::<Vec<_>>());
    }
}

#[test]
fn test_uint64_width_is_not_truncated() {
    let tree = Tree::from_entries([(
        "wide",
        Entry::array(Array::from_vec(vec![u64::MAX, 0, u64::MAX - 1])).unwrap(),
    )]);
    let client = from_tree_with_codec(tree, JsonWireCodec::new());
    let array = client.get("wide").unwrap().read_full().unwrap();
    assert_eq!(array.dtype().size, 8);
    assert_eq!(array.to_vec::<u64>().unwrap(), vec![u64::MAX, 0, u64::MAX - 1]);
}

// ============================================================================
// 3. Fixed-width byte strings are byte-exact
// ============================================================================

#[test]
fn test_fixed_bytes_width_exact() {
    let cases = array_cases();
    for client in clients_of(&cases) {
        let array = client.get("bytes3").unwrap().read_full().unwrap();
        assert_eq!(array.dtype().kind, SourceKind::Bytes);
        assert_eq!(array.dtype().size, 3, "3-byte strings stay 3 bytes per element");
        assert_eq!(array.nbytes(), 30);
        assert_eq!(array.bytes_at(0).unwrap(), b"aaa");
        assert_eq!(array.bytes_at(9).unwrap(), b"jjj");
    }
}

// ============================================================================
// 4. Scalars stay zero-dimensional
// ============================================================================

#[test]
fn test_scalar_round_trip_keeps_empty_shape() {
    let cases = scalar_cases();
    for client in clients_of(&cases) {
        for (name, expected) in &cases {
            let actual = client.get(name).unwrap().read_full().unwrap();
            assert_eq!(&actual, expected, "scalar case {name}");
            assert_eq!(actual.shape(), &[] as &[usize], "scalar case {name} must stay 0-d");
            assert_eq!(actual.ndim(), 0);
        }
    }
}

#[test]
fn test_scalar_values_decode() {
    let cases = scalar_cases();
    for client in clients_of(&cases) {
        let value = client.get("int32").unwrap().read_full().unwrap();
        assert_eq!(value.to_scalar::<i32>().unwrap(), -10);
        let value = client.get("complex64").unwrap().read_full().unwrap();
        assert_eq!(value.to_scalar::<Complex32>().unwrap(), Complex32::new(0.0, 0.0));
    }
}

// ============================================================================
// 5. Full-slice shorthand equals the explicit full range
// ============================================================================

#[test]
fn test_full_slice_idempotence() {
    let cases = array_cases();
    for client in clients_of(&cases) {
        for (name, _) in &cases {
            let node = client.get(name).unwrap();
            let shorthand = node.read_full().unwrap();
            let explicit = node.read(0..10).unwrap();
            assert_eq!(shorthand, explicit, "kind case {name}");
        }
    }
}

// ============================================================================
// 6. Partial slices through the boundary
// ============================================================================

#[test]
fn test_sliced_reads_match_local() {
    let local = from_tree(tree_of(&array_cases()));
    let remote = from_tree_with_codec(tree_of(&array_cases()), JsonWireCodec::new());
    for (name, _) in &array_cases() {
        let a = local.get(name).unwrap().read(2..7).unwrap();
        let b = remote.get(name).unwrap().read(2..7).unwrap();
        assert_eq!(a, b, "kind case {name}");
        assert_eq!(a.shape(), &[5]);
    }
}

// ============================================================================
// 7. Multi-dimensional entries
// ============================================================================

#[test]
fn test_2d_round_trip_and_slice() {
    use trellis_rs::DimRange;

    let matrix = Array::from_shape_vec(vec![4, 5], (0i16..20).collect()).unwrap();
    let tree = Tree::from_entries([("m", Entry::array(matrix.clone()).unwrap())]);
    for client in [from_tree(tree.clone()), from_tree_with_codec(tree, JsonWireCodec::new())] {
        let node = client.get("m").unwrap();
        assert_eq!(node.read_full().unwrap(), matrix);

        let sub = node
            .read([DimRange::from(1..3), DimRange::new(0, Some(5), 2)])
            .unwrap();
        assert_eq!(sub.shape(), &[2, 3]);
        assert_eq!(sub.to_vec::<i16>().unwrap(), vec![5, 7, 9, 10, 12, 14]);
    }
}

// ============================================================================
// 8. The structure descriptor agrees with the data
// ============================================================================

#[test]
fn test_reported_structure_matches() {
    let cases = array_cases();
    for client in clients_of(&cases) {
        let structure = client.get("complex64").unwrap().structure().unwrap();
        let array_structure = structure.as_array().unwrap();
        assert_eq!(array_structure.kind, Kind::Complex);
        assert_eq!(array_structure.item_width, 8);
        assert_eq!(array_structure.shape.as_slice(), &[10]);
    }
}
