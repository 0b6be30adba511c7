use super::*;

fn collect(capability: Capability, len: usize) -> (Partition, Vec<Segment>) {
    let mut segments = Vec::new();
    let partition = dispatch_split(capability, len, |s| segments.push(s));
    (partition, segments)
}

#[test]
fn partition_covers_every_element_exactly_once() {
    for lanes in [4usize, 8, 16] {
        let cap = Capability::new(true, lanes).unwrap();
        for len in 0..=70usize {
            let (partition, segments) = collect(cap, len);
            assert_eq!(partition.vector_len + partition.remainder, len);
            assert_eq!(partition.vector_len % lanes, 0);
            assert!(partition.remainder < lanes);

            let mut hits = vec![0u8; len];
            for segment in &segments {
                let range = match segment {
                    Segment::Vector { range, .. } | Segment::Scalar { range } => range.clone(),
                };
                assert!(!range.is_empty());
                for i in range {
                    hits[i] += 1;
                }
            }
            assert!(hits.iter().all(|&h| h == 1), "lanes={lanes} len={len}");
        }
    }
}

#[test]
fn vector_segment_precedes_scalar_tail() {
    let cap = Capability::new(true, 8).unwrap();
    let (partition, segments) = collect(cap, 19);
    assert_eq!(
        partition,
        Partition {
            vector_len: 16,
            remainder: 3
        }
    );
    assert_eq!(
        segments,
        vec![
            Segment::Vector {
                range: 0..16,
                width: LaneWidth::X8
            },
            Segment::Scalar { range: 16..19 },
        ]
    );
}

#[test]
fn aligned_runs_skip_the_scalar_kernel() {
    let cap = Capability::new(true, 4).unwrap();
    let (_, segments) = collect(cap, 12);
    assert_eq!(
        segments,
        vec![Segment::Vector {
            range: 0..12,
            width: LaneWidth::X4
        }]
    );
}

#[test]
fn short_runs_only_use_the_scalar_kernel() {
    let cap = Capability::new(true, 8).unwrap();
    let (_, segments) = collect(cap, 5);
    assert_eq!(segments, vec![Segment::Scalar { range: 0..5 }]);
}

#[test]
fn empty_run_is_a_no_op() {
    let cap = Capability::new(true, 8).unwrap();
    let (partition, segments) = collect(cap, 0);
    assert!(partition.is_empty());
    assert!(segments.is_empty());
}

#[test]
fn wide_capability_partitions_by_native_lanes() {
    let cap = Capability::new(true, 16).unwrap();
    let (partition, segments) = collect(cap, 40);
    assert_eq!(partition.vector_len, 32);
    assert_eq!(
        segments[0],
        Segment::Vector {
            range: 0..32,
            width: LaneWidth::X8
        }
    );
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "requires an available lane capability")]
fn unavailable_capability_asserts_in_debug() {
    let _ = collect(Capability::scalar(), 8);
}

#[test]
fn partition_new_matches_modulo() {
    assert_eq!(
        Partition::new(10, 4),
        Partition {
            vector_len: 8,
            remainder: 2
        }
    );
    assert_eq!(Partition::new(10, 4).scalar_range(), 8..10);
    assert_eq!(Partition::new(3, 8).vector_range(), 0..0);
}
