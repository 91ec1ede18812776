use cache_hierarchy::{
    replace::AccessResult, AccessEvent, Cache, Config, Hierarchy, SimError,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn reference() -> Hierarchy {
    Config::default().to_hierarchy().unwrap()
}

fn tags(h: &Hierarchy, level: usize) -> Vec<u64> {
    h.snapshots()[level].resident_tags()
}

#[rstest]
#[case(&[0, 16, 32], &[1, 2])]
#[case(&[0, 16, 0, 32], &[0, 2])]
fn lru_two_lines(#[case] addrs: &[u64], #[case] resident: &[u64]) {
    let mut cache = Cache::new("L1".into(), 32, 2, 16);
    for &a in addrs {
        cache.access(a);
    }
    assert_eq!(cache.state().resident_tags(), resident.to_vec());
}

#[test]
fn evicted_tag_misses_again() {
    let mut cache = Cache::new("L1".into(), 32, 2, 16);
    for a in [0, 16, 32] {
        assert_eq!(cache.access(a), AccessResult::Miss);
    }
    assert_eq!(cache.access(0), AccessResult::Miss);
}

#[test]
fn capacity_never_exceeded() {
    let mut rng = fastrand::Rng::with_seed(7);
    let mut cache = Cache::new("L2".into(), 64, 4, 16);
    for _ in 0..2_000 {
        cache.access(rng.u64(0..512));
        assert!(cache.resident_count() <= cache.line_count());
    }
}

#[test]
fn repeated_hits_are_stable() {
    let mut cache = Cache::new("L3".into(), 128, 8, 16);
    cache.access(100);
    cache.access(200);
    for _ in 0..10 {
        assert_eq!(cache.access(96), AccessResult::Hit);
        assert_eq!(cache.resident_count(), 2);
    }
}

#[test]
fn end_to_end_reference_sequence() {
    let mut h = reference();
    let all_miss = vec!["miss at L1", "miss at L2", "miss at L3", "main-memory access"];

    assert_eq!(h.access_address(0).unwrap().lines(), all_miss);
    for level in 0..3 {
        assert_eq!(tags(&h, level), vec![0]);
    }

    assert_eq!(h.access_address(16).unwrap().lines(), all_miss);
    assert_eq!(tags(&h, 0), vec![0, 1]);

    assert_eq!(h.access_address(32).unwrap().lines(), all_miss);
    assert_eq!(tags(&h, 0), vec![1, 2]);
    assert_eq!(tags(&h, 1), vec![0, 1, 2]);

    let trace = h.access_address(0).unwrap();
    assert_eq!(
        trace.events,
        vec![AccessEvent::Miss("L1".into()), AccessEvent::Hit("L2".into())]
    );
    assert_eq!(tags(&h, 0), vec![0, 2]);
    assert_eq!(h.state().levels[0].recency(), vec![0, 2]);
    assert_eq!(h.stats().memory_reads, 3);
}

#[test]
fn hierarchy_is_not_inclusive() {
    let mut h = reference();
    // Keep tag 0 hot in L1 while L2 fills up behind it.
    for a in [0, 16, 0, 32, 0, 48, 0, 64] {
        h.access_address(a).unwrap();
    }
    assert!(h.state().levels[0].contains(0));
    assert!(!h.state().levels[1].contains(0));
    assert!(h.state().levels[2].contains(0));

    h.access_address(80).unwrap();
    assert!(!h.state().levels[0].contains(0));
    assert_eq!(
        h.access_address(0).unwrap().lines(),
        vec!["miss at L1", "miss at L2", "hit at L3"]
    );
    for level in 0..3 {
        assert!(tags(&h, level).contains(&0));
    }
}

#[rstest]
#[case(1024)]
#[case(5000)]
fn out_of_range_rejected(#[case] addr: u64) {
    let mut h = reference();
    h.access_address(0).unwrap();
    let before = h.snapshots();
    assert!(matches!(
        h.access_address(addr),
        Err(SimError::AddressOutOfRange { size: 1024, .. })
    ));
    assert_eq!(h.snapshots(), before);
    assert_eq!(h.stats().memory_reads, 1);
}

#[test]
fn custom_two_level_config() {
    let mut h = Config::from_json(
        r#"{"memory_size": 256, "caches": [
            {"name": "I1", "size": 16, "line_size": 8},
            {"name": "LLC", "size": 64, "associativity": 4, "line_size": 8}
        ]}"#,
    )
    .unwrap()
    .to_hierarchy()
    .unwrap();
    assert_eq!(
        h.access_address(9).unwrap().lines(),
        vec!["miss at I1", "miss at LLC", "main-memory access"]
    );
    assert_eq!(h.snapshots()[1].resident_tags(), vec![1]);
}
