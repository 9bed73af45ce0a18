use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn seeds_diverge() {
    let mut a = Rng64::new(1);
    let mut b = Rng64::new(2);
    assert_ne!(a.next_u64(), b.next_u64());
}

#[test]
fn unit_floats_stay_in_range() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.next_f64_01();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn ranged_floats_stay_in_range() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.next_f64_in(-3.0, 5.5);
        assert!((-3.0..5.5).contains(&v));
    }
}

#[test]
fn indices_stay_in_range() {
    let mut rng = Rng64::new(99);
    let mut seen = [false; 6];
    for _ in 0..1000 {
        let i = rng.next_index(6);
        assert!(i < 6);
        seen[i] = true;
    }
    // 1000 draws over 6 buckets should hit every bucket.
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn fnv_distinguishes_inputs() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"star");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"nebula");
    assert_ne!(a.finish(), b.finish());

    let mut c = Fnv1a64::new_default();
    c.write_u32(1);
    let mut d = Fnv1a64::new_default();
    d.write_u32(2);
    assert_ne!(c.finish(), d.finish());
}
