use packed_bits::BitVector;

#[test]
fn test_resize_expand_with_zeros() {
    let mut bv = BitVector::<u64>::with_len(60, false);
    bv.set(50);

    bv.resize(200, false);
    assert_eq!(bv.len(), 200);
    assert!(bv.capacity() >= 200);
    assert!(bv.test(50));
    assert_eq!(bv.count_ones(), 1);
}

#[test]
fn test_resize_expand_with_ones_fills_partial_word() {
    let mut bv = BitVector::<u64>::with_len(3, false);
    bv.set(1);

    // The gained bits 3..63 share a word with the old bits.
    bv.resize(70, true);
    assert!(!bv.test(0));
    assert!(bv.test(1));
    assert!(!bv.test(2));
    for i in 3..70 {
        assert!(bv.test(i), "bit {i} should be filled");
    }
    assert_eq!(bv.count_ones(), 68);
    assert_eq!(bv.as_words()[1], 0b11_1111);
}

#[test]
fn test_resize_alternating_pattern() {
    let mut bv = BitVector::<u8>::with_len(8, false);
    for i in (0..8).step_by(2) {
        bv.set(i);
    }

    bv.resize(20, true);
    for i in 0..8 {
        assert_eq!(bv.test(i), i % 2 == 0, "bit {i}");
    }
    for i in 8..20 {
        assert!(bv.test(i), "bit {i}");
    }
    assert_eq!(bv.as_words(), &[0b0101_0101, 0xFF, 0x0F]);
}

#[test]
fn test_resize_alternating_pattern_with_zeros() {
    let mut bv = BitVector::<u64>::with_len(8, false);
    for i in (1..8).step_by(2) {
        bv.set(i);
    }

    bv.resize(20, false);
    for i in 0..8 {
        assert_eq!(bv.test(i), i % 2 == 1, "bit {i}");
    }
    for i in 8..20 {
        assert!(!bv.test(i), "bit {i}");
    }
}

#[test]
fn test_resize_shrink_keeps_capacity() {
    let mut bv = BitVector::<u32>::with_len(200, true);
    let capacity = bv.capacity();

    bv.resize(40, false);
    assert_eq!(bv.len(), 40);
    assert_eq!(bv.capacity(), capacity);
    assert_eq!(bv.count_ones(), 40);
    assert_eq!(bv.as_words(), &[u32::MAX, 0xFF]);
}

#[test]
fn test_shrink_then_regrow_with_zeros_exposes_no_stale_bits() {
    let mut bv = BitVector::<u64>::with_len(200, true);
    bv.resize(10, false);
    bv.resize(200, false);

    assert_eq!(bv.count_ones(), 10);
    assert_eq!(bv.find_first_in(10, 200), None);
}

#[test]
fn test_shrink_then_regrow_with_ones() {
    let mut bv = BitVector::<u64>::with_len(100, false);
    bv.set(5).set(70);
    bv.resize(6, false);
    bv.resize(100, true);

    assert!(bv.test(5));
    assert!(!bv.test(4));
    assert!(bv.test(70));
    assert_eq!(bv.count_ones(), 1 + 94);
}

#[test]
fn test_resize_within_capacity_does_not_reallocate() {
    let mut bv = BitVector::<u64>::with_len(256, false);
    bv.resize(0, false);
    let capacity = bv.capacity();

    bv.resize(256, true);
    assert_eq!(bv.capacity(), capacity);
    assert!(bv.all());
}

#[test]
fn test_resize_to_word_boundary() {
    let mut bv = BitVector::<u16>::with_len(10, true);
    bv.resize(32, true);
    assert_eq!(bv.as_words(), &[0xFFFF, 0xFFFF]);
    bv.resize(16, false);
    assert_eq!(bv.as_words(), &[0xFFFF]);
    assert!(bv.all());
}

#[test]
fn test_reserve() {
    let mut bv = BitVector::<u64>::new();
    bv.reserve(1000);
    assert!(bv.capacity() >= 1000);
    assert_eq!(bv.len(), 0);

    bv.resize(1000, false);
    assert!(bv.none());

    bv.try_reserve(10).unwrap();
    assert_eq!(bv.len(), 1000);
}

#[test]
fn test_clear_keeps_buffer() {
    let mut bv = BitVector::<u64>::with_len(500, true);
    let capacity = bv.capacity();
    bv.clear();
    assert!(bv.is_empty());
    assert_eq!(bv.capacity(), capacity);

    bv.resize(500, false);
    assert!(bv.none());
}

#[test]
fn test_shrink_to_fit() {
    let mut bv = BitVector::<u64>::with_len(1000, true);
    bv.resize(65, false);
    bv.shrink_to_fit();
    assert_eq!(bv.capacity(), 128);
    assert_eq!(bv.memory_size(), 16);
    assert_eq!(bv.count_ones(), 65);
}

#[test]
fn test_resize_empty_to_zero() {
    let mut bv = BitVector::<u8>::new();
    bv.resize(0, true);
    assert!(bv.is_empty());
    assert_eq!(bv.capacity(), 0);
}
