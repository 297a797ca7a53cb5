use packed_bits::{FixedBitSet, words_for};

type Set70 = FixedBitSet<70, { words_for::<u64>(70) }, u64>;
type Set64 = FixedBitSet<64, { words_for::<u64>(64) }, u64>;
type Set10 = FixedBitSet<10, { words_for::<u8>(10) }, u8>;

#[test]
fn test_new_is_clear() {
    let set = Set70::new();
    assert!(set.is_all_clear());
    assert_eq!(set.count_ones(), 0);
    assert_eq!(set.len(), 70);
    assert_eq!(set.words().len(), 2);
    assert_eq!(set.find_bit(0, true), 70);
    assert_eq!(set.find_bit(0, false), 0);
}

#[test]
fn test_set_clear_test() {
    let mut set = Set70::new();
    set.set(0);
    set.set(64);
    set.set(69);
    assert!(set.test(0));
    assert!(set.test(64));
    assert!(set.test(69));
    assert!(!set.test(63));
    assert_eq!(set.word(1), 0b10_0001);

    set.clear(64);
    assert!(!set.test(64));
    set.set_value(5, true);
    assert!(set.test(5));
    set.set_value(5, false);
    assert!(!set.test(5));
}

#[test]
fn test_toggle_returns_previous() {
    let mut set = Set10::new();
    assert!(!set.toggle(9));
    assert!(set.test(9));
    assert!(set.toggle(9));
    assert!(!set.test(9));
}

#[test]
fn test_find_bit_one_across_words() {
    let mut set = Set70::new();
    set.set(3);
    set.set(65);
    assert_eq!(set.find_bit(0, true), 3);
    assert_eq!(set.find_bit(3, true), 3);
    assert_eq!(set.find_bit(4, true), 65);
    assert_eq!(set.find_bit(66, true), 70);
    assert_eq!(set.find_bit(70, true), 70);
    assert_eq!(set.find_bit(1000, true), 70);
}

#[test]
fn test_find_bit_zero_in_full_set_hits_end() {
    // Padding bits are zero but must never be reported.
    let set = Set70::full();
    assert_eq!(set.find_bit(0, false), 70);
    assert_eq!(set.find_bit(69, false), 70);

    let set = Set10::full();
    assert_eq!(set.find_bit(0, false), 10);
}

#[test]
fn test_find_bit_zero() {
    let mut set = Set70::full();
    set.clear(66);
    assert_eq!(set.find_bit(0, false), 66);
    assert_eq!(set.find_bit(67, false), 70);
}

#[test]
fn test_exact_word_multiple() {
    let mut set = Set64::full();
    assert_eq!(set.count_ones(), 64);
    assert_eq!(set.find_bit(0, false), 64);
    set.clear(63);
    assert_eq!(set.find_bit(0, false), 63);
}

#[test]
fn test_set_all_keeps_padding_clear() {
    let mut set = Set10::new();
    set.set_all();
    assert_eq!(set.words(), &[0xFF, 0b11]);
    assert_eq!(set.count_ones(), 10);

    set.fill(false);
    assert!(set.is_all_clear());
    set.fill(true);
    assert_eq!(set, Set10::full());
    set.clear_all();
    assert_eq!(set, Set10::default());
}

#[test]
fn test_iter_ones() {
    let mut set = Set70::new();
    for i in [2, 63, 64, 69] {
        set.set(i);
    }
    assert_eq!(set.iter_ones().collect::<Vec<_>>(), vec![2, 63, 64, 69]);
    assert_eq!(set.iter_ones().rev().collect::<Vec<_>>(), vec![69, 64, 63, 2]);
    assert_eq!((&set).into_iter().len(), 4);
}

#[test]
fn test_copy_and_debug() {
    let mut a = Set10::new();
    a.set(1);
    let b = a;
    a.set(2);
    assert!(!b.test(2));
    assert_eq!(format!("{b:?}"), "{1}");
}

#[test]
fn test_default_word_is_usize() {
    let mut set: FixedBitSet<200, { words_for::<usize>(200) }> = FixedBitSet::new();
    set.set(199);
    assert_eq!(set.find_bit(0, true), 199);
    assert_eq!(set.words().len(), 200usize.div_ceil(usize::BITS as usize));
}

#[test]
fn test_zero_bits() {
    let set = FixedBitSet::<0, 0, u32>::new();
    assert!(set.is_empty());
    assert_eq!(set.find_bit(0, true), 0);
    assert_eq!(set.find_bit(0, false), 0);
    assert_eq!(set.iter_ones().count(), 0);
}

#[test]
fn test_const_construction() {
    const EMPTY: Set70 = Set70::new();
    assert!(EMPTY.is_all_clear());
}
