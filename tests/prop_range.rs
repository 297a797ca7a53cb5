use bitvec::prelude::*;
use packed_bits::{BitVector, FixedBitSet, words_for};
use proptest::prelude::*;

// Strategy for generating bit vectors with a model of their contents
prop_compose! {
    fn arb_bits(max_len: usize)
        (bits in prop::collection::vec(any::<bool>(), 0..max_len))
        -> (BitVector<u64>, Vec<bool>)
    {
        let bv: BitVector<u64> = bits.iter().copied().collect();
        (bv, bits)
    }
}

// Strategy for generating a vector plus a valid half-open range in it
prop_compose! {
    fn arb_bits_with_range(max_len: usize)
        ((bv, model) in arb_bits(max_len))
        (a in 0..=model.len(), b in 0..=model.len(), bv in Just(bv), model in Just(model))
        -> (BitVector<u64>, Vec<bool>, usize, usize)
    {
        (bv, model, a.min(b), a.max(b))
    }
}

/// Every bit at or above `len` in the used words is clear.
fn padding_is_clear(bv: &BitVector<u64>) -> bool {
    let words = bv.as_words();
    let rem = bv.len() % 64;
    rem == 0 || words[words.len() - 1] >> rem == 0
}

proptest! {
    #[test]
    fn test_find_first_in_matches_model(
        (bv, model, begin, end) in arb_bits_with_range(300)
    ) {
        let expected = (begin..end).find(|&i| model[i]);
        prop_assert_eq!(
            bv.find_first_in(begin, end),
            expected,
            "Mismatch for range [{}, {})",
            begin, end
        );
    }

    #[test]
    fn test_find_next_visits_every_one((bv, model) in arb_bits(300)) {
        let mut found = Vec::new();
        let mut cur = bv.find_first();
        while let Some(i) = cur {
            found.push(i);
            cur = bv.find_next(i);
        }
        let expected: Vec<usize> = (0..model.len()).filter(|&i| model[i]).collect();
        prop_assert_eq!(&found, &expected);
        prop_assert_eq!(bv.iter_ones().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_resize_preserves_prefix_and_fills(
        (mut bv, model) in arb_bits(300),
        new_len in 0usize..400,
        fill in any::<bool>()
    ) {
        bv.resize(new_len, fill);
        prop_assert_eq!(bv.len(), new_len);
        prop_assert!(padding_is_clear(&bv));

        for i in 0..new_len {
            let expected = if i < model.len() { model[i] } else { fill };
            prop_assert_eq!(bv.test(i), expected, "Bit {} after resize to {}", i, new_len);
        }
    }

    #[test]
    fn test_shrink_regrow_never_resurrects_bits(
        (mut bv, model) in arb_bits(300),
        cut in 0usize..300,
        grow in 0usize..300
    ) {
        let cut = cut.min(model.len());
        bv.resize(cut, false);
        bv.resize(cut + grow, false);

        prop_assert!(padding_is_clear(&bv));
        prop_assert_eq!(bv.find_first_in(cut, cut + grow), None);
        let ones = model[..cut].iter().filter(|&&b| b).count();
        prop_assert_eq!(bv.count_ones(), ones);
    }

    #[test]
    fn test_whole_vector_ops_match_bitvec((mut bv, model) in arb_bits(300)) {
        let mut reference: BitVec<u64, Lsb0> = model.iter().copied().collect();

        prop_assert_eq!(bv.count_ones(), reference.count_ones());
        prop_assert_eq!(bv.any(), reference.any());
        prop_assert_eq!(bv.all(), reference.all());
        prop_assert_eq!(bv.find_first(), reference.first_one());

        bv.flip_all();
        reference = !reference;
        prop_assert!(padding_is_clear(&bv));
        prop_assert_eq!(bv.count_ones(), reference.count_ones());
        prop_assert_eq!(bv.find_first(), reference.first_one());

        bv.set_all();
        prop_assert!(padding_is_clear(&bv));
        prop_assert_eq!(bv.count_ones(), model.len());
    }

    #[test]
    fn test_fixed_find_bit_matches_model(
        ones in prop::collection::vec(0usize..150, 0..40),
        start in 0usize..160,
        value in any::<bool>()
    ) {
        let mut set = FixedBitSet::<150, { words_for::<u32>(150) }, u32>::new();
        let mut model = [false; 150];
        for &i in &ones {
            set.set(i);
            model[i] = true;
        }

        let expected = (start..150).find(|&i| model[i] == value).unwrap_or(150);
        prop_assert_eq!(set.find_bit(start, value), expected);
    }
}
