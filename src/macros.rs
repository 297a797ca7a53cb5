/// Splits a bit index into `(word index, bit position within word)` for the
/// word type `$w`.
macro_rules! bitpos {
    ($idx:expr, $w:ty) => {{
        let idx: usize = $idx;
        let bits = <$w as $crate::word::Word>::BITS as usize;
        (idx / bits, (idx % bits) as u32)
    }};
}

pub(crate) use bitpos;
