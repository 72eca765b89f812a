mod bitset;

pub(crate) use self::bitset::{BitSet, TinySet};
