//! # Typed flag groups
//!
//! Vulkan hands every bitmask around as a bare `VkFlags` (or `VkFlags64`). A queue capability
//! mask and an image usage mask are both `u32` underneath, so nothing in C stops you from
//! OR-ing one into the other.
//!
//! Each group's named bits are a [`bitflags`] type. [`FlagSet<G>`] wraps that type and tags it
//! with a zero-sized *group* marker `G`, adding what Vulkan code wants on top: full-width
//! complement, shifts that never overflow, and a renderer that spells out every named value
//! present (including multi-bit ones) and prints `"reserved"` for groups with nothing named.
//! Combining two sets of different groups does not compile:
//!
//! ```compile_fail
//! use burst_vk::{ImageUsageFlagBits, QueueFlagBits};
//!
//! let mixed = QueueFlagBits::GRAPHICS | ImageUsageFlagBits::SAMPLED;
//! ```
//!
//! Groups are declared with [`flag_group!`](crate::flag_group).
use bitflags::{Bits, Flags};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
    ShrAssign,
};

/// Text rendered for groups that declare no named bit at all.
pub const RESERVED: &str = "reserved";

/// The storage word of a flag group (`VkFlags` or `VkFlags64`): a [`bitflags::Bits`] word
/// that can also be shifted, hashed and printed.
pub trait FlagWord: Bits + Eq + Hash + fmt::Debug + fmt::LowerHex + Send + Sync {
    /// Left shift, `None` when `n` is the width of the word or more.
    fn checked_shl(self, n: u32) -> Option<Self>;
    /// Right shift, `None` when `n` is the width of the word or more.
    fn checked_shr(self, n: u32) -> Option<Self>;
}

macro_rules! impl_flag_word {
    ($($word:ty),+) => {
        $(
            impl FlagWord for $word {
                #[inline]
                fn checked_shl(self, n: u32) -> Option<Self> {
                    <$word>::checked_shl(self, n)
                }

                #[inline]
                fn checked_shr(self, n: u32) -> Option<Self> {
                    <$word>::checked_shr(self, n)
                }
            }
        )+
    };
}

impl_flag_word!(u32, u64);

/// A logical flag group: the `bitflags` type holding its named bits, and its storage word.
///
/// Implemented by the marker types generated by [`flag_group!`](crate::flag_group); there is no
/// reason to implement it by hand.
pub trait FlagGroup: 'static {
    /// Storage word, `u32` for `VkFlags` groups and `u64` for `VkFlags64` groups.
    type Bits: FlagWord;

    /// The named bits, in declaration order ([`Flags::FLAGS`]).
    type Flags: Flags<Bits = Self::Bits> + Copy;

    /// Name of the group as it shows up in `Debug` output.
    const NAME: &'static str;

    /// `true` when the group has no named non-zero value (a "reserved for future use" group).
    fn is_reserved() -> bool {
        Self::Flags::FLAGS.iter().all(|flag| flag.value().is_empty())
    }

    /// Union of every named value.
    fn known_bits() -> Self::Bits {
        Self::Flags::all().bits()
    }
}

/// A set of bits belonging to the flag group `G`.
///
/// Layout-compatible with the raw word, so it can sit inside `#[repr(C)]` structures that
/// mirror the native ones.
#[repr(transparent)]
pub struct FlagSet<G: FlagGroup> {
    flags: G::Flags,
    group: PhantomData<fn() -> G>,
}

impl<G: FlagGroup> FlagSet<G> {
    /// Wraps a value of the group's `bitflags` type.
    #[inline]
    pub const fn from_flags(flags: G::Flags) -> Self {
        Self {
            flags,
            group: PhantomData,
        }
    }

    /// Wraps a raw word, keeping every bit (named or not).
    #[inline]
    pub fn from_bits_retain(bits: G::Bits) -> Self {
        Self::from_flags(G::Flags::from_bits_retain(bits))
    }

    /// The empty set.
    #[inline]
    pub fn empty() -> Self {
        Self::from_bits_retain(G::Bits::EMPTY)
    }

    /// Every named bit of the group.
    pub fn all() -> Self {
        Self::from_flags(G::Flags::all())
    }

    /// Wraps a raw word, dropping the bits the group does not name.
    pub fn from_bits_truncate(bits: G::Bits) -> Self {
        Self::from_flags(G::Flags::from_bits_truncate(bits))
    }

    /// Wraps a raw word only if every set bit is named by the group.
    pub fn from_bits(bits: G::Bits) -> Option<Self> {
        G::Flags::from_bits(bits).map(Self::from_flags)
    }

    /// The underlying `bitflags` value.
    #[inline]
    pub fn flags(self) -> G::Flags {
        self.flags
    }

    /// The raw word, bit-for-bit what the native API expects.
    #[inline]
    pub fn bits(self) -> G::Bits {
        self.flags.bits()
    }

    /// Compares against a bare integer, as handed out by the native API before wrapping.
    #[inline]
    pub fn equals_raw(self, raw: G::Bits) -> bool {
        self.bits() == raw
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.flags.is_empty()
    }

    /// `true` when every named bit is set.
    pub fn is_all(self) -> bool {
        self.flags.is_all()
    }

    /// `true` when every bit of `other` is also set in `self`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.flags.contains(other.flags)
    }

    /// `true` when at least one bit is shared.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.flags.intersects(other.flags)
    }

    /// Bitwise OR.
    #[doc(alias = "combine")]
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self::from_flags(self.flags.union(other.flags))
    }

    /// Bitwise AND.
    #[doc(alias = "intersect")]
    #[inline]
    pub fn intersection(self, other: Self) -> Self {
        Self::from_flags(self.flags.intersection(other.flags))
    }

    /// Bitwise XOR.
    #[inline]
    pub fn symmetric_difference(self, other: Self) -> Self {
        Self::from_flags(self.flags.symmetric_difference(other.flags))
    }

    /// Bitwise NOT over the full storage width (32 or 64 bits), like `~` in C.
    ///
    /// Use [`truncate`](Self::truncate) afterwards to keep named bits only.
    #[inline]
    pub fn complement(self) -> Self {
        Self::from_bits_retain(!self.bits())
    }

    /// Bits of `self` that are not in `other`.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self::from_flags(self.flags.difference(other.flags))
    }

    /// Shifts towards the most significant bit. Shifting by the storage width or more gives
    /// the empty set.
    pub fn shift_left(self, n: u32) -> Self {
        Self::from_bits_retain(self.bits().checked_shl(n).unwrap_or(G::Bits::EMPTY))
    }

    /// Shifts towards the least significant bit. Shifting by the storage width or more gives
    /// the empty set.
    pub fn shift_right(self, n: u32) -> Self {
        Self::from_bits_retain(self.bits().checked_shr(n).unwrap_or(G::Bits::EMPTY))
    }

    /// Keeps only the bits the group names.
    pub fn truncate(self) -> Self {
        Self::from_bits_truncate(self.bits())
    }

    /// Bits set in `self` that no named value covers.
    pub fn residual(self) -> Self {
        Self::from_bits_retain(self.bits() & !G::known_bits())
    }

    pub fn insert(&mut self, other: Self) {
        self.flags.insert(other.flags);
    }

    pub fn remove(&mut self, other: Self) {
        self.flags.remove(other.flags);
    }

    pub fn toggle(&mut self, other: Self) {
        self.flags.toggle(other.flags);
    }

    /// Inserts or removes `other` depending on `value`.
    pub fn set(&mut self, other: Self, value: bool) {
        self.flags.set(other.flags, value);
    }

    /// Names of the named values fully present in `self`, in declaration order.
    ///
    /// Unlike [`Flags::iter_names`], a multi-bit value is listed even when its single-bit
    /// parts already were.
    pub fn iter_names(self) -> impl Iterator<Item = &'static str> {
        G::Flags::FLAGS
            .iter()
            .filter(move |flag| {
                let value = flag.value().bits();
                value != G::Bits::EMPTY && self.bits() & value == value
            })
            .map(|flag| flag.name())
    }

    /// Human-readable form: `NAME1|NAME2|...` in declaration order.
    ///
    /// Bits without a name are dropped. Groups with no named bit always render as
    /// [`RESERVED`], whatever the value.
    pub fn render(self) -> String {
        if G::is_reserved() {
            return RESERVED.to_owned();
        }
        self.iter_names().collect::<Vec<_>>().join("|")
    }
}

impl<G: FlagGroup> Clone for FlagSet<G> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: FlagGroup> Copy for FlagSet<G> {}

impl<G: FlagGroup> PartialEq for FlagSet<G> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl<G: FlagGroup> Eq for FlagSet<G> {}

impl<G: FlagGroup<Bits = u32>> PartialEq<u32> for FlagSet<G> {
    #[inline]
    fn eq(&self, other: &u32) -> bool {
        self.equals_raw(*other)
    }
}

impl<G: FlagGroup<Bits = u64>> PartialEq<u64> for FlagSet<G> {
    #[inline]
    fn eq(&self, other: &u64) -> bool {
        self.equals_raw(*other)
    }
}

impl<G: FlagGroup> Hash for FlagSet<G> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl<G: FlagGroup> Default for FlagSet<G> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<G: FlagGroup> fmt::Debug for FlagSet<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) [{:#x}]", G::NAME, self.render(), self.bits())
    }
}

impl<G: FlagGroup> fmt::Display for FlagSet<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<G: FlagGroup> BitOr for FlagSet<G> {
    type Output = Self;
    #[inline]
    fn bitor(self, other: Self) -> Self {
        self.union(other)
    }
}

impl<G: FlagGroup> BitAnd for FlagSet<G> {
    type Output = Self;
    #[inline]
    fn bitand(self, other: Self) -> Self {
        self.intersection(other)
    }
}

impl<G: FlagGroup> BitXor for FlagSet<G> {
    type Output = Self;
    #[inline]
    fn bitxor(self, other: Self) -> Self {
        self.symmetric_difference(other)
    }
}

impl<G: FlagGroup> Not for FlagSet<G> {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        self.complement()
    }
}

impl<G: FlagGroup> Shl<u32> for FlagSet<G> {
    type Output = Self;
    #[inline]
    fn shl(self, n: u32) -> Self {
        self.shift_left(n)
    }
}

impl<G: FlagGroup> Shr<u32> for FlagSet<G> {
    type Output = Self;
    #[inline]
    fn shr(self, n: u32) -> Self {
        self.shift_right(n)
    }
}

impl<G: FlagGroup> BitOrAssign for FlagSet<G> {
    #[inline]
    fn bitor_assign(&mut self, other: Self) {
        *self = *self | other;
    }
}

impl<G: FlagGroup> BitAndAssign for FlagSet<G> {
    #[inline]
    fn bitand_assign(&mut self, other: Self) {
        *self = *self & other;
    }
}

impl<G: FlagGroup> BitXorAssign for FlagSet<G> {
    #[inline]
    fn bitxor_assign(&mut self, other: Self) {
        *self = *self ^ other;
    }
}

impl<G: FlagGroup> ShlAssign<u32> for FlagSet<G> {
    #[inline]
    fn shl_assign(&mut self, n: u32) {
        *self = *self << n;
    }
}

impl<G: FlagGroup> ShrAssign<u32> for FlagSet<G> {
    #[inline]
    fn shr_assign(&mut self, n: u32) {
        *self = *self >> n;
    }
}

impl<G: FlagGroup> FromIterator<FlagSet<G>> for FlagSet<G> {
    fn from_iter<I: IntoIterator<Item = FlagSet<G>>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::union)
    }
}

impl<G: FlagGroup> Extend<FlagSet<G>> for FlagSet<G> {
    fn extend<I: IntoIterator<Item = FlagSet<G>>>(&mut self, iter: I) {
        for other in iter {
            self.insert(other);
        }
    }
}


/// Declares a flag group: a zero-sized marker type carrying the named bits as associated
/// constants, and a `FlagSet` alias for the set type. The named bits themselves are declared
/// with [`bitflags::bitflags!`] and reachable through [`FlagGroup::Flags`].
///
/// ```
/// burst_vk::flag_group! {
///     /// Which way a triangle is culled.
///     pub struct CullBits => Cull: u32 {
///         const FRONT = 0x1;
///         const BACK = 0x2;
///     }
/// }
///
/// let both: Cull = CullBits::FRONT | CullBits::BACK;
/// assert_eq!(both.render(), "FRONT|BACK");
/// assert!(both == 0x3u32);
/// ```
///
/// An empty body declares a reserved group, which always renders as `"reserved"`.
#[macro_export]
macro_rules! flag_group {
    (
        $(#[$outer:meta])*
        $vis:vis struct $group:ident => $alias:ident : $bits:ty {
            $(
                $(#[$inner:meta])*
                const $flag:ident = $value:expr;
            )*
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $group {}

        $(#[$outer])*
        $vis type $alias = $crate::flags::FlagSet<$group>;

        const _: () = {
            $crate::__bitflags::bitflags! {
                #[repr(transparent)]
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
                pub struct Named: $bits {
                    $( const $flag = $value; )*
                }
            }

            impl $crate::flags::FlagGroup for $group {
                type Bits = $bits;
                type Flags = Named;
                const NAME: &'static str = stringify!($alias);
            }

            #[allow(dead_code)]
            impl $group {
                $(
                    $(#[$inner])*
                    pub const $flag: $alias = $crate::flags::FlagSet::from_flags(Named::$flag);
                )*
            }
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::flag_group! {
        pub struct TestBits => Test: u32 {
            const A = 1;
            const B = 2;
            const C = 4;
            const D = 8;
        }
    }

    crate::flag_group! {
        pub struct ShuffledBits => Shuffled: u32 {
            const D = 8;
            const B = 2;
            const A = 1;
        }
    }

    crate::flag_group! {
        pub struct WideBits => Wide: u64 {
            const LOW = 0x1;
            const HIGH = 0x1_0000_0000;
            const TOP = 0x8000_0000_0000_0000;
        }
    }

    crate::flag_group! {
        pub struct ReservedBits => Reserved: u32 {}
    }

    crate::flag_group! {
        pub struct NoneOnlyBits => NoneOnly: u32 {
            const NONE = 0;
        }
    }

    const NAMED: [Test; 4] = [TestBits::A, TestBits::B, TestBits::C, TestBits::D];

    #[test]
    fn union_with_zero_is_identity_and_intersection_is_zero() {
        for b in NAMED {
            assert_eq!(b | Test::empty(), b);
            assert_eq!(b & Test::empty(), Test::empty());
        }
    }

    #[test]
    fn union_commutes_and_self_intersection_is_idempotent() {
        for raw_a in 0..16u32 {
            for raw_b in 0..16u32 {
                let a = Test::from_bits_retain(raw_a);
                let b = Test::from_bits_retain(raw_b);
                assert_eq!(a | b, b | a);
                assert_eq!(a & (a & b), a & b);
            }
        }
    }

    #[test]
    fn renders_in_declaration_order() {
        let value = Test::from_bits_retain(0b1001);
        assert_eq!(value.render(), "A|D");
        assert_eq!(value.render(), value.render());

        let shuffled = Shuffled::from_bits_retain(0b1011);
        assert_eq!(shuffled.render(), "D|B|A");
    }

    #[test]
    fn render_drops_unknown_bits() {
        let value = TestBits::B | Test::from_bits_retain(0x100);
        assert_eq!(value.render(), "B");
        assert_eq!(value.residual(), Test::from_bits_retain(0x100));
        assert_eq!(Test::empty().render(), "");
    }

    #[test]
    fn reserved_groups_always_render_reserved() {
        assert_eq!(Reserved::empty().render(), RESERVED);
        assert_eq!(Reserved::from_bits_retain(0xdead_beef).render(), RESERVED);
        assert_eq!(NoneOnly::from_bits_retain(0x4).render(), RESERVED);
        assert_eq!(format!("{}", NoneOnlyBits::NONE), RESERVED);
    }

    #[test]
    fn complement_spans_the_storage_width() {
        assert_eq!(!TestBits::A, 0xffff_fffeu32);
        assert_eq!((!TestBits::A).truncate(), TestBits::B | TestBits::C | TestBits::D);
        assert_eq!(!WideBits::LOW, 0xffff_ffff_ffff_fffeu64);
    }

    #[test]
    fn shifts_past_the_width_are_empty() {
        assert_eq!(TestBits::A << 3, TestBits::D);
        assert_eq!(TestBits::D >> 3, TestBits::A);
        assert!((TestBits::A << 32).is_empty());
        assert!((TestBits::D >> 40).is_empty());
        assert_eq!(WideBits::LOW << 32, WideBits::HIGH);
        assert_eq!(WideBits::LOW << 63, WideBits::TOP);
        assert!((WideBits::TOP << 1).is_empty());
        assert!((WideBits::TOP << 64).is_empty());
    }

    #[test]
    fn equality_against_raw_integers() {
        assert!(TestBits::C == 4u32);
        assert!((TestBits::A | TestBits::C).equals_raw(5));
        assert!(WideBits::HIGH == 0x1_0000_0000u64);
    }

    #[test]
    fn bits_checked_and_truncated() {
        assert_eq!(Test::from_bits(0b0110), Some(TestBits::B | TestBits::C));
        assert_eq!(Test::from_bits(0x10), None);
        assert_eq!(Test::from_bits_truncate(0x1f), Test::all());
        assert!(Test::all().is_all());
        assert_eq!(Test::all().bits(), 0xf);
    }

    #[test]
    fn in_place_mutation() {
        let mut value = Test::empty();
        value.insert(TestBits::A);
        value |= TestBits::C;
        assert!(value.contains(TestBits::A | TestBits::C));
        value.remove(TestBits::A);
        assert_eq!(value, TestBits::C);
        value.toggle(TestBits::C | TestBits::D);
        assert_eq!(value, TestBits::D);
        value.set(TestBits::B, true);
        assert!(value.intersects(TestBits::B));
        value ^= TestBits::B;
        value &= TestBits::D;
        assert_eq!(value, TestBits::D);
        value <<= 1;
        assert_eq!(value.bits(), 0x10);
        assert_eq!(value.residual(), value);
    }

    #[test]
    fn collects_from_iterators() {
        let set: Test = [TestBits::A, TestBits::D].into_iter().collect();
        assert_eq!(set.render(), "A|D");
        let mut more = set;
        more.extend([TestBits::B]);
        assert_eq!(more.iter_names().collect::<Vec<_>>(), ["A", "B", "D"]);
    }

    #[test]
    fn named_bits_are_a_bitflags_type() {
        let names: Vec<_> = <<TestBits as FlagGroup>::Flags as Flags>::FLAGS
            .iter()
            .map(|flag| flag.name())
            .collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
        assert_eq!(TestBits::known_bits(), 0xf);
        assert_eq!((TestBits::A | TestBits::C).flags().bits(), 0x5);
        assert_eq!(std::mem::size_of::<Test>(), std::mem::size_of::<u32>());
        assert_eq!(std::mem::size_of::<Wide>(), std::mem::size_of::<u64>());
        assert!(ReservedBits::is_reserved());
        assert!(NoneOnlyBits::is_reserved());
        assert!(!TestBits::is_reserved());
    }

    #[test]
    fn multi_bit_names_render_next_to_their_parts() {
        crate::flag_group! {
            pub struct FaceBits => Face: u32 {
                const FRONT = 0x1;
                const BACK = 0x2;
                const FRONT_AND_BACK = 0x3;
            }
        }
        assert_eq!((FaceBits::FRONT | FaceBits::BACK).render(), "FRONT|BACK|FRONT_AND_BACK");
        assert_eq!(FaceBits::BACK.render(), "BACK");
    }

    #[test]
    fn debug_shows_group_names_and_raw_bits() {
        let value = TestBits::A | Test::from_bits_retain(0x20);
        assert_eq!(format!("{value:?}"), "Test(A) [0x21]");
        assert_eq!(format!("{:?}", Reserved::from_bits_retain(2)), "Reserved(reserved) [0x2]");
    }
}
