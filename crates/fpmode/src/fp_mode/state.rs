use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use crate::ir::FloatMode;

/// One mutable hardware FP mode slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ModeField {
    Round32 = 0,
    Round16_64 = 1,
    Denorm32 = 2,
    Denorm16_64 = 3,
    Fp16Overflow = 4,
}

pub const MODE_FIELD_COUNT: usize = 5;

impl ModeField {
    pub const ALL: [Self; MODE_FIELD_COUNT] = [
        Self::Round32,
        Self::Round16_64,
        Self::Denorm32,
        Self::Denorm16_64,
        Self::Fp16Overflow,
    ];

    #[must_use]
    pub const fn bit(self) -> ModeMask {
        ModeMask(1 << self as u8)
    }
}

/// A subset of mode fields, one bit per `ModeField`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeMask(u8);

impl ModeMask {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self((1 << MODE_FIELD_COUNT) - 1);

    /// The rounding group: both round fields live in adjacent MODE
    /// register bits and are written together.
    pub const ROUND: Self =
        Self(1 << ModeField::Round32 as u8 | 1 << ModeField::Round16_64 as u8);
    /// The denormal group, analogous to `ROUND`.
    pub const DENORM: Self =
        Self(1 << ModeField::Denorm32 as u8 | 1 << ModeField::Denorm16_64 as u8);
    /// The fp16 overflow bit stands alone.
    pub const OVERFLOW: Self = Self(1 << ModeField::Fp16Overflow as u8);

    /// The partition of fields into independently joinable groups.
    /// `ModeState::join` treats each group atomically.
    pub const GROUPS: [Self; 3] = [Self::ROUND, Self::DENORM, Self::OVERFLOW];

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, field: ModeField) -> bool {
        self.0 & field.bit().0 != 0
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn iter(self) -> impl Iterator<Item = ModeField> {
        ModeField::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl BitOr for ModeMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ModeMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ModeMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for ModeMask {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

/// The lattice value of the backward analysis: a desired hardware value
/// per field, plus the subset of fields actually pinned to that value.
///
/// An unpinned field floats; code may assume it equals the block's
/// ambient default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeState {
    fields: [u8; MODE_FIELD_COUNT],
    required: ModeMask,
}

impl ModeState {
    /// All fields at the ambient default, nothing pinned.
    #[must_use]
    pub fn from_ambient(mode: &FloatMode) -> Self {
        Self {
            fields: mode.field_values(),
            required: ModeMask::EMPTY,
        }
    }

    #[must_use]
    pub const fn field(&self, field: ModeField) -> u8 {
        self.fields[field as usize]
    }

    #[must_use]
    pub const fn required(&self) -> ModeMask {
        self.required
    }

    /// Pin `field` to `value`.
    pub fn require(&mut self, field: ModeField, value: u8) {
        self.fields[field as usize] = value;
        self.required |= field.bit();
    }

    /// Pin every field to its current value.
    pub fn pin_all(&mut self) {
        self.required = ModeMask::ALL;
    }

    /// Unpin the fields in `mask`; their values become assumptions again.
    pub fn release(&mut self, mask: ModeMask) {
        self.required = self.required & !mask;
    }

    /// Unpin everything outside `mask`.
    pub fn restrict(&mut self, mask: ModeMask) {
        self.required = self.required & mask;
    }

    /// Merge `other`'s pinned fields into `self`, group by group.
    ///
    /// A group merges only if every field pinned by both sides agrees on
    /// its value; otherwise the whole group is left untouched in `self`
    /// and reported in the returned conflict mask. The returned mask is
    /// exactly the set of groups that need a corrective mode write.
    #[must_use]
    pub fn join(&mut self, other: &Self) -> ModeMask {
        let mut conflicts = ModeMask::EMPTY;
        for group in ModeMask::GROUPS {
            conflicts |= self.join_group(other, group);
        }
        conflicts
    }

    fn join_group(&mut self, other: &Self, group: ModeMask) -> ModeMask {
        for field in (self.required & other.required & group).iter() {
            if self.field(field) != other.field(field) {
                return group;
            }
        }

        for field in (other.required & !self.required & group).iter() {
            self.fields[field as usize] = other.fields[field as usize];
        }
        self.required |= other.required & group;

        ModeMask::EMPTY
    }

    /// Packed 4-bit rounding encoding: `round32 | round16_64 << 2`.
    #[must_use]
    pub const fn round(&self) -> u16 {
        (self.fields[ModeField::Round32 as usize]
            | self.fields[ModeField::Round16_64 as usize] << 2) as u16
    }

    /// Packed 4-bit denorm encoding, analogous to `round`.
    #[must_use]
    pub const fn denorm(&self) -> u16 {
        (self.fields[ModeField::Denorm32 as usize]
            | self.fields[ModeField::Denorm16_64 as usize] << 2) as u16
    }

    /// Packed 8-bit encoding for hardware without split mode registers.
    #[must_use]
    pub const fn round_denorm(&self) -> u8 {
        (self.round() | self.denorm() << 4) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{DenormMode, RoundMode};

    fn ambient() -> FloatMode {
        FloatMode {
            round32: RoundMode::NearestEven,
            round16_64: RoundMode::NearestEven,
            denorm32: DenormMode::Flush,
            denorm16_64: DenormMode::Keep,
            fp16_overflow: false,
        }
    }

    #[test]
    fn join_with_self_is_noop() {
        let mut a = ModeState::from_ambient(&ambient());
        a.require(ModeField::Round32, RoundMode::TowardZero as u8);
        a.require(ModeField::Denorm16_64, DenormMode::Keep as u8);
        let before = a;

        assert!(a.join(&before).is_empty());
        assert_eq!(a, before);
    }

    #[test]
    fn join_copies_fields_pinned_only_by_other() {
        let mut a = ModeState::from_ambient(&ambient());
        let mut b = ModeState::from_ambient(&ambient());
        b.require(ModeField::Round16_64, RoundMode::PositiveInf as u8);

        assert!(a.join(&b).is_empty());
        assert!(a.required().contains(ModeField::Round16_64));
        assert_eq!(a.field(ModeField::Round16_64), RoundMode::PositiveInf as u8);
    }

    #[test]
    fn conflicting_field_reports_whole_group() {
        let mut a = ModeState::from_ambient(&ambient());
        a.require(ModeField::Round32, RoundMode::NearestEven as u8);
        let mut b = ModeState::from_ambient(&ambient());
        b.require(ModeField::Round32, RoundMode::TowardZero as u8);
        b.require(ModeField::Round16_64, RoundMode::TowardZero as u8);

        let conflicts = a.join(&b);
        assert_eq!(conflicts, ModeMask::ROUND);
        // The conflicting group is left entirely unmodified: the other
        // round field was not copied over.
        assert!(!a.required().contains(ModeField::Round16_64));
        assert_eq!(a.field(ModeField::Round32), RoundMode::NearestEven as u8);
    }

    #[test]
    fn groups_are_independent() {
        let mut a = ModeState::from_ambient(&ambient());
        a.require(ModeField::Round32, RoundMode::NearestEven as u8);
        let mut b = ModeState::from_ambient(&ambient());
        b.require(ModeField::Round32, RoundMode::TowardZero as u8);
        b.require(ModeField::Denorm32, DenormMode::Keep as u8);
        b.require(ModeField::Fp16Overflow, 1);

        let conflicts = a.join(&b);
        assert_eq!(conflicts, ModeMask::ROUND);
        // The denorm and overflow groups merged despite the round conflict.
        assert!(a.required().contains(ModeField::Denorm32));
        assert_eq!(a.field(ModeField::Denorm32), DenormMode::Keep as u8);
        assert!(a.required().contains(ModeField::Fp16Overflow));
    }

    #[test]
    fn agreeing_fields_merge_without_conflict() {
        let mut a = ModeState::from_ambient(&ambient());
        a.require(ModeField::Denorm32, DenormMode::KeepIn as u8);
        let mut b = ModeState::from_ambient(&ambient());
        b.require(ModeField::Denorm32, DenormMode::KeepIn as u8);
        b.require(ModeField::Denorm16_64, DenormMode::Flush as u8);

        assert!(a.join(&b).is_empty());
        assert_eq!(a.field(ModeField::Denorm16_64), DenormMode::Flush as u8);
    }

    #[test]
    fn packed_encodings() {
        let mut s = ModeState::from_ambient(&ambient());
        s.require(ModeField::Round32, RoundMode::TowardZero as u8);
        s.require(ModeField::Round16_64, RoundMode::NegativeInf as u8);
        s.require(ModeField::Denorm32, DenormMode::KeepIn as u8);
        s.require(ModeField::Denorm16_64, DenormMode::KeepOut as u8);

        assert_eq!(s.round(), 0b10_11);
        assert_eq!(s.denorm(), 0b10_01);
        assert_eq!(s.round_denorm(), 0b1001_1011);
    }

    #[test]
    fn release_and_restrict() {
        let mut s = ModeState::from_ambient(&ambient());
        s.pin_all();
        s.release(ModeMask::ROUND);
        assert_eq!(s.required(), ModeMask::DENORM | ModeMask::OVERFLOW);
        s.restrict(ModeMask::OVERFLOW);
        assert_eq!(s.required(), ModeMask::OVERFLOW);
    }
}
