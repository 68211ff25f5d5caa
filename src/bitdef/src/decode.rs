//! Bit assignment decoding
//!
//! Splits an integer into per-field values. The first field takes the lowest
//! `width` bits, the value is shifted right by that width, and the next field
//! takes the next group. Bits above the total width are ignored and fields
//! past the value's highest set bit decode to zero.

use num_bigint::BigUint;
use num_traits::One;

use crate::definition::FieldDefinition;

/// One decoded field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    pub name: String,
    pub width: u32,
    /// Always below `2^width`
    pub value: BigUint,
}

/// Decoded fields keyed by name, in first-seen order
///
/// A repeated field name replaces the earlier entry's width and value but
/// keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    fields: Vec<DecodedField>,
}

impl Decoded {
    fn record(&mut self, field: DecodedField) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DecodedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecodedField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Decoded {
    type Item = &'a DecodedField;
    type IntoIter = std::slice::Iter<'a, DecodedField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for Decoded {
    type Item = DecodedField;
    type IntoIter = std::vec::IntoIter<DecodedField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Decode `value` into the given fields, LSB-first in declaration order
pub fn decode(value: &BigUint, fields: &[FieldDefinition]) -> Decoded {
    let mut decoded = Decoded::default();
    let mut remaining = value.clone();

    for field in fields {
        let width = field.width();
        decoded.record(DecodedField {
            name: field.name().to_string(),
            width,
            value: low_bits(&remaining, width),
        });
        remaining >>= width;
    }

    decoded
}

/// Number of significant bits in `value` above the fields' total width
///
/// These are the bits [`decode`] discards.
pub fn overflow_bits(value: &BigUint, fields: &[FieldDefinition]) -> u64 {
    let total: u64 = fields.iter().map(|f| u64::from(f.width())).sum();
    value.bits().saturating_sub(total)
}

/// `value & (2^width - 1)`, without building a mask wider than `value`
fn low_bits(value: &BigUint, width: u32) -> BigUint {
    if value.bits() <= u64::from(width) {
        return value.clone();
    }
    let mask = (BigUint::one() << width) - 1u32;
    value & mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Definition;

    fn fields(spec: &[(&str, u32)]) -> Definition {
        spec.iter()
            .map(|(name, width)| FieldDefinition::new(*name, *width).unwrap())
            .collect()
    }

    fn values(decoded: &Decoded) -> Vec<(&str, u32, u64)> {
        decoded
            .iter()
            .map(|f| {
                let digits = f.value.to_u64_digits();
                (f.name.as_str(), f.width, digits.first().copied().unwrap_or(0))
            })
            .collect()
    }

    #[test]
    fn test_decode_lsb_first() {
        let def = fields(&[("a", 3), ("b", 5)]);
        let decoded = decode(&BigUint::from(163u32), def.fields());

        assert_eq!(values(&decoded), vec![("a", 3, 3), ("b", 5, 20)]);
    }

    #[test]
    fn test_decode_discards_excess_high_bits() {
        let def = fields(&[("a", 4), ("b", 4)]);
        let value = BigUint::from(0xFFF_A5u32);
        let decoded = decode(&value, def.fields());

        assert_eq!(values(&decoded), vec![("a", 4, 0x5), ("b", 4, 0xA)]);
        assert_eq!(overflow_bits(&value, def.fields()), 12);
    }

    #[test]
    fn test_decode_missing_high_bits_are_zero() {
        let def = fields(&[("a", 2), ("b", 8), ("c", 16)]);
        let decoded = decode(&BigUint::from(0b1101u32), def.fields());

        assert_eq!(values(&decoded), vec![("a", 2, 1), ("b", 8, 3), ("c", 16, 0)]);
        assert_eq!(overflow_bits(&BigUint::from(0b1101u32), def.fields()), 0);
    }

    #[test]
    fn test_decode_duplicate_names_overwrite_in_place() {
        let def = fields(&[("a", 4), ("b", 4), ("a", 8)]);
        let decoded = decode(&BigUint::from(0xAB_C1u32), def.fields());

        assert_eq!(decoded.len(), 2);
        assert_eq!(values(&decoded), vec![("a", 8, 0xAB), ("b", 4, 0xC)]);
    }

    #[test]
    fn test_decode_wider_than_u64() {
        let def = fields(&[("low", 64), ("high", 64), ("top", 8)]);
        let value = (BigUint::from(0x7Fu32) << 128u32)
            + (BigUint::from(0xDEAD_BEEFu32) << 64u32)
            + BigUint::from(42u32);
        let decoded = decode(&value, def.fields());

        assert_eq!(decoded.get("low").unwrap().value, BigUint::from(42u32));
        assert_eq!(decoded.get("high").unwrap().value, BigUint::from(0xDEAD_BEEFu32));
        assert_eq!(decoded.get("top").unwrap().value, BigUint::from(0x7Fu32));
    }

    #[test]
    fn test_decode_single_wide_field_masks() {
        let def = fields(&[("x", 70)]);
        let value = (BigUint::one() << 75u32) + BigUint::from(5u32);
        let decoded = decode(&value, def.fields());

        assert_eq!(decoded.get("x").unwrap().value, BigUint::from(5u32));
    }

    #[test]
    fn test_decode_empty_definition() {
        let decoded = decode(&BigUint::from(99u32), &[]);
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_zero() {
        let def = fields(&[("a", 1), ("b", 1)]);
        let decoded = decode(&BigUint::default(), def.fields());
        assert_eq!(values(&decoded), vec![("a", 1, 0), ("b", 1, 0)]);
    }
}
