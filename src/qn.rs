use std::fmt;

use crate::error::{CatalogError, Result};

// ---------------------------------------------------------------------------
// calpgm integer codec
// ---------------------------------------------------------------------------

/// Decode a calpgm/spcat integer field, which may use letters to extend the
/// fixed field width: `A0` = 100, `B0` = 110, ..., `a0` = -10, `b0` = -20.
/// Used for quantum numbers and degeneracies in cat-files.
pub fn decode_calpgm_int(field: &str) -> Result<i32> {
    // Fix for the parity entries of the CH3OH catalog: a bare sign stands
    // for +1 / -1, and a blank pair stands for 0.
    let field = field
        .replace(" +", "+1")
        .replace(" -", "-1")
        .replace("  ", " 0");

    if let Ok(v) = field.trim().parse::<i32>() {
        return Ok(v);
    }

    let mut chars = field.chars();
    let lead = chars.next().ok_or_else(|| decode_err(&field))?;
    let rest_str = chars.as_str();
    let rest: i32 = rest_str
        .trim()
        .parse()
        .map_err(|_| decode_err(&field))?;
    let scale = 10_i32.pow(rest_str.len() as u32);

    match lead {
        'A'..='Z' => Ok(scale * (lead as i32 - 55) + rest),
        'a'..='z' => Ok(scale * (96 - lead as i32) - rest),
        _ => Err(decode_err(&field)),
    }
}

fn decode_err(field: &str) -> CatalogError {
    CatalogError::Decode {
        field: field.to_string(),
    }
}

/// Format a single quantum number for Pickett's spcat files. Values above 99
/// become `A0`, `B0`, ..., values below -9 become `a0`, `b0`, ...; a missing
/// value formats as the empty string.
///
/// The letter arithmetic uses floor division (toward negative infinity) so
/// that e.g. -10 maps to `a0` and -19 to `a9`.
pub fn encode_qn(value: Option<i32>) -> String {
    match value {
        None => String::new(),
        Some(v) if v > 99 && v < 360 => {
            let letter = (55 + v / 10) as u8 as char;
            format!("{}{}", letter, v % 10)
        }
        Some(v) if v < -9 && v > -260 => {
            let letter = (95 - (v - 1).div_euclid(10)) as u8 as char;
            format!("{}{}", letter, (-v) % 10)
        }
        Some(v) => v.to_string(),
    }
}

// ---------------------------------------------------------------------------
// QuantumNumbers – an ordered tuple of quantum-number labels
// ---------------------------------------------------------------------------

/// An immutable ordered tuple of quantum numbers. A `None` slot acts as a
/// wildcard when the tuple is used as a match pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuantumNumbers {
    qn: Vec<Option<i32>>,
}

impl QuantumNumbers {
    pub fn new(qn: Vec<Option<i32>>) -> Self {
        QuantumNumbers { qn }
    }

    /// Number of slots in the tuple (fixed at construction).
    pub fn len(&self) -> usize {
        self.qn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qn.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Option<i32>> {
        self.qn.get(i).copied()
    }

    pub fn values(&self) -> impl Iterator<Item = Option<i32>> + '_ {
        self.qn.iter().copied()
    }

    /// Wildcard-aware comparison: every non-`None` slot of `pattern` must
    /// equal the corresponding slot here. A pattern slot beyond our length
    /// fails the match (bounds-checked, never a panic).
    pub fn matches(&self, pattern: &QuantumNumbers) -> bool {
        for i in 0..pattern.len() {
            let Some(Some(want)) = pattern.get(i) else {
                continue;
            };
            match self.get(i) {
                Some(Some(have)) if have == want => {}
                _ => return false,
            }
        }
        true
    }

    /// Cat-file rendering: eight 2-character calpgm-encoded slots, unused
    /// slots blank.
    pub fn cat_str(&self) -> String {
        let mut out = String::with_capacity(16);
        for i in 0..8 {
            if i < self.qn.len() {
                out.push_str(&format!("{:>2}", encode_qn(self.qn[i])));
            } else {
                out.push_str("  ");
            }
        }
        out
    }

    /// Egy-file rendering: 3-character signed decimal slots, padded the way
    /// the Pickett tooling expects (two blanks per unused slot).
    pub fn egy_str(&self) -> String {
        let mut out = String::new();
        for i in 0..8 {
            if i < self.qn.len() {
                match self.qn[i] {
                    Some(v) => out.push_str(&format!("{v:>3}")),
                    None => out.push_str("   "),
                }
            } else {
                out.push_str("  ");
            }
        }
        out
    }

    pub fn lin_str(&self) -> String {
        self.egy_str()
    }
}

impl From<i32> for QuantumNumbers {
    fn from(v: i32) -> Self {
        QuantumNumbers::new(vec![Some(v)])
    }
}

impl From<Vec<i32>> for QuantumNumbers {
    fn from(v: Vec<i32>) -> Self {
        QuantumNumbers::new(v.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<i32>>> for QuantumNumbers {
    fn from(v: Vec<Option<i32>>) -> Self {
        QuantumNumbers::new(v)
    }
}

/// The printed form (`%3d` per slot) doubles as the dedup key for derived
/// state sets.
impl fmt::Display for QuantumNumbers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in &self.qn {
            match q {
                Some(v) => write!(f, "{v:>3}")?,
                None => write!(f, "   ")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_plain_integers() {
        assert_eq!(decode_calpgm_int("12").unwrap(), 12);
        assert_eq!(decode_calpgm_int(" 3").unwrap(), 3);
        assert_eq!(decode_calpgm_int("-4").unwrap(), -4);
    }

    #[test]
    fn decode_parity_entries() {
        // CH3OH catalog quirk: bare signs and blank pairs.
        assert_eq!(decode_calpgm_int(" +").unwrap(), 1);
        assert_eq!(decode_calpgm_int(" -").unwrap(), -1);
        assert_eq!(decode_calpgm_int("  ").unwrap(), 0);
    }

    #[test]
    fn decode_letter_extension() {
        assert_eq!(decode_calpgm_int("A0").unwrap(), 100);
        assert_eq!(decode_calpgm_int("A9").unwrap(), 109);
        assert_eq!(decode_calpgm_int("B0").unwrap(), 110);
        assert_eq!(decode_calpgm_int("Z9").unwrap(), 359);
        assert_eq!(decode_calpgm_int("a0").unwrap(), -10);
        assert_eq!(decode_calpgm_int("a9").unwrap(), -19);
        assert_eq!(decode_calpgm_int("y9").unwrap(), -259);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_calpgm_int("??").is_err());
        assert!(decode_calpgm_int("").is_err());
    }

    #[test]
    fn encode_reference_table() {
        assert_eq!(encode_qn(Some(100)), "A0");
        assert_eq!(encode_qn(Some(109)), "A9");
        assert_eq!(encode_qn(Some(110)), "B0");
        assert_eq!(encode_qn(Some(359)), "Z9");
        assert_eq!(encode_qn(Some(-10)), "a0");
        assert_eq!(encode_qn(Some(-19)), "a9");
        assert_eq!(encode_qn(None), "");
    }

    #[test]
    fn encode_boundary_values() {
        // The letter branches apply strictly to 100..=359 and -259..=-10.
        assert_eq!(encode_qn(Some(99)), "99");
        assert_eq!(encode_qn(Some(360)), "360");
        assert_eq!(encode_qn(Some(-9)), "-9");
        assert_eq!(encode_qn(Some(-260)), "-260");
        assert_eq!(encode_qn(Some(-259)), "y9");
        assert_eq!(encode_qn(Some(0)), "0");
        assert_eq!(encode_qn(Some(-1)), "-1");
    }

    #[test]
    fn codec_round_trip() {
        for v in -259..=359 {
            let s = encode_qn(Some(v));
            assert_eq!(decode_calpgm_int(&s).unwrap(), v, "value {v} via {s:?}");
        }
    }

    #[test]
    fn match_with_wildcards() {
        let qn = QuantumNumbers::from(vec![5, 2, 3]);
        assert!(qn.matches(&QuantumNumbers::new(vec![Some(5), None, Some(3)])));
        assert!(qn.matches(&QuantumNumbers::new(vec![Some(5)])));
        assert!(!qn.matches(&QuantumNumbers::new(vec![Some(4)])));
        // Pattern longer than the tuple: bounds-checked false, not a panic.
        assert!(!qn.matches(&QuantumNumbers::new(vec![
            Some(5),
            Some(2),
            Some(3),
            Some(0)
        ])));
    }

    #[test]
    fn cat_str_pads_to_eight_slots() {
        let qn = QuantumNumbers::from(vec![1, 0, 1]);
        let s = qn.cat_str();
        assert_eq!(s.len(), 16);
        assert_eq!(&s[..6], " 1 0 1");
        assert!(s[6..].chars().all(|c| c == ' '));
    }

    #[test]
    fn cat_str_uses_letter_encoding() {
        let qn = QuantumNumbers::from(vec![120, -12]);
        assert_eq!(&qn.cat_str()[..4], "C0a2");
    }

    #[test]
    fn egy_str_three_wide_fields() {
        let qn = QuantumNumbers::from(vec![12, -3]);
        assert_eq!(&qn.egy_str()[..6], " 12 -3");
    }
}
