use std::cmp::Ordering;

use crate::token::Token;

/*
 * How bytes are folded before two tokens are compared
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Folding {
    /*
     * Signed byte modulo 32, with truncated remainder. Letters fold to the
     * same value in either case ('A' and 'a' are both 1). Digits land on
     * 16..=25 and so tie with 'P'..='Y', and bytes from 0x80 up fold to
     * zero or below, sorting before every letter.
     */
    #[default]
    Residue,
    /*
     * ASCII letters uppercased, every other byte by its unsigned value
     */
    Ascii,
}

impl Folding {
    pub fn fold(self, byte: u8) -> i16 {
        match self {
            Folding::Residue => ((byte as i8) % 32) as i16,
            Folding::Ascii => byte.to_ascii_uppercase() as i16,
        }
    }
}

/*
 * Case-insensitive order over raw tokens. Positions up to the shorter
 * length decide first; when one token is a prefix of the other, the
 * shorter one sorts first. Tokens that fold to the same bytes are equal,
 * which makes `le` hold both ways and lets the merge keep them stable.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Collation {
    pub folding: Folding,
}

impl Collation {
    pub fn new(folding: Folding) -> Self {
        Collation { folding }
    }

    /*
     * Bounded by the shorter token. A bound on `b`'s length alone would read
     * past the end of a shorter `a` as a zero byte, and then "a" > "a\xc3".
     * Here a strict prefix always sorts first.
     */
    pub fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        a.iter()
            .zip(b)
            .map(|(&x, &y)| self.folding.fold(x).cmp(&self.folding.fold(y)))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    }

    /*
     * "a sorts before or together with b"
     */
    pub fn le(&self, a: &[u8], b: &[u8]) -> bool {
        self.compare(a, b) != Ordering::Greater
    }

    pub fn tokens_le(&self, a: &Token, b: &Token) -> bool {
        self.le(a.as_bytes(), b.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkedlist::{List, NodeArena};
    use rand::prelude::*;

    const RESIDUE: Collation = Collation {
        folding: Folding::Residue,
    };
    const ASCII: Collation = Collation {
        folding: Folding::Ascii,
    };

    #[test]
    fn letters_ignore_case() {
        for collation in [RESIDUE, ASCII] {
            assert_eq!(collation.compare(b"apple", b"APPLE"), Ordering::Equal);
            assert_eq!(collation.compare(b"Apple", b"banana"), Ordering::Less);
            assert_eq!(collation.compare(b"banana", b"Apple"), Ordering::Greater);
            assert_eq!(collation.compare(b"Zebra", b"yak"), Ordering::Greater);
        }
    }

    #[test]
    fn residue_matches_ascii_uppercase_on_letters() {
        for b in (b'A'..=b'Z').chain(b'a'..=b'z') {
            for c in (b'A'..=b'Z').chain(b'a'..=b'z') {
                assert_eq!(
                    RESIDUE.compare(&[b], &[c]),
                    b.to_ascii_uppercase().cmp(&c.to_ascii_uppercase()),
                    "{} vs {}",
                    b as char,
                    c as char
                );
            }
        }
    }

    #[test]
    fn prefix_sorts_first() {
        for collation in [RESIDUE, ASCII] {
            assert!(collation.le(b"app", b"apple"));
            assert!(!collation.le(b"apple", b"app"));
            assert!(collation.le(b"", b"a"));
            assert!(!collation.le(b"a", b""));
        }
    }

    #[test]
    fn equal_tokens_are_le_both_ways() {
        for collation in [RESIDUE, ASCII] {
            assert!(collation.le(b"same", b"SAME"));
            assert!(collation.le(b"SAME", b"same"));
            assert!(collation.le(b"", b""));
        }
    }

    #[test]
    fn longer_left_is_decided_within_shorter_length() {
        // difference inside the shared prefix wins over the length rule
        assert!(RESIDUE.le(b"abcz", b"abd"));
        assert!(!RESIDUE.le(b"abe", b"abdz"));
    }

    #[test]
    fn shorter_left_before_negative_residue() {
        // reading past "a" as a zero byte would make it greater than "a\xc3"
        assert!(RESIDUE.le(b"a", b"a\xc3"));
        assert!(!RESIDUE.le(b"a\xc3", b"a"));
        assert!(RESIDUE.le(b"A", b"a@"));
    }

    #[test]
    fn residue_on_digits_and_punctuation() {
        // '0' % 32 == 16 == 'P' % 32
        assert_eq!(RESIDUE.compare(b"0", b"p"), Ordering::Equal);
        assert_eq!(RESIDUE.compare(b"1", b"2"), Ordering::Less);
        // '9' % 32 == 25 sits above 'A'..='X'
        assert_eq!(RESIDUE.compare(b"9", b"x"), Ordering::Greater);
        // '@' % 32 == 0 sorts before every letter
        assert_eq!(RESIDUE.compare(b"@", b"a"), Ordering::Less);
    }

    #[test]
    fn residue_on_high_bytes_is_negative() {
        // 0xC3 as i8 is -61, -61 % 32 is -29
        assert_eq!(Folding::Residue.fold(0xC3), -29);
        assert_eq!(Folding::Residue.fold(0x80), 0);
        assert_eq!(RESIDUE.compare(b"\xc3", b"a"), Ordering::Less);
    }

    #[test]
    fn ascii_folding_on_other_bytes() {
        assert_eq!(ASCII.compare(b"0", b"p"), Ordering::Less);
        assert_eq!(ASCII.compare(b"9", b"a"), Ordering::Less);
        assert_eq!(ASCII.compare(b"\xc3", b"a"), Ordering::Greater);
        // '_' (0x5F) is above 'Z' once letters are uppercased
        assert_eq!(ASCII.compare(b"_", b"z"), Ordering::Greater);
    }

    #[test]
    fn tokens_le_uses_token_bytes() {
        let b1 = Token::new(b"b1").unwrap();
        let b2 = Token::new(b"B2").unwrap();
        assert!(RESIDUE.tokens_le(&b1, &b2));
        assert!(!RESIDUE.tokens_le(&b2, &b1));
    }

    #[test]
    fn random_tokens_sort_ordered_and_stable() {
        const ALPHABET: &[u8] = b"aAbBzZ09_@.\xc3\x80";
        let mut rng = StdRng::seed_from_u64(0x70c3);

        for collation in [RESIDUE, ASCII] {
            let items: Vec<(Token, usize)> = (0..600)
                .map(|i| {
                    let len = rng.gen_range(1..=4);
                    let word: Vec<u8> = (0..len).map(|_| *ALPHABET.choose(&mut rng).unwrap()).collect();
                    (Token::new(&word).unwrap(), i)
                })
                .collect();

            let arena = NodeArena::new();
            let list = List::try_build(&arena, items.iter().copied().map(Ok)).unwrap();
            let list = list.sort_by(|a, b| collation.tokens_le(&a.0, &b.0));
            let sorted: Vec<(Token, usize)> = list.iter().copied().collect();

            assert_eq!(sorted.len(), items.len());
            for pair in sorted.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(collation.tokens_le(&a.0, &b.0), "{:?} before {:?}", a, b);
                if collation.compare(a.0.as_bytes(), b.0.as_bytes()).is_eq() {
                    assert!(a.1 < b.1, "tie {:?} {:?} out of input order", a, b);
                }
            }

            let mut positions: Vec<usize> = sorted.iter().map(|(_, i)| *i).collect();
            positions.sort_unstable();
            assert_eq!(positions, (0..items.len()).collect::<Vec<_>>());
        }
    }
}
