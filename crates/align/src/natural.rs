//! Natural ordering for taxonomy codes (`A2` before `A10`).

use std::cmp::Ordering;

/// Compare two codes chunk by chunk: digit runs by numeric value, every other
/// character on its own, ignoring case. Punctuation and whitespace sort before
/// digits, and digits before letters. Codes that differ only in case or in
/// leading zeros compare equal, so a stable sort keeps their input order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chunks = Chunks::new(a);
    let mut b_chunks = Chunks::new(b);

    loop {
        match (a_chunks.next(), b_chunks.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_chunks(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Char(char),
}

impl Chunk<'_> {
    fn rank(self) -> u8 {
        match self {
            Chunk::Char(c) if c.is_alphabetic() => 2,
            Chunk::Digits(_) => 1,
            Chunk::Char(_) => 0,
        }
    }
}

fn compare_chunks(x: Chunk<'_>, y: Chunk<'_>) -> Ordering {
    match (x, y) {
        (Chunk::Digits(a), Chunk::Digits(b)) => compare_numeric(a, b),
        (Chunk::Char(a), Chunk::Char(b)) => x
            .rank()
            .cmp(&y.rank())
            .then_with(|| a.to_lowercase().cmp(b.to_lowercase())),
        _ => x.rank().cmp(&y.rank()),
    }
}

/// Numeric comparison of two ASCII digit runs of any length.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        if !first.is_ascii_digit() {
            self.rest = &self.rest[first.len_utf8()..];
            return Some(Chunk::Char(first));
        }
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        let (digits, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Chunk::Digits(digits))
    }
}
