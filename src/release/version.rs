//! Version-aware ordering of version directory names.
//!
//! `v1.10.0` must sort after `v1.9.0`, which plain string comparison gets
//! wrong. After dropping one leading `v`, a name is cut into alternating runs
//! of non-digits and digits, the way `sort -V` reads it: digit runs compare as
//! numbers of any length, non-digit runs character by character with letters
//! before punctuation. `1.0.9-rc` therefore sorts below `1.0.10-rc`.

use std::cmp::Ordering;

/// One run of a version name
#[derive(Debug, Clone, PartialEq, Eq)]
enum Component<'a> {
    /// Digits only, leading zeros stripped
    Numeric(&'a str),
    /// Non-digits, possibly empty
    Text(&'a str),
}

/// Rank of one byte inside a text run; end of run ranks 0.
fn text_rank(byte: Option<u8>) -> i32 {
    match byte {
        None => 0,
        Some(b'~') => -1,
        Some(b) if b.is_ascii_alphabetic() => i32::from(b),
        Some(b) => i32::from(b) + 256,
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    for i in 0..a.len().max(b.len()) {
        let ordering = text_rank(a.get(i).copied()).cmp(&text_rank(b.get(i).copied()));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

impl Ord for Component<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Equal-length digit strings compare like the numbers they spell
            (Self::Numeric(a), Self::Numeric(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => compare_text(a, b),
            // Runs alternate starting from text, so these never line up
            (Self::Numeric(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Component<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Component<'_> {
    /// Stand-in for a run the other name does not have
    fn absent(&self) -> Self {
        match self {
            Self::Numeric(_) => Self::Numeric("0"),
            Self::Text(_) => Self::Text(""),
        }
    }
}

/// Parsed form of a version directory name
#[derive(Debug, Clone)]
pub struct VersionKey<'a> {
    components: Vec<Component<'a>>,
}

impl Ord for VersionKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let ordering = match (self.components.get(i), other.components.get(i)) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(a), None) => a.cmp(&a.absent()),
                (None, Some(b)) => b.absent().cmp(b),
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionKey<'_> {}

impl<'a> VersionKey<'a> {
    pub fn parse(name: &'a str) -> Self {
        let mut rest = name.strip_prefix('v').unwrap_or(name);
        let mut components = Vec::new();

        while !rest.is_empty() {
            let split = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
            components.push(Component::Text(&rest[..split]));
            rest = &rest[split..];

            let split = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            if split > 0 {
                let trimmed = rest[..split].trim_start_matches('0');
                components.push(Component::Numeric(if trimmed.is_empty() { "0" } else { trimmed }));
            }
            rest = &rest[split..];
        }

        Self { components }
    }
}

/// Compare two version names, lowest first.
///
/// Names with equal keys (`v1.01` and `v1.1`) fall back to string order so
/// the result is total.
pub fn compare(a: &str, b: &str) -> Ordering {
    VersionKey::parse(a)
        .cmp(&VersionKey::parse(b))
        .then_with(|| a.cmp(b))
}

/// Sort newest first.
pub fn sort_descending<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by(|a, b| compare(b.as_ref(), a.as_ref()));
}
