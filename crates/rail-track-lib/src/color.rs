//! Track colors and the first-seen color assignment map

use crate::{DataError, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An opaque 8-bit RGB color, written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| DataError::InvalidColor(format!("expected #RRGGBB, got {hex:?}")))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| DataError::InvalidColor(format!("non-hex digits in {hex:?}")))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl FromStr for Rgb {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Assignment of one palette color per distinct track identifier
///
/// Colors are handed out in first-seen order and wrap around once the palette is exhausted,
/// so the `n`-th distinct identifier receives `palette[n % palette.len()]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMap {
    /// Identifiers with their color, in first-seen order
    entries: Vec<(i64, Rgb)>,
    /// Identifier -> position in `entries`
    index: HashMap<i64, usize>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl ColorMap {
    /// Build the map in a single pass over the identifiers, in order.
    ///
    /// Missing and zero identifiers are skipped and receive no color. An empty palette yields an
    /// empty map.
    pub fn build<I>(track_ids: I, palette: &[Rgb]) -> Self
    where
        I: IntoIterator<Item = Option<i64>>,
    {
        if palette.is_empty() {
            tracing::warn!("Empty track palette, every track will use the fallback style");
            return Self::default();
        }

        track_ids
            .into_iter()
            .flatten()
            .filter(|&id| id != 0)
            .fold(Self::default(), |mut map, id| {
                if !map.index.contains_key(&id) {
                    let seen = map.entries.len();
                    map.index.insert(id, seen);
                    map.entries.push((id, palette[seen % palette.len()]));
                }
                map
            })
    }

    #[inline]
    pub fn get(&self, track_id: i64) -> Option<Rgb> {
        self.index.get(&track_id).map(|&i| self.entries[i].1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(track_id, color)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (i64, Rgb)> + '_ {
        self.entries.iter().copied()
    }
}
