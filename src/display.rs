use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// The text shown wherever a value is undefined, such as a percentage over zero matches or a
/// season without a champion.
pub const UNDEFINED: &str = "N/A";

pub struct DisplaySlice<'a, D: Display> {
    items: &'a [D]
}
impl<'a, D: Display> Display for DisplaySlice<'a, D> where D: Display {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        let len = self.items.len();
        for (index, item) in self.items.iter().enumerate() {
            write!(f, "{item}")?;
            if index != len - 1 {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")?;
        Ok(())
    }
}

impl<'a, D: Display> From<&'a [D]> for DisplaySlice<'a, D> {
    fn from(items: &'a [D]) -> Self {
        DisplaySlice { items }
    }
}

pub struct DisplayRangeInclusive<'a, D: Display> {
    range: &'a RangeInclusive<D>
}

impl<'a, D: Display> From<&'a RangeInclusive<D>> for DisplayRangeInclusive<'a, D> {
    fn from(range: &'a RangeInclusive<D>) -> Self {
        DisplayRangeInclusive { range }
    }
}

impl<'a, D: Display> Display for DisplayRangeInclusive<'a, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.range.start(), self.range.end())
    }
}

/// A percentage to two decimal places, or [UNDEFINED] when its denominator was zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPercent(pub Option<f64>);

impl Display for DisplayPercent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => write!(f, "{UNDEFINED}"),
            Some(value) => write!(f, "{value:.2}%"),
        }
    }
}

/// An optional value rendered with its own [Display], or [UNDEFINED] if absent.
pub struct DisplayOption<'a, D: Display>(pub Option<&'a D>);

impl<'a, D: Display> Display for DisplayOption<'a, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => write!(f, "{UNDEFINED}"),
            Some(value) => write!(f, "{value}"),
        }
    }
}
