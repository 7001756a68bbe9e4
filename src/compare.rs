use crate::network::{Substation, VoltageLevel};
use feruca::Collator;
use std::cmp::Ordering;

/// Identified is implemented by every element shown in the explorer:
/// an id that is always present and an optional display name.
pub trait Identified {
    fn id(&self) -> &str;
    fn name(&self) -> Option<&str>;
}

impl Identified for Substation {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Identified for VoltageLevel {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Returns the field used to sort, match and display an element.
///
/// With `use_name` set, an element without a name yields the empty string.
pub fn select_key<T: Identified + ?Sized>(element: &T, use_name: bool) -> &str {
    if use_name {
        element.name().unwrap_or("")
    } else {
        element.id()
    }
}

/// Orders identified elements with the Unicode Collation Algorithm
/// (CLDR root collation). Case is respected: keys that only differ by
/// case are not equal, lower case sorts first.
///
/// One comparator is created for a whole rebuild pass, so that groups
/// and their children are keyed by the same field.
pub struct IdentifiedComparator {
    use_name: bool,
    collator: Collator,
}

impl IdentifiedComparator {
    pub fn new(use_name: bool) -> Self {
        Self {
            use_name,
            collator: Collator::default(),
        }
    }

    pub fn key<'a, T: Identified + ?Sized>(&self, element: &'a T) -> &'a str {
        select_key(element, self.use_name)
    }

    pub fn compare<T: Identified + ?Sized>(&mut self, a: &T, b: &T) -> Ordering {
        let (ka, kb) = (select_key(a, self.use_name), select_key(b, self.use_name));
        self.collate(ka, kb)
    }

    pub fn collate(&mut self, a: &str, b: &str) -> Ordering {
        self.collator.collate(a, b)
    }
}
