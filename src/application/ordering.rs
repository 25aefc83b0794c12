// Ordering policy - Display order of variable charts
use crate::domain::registry::VariableRegistry;
use crate::domain::variable::VariableDescriptor;
use std::cmp::Ordering;

/// Priority variables first (in list order), then ranged variables by
/// descending span, then unranged variables alphabetically.
#[derive(Debug, Clone, Default)]
pub struct OrderingPolicy {
    priority: Vec<String>,
}

impl OrderingPolicy {
    pub fn new(priority: Vec<String>) -> Self {
        Self { priority }
    }

    fn priority_index(&self, name: &str) -> Option<usize> {
        self.priority.iter().position(|p| p == name)
    }

    pub fn compare(
        &self,
        a: (&str, Option<&VariableDescriptor>),
        b: (&str, Option<&VariableDescriptor>),
    ) -> Ordering {
        match (self.priority_index(a.0), self.priority_index(b.0)) {
            (Some(ia), Some(ib)) => return ia.cmp(&ib),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {}
        }

        let span_a = a.1.and_then(|d| d.range.as_ref()).map(|r| r.span());
        let span_b = b.1.and_then(|d| d.range.as_ref()).map(|r| r.span());

        match (span_a, span_b) {
            // Registry ranges are finite, so spans always compare.
            (Some(sa), Some(sb)) => sb.partial_cmp(&sa).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => alphabetical(a.0, b.0),
        }
    }

    /// Stable sort of `names` using registry metadata.
    pub fn order<'a>(&self, names: impl IntoIterator<Item = &'a str>, registry: &VariableRegistry) -> Vec<&'a str> {
        let mut entries: Vec<(&str, Option<&VariableDescriptor>)> = names
            .into_iter()
            .map(|name| (name, registry.lookup(name)))
            .collect();

        entries.sort_by(|a, b| self.compare(*a, *b));
        entries.into_iter().map(|(name, _)| name).collect()
    }
}

/// Case-insensitive first, so "purge valve" and "Purge Rate" interleave the
/// way a locale collation would. Names equal up to case put lowercase first
/// ("q" before "Q"), which for ASCII is reversed byte order.
fn alphabetical(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}
