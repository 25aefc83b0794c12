// Variable registry - static display name -> metadata lookup
use super::error::DashboardError;
use super::variable::VariableDescriptor;
use std::collections::HashMap;

/// Read-only after construction. A missing entry means "no tag, no range".
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    entries: HashMap<String, VariableDescriptor>,
}

impl VariableRegistry {
    pub fn new(descriptors: Vec<VariableDescriptor>) -> Result<Self, DashboardError> {
        let mut entries = HashMap::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if let Some(range) = &descriptor.range {
                if !range.is_valid() {
                    return Err(DashboardError::InvalidRange {
                        name: descriptor.display_name.clone(),
                        min: range.min,
                        max: range.max,
                    });
                }
            }

            if entries.contains_key(&descriptor.display_name) {
                return Err(DashboardError::DuplicateVariable(descriptor.display_name));
            }
            entries.insert(descriptor.display_name.clone(), descriptor);
        }

        Ok(Self { entries })
    }

    pub fn lookup(&self, display_name: &str) -> Option<&VariableDescriptor> {
        self.entries.get(display_name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::variable::OperatingRange;

    #[test]
    fn test_lookup() {
        let registry = VariableRegistry::new(vec![
            VariableDescriptor::new("Reactor Pressure")
                .with_tag("XMEAS(7)")
                .with_range(OperatingRange::new(2650.0, 2800.0, "kPa", true)),
            VariableDescriptor::new("Purge valve").with_tag("XMV(6)"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        let pressure = registry.lookup("Reactor Pressure").unwrap();
        assert_eq!(pressure.external_tag.as_deref(), Some("XMEAS(7)"));
        assert!(pressure.is_critical());
        assert!(registry.lookup("Purge valve").unwrap().range.is_none());
        assert!(registry.lookup("Component A in Purge").is_none());
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = VariableRegistry::new(vec![
            VariableDescriptor::new("A Feed"),
            VariableDescriptor::new("A Feed").with_tag("XMEAS(1)"),
        ])
        .unwrap_err();

        assert_eq!(err, DashboardError::DuplicateVariable("A Feed".to_string()));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = VariableRegistry::new(vec![
            VariableDescriptor::new("Reactor Level")
                .with_range(OperatingRange::new(80.0, 70.0, "%", true)),
        ])
        .unwrap_err();

        assert!(matches!(err, DashboardError::InvalidRange { ref name, .. } if name == "Reactor Level"));
    }
}
