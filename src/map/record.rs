//! Structured ingestion records.

/// Opaque per-object animation state, carried through untouched.
pub type FrameState = serde_json::Value;

/// One object from a map, reduced to the fields the graph cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Ingestion id, unique per map
    pub id: u32,
    /// Object name; `None` for unnamed decoration
    pub name: Option<String>,
    /// Type tag used to look up the node constructor
    pub tag: String,
    pub properties: Properties,
}

/// The object properties understood by the node constructors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    /// Newline-delimited upstream node names
    pub input: Option<String>,
    pub frame_state: Option<FrameState>,
}

impl Record {
    /// Create a record with no properties.
    pub fn new(id: u32, name: impl Into<String>, tag: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            name: Some(name).filter(|name| !name.is_empty()),
            tag: tag.into(),
            properties: Properties::default(),
        }
    }

    /// Set the `input` property.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.properties.input = Some(input.into());
        self
    }

    /// Set the `frame_state` property.
    pub fn with_frame_state(mut self, frame_state: FrameState) -> Self {
        self.properties.frame_state = Some(frame_state);
        self
    }
}

impl Properties {
    /// Upstream names from the `input` property.
    ///
    /// Blank lines are skipped and surrounding whitespace trimmed, so a
    /// trailing newline in the editor does not become a phantom input.
    pub fn inputs(&self) -> Vec<String> {
        self.input
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_split_on_newlines() {
        let record = Record::new(1, "G", "And").with_input("A\nB");
        assert_eq!(record.properties.inputs(), vec!["A", "B"]);
    }

    #[test]
    fn test_inputs_skip_blank_lines() {
        let record = Record::new(1, "W", "Wire").with_input("A\r\n\n  \n");
        assert_eq!(record.properties.inputs(), vec!["A"]);
    }

    #[test]
    fn test_missing_input_is_empty() {
        let record = Record::new(1, "K", "Control");
        assert!(record.properties.inputs().is_empty());
    }

    #[test]
    fn test_empty_name_is_unnamed() {
        let record = Record::new(7, "", "Wire");
        assert_eq!(record.name, None);
    }
}
