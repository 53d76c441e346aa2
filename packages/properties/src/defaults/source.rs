//! Runtime data that default values are resolved against.

use std::collections::HashMap;

use crate::types::Value;

/// Runtime state of a form as seen by default-value resolution.
pub trait DefaultValueSource {
    /// Name of the form that owns the value being defaulted.
    fn form_name(&self) -> &str;

    fn application_parameter(&self, name: &str) -> Option<&Value>;

    fn form_parameter(&self, name: &str) -> Option<&Value>;

    fn block(&self, name: &str) -> Option<&Block>;
}

/// A block with its items and in-memory records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    name: String,
    items: Vec<String>,
    records: Vec<HashMap<String, Value>>,
    focused: Option<usize>,
}

impl Block {
    /// Create a block declaring `items`.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
            records: Vec::new(),
            focused: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn has_item(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    /// Append a record and give it focus. Returns its index.
    pub fn add_record(&mut self, record: HashMap<String, Value>) -> usize {
        self.records.push(record);
        let index = self.records.len() - 1;
        self.focused = Some(index);
        index
    }

    /// Move focus to the record at `index`; out-of-range clears focus.
    pub fn focus(&mut self, index: usize) {
        self.focused = (index < self.records.len()).then_some(index);
    }

    #[must_use]
    pub fn focused_record(&self) -> Option<&HashMap<String, Value>> {
        self.focused.and_then(|index| self.records.get(index))
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// In-memory [`DefaultValueSource`].
#[derive(Debug, Clone, Default)]
pub struct FormState {
    form_name: String,
    application_parameters: HashMap<String, Value>,
    form_parameters: HashMap<String, Value>,
    blocks: HashMap<String, Block>,
}

impl FormState {
    #[must_use]
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            ..Self::default()
        }
    }

    pub fn set_application_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.application_parameters.insert(name.into(), value.into());
    }

    pub fn set_form_parameter(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.form_parameters.insert(name.into(), value.into());
    }

    pub fn add_block(&mut self, block: Block) {
        self.blocks.insert(block.name().to_string(), block);
    }
}

impl DefaultValueSource for FormState {
    fn form_name(&self) -> &str {
        &self.form_name
    }

    fn application_parameter(&self, name: &str) -> Option<&Value> {
        self.application_parameters.get(name)
    }

    fn form_parameter(&self, name: &str) -> Option<&Value> {
        self.form_parameters.get(name)
    }

    fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }
}
