use serde::Serialize;
use serde_json::{Map, Value};

use crate::console::registry::{self, Field, InputKind};

/// One labelled input of an add/edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormInput {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub kind: InputKind,
    pub value: String,
}

/// Add/edit form for a record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Form {
    pub type_name: String,
    pub title: String,
    pub inputs: Vec<FormInput>,
}

/// Build the form for `type_name`, one input per configured field.
///
/// Unknown types get a titled form with no inputs.
pub fn render_form(type_name: &str) -> Form {
    let inputs = registry::lookup(type_name)
        .map(|config| {
            config
                .fields
                .iter()
                .map(|f| FormInput {
                    name: f.key.to_string(),
                    label: f.label.to_string(),
                    placeholder: f.label.to_string(),
                    kind: f.kind,
                    value: String::new(),
                })
                .collect()
        })
        .unwrap_or_default();

    Form {
        type_name: type_name.to_string(),
        title: format!("Edit/Add: {}", type_name),
        inputs,
    }
}

impl Form {
    /// Fill an input by name; false when the form has no such input
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.inputs.iter_mut().find(|i| i.name == name) {
            Some(input) => {
                input.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.inputs.iter().find(|i| i.name == name).map(|i| i.value.as_str())
    }

    /// Flat key -> trimmed value mapping over `fields`.
    ///
    /// Keys come from `fields`, not from the inputs; a field the form lacks,
    /// like an empty input, is sent as an empty string and never omitted.
    pub fn payload(&self, fields: &[Field]) -> Map<String, Value> {
        fields
            .iter()
            .map(|f| {
                let value = self.value(f.key).unwrap_or_default().trim().to_string();
                (f.key.to_string(), Value::String(value))
            })
            .collect()
    }
}
