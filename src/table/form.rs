//! Dialog form model.
//!
//! A [`Form`] is an ordered list of fields with one focused field. Records
//! build forms from their current values (edit/view) or from defaults
//! (add), and read the submitted values back out by field key.

use crate::table::error::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    /// One of a fixed set of values; an empty value means nothing selected.
    Choice(&'static [&'static str]),
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
    pub required: bool,
    pub value: FieldValue,
}

impl FormField {
    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            input: FieldInput::Text,
            required: false,
            value: FieldValue::Text(String::new()),
        }
    }

    pub fn choice(key: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            input: FieldInput::Choice(options),
            ..Self::text(key, label)
        }
    }

    pub fn toggle(key: &'static str, label: &'static str, on: bool) -> Self {
        Self {
            key,
            label,
            input: FieldInput::Toggle,
            required: false,
            value: FieldValue::Flag(on),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_blank(&self) -> bool {
        match &self.value {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(_) => false,
        }
    }

    fn cycle(&mut self, forward: bool) {
        match (self.input, &mut self.value) {
            (FieldInput::Toggle, FieldValue::Flag(on)) => *on = !*on,
            (FieldInput::Choice(options), FieldValue::Text(current)) if !options.is_empty() => {
                let next = match options.iter().position(|o| o == current) {
                    Some(i) if forward => (i + 1) % options.len(),
                    Some(i) => (i + options.len() - 1) % options.len(),
                    None if forward => 0,
                    None => options.len() - 1,
                };
                *current = options[next].to_string();
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Text value of `key`; empty for unknown keys and toggles.
    pub fn text(&self, key: &str) -> &str {
        match self.field(key).map(|f| &f.value) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.field(key).map(|f| &f.value), Some(FieldValue::Flag(true)))
    }

    pub fn with_text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_text(key, value);
        self
    }

    pub fn with_flag(mut self, key: &str, on: bool) -> Self {
        self.set_flag(key, on);
        self
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        if let Some(field) = self.field_mut(key) {
            if let FieldValue::Text(s) = &mut field.value {
                *s = value.into();
            }
        }
    }

    pub fn set_flag(&mut self, key: &str, on: bool) {
        if let Some(field) = self.field_mut(key) {
            if let FieldValue::Flag(f) = &mut field.value {
                *f = on;
            }
        }
    }

    /// First required field left blank, in field order.
    pub fn validate(&self) -> Result<(), TableError> {
        match self.fields.iter().find(|f| f.required && f.is_blank()) {
            Some(field) => Err(TableError::Validation { field: field.label }),
            None => Ok(()),
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Type into the focused field. Space flips a focused toggle; choice
    /// fields ignore typed characters.
    pub fn insert_char(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        match field.input {
            FieldInput::Text => {
                if let FieldValue::Text(s) = &mut field.value {
                    s.push(c);
                }
            }
            FieldInput::Toggle if c == ' ' => field.cycle(true),
            _ => {}
        }
    }

    pub fn delete_back(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            match (field.input, &mut field.value) {
                (FieldInput::Text, FieldValue::Text(s)) => {
                    s.pop();
                }
                (FieldInput::Choice(_), FieldValue::Text(s)) => s.clear(),
                _ => {}
            }
        }
    }

    /// Step a choice field through its options, or flip a toggle.
    pub fn cycle_focused(&mut self, forward: bool) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.cycle(forward);
        }
    }

    fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: &[&str] = &["Red", "Green", "Blue"];

    fn sample() -> Form {
        Form::new(vec![
            FormField::text("name", "Name").required(),
            FormField::choice("color", "Color", COLORS),
            FormField::toggle("active", "Active", true),
        ])
    }

    #[test]
    fn test_validate_reports_first_blank_required_field() {
        let form = sample();
        assert_eq!(form.validate(), Err(TableError::Validation { field: "Name" }));

        let form = sample().with_text("name", "   ");
        assert!(form.validate().unwrap_err().is_validation());

        let form = sample().with_text("name", "Widget");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_typing_edits_focused_text_field_only() {
        let mut form = sample();
        form.insert_char('a');
        form.insert_char('b');
        form.delete_back();
        assert_eq!(form.text("name"), "a");

        form.focus_next();
        form.insert_char('x');
        assert_eq!(form.text("color"), "");
    }

    #[test]
    fn test_choice_cycles_and_wraps() {
        let mut form = sample();
        form.focus_next();
        form.cycle_focused(true);
        assert_eq!(form.text("color"), "Red");
        form.cycle_focused(false);
        assert_eq!(form.text("color"), "Blue");
        form.cycle_focused(true);
        assert_eq!(form.text("color"), "Red");
        form.delete_back();
        assert_eq!(form.text("color"), "");
    }

    #[test]
    fn test_toggle_flips_on_space_and_cycle() {
        let mut form = sample();
        form.focus_prev();
        assert!(form.flag("active"));
        form.insert_char(' ');
        assert!(!form.flag("active"));
        form.cycle_focused(false);
        assert!(form.flag("active"));
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut form = sample();
        form.focus_prev();
        assert_eq!(form.focus(), 2);
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let form = sample().with_text("missing", "x").with_flag("name", true);
        assert_eq!(form.text("missing"), "");
        assert!(!form.flag("name"));
        assert_eq!(form.text("name"), "");
    }
}
