//! Raw form input as typed by the user, required-field validation and the transient form state.

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display, Formatter},
};

use itertools::Itertools;
use serde::{Serialize, Serializer, ser::SerializeMap};

/// A single input of a form.
pub trait Field: Copy + Ord + Debug + Send + Sync + 'static {
    /// All the fields in the display order.
    const ALL: &'static [Self];

    /// Stable key, used in serialized output.
    fn key(self) -> &'static str;

    /// Message to show when the field is left empty, `None` for optional fields.
    fn required_message(self) -> Option<&'static str>;
}

/// Raw text of a form, plus the evaluation it is submitted to.
pub trait Form {
    type Field: Field;
    type Report;

    fn raw(&self, field: Self::Field) -> &str;

    fn raw_mut(&mut self, field: Self::Field) -> &mut String;

    fn evaluate(&self) -> Result<Self::Report, FieldErrors<Self::Field>>;

    /// Check that every required field has some non-blank text.
    ///
    /// Only presence is checked here: text that does not parse still passes and is coerced later.
    fn validate(&self) -> Result<(), FieldErrors<Self::Field>> {
        let errors: FieldErrors<Self::Field> = Self::Field::ALL
            .iter()
            .filter(|field| is_blank(self.raw(**field)))
            .filter_map(|field| Some((*field, field.required_message()?)))
            .collect();
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Clone, Eq, PartialEq)]
#[must_use]
pub struct FieldErrors<F>(BTreeMap<F, &'static str>);

impl<F: Field> FieldErrors<F> {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[cfg_attr(not(test), expect(dead_code))]
    pub fn get(&self, field: F) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Forget the error of the single field, leaving the others intact.
    pub fn clear(&mut self, field: F) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl<F: Field> Default for FieldErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> FromIterator<(F, &'static str)> for FieldErrors<F> {
    fn from_iter<T: IntoIterator<Item = (F, &'static str)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<F: Field> Debug for FieldErrors<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter().map(|(field, message)| (field.key(), message))).finish()
    }
}

impl<F: Field> Display for FieldErrors<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iter().map(|(_, message)| message).join(" "))
    }
}

impl<F: Field> std::error::Error for FieldErrors<F> {}

impl<F: Field> Serialize for FieldErrors<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, message) in self.iter() {
            map.serialize_entry(field.key(), message)?;
        }
        map.end()
    }
}

/// State of one form between user actions: the raw text, the latest errors and the latest report.
#[must_use]
pub struct FormState<F: Form> {
    form: F,
    errors: FieldErrors<F::Field>,
    report: Option<F::Report>,
}

impl<F: Form> FormState<F> {
    pub fn new(form: F) -> Self {
        Self { form, errors: FieldErrors::new(), report: None }
    }

    pub const fn errors(&self) -> &FieldErrors<F::Field> {
        &self.errors
    }

    pub const fn report(&self) -> Option<&F::Report> {
        self.report.as_ref()
    }

    /// Edit a single field. Its error, if any, goes away, the others stay until the next submit.
    pub fn set(&mut self, field: F::Field, value: impl Into<String>) {
        *self.form.raw_mut(field) = value.into();
        self.errors.clear(field);
    }

    /// Evaluate the current text, replacing both the previous report and the previous errors.
    ///
    /// Returns whether a report has been produced.
    pub fn submit(&mut self) -> bool {
        match self.form.evaluate() {
            Ok(report) => {
                self.errors = FieldErrors::new();
                self.report = Some(report);
                true
            }
            Err(errors) => {
                self.errors = errors;
                self.report = None;
                false
            }
        }
    }

    /// Blank every field and drop the outcome of the last submit.
    #[cfg_attr(not(test), expect(dead_code))]
    pub fn reset(&mut self) {
        for field in F::Field::ALL {
            self.form.raw_mut(*field).clear();
        }
        self.errors = FieldErrors::new();
        self.report = None;
    }
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Coerce the text into a number the lenient way: blank or unparseable text is zero.
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.parse::<f64>().ok().filter(|number| number.is_finite()).unwrap_or(0.0)
}

/// Like [`parse_number`], but `None` when nothing has been entered.
pub fn parse_optional_number(text: &str) -> Option<f64> {
    if is_blank(text) { None } else { Some(parse_number(text)) }
}

/// Round half-up to the nearest integer, so that `-2.5` becomes `-2`.
#[expect(clippy::cast_possible_truncation)]
pub fn round_half_up(number: f64) -> i64 {
    (number + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
    enum TestField {
        Name,
        Nickname,
    }

    impl Field for TestField {
        const ALL: &'static [Self] = &[Self::Name, Self::Nickname];

        fn key(self) -> &'static str {
            match self {
                Self::Name => "name",
                Self::Nickname => "nickname",
            }
        }

        fn required_message(self) -> Option<&'static str> {
            match self {
                Self::Name => Some("Name is required."),
                Self::Nickname => None,
            }
        }
    }

    #[derive(Default)]
    struct TestForm {
        name: String,
        nickname: String,
    }

    impl Form for TestForm {
        type Field = TestField;
        type Report = f64;

        fn raw(&self, field: Self::Field) -> &str {
            match field {
                TestField::Name => &self.name,
                TestField::Nickname => &self.nickname,
            }
        }

        fn raw_mut(&mut self, field: Self::Field) -> &mut String {
            match field {
                TestField::Name => &mut self.name,
                TestField::Nickname => &mut self.nickname,
            }
        }

        fn evaluate(&self) -> Result<Self::Report, FieldErrors<Self::Field>> {
            self.validate()?;
            Ok(parse_number(&self.name))
        }
    }

    #[test]
    fn parse_number_ok() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number(" 4.5 "), 4.5);
        assert_eq!(parse_number("-3"), -3.0);
        assert_eq!(parse_number("1e3"), 1000.0);
    }

    #[test]
    fn parse_number_coerces_to_zero() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("   "), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
    }

    #[test]
    fn parse_optional_number_ok() {
        assert_eq!(parse_optional_number(""), None);
        assert_eq!(parse_optional_number("0"), Some(0.0));
        assert_eq!(parse_optional_number("x"), Some(0.0));
    }

    #[test]
    fn round_half_up_ok() {
        assert_eq!(round_half_up(450.4), 450);
        assert_eq!(round_half_up(500.5), 501);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn validate_skips_optional_fields() {
        let errors = TestForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(TestField::Name), Some("Name is required."));
        assert_eq!(errors.get(TestField::Nickname), None);
    }

    #[test]
    fn validate_only_checks_presence() {
        let form = TestForm { name: "not a number".to_string(), nickname: String::new() };
        assert!(form.validate().is_ok());
        assert_eq!(form.evaluate().unwrap(), 0.0);
    }

    #[test]
    fn set_clears_only_edited_field() {
        let mut errors: FieldErrors<TestField> =
            [(TestField::Name, "a"), (TestField::Nickname, "b")].into_iter().collect();
        errors.clear(TestField::Name);
        assert_eq!(errors.get(TestField::Name), None);
        assert_eq!(errors.get(TestField::Nickname), Some("b"));

        let mut state = FormState::new(TestForm::default());
        assert!(!state.submit());
        assert_eq!(state.errors().len(), 1);
        state.set(TestField::Nickname, "Fox");
        assert_eq!(state.errors().len(), 1, "editing another field keeps the error");
        state.set(TestField::Name, "7");
        assert!(state.errors().is_empty());
        assert!(state.report().is_none(), "no report until submitted");
    }

    #[test]
    fn submit_replaces_outcome() {
        let mut state = FormState::new(TestForm::default());
        state.set(TestField::Name, "7");
        assert!(state.submit());
        assert_eq!(state.report(), Some(&7.0));

        state.set(TestField::Name, " ");
        assert!(!state.submit());
        assert_eq!(state.report(), None, "failed validation drops the previous report");
        assert_eq!(state.errors().get(TestField::Name), Some("Name is required."));
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = FormState::new(TestForm::default());
        state.set(TestField::Name, "7");
        state.set(TestField::Nickname, "Fox");
        assert!(state.submit());
        state.reset();
        assert_eq!(state.form.raw(TestField::Name), "");
        assert_eq!(state.form.raw(TestField::Nickname), "");
        assert!(state.report().is_none());
        assert!(state.errors().is_empty());
    }

    #[test]
    fn display_and_serialize_errors() {
        let errors = TestForm::default().validate().unwrap_err();
        assert_eq!(errors.to_string(), "Name is required.");
        assert_eq!(serde_json::to_string(&errors).unwrap(), r#"{"name":"Name is required."}"#);
    }
}
