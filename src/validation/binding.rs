use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::i18n::{MessageArgs, format_message};

/// Key under which `validator` reports struct-level (global) errors.
const GLOBAL_ERRORS_KEY: &str = "__all__";

/// A single constraint violation on one input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    object_name: String,
    field: String,
    rejected_value: Option<Value>,
    code: String,
    arguments: BTreeMap<String, Value>,
    default_message: Option<String>,
}

impl FieldError {
    pub fn new(
        object_name: impl Into<String>,
        field: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            field: field.into(),
            rejected_value: None,
            code: code.into(),
            arguments: BTreeMap::new(),
            default_message: None,
        }
    }

    pub fn with_rejected_value(mut self, value: Value) -> Self {
        self.rejected_value = Some(value);
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: Value) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = Some(message.into());
        self
    }

    /// Converts one `validator` error. The `value` param becomes the rejected
    /// value, every other param an argument.
    pub fn from_validation_error(object_name: &str, field: &str, error: &ValidationError) -> Self {
        let mut field_error = Self::new(object_name, field, error.code.to_string());

        for (name, value) in &error.params {
            if name == "value" {
                field_error.rejected_value = Some(value.clone());
            } else {
                field_error.arguments.insert(name.to_string(), value.clone());
            }
        }

        field_error.default_message = match &error.message {
            Some(message) => Some(message.to_string()),
            None => builtin_default_message(&field_error.code, &field_error.arguments),
        };
        field_error
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rejected_value(&self) -> Option<&Value> {
        self.rejected_value.as_ref()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn arguments(&self) -> &BTreeMap<String, Value> {
        &self.arguments
    }

    pub fn default_message(&self) -> Option<&str> {
        self.default_message.as_deref()
    }

    /// Message codes from most to least specific.
    pub fn codes(&self) -> Vec<String> {
        let mut codes = vec![
            format!("{}.{}.{}", self.code, self.object_name, self.field),
            format!("{}.{}", self.code, self.field),
        ];

        let plain_field = strip_indices(&self.field);
        if plain_field != self.field {
            codes.push(format!("{}.{}.{}", self.code, self.object_name, plain_field));
            codes.push(format!("{}.{}", self.code, plain_field));
        }

        codes.push(self.code.clone());
        codes
    }

    /// `{0}` is the field label, arguments are available by name.
    pub fn message_args(&self, field_label: impl Into<String>) -> MessageArgs {
        self.arguments
            .iter()
            .fold(MessageArgs::none().with_positional(field_label), |args, (name, value)| {
                args.with_named(name, render_value(value))
            })
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rejected = self
            .rejected_value
            .as_ref()
            .map_or_else(|| "null".to_string(), render_value);
        let arguments = self
            .arguments
            .iter()
            .map(|(name, value)| format!("{name}={}", render_value(value)))
            .collect::<Vec<_>>()
            .join(", ");

        write!(
            f,
            "Field error in object '{}' on field '{}': rejected value [{}]; codes [{}]; arguments [{}]; default message [{}]",
            self.object_name,
            self.field,
            rejected,
            self.codes().join(","),
            arguments,
            self.default_message.as_deref().unwrap_or("null"),
        )
    }
}

/// Outcome of validating one parsed payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingResult {
    object_name: String,
    field_errors: Vec<FieldError>,
}

impl BindingResult {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            field_errors: Vec::new(),
        }
    }

    /// Flattens `validator` errors into field errors.
    ///
    /// Fields are visited in name order; nested structs and list items get
    /// `parent.child` and `items[0].child` paths. Struct-level errors are not
    /// field errors and are skipped.
    pub fn from_validation_errors(object_name: impl Into<String>, errors: &ValidationErrors) -> Self {
        let mut result = Self::new(object_name);
        let object_name = result.object_name.clone();
        collect_field_errors(&object_name, None, errors, &mut result.field_errors);
        result
    }

    pub fn with_field_error(mut self, error: FieldError) -> Self {
        self.field_errors.push(error);
        self
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn error_count(&self) -> usize {
        self.field_errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }
}

/// `createPersonRequest` for `crate::dto::requests::CreatePersonRequest`.
pub fn object_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    let short = without_generics.rsplit("::").next().unwrap_or(without_generics);

    let mut chars = short.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn collect_field_errors(
    object_name: &str,
    prefix: Option<&str>,
    errors: &ValidationErrors,
    out: &mut Vec<FieldError>,
) {
    let fields: BTreeMap<_, _> = errors.errors().iter().collect();

    for (field, kind) in fields {
        if field == GLOBAL_ERRORS_KEY {
            continue;
        }
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => out.extend(
                field_errors
                    .iter()
                    .map(|error| FieldError::from_validation_error(object_name, &path, error)),
            ),
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(object_name, Some(&path), nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{path}[{index}]");
                    collect_field_errors(object_name, Some(&item_path), nested, out);
                }
            }
        }
    }
}

/// `items[0].name` -> `items.name`
fn strip_indices(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for c in path.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Strings unquoted, whole floats without the trailing `.0`.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            #[allow(clippy::cast_possible_truncation)]
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// English fallback for the constraint codes `validator` ships with.
fn builtin_default_message(code: &str, arguments: &BTreeMap<String, Value>) -> Option<String> {
    let has = |name: &str| arguments.contains_key(name);

    let template = match code {
        "email" => "must be a well-formed email address",
        "url" => "must be a valid URL",
        "required" => "must not be null",
        "credit_card" => "must be a valid credit card number",
        "non_control_character" => "must not contain control characters",
        "must_match" => "must match {other}",
        "contains" => "must contain the expected text",
        "does_not_contain" => "must not contain the forbidden text",
        "regex" => "must match the expected pattern",
        "length" if has("equal") => "size must be exactly {equal}",
        "length" if has("min") && has("max") => "size must be between {min} and {max}",
        "length" if has("min") => "size must be at least {min}",
        "length" if has("max") => "size must be at most {max}",
        "range" if has("min") && has("max") => "must be between {min} and {max}",
        "range" if has("min") => "must be greater than or equal to {min}",
        "range" if has("max") => "must be less than or equal to {max}",
        "range" if has("exclusive_min") => "must be greater than {exclusive_min}",
        "range" if has("exclusive_max") => "must be less than {exclusive_max}",
        _ => return None,
    };

    let args = arguments
        .iter()
        .fold(MessageArgs::none(), |args, (name, value)| {
            args.with_named(name, render_value(value))
        });
    Some(format_message(template, &args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    #[derive(Validate)]
    struct Tag {
        #[validate(length(min = 1))]
        label: String,
    }

    #[derive(Validate)]
    struct Address {
        #[validate(length(equal = 8))]
        zip_code: String,
    }

    #[derive(Validate)]
    #[validate(schema(function = "reject_reserved", skip_on_field_errors = false))]
    struct Signup {
        #[validate(length(min = 3, max = 10))]
        name: String,
        #[validate(email)]
        email: String,
        #[validate(range(min = 18, max = 130, message = "too young or too old"))]
        age: u32,
        #[validate(nested)]
        address: Address,
        #[validate(nested)]
        tags: Vec<Tag>,
    }

    fn reject_reserved(signup: &Signup) -> Result<(), ValidationError> {
        if signup.name == "admin" {
            return Err(ValidationError::new("reserved"));
        }
        Ok(())
    }

    fn invalid_signup() -> Signup {
        Signup {
            name: "admin".to_string(),
            email: "not-an-email".to_string(),
            age: 7,
            address: Address {
                zip_code: "123".to_string(),
            },
            tags: vec![
                Tag {
                    label: "ok".to_string(),
                },
                Tag {
                    label: String::new(),
                },
            ],
        }
    }

    fn binding_result() -> BindingResult {
        let errors = invalid_signup().validate().unwrap_err();
        BindingResult::from_validation_errors("signup", &errors)
    }

    #[test]
    fn flattens_nested_fields_in_name_order() {
        let result = binding_result();
        let fields: Vec<&str> = result.field_errors().iter().map(FieldError::field).collect();
        assert_eq!(fields, vec!["address.zip_code", "age", "email", "tags[1].label"]);
        assert_eq!(result.object_name(), "signup");
        assert_eq!(result.error_count(), 4);
        assert!(result.has_errors());
    }

    #[test]
    fn skips_struct_level_errors() {
        let result = binding_result();
        assert!(result.field_errors().iter().all(|e| e.code() != "reserved"));
    }

    #[test]
    fn keeps_rejected_value_and_arguments() {
        let result = binding_result();
        let zip = &result.field_errors()[0];
        assert_eq!(zip.code(), "length");
        assert_eq!(zip.rejected_value(), Some(&json!("123")));
        assert_eq!(zip.arguments().get("equal"), Some(&json!(8)));
        assert_eq!(zip.default_message(), Some("size must be exactly 8"));
    }

    #[test]
    fn declared_message_overrides_builtin_default() {
        let result = binding_result();
        let age = &result.field_errors()[1];
        assert_eq!(age.default_message(), Some("too young or too old"));
    }

    #[test]
    fn codes_go_from_specific_to_generic() {
        let error = FieldError::new("signup", "email", "email");
        assert_eq!(error.codes(), vec!["email.signup.email", "email.email", "email"]);

        let indexed = FieldError::new("signup", "tags[1].label", "length");
        assert_eq!(
            indexed.codes(),
            vec![
                "length.signup.tags[1].label",
                "length.tags[1].label",
                "length.signup.tags.label",
                "length.tags.label",
                "length",
            ]
        );
    }

    #[test]
    fn display_is_a_diagnostic_line() {
        let error = FieldError::new("signup", "email", "email")
            .with_rejected_value(json!("not-an-email"))
            .with_default_message("must be a well-formed email address");
        assert_eq!(
            error.to_string(),
            "Field error in object 'signup' on field 'email': rejected value [not-an-email]; \
             codes [email.signup.email,email.email,email]; arguments []; \
             default message [must be a well-formed email address]"
        );
    }

    #[test]
    fn display_prints_null_for_missing_parts() {
        let error = FieldError::new("signup", "name", "custom").with_argument("min", json!(3));
        let text = error.to_string();
        assert!(text.contains("rejected value [null]"));
        assert!(text.contains("arguments [min=3]"));
        assert!(text.ends_with("default message [null]"));
    }

    #[test]
    fn builtin_defaults_follow_arguments() {
        let bounds = BTreeMap::from([("min".to_string(), json!(3)), ("max".to_string(), json!(50))]);
        assert_eq!(
            builtin_default_message("length", &bounds).as_deref(),
            Some("size must be between 3 and 50")
        );
        assert_eq!(
            builtin_default_message("range", &bounds).as_deref(),
            Some("must be between 3 and 50")
        );
        assert!(builtin_default_message("unknown", &bounds).is_none());
    }

    #[test]
    fn whole_floats_render_as_integers() {
        assert_eq!(render_value(&json!(18.0)), "18");
        assert_eq!(render_value(&json!(2.5)), "2.5");
        assert_eq!(render_value(&json!(130)), "130");
        assert_eq!(render_value(&json!(null)), "null");
    }

    #[test]
    fn object_name_is_lower_camel_type_name() {
        assert_eq!(object_name::<Signup>(), "signup");
        assert_eq!(object_name::<Vec<Signup>>(), "vec");
    }

    #[test]
    fn strip_indices_removes_brackets() {
        assert_eq!(strip_indices("tags[1].label"), "tags.label");
        assert_eq!(strip_indices("a[0][2].b"), "a.b");
    }
}
