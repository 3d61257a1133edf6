use std::collections::BTreeMap;

use super::locale::Locale;
use crate::validation::FieldError;

/// Arguments substituted into a message template.
///
/// Positional arguments fill `{0}`, `{1}`, ...; named arguments fill `{min}`,
/// `{max}`, ...
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageArgs {
    positional: Vec<String>,
    named: BTreeMap<String, String>,
}

impl MessageArgs {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_positional(mut self, value: impl Into<String>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    fn get(&self, placeholder: &str) -> Option<&str> {
        match placeholder.parse::<usize>() {
            Ok(index) => self.positional.get(index).map(String::as_str),
            Err(_) => self.named.get(placeholder).map(String::as_str),
        }
    }
}

/// Replaces `{N}` and `{name}` placeholders. Unknown placeholders and
/// unbalanced braces are left in place.
pub fn format_message(template: &str, args: &MessageArgs) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let placeholder = &after[..close];
                match args.get(placeholder.trim()) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(placeholder);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Localized message lookup.
///
/// Implementors only provide raw template lookup; formatting and the field
/// error resolution order are shared.
pub trait MessageSource: Send + Sync {
    /// Raw template for `code` in `locale`, with the implementor's own fallback.
    fn lookup(&self, code: &str, locale: &Locale) -> Option<String>;

    /// Formatted message, or the code itself when no template exists.
    fn message(&self, code: &str, args: &MessageArgs, locale: &Locale) -> String {
        match self.lookup(code, locale) {
            Some(template) => format_message(&template, args),
            None => {
                tracing::warn!(code, %locale, "No message found, echoing code");
                code.to_string()
            }
        }
    }

    /// Localized message for a field validation failure.
    ///
    /// `{0}` is the field label (`{object}.{field}` in the bundle, else the
    /// raw field path); constraint arguments are named.
    fn field_message(&self, error: &FieldError, locale: &Locale) -> String {
        let label = self
            .lookup(&format!("{}.{}", error.object_name(), error.field()), locale)
            .unwrap_or_else(|| error.field().to_string());
        let args = error.message_args(label);

        if let Some(template) = error.codes().iter().find_map(|code| self.lookup(code, locale)) {
            return format_message(&template, &args);
        }

        match error.default_message() {
            Some(default) => default.to_string(),
            None => error.code().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource(HashMap<&'static str, &'static str>);

    impl MessageSource for MapSource {
        fn lookup(&self, code: &str, _locale: &Locale) -> Option<String> {
            self.0.get(code).map(|s| (*s).to_string())
        }
    }

    fn english() -> Locale {
        Locale::new("en", None)
    }

    #[test]
    fn format_replaces_positional_and_named() {
        let args = MessageArgs::none()
            .with_positional("name")
            .with_named("min", "3")
            .with_named("max", "50");
        assert_eq!(
            format_message("{0} must have between {min} and {max} characters", &args),
            "name must have between 3 and 50 characters"
        );
    }

    #[test]
    fn format_keeps_unknown_and_unbalanced_placeholders() {
        let args = MessageArgs::none().with_positional("a");
        assert_eq!(format_message("{0} {1} {x}", &args), "a {1} {x}");
        assert_eq!(format_message("open { brace", &args), "open { brace");
    }

    #[test]
    fn message_echoes_unknown_code() {
        let source = MapSource(HashMap::new());
        assert_eq!(
            source.message("message.fail", &MessageArgs::none(), &english()),
            "message.fail"
        );
    }

    #[test]
    fn field_message_prefers_most_specific_code() {
        let source = MapSource(HashMap::from([
            ("email", "{0} is not an e-mail"),
            ("email.person.email", "{0}: person e-mail is invalid"),
            ("person.email", "E-mail"),
        ]));
        let error = FieldError::new("person", "email", "email");
        assert_eq!(
            source.field_message(&error, &english()),
            "E-mail: person e-mail is invalid"
        );
    }

    #[test]
    fn field_message_falls_back_to_default_then_code() {
        let source = MapSource(HashMap::new());
        let with_default =
            FieldError::new("person", "name", "custom").with_default_message("looks wrong");
        assert_eq!(source.field_message(&with_default, &english()), "looks wrong");

        let bare = FieldError::new("person", "name", "custom");
        assert_eq!(source.field_message(&bare, &english()), "custom");
    }
}
