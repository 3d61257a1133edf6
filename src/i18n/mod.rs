//! Localization: locales, message bundles and per-request locale resolution.

pub mod bundle;
pub mod locale;
pub mod message_source;
pub mod resolver;

pub use bundle::{BundleError, BundleMessageSource};
pub use locale::{Locale, LocaleError};
pub use message_source::{MessageArgs, MessageSource, format_message};
pub use resolver::AcceptHeaderLocaleResolver;
