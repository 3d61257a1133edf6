use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::locale::Locale;
use super::message_source::MessageSource;

const EMBEDDED_BUNDLES: &[(&str, &str)] = &[
    ("", include_str!("../../resources/messages.properties")),
    ("en", include_str!("../../resources/messages_en.properties")),
    ("pt_BR", include_str!("../../resources/messages_pt_BR.properties")),
];

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("Failed to read bundle {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid escape sequence on line {line}")]
    InvalidEscape { line: usize },
    #[error("No bundle named {basename} found in {dir}")]
    NotFound { dir: PathBuf, basename: String },
}

/// `MessageSource` backed by `.properties` bundles, one per locale suffix.
///
/// The root bundle (empty suffix) is the final fallback for every locale.
#[derive(Debug, Default, Clone)]
pub struct BundleMessageSource {
    bundles: HashMap<String, HashMap<String, String>>,
}

impl BundleMessageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or merges into) the bundle for `suffix` (`""`, `pt`, `pt_BR`).
    pub fn with_bundle(mut self, suffix: &str, source: &str) -> Result<Self, BundleError> {
        let entries = parse_properties(source)?;
        self.bundles
            .entry(suffix.to_string())
            .or_default()
            .extend(entries);
        Ok(self)
    }

    /// Bundles compiled into the binary from `resources/`.
    pub fn embedded() -> Result<Self, BundleError> {
        EMBEDDED_BUNDLES
            .iter()
            .try_fold(Self::new(), |source, (suffix, text)| source.with_bundle(suffix, text))
    }

    /// Loads every `{basename}.properties` and `{basename}_{suffix}.properties` in `dir`.
    pub fn from_dir(dir: &Path, basename: &str) -> Result<Self, BundleError> {
        let io_error = |source| BundleError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let entries = fs::read_dir(dir).map_err(io_error)?;

        let mut bundle = Self::new();
        for entry in entries {
            let path = entry.map_err(io_error)?.path();
            let Some(suffix) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| bundle_suffix(name, basename))
            else {
                continue;
            };

            let text = fs::read_to_string(&path).map_err(|source| BundleError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), %suffix, "Loading message bundle");
            bundle = bundle.with_bundle(&suffix, &text)?;
        }

        if bundle.bundles.is_empty() {
            return Err(BundleError::NotFound {
                dir: dir.to_path_buf(),
                basename: basename.to_string(),
            });
        }
        Ok(bundle)
    }

    /// Locales that have a dedicated bundle, most specific first.
    pub fn locales(&self) -> Vec<Locale> {
        let mut suffixes: Vec<&String> = self.bundles.keys().filter(|s| !s.is_empty()).collect();
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        suffixes
            .into_iter()
            .filter_map(|suffix| Locale::parse(suffix))
            .collect()
    }
}

impl MessageSource for BundleMessageSource {
    fn lookup(&self, code: &str, locale: &Locale) -> Option<String> {
        locale
            .bundle_suffixes()
            .iter()
            .filter_map(|suffix| self.bundles.get(suffix))
            .find_map(|bundle| bundle.get(code))
            .cloned()
    }
}

/// `messages_pt_BR.properties` -> `pt_BR`, `messages.properties` -> ``.
fn bundle_suffix(file_name: &str, basename: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".properties")?.strip_prefix(basename)?;
    if stem.is_empty() {
        return Some(String::new());
    }
    let suffix = stem.strip_prefix('_')?;
    Locale::parse(suffix).map(|locale| locale.bundle_suffix())
}

/// Parses Java `.properties` text.
fn parse_properties(source: &str) -> Result<HashMap<String, String>, BundleError> {
    let mut entries = HashMap::new();
    let mut lines = source.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        let line = index + 1;
        entries.insert(unescape(key, line)?, unescape(value, line)?);
    }

    Ok(entries)
}

/// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                let key = &line[..index];
                let rest = line[index..].trim_start_matches([' ', '\t', '\u{c}']);
                let rest = rest
                    .strip_prefix(['=', ':'])
                    .map_or(rest, |r| r.trim_start_matches([' ', '\t', '\u{c}']));
                return (key, rest);
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(text: &str, line: usize) -> Result<String, BundleError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or(BundleError::InvalidEscape { line })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
