use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid locale tag: {0:?}")]
pub struct LocaleError(pub String);

/// Language and optional region of an end user.
///
/// Accepts BCP-47 (`pt-BR`) and Java style (`pt_BR`) tags. Script and variant
/// subtags are ignored, so `zh-Hant-TW` resolves to `zh-TW`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        let mut subtags = tag.trim().split(['-', '_']);

        let language = subtags.next()?;
        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }

        let region = subtags.find(|s| {
            (s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
                || (s.len() == 3 && s.chars().all(|c| c.is_ascii_digit()))
        });

        Some(Self::new(language, region))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Bundle file suffix, e.g. `pt_BR` for `messages_pt_BR.properties`.
    pub fn bundle_suffix(&self) -> String {
        match &self.region {
            Some(region) => format!("{}_{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// Lookup chain from most to least specific, ending with the root bundle.
    pub fn bundle_suffixes(&self) -> Vec<String> {
        let mut suffixes = Vec::with_capacity(3);
        if self.region.is_some() {
            suffixes.push(self.bundle_suffix());
        }
        suffixes.push(self.language.clone());
        suffixes.push(String::new());
        suffixes
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LocaleError(s.to_string()))
    }
}
