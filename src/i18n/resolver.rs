use axum::http::{HeaderMap, header};

use super::locale::Locale;

/// Picks the request locale from `Accept-Language`.
///
/// Candidates are tried by descending `q` weight: an exact supported locale
/// wins, then a supported locale with the same language. With an empty
/// supported list the first candidate is taken as-is.
#[derive(Debug, Clone)]
pub struct AcceptHeaderLocaleResolver {
    default_locale: Locale,
    supported: Vec<Locale>,
}

impl AcceptHeaderLocaleResolver {
    pub fn new(default_locale: Locale, supported: Vec<Locale>) -> Self {
        Self {
            default_locale,
            supported,
        }
    }

    pub fn resolve(&self, headers: &HeaderMap) -> Locale {
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map_or_else(|| self.default_locale.clone(), |value| self.resolve_header(value))
    }

    pub fn resolve_header(&self, accept_language: &str) -> Locale {
        let candidates = parse_accept_language(accept_language);

        if self.supported.is_empty() {
            return candidates
                .into_iter()
                .next()
                .unwrap_or_else(|| self.default_locale.clone());
        }

        candidates
            .iter()
            .find_map(|candidate| self.match_supported(candidate))
            .unwrap_or_else(|| self.default_locale.clone())
    }

    fn match_supported(&self, candidate: &Locale) -> Option<Locale> {
        self.supported
            .iter()
            .find(|supported| *supported == candidate)
            .or_else(|| {
                self.supported
                    .iter()
                    .find(|supported| supported.language() == candidate.language())
            })
            .cloned()
    }
}

/// Accept-Language entries by descending weight. `*`, unparsable tags and
/// `q=0` are dropped; equal weights keep header order.
fn parse_accept_language(value: &str) -> Vec<Locale> {
    let mut weighted: Vec<(Locale, f32)> = value
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let locale = Locale::parse(parts.next()?)?;
            let quality = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            (quality > 0.0).then_some((locale, quality))
        })
        .collect();

    weighted.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    weighted.into_iter().map(|(locale, _)| locale).collect()
}
