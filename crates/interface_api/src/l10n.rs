//! Localization of client-facing messages
//!
//! The boundary's error messages are resolved from embedded fluent bundles,
//! negotiated against the request's `Accept-Language` header. Bundles are
//! formatted once at startup into a plain lookup table, so request handling
//! never touches the fluent machinery.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use fluent::{FluentBundle, FluentResource};
use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use once_cell::sync::Lazy;
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::error::MESSAGE_KEYS;

/// Embedded locale resources; the first entry is the fallback
const LOCALES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en/errors.ftl")),
    ("es", include_str!("../locales/es/errors.ftl")),
];

/// Process-wide localizer, built once from the embedded resources
pub static LOCALIZER: Lazy<Localizer> = Lazy::new(Localizer::build);

/// Resolved message tables per supported locale
pub struct Localizer {
    supported: Vec<LanguageIdentifier>,
    messages: HashMap<LanguageIdentifier, HashMap<&'static str, String>>,
}

impl Localizer {
    fn build() -> Self {
        let mut supported = Vec::new();
        let mut messages = HashMap::new();

        for (lang, source) in LOCALES {
            let langid: LanguageIdentifier = match lang.parse() {
                Ok(langid) => langid,
                Err(error) => {
                    warn!(lang, ?error, "Skipping locale with invalid identifier");
                    continue;
                }
            };

            let resource = match FluentResource::try_new((*source).to_string()) {
                Ok(resource) => resource,
                Err((resource, errors)) => {
                    warn!(lang, ?errors, "Locale resource parsed with errors");
                    resource
                }
            };

            let mut bundle = FluentBundle::new(vec![langid.clone()]);
            // Plain strings, no Unicode isolation marks around placeables
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                warn!(lang, ?errors, "Locale resource overrides existing messages");
            }

            let mut table = HashMap::new();
            for key in MESSAGE_KEYS {
                let Some(message) = bundle.get_message(key) else {
                    warn!(lang, key, "Locale is missing a message");
                    continue;
                };
                if let Some(pattern) = message.value() {
                    let mut errors = Vec::new();
                    let text = bundle.format_pattern(pattern, None, &mut errors);
                    table.insert(*key, text.into_owned());
                }
            }

            messages.insert(langid.clone(), table);
            supported.push(langid);
        }

        Self { supported, messages }
    }

    /// The fallback locale (first embedded resource)
    pub fn default_locale(&self) -> LanguageIdentifier {
        self.supported
            .first()
            .cloned()
            .unwrap_or_else(LanguageIdentifier::default)
    }

    /// Negotiates the best supported locale for an `Accept-Language` header
    pub fn negotiate(&self, accept_language: Option<&str>) -> LanguageIdentifier {
        let requested = accept_language
            .map(parse_accept_language)
            .unwrap_or_default();
        let default = self.default_locale();

        negotiate_languages(
            &requested,
            &self.supported,
            Some(&default),
            NegotiationStrategy::Filtering,
        )
        .first()
        .map(|langid| (*langid).clone())
        .unwrap_or(default)
    }

    /// Resolves a message key for a locale, falling back to the default
    /// locale and finally to the key itself
    pub fn message(&self, locale: &LanguageIdentifier, key: &str) -> String {
        self.messages
            .get(locale)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.messages
                    .get(&self.default_locale())
                    .and_then(|table| table.get(key))
            })
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn parse_accept_language(header: &str) -> Vec<LanguageIdentifier> {
    header
        .split(',')
        .filter_map(|part| part.split(';').next())
        .filter_map(|tag| tag.trim().parse().ok())
        .collect()
}

/// The request's negotiated locale, extracted from `Accept-Language`
pub struct Locale(pub LanguageIdentifier);

#[async_trait]
impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let header = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        Ok(Locale(LOCALIZER.negotiate(header)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MSG_POOL_TIMEOUT;

    #[test]
    fn test_negotiate_defaults_to_english() {
        assert_eq!(LOCALIZER.negotiate(None).language.as_str(), "en");
        assert_eq!(LOCALIZER.negotiate(Some("fr-FR,fr;q=0.9")).language.as_str(), "en");
    }

    #[test]
    fn test_negotiate_picks_spanish() {
        let locale = LOCALIZER.negotiate(Some("es-ES,es;q=0.9,en;q=0.8"));
        assert_eq!(locale.language.as_str(), "es");
    }

    #[test]
    fn test_every_key_resolves_in_every_locale() {
        for lang in ["en", "es"] {
            let locale: LanguageIdentifier = lang.parse().unwrap();
            for key in MESSAGE_KEYS {
                let message = LOCALIZER.message(&locale, key);
                assert_ne!(message, *key, "{lang} is missing {key}");
            }
        }
    }

    #[test]
    fn test_unknown_locale_falls_back_to_default() {
        let locale: LanguageIdentifier = "de".parse().unwrap();
        assert_eq!(
            LOCALIZER.message(&locale, MSG_POOL_TIMEOUT),
            "Service temporarily unavailable, please retry."
        );
    }
}
