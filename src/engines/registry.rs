//! Client registry: one search client per supported language

use super::wikisource::WikiClient;
use crate::config::SearchSettings;
use crate::locales::LanguageCode;
use crate::network::HttpClient;
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid endpoint for language {lang}: {endpoint}: {source}")]
    InvalidEndpoint {
        lang: LanguageCode,
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}

/// Registry of wiki clients, built once and read-only afterwards
pub struct ClientRegistry {
    clients: HashMap<LanguageCode, WikiClient>,
}

impl ClientRegistry {
    /// Build a client for every supported language.
    ///
    /// Fails on the first language whose endpoint cannot be constructed.
    pub fn build(settings: &SearchSettings, http: &HttpClient) -> Result<Self, RegistryError> {
        let mut clients = HashMap::with_capacity(crate::locales::LANGUAGES.len());

        for lang in LanguageCode::all() {
            let endpoint = settings.endpoint(lang);
            match WikiClient::new(lang, &endpoint, http.clone()) {
                Ok(client) => {
                    clients.insert(lang, client);
                }
                Err(source) => {
                    return Err(RegistryError::InvalidEndpoint {
                        lang,
                        endpoint,
                        source,
                    });
                }
            }
        }

        info!("Built {} wiki clients", clients.len());
        Ok(Self { clients })
    }

    /// Get the client for a language
    pub fn get(&self, lang: LanguageCode) -> Option<&WikiClient> {
        self.clients.get(&lang)
    }

    /// Get number of registered clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
