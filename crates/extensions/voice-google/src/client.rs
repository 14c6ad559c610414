//! Google Translate TTS HTTP client.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use director_protocols::SynthesisError;

/// Default service host.
pub const DEFAULT_HOST: &str = "https://translate.google.com";

/// Client for the `translate_tts` endpoint.
pub struct GoogleTtsClient {
    client: Client,
    host: String,
}

impl GoogleTtsClient {
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        Ok(Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Audio URL for one chunk of at most 200 characters.
    pub fn audio_url(&self, text: &str, lang: &str, slow: bool) -> Result<Url, SynthesisError> {
        let base = format!("{}/translate_tts", self.host);
        let textlen = text.chars().count().to_string();
        Url::parse_with_params(
            &base,
            &[
                ("ie", "UTF-8"),
                ("q", text),
                ("tl", lang),
                ("total", "1"),
                ("idx", "0"),
                ("textlen", textlen.as_str()),
                ("client", "tw-ob"),
                ("prev", "input"),
                ("ttsspeed", if slow { "0.24" } else { "1" }),
            ],
        )
        .map_err(|e| SynthesisError::Network(format!("Invalid TTS host {}: {}", self.host, e)))
    }

    /// Download the MP3 for one chunk.
    pub async fn fetch(&self, text: &str, lang: &str, slow: bool) -> Result<Vec<u8>, SynthesisError> {
        let url = self.audio_url(text, lang, slow)?;
        debug!("Google TTS request: lang={} chars={}", lang, text.chars().count());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(200)
                .collect::<String>();
            return Err(SynthesisError::Status {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.to_string()
                } else {
                    message
                },
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        if bytes.is_empty() {
            return Err(SynthesisError::EmptyAudio(text.to_string()));
        }
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GoogleTtsClient {
        GoogleTtsClient::new("https://translate.google.com/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_host_trailing_slash_trimmed() {
        assert_eq!(client().host(), DEFAULT_HOST);
    }

    #[test]
    fn test_audio_url_params() {
        let url = client().audio_url("Ahoj svet", "sk", false).unwrap();
        assert_eq!(url.path(), "/translate_tts");

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("q"), "Ahoj svet");
        assert_eq!(get("tl"), "sk");
        assert_eq!(get("textlen"), "9");
        assert_eq!(get("client"), "tw-ob");
        assert_eq!(get("ttsspeed"), "1");
    }

    #[test]
    fn test_audio_url_slow() {
        let url = client().audio_url("Hi", "en", true).unwrap();
        assert!(url.query().unwrap().contains("ttsspeed=0.24"));
    }

    #[test]
    fn test_audio_url_encodes_text() {
        let url = client().audio_url("A & B?", "en", false).unwrap();
        assert!(!url.query().unwrap().contains("A & B?"));
        let q = url.query_pairs().find(|(k, _)| k == "q").map(|(_, v)| v.into_owned());
        assert_eq!(q.as_deref(), Some("A & B?"));
    }

    #[test]
    fn test_invalid_host() {
        let client = GoogleTtsClient::new("not a host", Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.audio_url("Hi", "en", false),
            Err(SynthesisError::Network(_))
        ));
    }
}
