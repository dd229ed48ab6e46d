//! Generative content service boundary.
//!
//! Thin client for a Gemini-style `generateContent` REST API. The model's
//! output is treated as best-effort JSON: the widest brace/bracket window in
//! the response text is parsed, and every caller falls back to fixed default
//! copy when parsing fails. Only transport-level failures surface as errors.

use serde::{Deserialize, Serialize};

use crate::config::ServicesConfig;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Content service API key not configured")]
    MissingApiKey,
    #[error("Transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Content service returned status {status}")]
    Api { status: u16 },
    #[error("Content service returned no candidates")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Generated homepage copy for a tenant site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteCopy {
    pub home_title: String,
    pub tagline: String,
    pub about_us: String,
    pub contact_blurb: String,
}

impl Default for SiteCopy {
    fn default() -> Self {
        Self {
            home_title: String::new(),
            tagline: String::new(),
            about_us: String::new(),
            contact_blurb: String::new(),
        }
    }
}

impl SiteCopy {
    /// Fixed fallback used whenever the model's JSON cannot be parsed.
    pub fn fallback(company_name: &str) -> Self {
        Self {
            home_title: format!("Welcome to {}", company_name),
            tagline: "Your trusted partner".to_string(),
            about_us: format!("{} is a leading provider in our industry.", company_name),
            contact_blurb: "Contact us today to learn more about our services.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItem {
    pub title: String,
    pub description: String,
}

pub fn fallback_services() -> Vec<ServiceItem> {
    (1..=3)
        .map(|n| ServiceItem {
            title: format!("Service {}", n),
            description: format!("Description of service {}", n),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoCopy {
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: String,
}

impl Default for SeoCopy {
    fn default() -> Self {
        Self {
            seo_title: String::new(),
            seo_description: String::new(),
            seo_keywords: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoAnalysis {
    pub company_name: String,
    pub industry: String,
    pub colors: LogoPalette,
    pub style: String,
    pub symbols: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
}

impl Default for LogoPalette {
    fn default() -> Self {
        Self {
            primary: "#000000".to_string(),
            secondary: "#ffffff".to_string(),
            accent: "#cccccc".to_string(),
            text: "#333333".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

impl Default for LogoAnalysis {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            industry: String::new(),
            colors: LogoPalette::default(),
            style: String::new(),
            symbols: String::new(),
        }
    }
}

/// Widest `{..}` window in a model response, where the JSON usually lives
/// between prose or markdown fences.
pub fn json_window(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Widest `[..]` window, for array-shaped responses.
pub fn array_window(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

pub struct ContentService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl ContentService {
    pub fn from_config(services: &ServicesConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: services.gemini_api_key.clone(),
            model: services.gemini_model.clone(),
            base_url: services.gemini_base_url.clone(),
        }
    }

    async fn generate(&self, parts: Vec<Part>) -> Result<String, ContentError> {
        let api_key = self.api_key.as_deref().ok_or(ContentError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                contents: vec![RequestContent { parts }],
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ContentError::Api {
                status: response.status().as_u16(),
            });
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(ContentError::EmptyResponse)?;

        Ok(text)
    }

    async fn generate_text(&self, prompt: String) -> Result<String, ContentError> {
        self.generate(vec![Part {
            text: Some(prompt),
            inline_data: None,
        }])
        .await
    }

    async fn generate_vision(
        &self,
        prompt: String,
        mime_type: String,
        base64_data: String,
    ) -> Result<String, ContentError> {
        self.generate(vec![
            Part {
                text: Some(prompt),
                inline_data: None,
            },
            Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type,
                    data: base64_data,
                }),
            },
        ])
        .await
    }

    /// Homepage copy for a new tenant site.
    pub async fn site_copy(
        &self,
        company_name: &str,
        industry: Option<&str>,
    ) -> Result<SiteCopy, ContentError> {
        let industry_clause = industry
            .map(|i| format!(" in the {} industry", i))
            .unwrap_or_default();
        let prompt = format!(
            "Create content for a website for a company called \"{}\"{}.\n\
             Include a home title, tagline, about us section, and a contact section blurb.\n\
             Make the content detailed and professional, with at least 150-200 words for the about us section.\n\
             Format the response as JSON with keys: homeTitle, tagline, aboutUs, contactBlurb",
            company_name, industry_clause
        );

        let text = self.generate_text(prompt).await?;
        Ok(json_window(&text)
            .and_then(|w| serde_json::from_str(w).ok())
            .unwrap_or_else(|| {
                tracing::warn!("Could not parse site copy from model response, using fallback");
                SiteCopy::fallback(company_name)
            }))
    }

    /// Service cards for a new tenant site.
    pub async fn service_list(
        &self,
        company_name: &str,
        industry: Option<&str>,
    ) -> Result<Vec<ServiceItem>, ContentError> {
        let industry_clause = industry
            .map(|i| format!(" in the {} industry", i))
            .unwrap_or_default();
        let prompt = format!(
            "Create 3-5 services with titles and descriptions for a company called \"{}\"{}.\n\
             Make the services realistic and specific for this type of company, with a concise title\n\
             and a 30-50 word description each.\n\
             Format the response as a JSON array of objects with title and description keys.",
            company_name, industry_clause
        );

        let text = self.generate_text(prompt).await?;
        Ok(array_window(&text)
            .and_then(|w| serde_json::from_str(w).ok())
            .unwrap_or_else(|| {
                tracing::warn!("Could not parse services from model response, using fallback");
                fallback_services()
            }))
    }

    /// SEO title/description/keywords for a company.
    pub async fn seo_copy(
        &self,
        company_name: &str,
        industry: Option<&str>,
        colors: &[String],
    ) -> Result<SeoCopy, ContentError> {
        let mut prompt = format!(
            "Create SEO content for a company website.\nCompany Name: {}\n",
            company_name
        );
        if let Some(industry) = industry {
            prompt.push_str(&format!("Industry: {}\n", industry));
        }
        if !colors.is_empty() {
            prompt.push_str(&format!("Brand Colors: {}\n", colors.join(", ")));
        }
        prompt.push_str(
            "Provide an SEO title (max 60 characters), SEO description (max 160 characters),\n\
             and up to 10 comma-separated SEO keywords.\n\
             Format the response as JSON with keys: seoTitle, seoDescription, seoKeywords",
        );

        let text = self.generate_text(prompt).await?;
        let mut copy: SeoCopy = json_window(&text)
            .and_then(|w| serde_json::from_str(w).ok())
            .unwrap_or_default();
        if copy.seo_title.is_empty() {
            copy.seo_title = company_name.to_string();
        }
        Ok(copy)
    }

    /// Structured analysis of an uploaded logo via the vision model: company
    /// name, industry, palette, style, symbols.
    pub async fn analyze_logo(
        &self,
        mime_type: &str,
        base64_data: &str,
        industry_hint: Option<&str>,
    ) -> Result<LogoAnalysis, ContentError> {
        let hint = industry_hint
            .map(|i| format!(" The business is expected to be in the {} space.", i))
            .unwrap_or_default();
        let prompt = format!(
            "Analyze this logo image.{}\n\
             Extract: the company name if visible, the industry the logo suggests, the logo style,\n\
             any symbols present and their meaning, and a five-color palette as hex values\n\
             (primary, secondary, accent, text, background).\n\
             Format the response as JSON with keys: companyName, industry,\n\
             colors (object with primary, secondary, accent, text, background), style, symbols",
            hint
        );

        let text = self
            .generate_vision(prompt, mime_type.to_string(), base64_data.to_string())
            .await?;
        Ok(json_window(&text)
            .and_then(|w| serde_json::from_str(w).ok())
            .unwrap_or_else(|| {
                tracing::warn!("Could not parse logo analysis from model response, using fallback");
                LogoAnalysis::default()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_window_strips_prose_and_fences() {
        let text = "Sure! Here is the JSON:\n```json\n{\"tagline\": \"hi\"}\n```\nHope that helps.";
        assert_eq!(json_window(text), Some("{\"tagline\": \"hi\"}"));
    }

    #[test]
    fn json_window_absent_when_no_braces() {
        assert_eq!(json_window("no json here"), None);
        assert_eq!(json_window("} reversed {"), None);
    }

    #[test]
    fn array_window_finds_service_lists() {
        let text = "Services:\n[{\"title\": \"A\", \"description\": \"B\"}]\nDone.";
        let window = array_window(text).unwrap();
        let items: Vec<ServiceItem> = serde_json::from_str(window).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "A");
    }

    #[test]
    fn site_copy_parse_with_missing_keys_defaults_empty() {
        let copy: SiteCopy = serde_json::from_str("{\"tagline\": \"t\"}").unwrap();
        assert_eq!(copy.tagline, "t");
        assert!(copy.home_title.is_empty());
    }

    #[test]
    fn fallback_copy_mentions_company() {
        let copy = SiteCopy::fallback("Acme");
        assert_eq!(copy.home_title, "Welcome to Acme");
        assert!(copy.about_us.contains("Acme"));
    }

    #[test]
    fn fallback_palette_is_complete() {
        let analysis = LogoAnalysis::default();
        assert_eq!(analysis.colors.primary, "#000000");
        assert_eq!(analysis.colors.background, "#ffffff");
    }
}
