//! Ingestion boundary.
//!
//! Raw page entries are deserialized one at a time and validated into
//! [`CompetitorRecord`]s. An entry that cannot be read is recorded as a
//! [`SkippedRecord`] instead of failing the whole dataset.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::error::AnalysisError;
use crate::normalize::magnitude_text;

pub const NOT_SPECIFIED: &str = "not_specified";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDataset {
    #[serde(default)]
    pub extraction_timestamp: Option<String>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub pages: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawPage {
    page_name: Option<String>,
    page_url: Option<String>,
    source_urls: Option<RawSourceUrls>,
    extraction_data: Option<RawExtraction>,
    ads_data: Option<RawAds>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSourceUrls {
    base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawExtraction {
    page_name: Option<String>,
    likes: Option<Value>,
    followers: Option<Value>,
    top_reels: Option<Vec<RawReel>>,
    about_info: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawReel {
    views: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawAds {
    total_active_ads: Option<Value>,
    active_ads: Option<Vec<RawAd>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawAd {
    cta: Option<String>,
    ad_description: Option<String>,
}

/// Labeled "about" fields. `None` means the label was missing or blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutInfo {
    pub categories: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub whatsapp: Option<String>,
    pub tiktok: Option<String>,
    pub tumblr: Option<String>,
    pub hours: Option<String>,
}

impl AboutInfo {
    fn from_map(map: &BTreeMap<String, Value>) -> Self {
        let field = |label: &str| map.get(label).and_then(present_text);
        Self {
            categories: field("Categories"),
            address: field("Address"),
            mobile: field("Mobile"),
            whatsapp: field("WhatsApp"),
            tiktok: field("TikTok"),
            tumblr: field("Tumblr"),
            hours: field("Hours"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdCreative {
    pub cta: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdsBlock {
    pub total_active_ads: String,
    pub active_ads: Vec<AdCreative>,
}

/// One validated competitor page. Magnitudes are kept as raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub page_name: String,
    pub page_url: Option<String>,
    pub likes: String,
    pub followers: String,
    pub reel_views: Vec<String>,
    pub about: AboutInfo,
    pub ads: AdsBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub extraction_timestamp: Option<String>,
    pub records: Vec<CompetitorRecord>,
    pub skipped: Vec<SkippedRecord>,
    pub source_digest: String,
}

impl Dataset {
    pub fn from_raw(raw: RawDataset) -> Self {
        let source_digest = digest(&raw);
        let mut records = Vec::with_capacity(raw.pages.len());
        let mut skipped = Vec::new();

        for (index, page) in raw.pages.into_iter().enumerate() {
            match validate_page(page) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    tracing::warn!(index, %reason, "skipping competitor record");
                    skipped.push(SkippedRecord { index, reason });
                }
            }
        }

        if let Some(declared) = raw.total_pages {
            let seen = (records.len() + skipped.len()) as u64;
            if declared != seen {
                tracing::warn!(declared, seen, "total_pages does not match page count");
            }
        }

        Self {
            extraction_timestamp: raw.extraction_timestamp,
            records,
            skipped,
            source_digest,
        }
    }

    pub fn from_records(records: Vec<CompetitorRecord>) -> Self {
        let source_digest = serde_json::to_vec(&records)
            .map(|bytes| hex_sha256(&bytes))
            .unwrap_or_default();
        Self {
            extraction_timestamp: None,
            records,
            skipped: Vec::new(),
            source_digest,
        }
    }

    pub fn from_json_str(payload: &str, context: &str) -> Result<Self, AnalysisError> {
        let raw: RawDataset =
            serde_json::from_str(payload).map_err(|source| AnalysisError::Json {
                context: context.to_string(),
                source,
            })?;
        Ok(Self::from_raw(raw))
    }

    /// Reads a dataset file, or stdin when `path` is `-`.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let payload = if path == Path::new("-") {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| AnalysisError::io(path, err))?;
            buffer
        } else {
            std::fs::read_to_string(path).map_err(|err| AnalysisError::io(path, err))?
        };
        Self::from_json_str(&payload, &path.display().to_string())
    }
}

fn validate_page(page: Value) -> Result<CompetitorRecord, String> {
    let raw: RawPage =
        serde_json::from_value(page).map_err(|err| format!("malformed page entry: {}", err))?;

    let extraction = raw
        .extraction_data
        .ok_or_else(|| "missing extraction_data".to_string())?;

    let page_name = non_blank(raw.page_name)
        .or_else(|| non_blank(extraction.page_name.clone()))
        .ok_or_else(|| "missing page name".to_string())?;

    let page_url = raw
        .page_url
        .or_else(|| raw.source_urls.and_then(|urls| urls.base_url))
        .filter(|url| !url.trim().is_empty());

    let reel_views = extraction
        .top_reels
        .unwrap_or_default()
        .iter()
        .map(|reel| magnitude_text(reel.views.as_ref()))
        .collect();

    let about = extraction
        .about_info
        .as_ref()
        .map(AboutInfo::from_map)
        .unwrap_or_default();

    let ads = raw
        .ads_data
        .map(|ads| AdsBlock {
            total_active_ads: magnitude_text(ads.total_active_ads.as_ref()),
            active_ads: ads
                .active_ads
                .unwrap_or_default()
                .into_iter()
                .map(|ad| AdCreative {
                    cta: ad.cta.unwrap_or_default(),
                    description: ad.ad_description.unwrap_or_default(),
                })
                .collect(),
        })
        .unwrap_or_default();

    Ok(CompetitorRecord {
        page_name,
        page_url,
        likes: magnitude_text(extraction.likes.as_ref()),
        followers: magnitude_text(extraction.followers.as_ref()),
        reel_views,
        about,
        ads,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn digest(raw: &RawDataset) -> String {
    serde_json::to_vec(raw)
        .map(|bytes| hex_sha256(&bytes))
        .unwrap_or_default()
}

fn hex_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
