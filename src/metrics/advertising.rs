use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::input::AdsBlock;
use crate::normalize::normalize_magnitude;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdIntensity {
    NoAdvertising,
    Light,
    Moderate,
    Heavy,
}

impl AdIntensity {
    pub fn from_count(total_ads: u64) -> Self {
        match total_ads {
            0 => AdIntensity::NoAdvertising,
            1..=2 => AdIntensity::Light,
            3..=5 => AdIntensity::Moderate,
            _ => AdIntensity::Heavy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdIntensity::NoAdvertising => "no_advertising",
            AdIntensity::Light => "light",
            AdIntensity::Moderate => "moderate",
            AdIntensity::Heavy => "heavy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagingTheme {
    PriceFocused,
    QualityFocused,
    ServiceFocused,
    ProductFocused,
}

impl MessagingTheme {
    pub fn label(self) -> &'static str {
        match self {
            MessagingTheme::PriceFocused => "price_focused",
            MessagingTheme::QualityFocused => "quality_focused",
            MessagingTheme::ServiceFocused => "service_focused",
            MessagingTheme::ProductFocused => "product_focused",
        }
    }
}

/// Keyword families used to tag ad copy. Matching is a lowercase substring
/// test, so "deals" matches "deal".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeKeywords {
    pub price: Vec<String>,
    pub quality: Vec<String>,
    pub service: Vec<String>,
    pub product: Vec<String>,
}

impl Default for ThemeKeywords {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(|word| word.to_string()).collect();
        Self {
            price: words(&["price", "cheap", "affordable", "discount", "offer", "deal"]),
            quality: words(&["quality", "premium", "best", "top", "excellent"]),
            service: words(&["service", "support", "help", "consultation"]),
            product: words(&["product", "design", "modern", "new"]),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThemeMatcher {
    families: Vec<(MessagingTheme, Vec<String>)>,
}

impl ThemeMatcher {
    pub fn new(keywords: ThemeKeywords) -> Self {
        let lower = |list: Vec<String>| -> Vec<String> {
            list.into_iter()
                .map(|word| word.trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect()
        };
        Self {
            families: vec![
                (MessagingTheme::PriceFocused, lower(keywords.price)),
                (MessagingTheme::QualityFocused, lower(keywords.quality)),
                (MessagingTheme::ServiceFocused, lower(keywords.service)),
                (MessagingTheme::ProductFocused, lower(keywords.product)),
            ],
        }
    }

    pub fn themes(&self, description: &str) -> Vec<MessagingTheme> {
        let lowercase = description.to_lowercase();
        self.families
            .iter()
            .filter(|(_, words)| words.iter().any(|word| lowercase.contains(word.as_str())))
            .map(|(theme, _)| *theme)
            .collect()
    }
}

impl Default for ThemeMatcher {
    fn default() -> Self {
        Self::new(ThemeKeywords::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertisingProfile {
    pub is_advertising: bool,
    pub total_active_ads: u64,
    pub intensity: AdIntensity,
    pub cta_types: BTreeSet<String>,
    pub messaging_themes: BTreeSet<MessagingTheme>,
}

#[derive(Debug, Clone, Default)]
pub struct AdvertisingAnalyzer {
    matcher: ThemeMatcher,
}

impl AdvertisingAnalyzer {
    pub fn new(matcher: ThemeMatcher) -> Self {
        Self { matcher }
    }

    pub fn analyze(&self, ads: &AdsBlock) -> AdvertisingProfile {
        let total_active_ads = normalize_magnitude(&ads.total_active_ads);
        let mut cta_types = BTreeSet::new();
        let mut messaging_themes = BTreeSet::new();

        for ad in &ads.active_ads {
            let cta = ad.cta.trim().to_lowercase();
            if !cta.is_empty() {
                cta_types.insert(cta);
            }
            messaging_themes.extend(self.matcher.themes(&ad.description));
        }

        AdvertisingProfile {
            is_advertising: total_active_ads > 0,
            total_active_ads,
            intensity: AdIntensity::from_count(total_active_ads),
            cta_types,
            messaging_themes,
        }
    }
}
