use serde::{Deserialize, Serialize};

use crate::input::{AboutInfo, NOT_SPECIFIED};
use crate::stats::round2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    Phone,
    Whatsapp,
    Tiktok,
    Tumblr,
}

impl ContactMethod {
    pub fn label(self) -> &'static str {
        match self {
            ContactMethod::Phone => "phone",
            ContactMethod::Whatsapp => "whatsapp",
            ContactMethod::Tiktok => "tiktok",
            ContactMethod::Tumblr => "tumblr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessMaturity {
    Basic,
    Developing,
    Mature,
}

impl BusinessMaturity {
    pub fn from_indicators(count: usize) -> Self {
        if count >= 3 {
            BusinessMaturity::Mature
        } else if count >= 2 {
            BusinessMaturity::Developing
        } else {
            BusinessMaturity::Basic
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BusinessMaturity::Basic => "basic",
            BusinessMaturity::Developing => "developing",
            BusinessMaturity::Mature => "mature",
        }
    }

    /// Contribution to the competitiveness score, 0-100.
    pub fn score(self) -> f64 {
        match self {
            BusinessMaturity::Basic => 20.0,
            BusinessMaturity::Developing => 60.0,
            BusinessMaturity::Mature => 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFlags {
    pub tiktok: bool,
    pub whatsapp_business: bool,
    pub tumblr: bool,
}

impl PlatformFlags {
    pub const TRACKED: usize = 3;

    pub fn count(&self) -> usize {
        [self.tiktok, self.whatsapp_business, self.tumblr]
            .iter()
            .filter(|flag| **flag)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossPlatformPresence {
    pub platforms: PlatformFlags,
    pub total_platforms: usize,
    pub integration_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub category: String,
    pub location: String,
    pub business_hours: String,
    pub contact_methods: Vec<ContactMethod>,
    pub contact_diversity_score: usize,
    pub cross_platform: CrossPlatformPresence,
    pub maturity: BusinessMaturity,
}

impl BusinessProfile {
    pub fn has_location(&self) -> bool {
        self.location != NOT_SPECIFIED
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessAnalyzer;

impl BusinessAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, about: &AboutInfo) -> BusinessProfile {
        let contact_methods = contact_methods(about);
        let platforms = PlatformFlags {
            tiktok: about.tiktok.is_some(),
            whatsapp_business: about.whatsapp.is_some(),
            tumblr: about.tumblr.is_some(),
        };
        let total_platforms = platforms.count();

        BusinessProfile {
            category: or_not_specified(&about.categories),
            location: or_not_specified(&about.address),
            business_hours: or_not_specified(&about.hours),
            contact_diversity_score: contact_methods.len(),
            contact_methods,
            cross_platform: CrossPlatformPresence {
                platforms,
                total_platforms,
                integration_score: round2(
                    total_platforms as f64 / PlatformFlags::TRACKED as f64 * 100.0,
                ),
            },
            maturity: assess_maturity(about),
        }
    }
}

fn contact_methods(about: &AboutInfo) -> Vec<ContactMethod> {
    [
        (about.mobile.is_some(), ContactMethod::Phone),
        (about.whatsapp.is_some(), ContactMethod::Whatsapp),
        (about.tiktok.is_some(), ContactMethod::Tiktok),
        (about.tumblr.is_some(), ContactMethod::Tumblr),
    ]
    .into_iter()
    .filter_map(|(present, method)| present.then_some(method))
    .collect()
}

fn assess_maturity(about: &AboutInfo) -> BusinessMaturity {
    let has_address = about
        .address
        .as_deref()
        .is_some_and(|address| address != NOT_SPECIFIED);
    let indicators = [
        has_address,
        about.mobile.is_some(),
        about.hours.is_some(),
        about.categories.is_some(),
    ]
    .iter()
    .filter(|present| **present)
    .count();

    BusinessMaturity::from_indicators(indicators)
}

fn or_not_specified(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string())
}
