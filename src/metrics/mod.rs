pub mod advertising;
pub mod business;
pub mod engagement;

pub use advertising::{
    AdIntensity, AdvertisingAnalyzer, AdvertisingProfile, MessagingTheme, ThemeKeywords,
    ThemeMatcher,
};
pub use business::{
    BusinessAnalyzer, BusinessMaturity, BusinessProfile, ContactMethod, CrossPlatformPresence,
    PlatformFlags,
};
pub use engagement::{EngagementCalculator, EngagementMetrics, EngagementQuality, ReelViewStats};
