//! Tabular export: one CSV file per sheet.

use crate::{format_number, AnalysisResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(name: &'static str, headers: &[&'static str]) -> Self {
        Self {
            name,
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, self.headers.iter().map(|header| header.to_string()));
        for row in &self.rows {
            push_line(&mut out, row.iter().cloned());
        }
        out
    }
}

pub fn sheets(result: &AnalysisResult) -> Vec<Sheet> {
    vec![
        overview(result),
        summary_stats(result),
        detailed_metrics(result),
        engagement(result),
        business(result),
        advertising(result),
        market_position(result),
        reel_performance(result),
    ]
}

fn overview(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(
        "overview",
        &[
            "Competitor_Name",
            "Page_URL",
            "Followers",
            "Likes",
            "Like_to_Follower_Ratio_%",
            "Engagement_Quality",
            "Avg_Reel_Views",
            "Max_Reel_Views",
            "Content_Performance_Score_%",
            "Total_Reels",
            "Business_Category",
            "Location",
            "Business_Maturity",
            "Contact_Methods_Count",
            "Cross_Platform_Count",
            "Is_Advertising",
            "Total_Active_Ads",
            "Ad_Intensity",
            "Market_Share_%",
            "Follower_Rank",
            "Engagement_Rank",
            "Competitiveness_Score",
        ],
    );

    for competitor in &result.competitors {
        let metrics = &competitor.engagement;
        let business = &competitor.business;
        let ads = &competitor.advertising;
        let position = result.position_of(&competitor.page_name);

        sheet.push(vec![
            competitor.page_name.clone(),
            competitor.page_url.clone().unwrap_or_default(),
            metrics.followers.to_string(),
            metrics.likes.to_string(),
            metrics.like_to_follower_ratio.to_string(),
            metrics.engagement_quality.label().to_string(),
            metrics.reel_views.average_views.to_string(),
            metrics.reel_views.max_views.to_string(),
            metrics.content_performance_score.to_string(),
            metrics.total_reels.to_string(),
            business.category.clone(),
            business.location.clone(),
            business.maturity.label().to_string(),
            business.contact_diversity_score.to_string(),
            business.cross_platform.total_platforms.to_string(),
            ads.is_advertising.to_string(),
            ads.total_active_ads.to_string(),
            ads.intensity.label().to_string(),
            position
                .map(|p| p.estimated_market_share.to_string())
                .unwrap_or_else(|| "0".to_string()),
            position
                .map(|p| p.follower_rank.to_string())
                .unwrap_or_else(|| "0".to_string()),
            position
                .map(|p| p.engagement_rank.to_string())
                .unwrap_or_else(|| "0".to_string()),
            position
                .map(|p| p.overall_competitiveness.to_string())
                .unwrap_or_else(|| "0".to_string()),
        ]);
    }
    sheet
}

fn summary_stats(result: &AnalysisResult) -> Sheet {
    let stats = &result.summary_statistics;
    let mut sheet = Sheet::new("summary_stats", &["Metric", "Value"]);
    let rows = [
        (
            "Total Combined Followers",
            format_number(stats.total_combined_followers as f64),
        ),
        ("Average Followers", format_number(stats.average_followers)),
        (
            "Average Content Performance %",
            format!("{}%", stats.average_content_performance),
        ),
        (
            "Advertising Adoption Rate %",
            format!("{}%", stats.advertising_adoption_rate),
        ),
        (
            "Cross-Platform Adoption Avg",
            format!("{:.1}", stats.cross_platform_adoption),
        ),
        (
            "Analysis Date",
            result.metadata.analysis_date.format("%Y-%m-%d").to_string(),
        ),
    ];
    for (label, value) in rows {
        sheet.push(vec![label.to_string(), value]);
    }
    sheet
}

fn detailed_metrics(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(
        "detailed_metrics",
        &[
            "Competitor",
            "Followers",
            "Likes",
            "Like_Follower_Ratio_%",
            "Engagement_Quality",
            "Total_Reel_Views",
            "Average_Reel_Views",
            "Median_Reel_Views",
            "Max_Reel_Views",
            "Min_Reel_Views",
            "Total_Reels_Count",
            "Content_Performance_Score_%",
        ],
    );
    for competitor in &result.competitors {
        let metrics = &competitor.engagement;
        let views = &metrics.reel_views;
        sheet.push(vec![
            competitor.page_name.clone(),
            metrics.followers.to_string(),
            metrics.likes.to_string(),
            metrics.like_to_follower_ratio.to_string(),
            metrics.engagement_quality.label().to_string(),
            views.total_views.to_string(),
            views.average_views.to_string(),
            views.median_views.to_string(),
            views.max_views.to_string(),
            views.min_views.to_string(),
            metrics.total_reels.to_string(),
            metrics.content_performance_score.to_string(),
        ]);
    }
    sheet
}

fn engagement(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(
        "engagement",
        &[
            "Competitor",
            "Followers",
            "Likes",
            "Like_to_Follower_Ratio_%",
            "Engagement_Quality",
            "Average_Reel_Views",
            "Content_Performance_Score_%",
            "Engagement_Rank",
        ],
    );
    for competitor in &result.competitors {
        let metrics = &competitor.engagement;
        sheet.push(vec![
            competitor.page_name.clone(),
            metrics.followers.to_string(),
            metrics.likes.to_string(),
            metrics.like_to_follower_ratio.to_string(),
            metrics.engagement_quality.label().to_string(),
            metrics.reel_views.average_views.to_string(),
            metrics.content_performance_score.to_string(),
            result
                .position_of(&competitor.page_name)
                .map(|p| p.engagement_rank.to_string())
                .unwrap_or_default(),
        ]);
    }
    sheet
}

fn business(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(
        "business",
        &[
            "Competitor",
            "Category",
            "Location",
            "Business_Hours",
            "Contact_Methods",
            "Contact_Diversity_Score",
            "Has_TikTok",
            "Has_WhatsApp_Business",
            "Has_Tumblr",
            "Integration_Score_%",
            "Business_Maturity",
        ],
    );
    for competitor in &result.competitors {
        let business = &competitor.business;
        let platforms = &business.cross_platform.platforms;
        let methods: Vec<&str> = business
            .contact_methods
            .iter()
            .map(|method| method.label())
            .collect();
        sheet.push(vec![
            competitor.page_name.clone(),
            business.category.clone(),
            business.location.clone(),
            business.business_hours.clone(),
            methods.join(", "),
            business.contact_diversity_score.to_string(),
            platforms.tiktok.to_string(),
            platforms.whatsapp_business.to_string(),
            platforms.tumblr.to_string(),
            business.cross_platform.integration_score.to_string(),
            business.maturity.label().to_string(),
        ]);
    }
    sheet
}

fn advertising(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(
        "advertising",
        &[
            "Competitor",
            "Is_Advertising",
            "Total_Active_Ads",
            "Advertising_Intensity",
            "CTA_Types",
            "Messaging_Themes",
        ],
    );
    for competitor in &result.competitors {
        let ads = &competitor.advertising;
        let ctas: Vec<&str> = ads.cta_types.iter().map(String::as_str).collect();
        let themes: Vec<&str> = ads.messaging_themes.iter().map(|theme| theme.label()).collect();
        sheet.push(vec![
            competitor.page_name.clone(),
            ads.is_advertising.to_string(),
            ads.total_active_ads.to_string(),
            ads.intensity.label().to_string(),
            ctas.join(", "),
            themes.join(", "),
        ]);
    }
    sheet
}

fn market_position(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(
        "market_position",
        &[
            "Competitor",
            "Market_Share_%",
            "Follower_Rank",
            "Engagement_Rank",
            "Competitiveness_Score",
        ],
    );
    for (name, position) in result.ranked_positions() {
        sheet.push(vec![
            name.to_string(),
            position.estimated_market_share.to_string(),
            position.follower_rank.to_string(),
            position.engagement_rank.to_string(),
            position.overall_competitiveness.to_string(),
        ]);
    }
    sheet
}

fn reel_performance(result: &AnalysisResult) -> Sheet {
    let mut sheet = Sheet::new(
        "reel_performance",
        &[
            "Competitor",
            "Reel_Number",
            "Views",
            "Performance_vs_Average",
            "Performance_Score_%",
        ],
    );
    for competitor in &result.competitors {
        let stats = &competitor.engagement.reel_views;
        for (idx, views) in stats.views_distribution.iter().enumerate() {
            let relative = if *views as f64 > stats.average_views {
                "Above"
            } else {
                "Below"
            };
            let score = if stats.average_views > 0.0 {
                *views as f64 / stats.average_views * 100.0
            } else {
                0.0
            };
            sheet.push(vec![
                competitor.page_name.clone(),
                (idx + 1).to_string(),
                views.to_string(),
                relative.to_string(),
                format!("{:.2}", score),
            ]);
        }
    }
    sheet
}

fn push_line<I>(out: &mut String, fields: I)
where
    I: Iterator<Item = String>,
{
    let line: Vec<String> = fields.map(|field| escape_field(&field)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// RFC 4180 quoting: fields holding a comma, quote or line break are
/// wrapped in quotes with inner quotes doubled.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
