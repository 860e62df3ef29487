use chrono::{TimeZone, Utc};
use serde_json::json;

use competitor_metrics::config::AnalyzerConfig;
use competitor_metrics::metrics::{AdIntensity, BusinessMaturity, EngagementQuality, MessagingTheme};
use competitor_metrics::{analyze_at, AnalysisError, AnalysisResult, Dataset};

fn scenario() -> Dataset {
    let payload = json!({
        "extraction_timestamp": "2025-01-10T08:00:00",
        "total_pages": 2,
        "pages": [
            {
                "page_name": "Alpha Furniture",
                "page_url": "https://example.com/alpha",
                "extraction_data": {
                    "likes": "9K",
                    "followers": "10K",
                    "top_reels": [{ "views": "1K" }, { "views": "2K" }],
                    "about_info": {
                        "Categories": "Furniture store",
                        "Address": "Cairo",
                        "Mobile": "0100 000 0000",
                        "Hours": "9:00 - 21:00"
                    }
                }
            },
            {
                "page_name": "Beta Decor",
                "extraction_data": {
                    "likes": "1K",
                    "followers": "5K",
                    "top_reels": [{ "views": "500" }],
                    "about_info": {
                        "Categories": "Home decor",
                        "Address": "Cairo"
                    }
                },
                "ads_data": {
                    "total_active_ads": "3",
                    "active_ads": [
                        { "cta": "Shop Now", "ad_description": "Best price on modern sofas" },
                        { "cta": "Shop Now", "ad_description": "Free delivery" },
                        { "cta": "shop now ", "ad_description": "" }
                    ]
                }
            }
        ]
    });
    Dataset::from_json_str(&payload.to_string(), "scenario").expect("scenario parses")
}

fn run(dataset: &Dataset) -> AnalysisResult {
    let date = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    analyze_at(dataset, &AnalyzerConfig::default(), date).expect("analysis succeeds")
}

fn page(name: &str, followers: &str, views: &[&str]) -> serde_json::Value {
    let reels: Vec<serde_json::Value> = views.iter().map(|v| json!({ "views": v })).collect();
    json!({
        "page_name": name,
        "extraction_data": {
            "likes": "0",
            "followers": followers,
            "top_reels": reels
        }
    })
}

fn dataset_of(pages: Vec<serde_json::Value>) -> Dataset {
    let payload = json!({ "pages": pages });
    Dataset::from_json_str(&payload.to_string(), "test").expect("dataset parses")
}

#[test]
fn two_competitor_scenario_matches_expected_metrics() {
    let result = run(&scenario());
    assert_eq!(result.competitors.len(), 2);
    assert_eq!(result.metadata.total_competitors, 2);

    let alpha = &result.competitors[0];
    let beta = &result.competitors[1];

    // 9000 / 10000 is exactly 0.9, which does not clear the strict bound.
    assert_eq!(alpha.engagement.engagement_quality, EngagementQuality::Good);
    assert!((alpha.engagement.like_to_follower_ratio - 90.0).abs() < 1e-6);
    assert!((alpha.engagement.reel_views.average_views - 1500.0).abs() < 1e-6);
    assert!((alpha.engagement.content_performance_score - 15.0).abs() < 1e-6);
    assert_eq!(alpha.business.maturity, BusinessMaturity::Mature);
    assert!(!alpha.advertising.is_advertising);

    assert_eq!(
        beta.engagement.engagement_quality,
        EngagementQuality::VeryPoorOrFakeFollowers
    );
    assert_eq!(beta.advertising.intensity, AdIntensity::Moderate);
    assert_eq!(beta.advertising.total_active_ads, 3);
    assert_eq!(beta.advertising.cta_types.len(), 1);
    assert!(beta.advertising.cta_types.contains("shop now"));
    let themes: Vec<MessagingTheme> = beta.advertising.messaging_themes.iter().copied().collect();
    assert_eq!(
        themes,
        vec![
            MessagingTheme::PriceFocused,
            MessagingTheme::QualityFocused,
            MessagingTheme::ProductFocused
        ]
    );
    assert_eq!(beta.business.maturity, BusinessMaturity::Developing);

    let alpha_position = result.position_of("Alpha Furniture").expect("alpha ranked");
    let beta_position = result.position_of("Beta Decor").expect("beta ranked");
    assert!((alpha_position.estimated_market_share - 66.67).abs() < 1e-6);
    assert!((beta_position.estimated_market_share - 33.33).abs() < 1e-6);
    assert_eq!(alpha_position.follower_rank, 1);
    assert_eq!(beta_position.follower_rank, 2);
    assert_eq!(alpha_position.engagement_rank, 1);
    assert!((alpha_position.overall_competitiveness - 54.5).abs() < 1e-6);
    assert!((beta_position.overall_competitiveness - 50.0).abs() < 1e-6);

    assert_eq!(
        result.competitive_insights.advertising_gap,
        vec!["Alpha Furniture".to_string()]
    );
}

#[test]
fn insights_cover_leaders_gaps_and_advantages() {
    let result = run(&scenario());
    let insights = &result.competitive_insights;

    assert_eq!(insights.market_leader.name, "Alpha Furniture");
    assert_eq!(insights.engagement_leader.name, "Alpha Furniture");

    assert_eq!(insights.content_opportunities.len(), 1);
    assert_eq!(insights.content_opportunities[0].competitor, "Beta Decor");
    assert!((insights.content_opportunities[0].performance_gap - 2.5).abs() < 1e-6);

    assert_eq!(insights.market_gaps.len(), 1);
    assert!(insights.market_gaps[0].gap.contains("Cairo"));

    assert_eq!(insights.competitive_advantages.len(), 2);
    assert!(insights.competitive_advantages[0].detail.contains("Beta Decor"));

    // One advertising gap for Alpha, one engagement weakness for Beta.
    assert_eq!(insights.immediate_opportunities.len(), 2);
    assert_eq!(insights.content_strategy.len(), 1);
    assert!(insights.content_strategy[0].benchmark.starts_with("Alpha Furniture"));
}

#[test]
fn summary_statistics_aggregate_all_competitors() {
    let result = run(&scenario());
    let stats = &result.summary_statistics;

    assert_eq!(stats.total_combined_followers, 15_000);
    assert!((stats.average_followers - 7500.0).abs() < 1e-6);
    assert!((stats.average_content_performance - 12.5).abs() < 1e-6);
    assert!((stats.advertising_adoption_rate - 50.0).abs() < 1e-6);
    assert!((stats.cross_platform_adoption - 0.0).abs() < 1e-6);

    let summary = &result.executive_summary;
    assert_eq!(summary.market_overview.market_leader, "Alpha Furniture");
    assert_eq!(summary.market_overview.leader_market_share, "66.7%");
    assert_eq!(summary.key_opportunities.engagement_weakness, 1);
    assert_eq!(summary.key_opportunities.cross_platform_gaps, 2);
    assert!(summary.risk_assessment.starts_with("Low"));
}

#[test]
fn dominant_leader_raises_risk() {
    let dataset = dataset_of(vec![
        page("Giant", "90K", &["1K"]),
        page("Small", "10K", &["1K"]),
    ]);
    let result = run(&dataset);
    assert!(result.executive_summary.risk_assessment.starts_with("High"));
}

#[test]
fn market_shares_sum_to_one_hundred() {
    let dataset = dataset_of(vec![
        page("One", "3K", &["100"]),
        page("Two", "3K", &["200"]),
        page("Three", "3K", &["300"]),
    ]);
    let result = run(&dataset);
    let total: f64 = result
        .market_position
        .values()
        .map(|position| position.estimated_market_share)
        .sum();
    assert!((total - 100.0).abs() < 0.05);
}

#[test]
fn market_shares_are_zero_without_followers() {
    let dataset = dataset_of(vec![page("One", "0", &[]), page("Two", "", &[])]);
    let result = run(&dataset);
    for position in result.market_position.values() {
        assert!((position.estimated_market_share - 0.0).abs() < 1e-6);
    }
    assert_eq!(
        result.competitors[0].engagement.engagement_quality,
        EngagementQuality::InsufficientData
    );
}

#[test]
fn tied_followers_share_a_rank() {
    let dataset = dataset_of(vec![
        page("Low", "1K", &["10"]),
        page("TopA", "5K", &["10"]),
        page("TopB", "5K", &["20"]),
    ]);
    let result = run(&dataset);
    let rank = |name: &str| result.position_of(name).map(|p| p.follower_rank);
    assert_eq!(rank("TopA"), Some(1));
    assert_eq!(rank("TopB"), Some(1));
    assert_eq!(rank("Low"), Some(3));

    let engagement = |name: &str| result.position_of(name).map(|p| p.engagement_rank);
    assert_eq!(engagement("TopB"), Some(1));
    assert_eq!(engagement("TopA"), Some(2));
    assert_eq!(engagement("Low"), Some(2));
}

#[test]
fn competitiveness_stays_within_bounds() {
    let dataset = dataset_of(vec![
        page("Huge", "50M", &["900M", "1B"]),
        page("Empty", "0", &[]),
        page("Garbage", "lots", &["many"]),
    ]);
    let result = run(&dataset);
    for position in result.market_position.values() {
        assert!(position.overall_competitiveness >= 0.0);
        assert!(position.overall_competitiveness <= 100.0);
    }

    let mut config = AnalyzerConfig::default();
    config.competitiveness.follower_weight = 5.0;
    config.competitiveness.advertising_weight = -5.0;
    let date = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    let result = analyze_at(&dataset, &config, date).expect("analysis succeeds");
    for position in result.market_position.values() {
        assert!(position.overall_competitiveness >= 0.0);
        assert!(position.overall_competitiveness <= 100.0);
    }
}

#[test]
fn repeated_runs_serialize_identically() {
    let dataset = scenario();
    let first = serde_json::to_string(&run(&dataset)).expect("serializes");
    let second = serde_json::to_string(&run(&dataset)).expect("serializes");
    assert_eq!(first, second);

    let reparsed = serde_json::to_string(&run(&scenario())).expect("serializes");
    assert_eq!(first, reparsed);
}

#[test]
fn empty_dataset_is_rejected() {
    let dataset = dataset_of(Vec::new());
    let date = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    let err = analyze_at(&dataset, &AnalyzerConfig::default(), date).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyDataset { skipped: 0 }));
}

#[test]
fn dataset_of_only_bad_records_is_rejected() {
    let dataset = dataset_of(vec![json!({ "page_name": "No data" }), json!(42)]);
    assert_eq!(dataset.skipped.len(), 2);
    let date = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
    let err = analyze_at(&dataset, &AnalyzerConfig::default(), date).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyDataset { skipped: 2 }));
}

#[test]
fn bad_records_are_skipped_not_fatal() {
    let dataset = dataset_of(vec![
        page("Good", "2K", &["100"]),
        json!({ "page_name": "Missing extraction" }),
        json!({ "extraction_data": { "followers": "1K" } }),
        json!("not an object"),
    ]);
    let result = run(&dataset);

    assert_eq!(result.competitors.len(), 1);
    assert_eq!(result.competitors[0].page_name, "Good");
    let indices: Vec<usize> = result
        .metadata
        .skipped_records
        .iter()
        .map(|skipped| skipped.index)
        .collect();
    assert_eq!(indices, vec![1, 2, 3]);
}

#[test]
fn duplicate_names_keep_every_record() {
    let dataset = dataset_of(vec![page("Same", "1K", &[]), page("Same", "3K", &[])]);
    let result = run(&dataset);
    assert_eq!(result.competitors.len(), 2);
    assert_eq!(result.market_position.len(), 1);
    let position = result.position_of("Same").expect("ranked");
    assert!((position.estimated_market_share - 75.0).abs() < 1e-6);
}

fn profiled_page(name: &str, address: Option<&str>, ads: u64, handles: &[&str]) -> serde_json::Value {
    let mut about = serde_json::Map::new();
    if let Some(address) = address {
        about.insert("Address".to_string(), json!(address));
    }
    for handle in handles {
        about.insert(handle.to_string(), json!(format!("@{}", name)));
    }
    json!({
        "page_name": name,
        "extraction_data": {
            "likes": "1K",
            "followers": "2K",
            "top_reels": [{ "views": "100" }],
            "about_info": about
        },
        "ads_data": { "total_active_ads": ads.to_string() }
    })
}

#[test]
fn distinct_locations_raise_no_market_gap() {
    let dataset = dataset_of(vec![
        profiled_page("Cairo Shop", Some("Cairo"), 0, &[]),
        profiled_page("Alex Shop", Some("Alexandria"), 0, &[]),
    ]);
    let result = run(&dataset);
    assert!(result.competitive_insights.market_gaps.is_empty());
}

#[test]
fn unspecified_locations_raise_no_market_gap() {
    let dataset = dataset_of(vec![
        profiled_page("First", None, 0, &[]),
        profiled_page("Second", Some("  "), 0, &[]),
    ]);
    let result = run(&dataset);
    assert!(result.competitive_insights.market_gaps.is_empty());
}

#[test]
fn advantages_stay_off_when_conditions_fail() {
    let dataset = dataset_of(vec![
        profiled_page("One", Some("Cairo"), 2, &["TikTok", "WhatsApp"]),
        profiled_page("Two", Some("Giza"), 4, &["TikTok", "WhatsApp", "Tumblr"]),
    ]);
    let result = run(&dataset);
    let advantages: Vec<&str> = result
        .competitive_insights
        .competitive_advantages
        .iter()
        .map(|advantage| advantage.advantage.as_str())
        .collect();
    assert!(!advantages.contains(&"Low advertising competition"));
    assert!(!advantages.contains(&"Poor cross-platform integration"));
    assert!(advantages.is_empty());
    assert!(result.competitive_insights.advertising_gap.is_empty());
}

#[test]
fn advantages_fire_for_single_advertiser_and_low_platforms() {
    let dataset = dataset_of(vec![
        profiled_page("Solo", Some("Cairo"), 1, &["TikTok"]),
        profiled_page("Quiet", Some("Giza"), 0, &[]),
    ]);
    let result = run(&dataset);
    let advantages: Vec<&str> = result
        .competitive_insights
        .competitive_advantages
        .iter()
        .map(|advantage| advantage.advantage.as_str())
        .collect();
    assert_eq!(
        advantages,
        vec!["Low advertising competition", "Poor cross-platform integration"]
    );
}
