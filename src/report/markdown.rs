use std::fmt::Write;

use crate::{format_float, format_number, AnalysisResult};

pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, result);
    out
}

fn write_document(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    let meta = &result.metadata;
    let stats = &result.summary_statistics;
    let insights = &result.competitive_insights;

    writeln!(out, "# Competitor Analysis Report\n")?;
    writeln!(out, "Analysis Date: {}", meta.analysis_date.format("%Y-%m-%d"))?;
    if let Some(extracted) = &meta.extraction_timestamp {
        writeln!(out, "Data Extracted: {}", extracted)?;
    }
    writeln!(out, "Total Competitors Analyzed: {}", meta.total_competitors)?;
    if !meta.skipped_records.is_empty() {
        writeln!(out, "Skipped Records: {}", meta.skipped_records.len())?;
    }

    writeln!(out, "\n## Executive Summary\n")?;
    writeln!(
        out,
        "This analysis covers {} competitors with a combined audience of {} followers.\n",
        meta.total_competitors,
        format_number(stats.total_combined_followers as f64)
    )?;
    writeln!(out, "Key findings:\n")?;
    writeln!(out, "- Average follower count: {}", format_number(stats.average_followers))?;
    writeln!(
        out,
        "- Average content performance: {}%",
        format_float(stats.average_content_performance, 2)
    )?;
    writeln!(
        out,
        "- Advertising adoption rate: {}%",
        format_float(stats.advertising_adoption_rate, 2)
    )?;
    writeln!(
        out,
        "- Cross-platform integration: {} platforms per competitor",
        format_float(stats.cross_platform_adoption, 1)
    )?;
    writeln!(out, "- Risk assessment: {}", result.executive_summary.risk_assessment)?;

    writeln!(out, "\n## Market Leadership Analysis\n")?;
    writeln!(
        out,
        "- Market Share Leader: {} with {}% estimated market share",
        insights.market_leader.name,
        format_float(insights.market_leader.value, 2)
    )?;
    writeln!(
        out,
        "- Engagement Leader: {} with competitiveness score of {}",
        insights.engagement_leader.name,
        format_float(insights.engagement_leader.value, 2)
    )?;

    writeln!(out, "\n## Individual Competitor Profiles")?;
    for competitor in &result.competitors {
        let metrics = &competitor.engagement;
        let business = &competitor.business;
        let ads = &competitor.advertising;

        writeln!(out, "\n### {}\n", escape_cell(&competitor.page_name))?;
        writeln!(out, "| Metric | Value |")?;
        writeln!(out, "| --- | --- |")?;
        let rows = [
            ("Followers", format_number(metrics.followers as f64)),
            ("Likes", format_number(metrics.likes as f64)),
            ("Engagement Quality", metrics.engagement_quality.label().to_string()),
            ("Average Reel Views", format_number(metrics.reel_views.average_views)),
            (
                "Content Performance Score",
                format!("{}%", format_float(metrics.content_performance_score, 2)),
            ),
            ("Business Category", business.category.clone()),
            ("Location", business.location.clone()),
            ("Business Maturity", business.maturity.label().to_string()),
            ("Contact Methods", business.contact_methods.len().to_string()),
            (
                "Cross-Platform Presence",
                business.cross_platform.total_platforms.to_string(),
            ),
            (
                "Currently Advertising",
                (if ads.is_advertising { "Yes" } else { "No" }).to_string(),
            ),
            ("Active Ads Count", ads.total_active_ads.to_string()),
        ];
        for (label, value) in rows {
            writeln!(out, "| {} | {} |", label, escape_cell(&value))?;
        }
    }

    writeln!(out, "\n## Strategic Opportunities")?;
    if !insights.advertising_gap.is_empty() {
        writeln!(out, "\n### Advertising Gaps\n")?;
        writeln!(
            out,
            "The following {} competitors are not currently advertising: {}",
            insights.advertising_gap.len(),
            insights.advertising_gap.join(", ")
        )?;
    }
    if !insights.content_opportunities.is_empty() {
        writeln!(out, "\n### Content Performance Gaps\n")?;
        for opportunity in &insights.content_opportunities {
            writeln!(
                out,
                "- {}: {}% below market average",
                opportunity.competitor,
                format_float(opportunity.performance_gap, 2)
            )?;
        }
    }
    if !insights.market_gaps.is_empty() {
        writeln!(out, "\n### Market Gaps\n")?;
        for gap in &insights.market_gaps {
            writeln!(out, "- {}: {}", gap.gap, gap.opportunity)?;
        }
    }
    if !insights.competitive_advantages.is_empty() {
        writeln!(out, "\n### Competitive Advantages\n")?;
        for advantage in &insights.competitive_advantages {
            writeln!(
                out,
                "- {}: {}. {}",
                advantage.advantage, advantage.detail, advantage.action
            )?;
        }
    }

    writeln!(out, "\n## Market Position Summary\n")?;
    writeln!(
        out,
        "| Competitor | Market Share % | Follower Rank | Engagement Rank | Competitiveness Score |"
    )?;
    writeln!(out, "| --- | --- | --- | --- | --- |")?;
    for (name, position) in result.ranked_positions() {
        writeln!(
            out,
            "| {} | {}% | {} | {} | {} |",
            escape_cell(name),
            format_float(position.estimated_market_share, 2),
            position.follower_rank,
            position.engagement_rank,
            format_float(position.overall_competitiveness, 2)
        )?;
    }

    Ok(())
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
