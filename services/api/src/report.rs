use crate::infra::build_engine;
use birthday_compat::compat::{
    AxisOutcome, CompatibilityReport, ScoringMethod, TracingStatementLog, ZodiacSign,
};
use birthday_compat::config::AppConfig;
use birthday_compat::error::AppError;
use chrono::NaiveDate;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Name of the person being compared (blank shows as "You")
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    /// Birth date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) birth_date: NaiveDate,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config.profile, Arc::new(TracingStatementLog));
    let report = engine.match_by_birth_date(&args.name, args.birth_date);

    if args.json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
        println!("{rendered}");
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

pub(crate) fn render_report(report: &CompatibilityReport) -> String {
    let mut out = format!(
        "{} {} x {} {} ({})\n",
        report.self_name,
        sign_badge(report.self_sun),
        report.other_name,
        sign_badge(report.other_sun),
        method_label(report.method),
    );

    let axes = [
        ("Romantic", report.romantic.as_ref()),
        ("Friendship", Some(&report.friendship)),
        ("Work", Some(&report.work)),
    ];
    for (label, axis) in axes {
        if let Some(axis) = axis {
            out.push_str(&axis_line(label, axis));
        }
    }

    if let Some(overall) = report.overall {
        out.push_str(&format!("Overall {}/100: {}\n", overall.score, overall.label));
    }
    out
}

fn axis_line(label: &str, axis: &AxisOutcome) -> String {
    format!(
        "- {label} {}/100 ({}): {}\n",
        axis.score,
        axis.band.label(),
        axis.statement
    )
}

fn sign_badge(sign: Option<ZodiacSign>) -> String {
    match sign {
        Some(sign) => format!("{} {}", sign.glyph(), sign.label()),
        None => "?".to_string(),
    }
}

fn method_label(method: ScoringMethod) -> &'static str {
    match method {
        ScoringMethod::SunSign => "sun signs",
        ScoringMethod::Longitude => "sun and moon positions",
        ScoringMethod::Override => "special case",
    }
}
