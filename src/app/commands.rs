use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime, Utc};

use crate::analysis::{
    CompositeAverager, DayFilter, ProfileBuilder, ProfileOutput, SeasonalityCalculator,
    SessionView, build_sessions, current_positions, describe_horizon, top_buckets,
};
use crate::cli::{
    Cli, Command, CompositeArgs, PositionsArgs, ProfileArgs, SeasonalityArgs, SeriesArgs,
    SessionsArgs,
};
use crate::config::{CycleConfig, DF};
use crate::data::load_bar_table;
use crate::domain::{DateRange, Horizon, ProfileKind};
use crate::models::{InstanceRow, Metric, PriceSeries, ProfileRow, ReturnMethod};
use crate::report::{Reporter, profile_summary, to_json};
use crate::utils::parse_timestamp;

/// Runs one CLI invocation to completion.
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CycleConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CycleConfig::DEFAULT,
    };

    let mut reporter = Reporter::new();
    let json = match &cli.command {
        Command::Profile(args) => profile(&config, args, cli.json, &mut reporter)?,
        Command::Sessions(args) => sessions(&config, args, cli.json, &mut reporter)?,
        Command::Composite(args) => composite(&config, args, cli.json, &mut reporter)?,
        Command::Seasonality(args) => seasonality(&config, args, cli.json, &mut reporter)?,
        Command::Positions(args) => positions(&config, args, cli.json, &mut reporter)?,
    };

    match json {
        Some(text) => println!("{}", text),
        None => reporter.print_all(),
    }
    Ok(())
}

fn load_series(args: &SeriesArgs) -> Result<PriceSeries> {
    let table = load_bar_table(&args.csv)?;
    let series = table
        .to_series()
        .with_context(|| format!("converting {}", args.csv.display()))?;
    let series = if args.trim_partial_days {
        series.trim_partial_days()
    } else {
        series
    };
    if DF.log_loader {
        log::info!("{} usable bars in {}", series.len(), file_name(&args.csv));
    }
    Ok(series)
}

fn date_range(args: &SeriesArgs) -> Result<DateRange> {
    let start = args.start.unwrap_or(NaiveDate::MIN);
    let end = args.end.unwrap_or(NaiveDate::MAX);
    Ok(DateRange::checked(start, end)?)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn profile(
    config: &CycleConfig,
    args: &ProfileArgs,
    json: bool,
    reporter: &mut Reporter,
) -> Result<Option<String>> {
    let kind = ProfileKind::parse_key(&args.kind)?;
    let series = load_series(&args.series)?;
    let range = date_range(&args.series)?;
    let output = ProfileBuilder::new(config).build_by_key(&args.kind, &series, range, None)?;

    if json {
        let text = match &output {
            ProfileOutput::Cycle(rows) => to_json(rows)?,
            ProfileOutput::Session(rows) => to_json(rows)?,
        };
        return Ok(Some(text));
    }

    reporter.add_header(kind.title());
    if output.has_no_observations() {
        reporter.add_text("No bars in the selected range.");
    }
    let rows: Vec<ProfileRow> = match output {
        ProfileOutput::Cycle(rows) => {
            reporter.add_profile(&rows);
            rows
        }
        ProfileOutput::Session(rows) => {
            reporter.add_sessions(&rows);
            rows.into_iter().map(|r| r.row).collect()
        }
    };
    let last_close = series.bars().last().map(|b| b.close_price);
    reporter.add_text(profile_summary(kind, &rows, last_close));

    if let Some(n) = args.top {
        let metric = Metric::parse_key(&args.rank_by)?;
        reporter.add_header(&format!("Top {} by {}", n, metric));
        reporter.add_profile(&top_buckets(&rows, metric, n, true));
        reporter.add_header(&format!("Bottom {} by {}", n, metric));
        reporter.add_profile(&top_buckets(&rows, metric, n, false));
    }
    Ok(None)
}

fn sessions(
    config: &CycleConfig,
    args: &SessionsArgs,
    json: bool,
    reporter: &mut Reporter,
) -> Result<Option<String>> {
    let series = load_series(&args.series)?;
    let range = date_range(&args.series)?;
    let view = if args.combined {
        let filter = args
            .filter
            .parse::<DayFilter>()
            .with_context(|| format!("unknown day filter '{}'", args.filter))?;
        SessionView::Combined(filter)
    } else {
        SessionView::Daily
    };
    let rows = build_sessions(config, &series, range, view);

    if json {
        return Ok(Some(to_json(&rows)?));
    }
    reporter.add_header("Sessions");
    reporter.add_sessions(&rows);
    Ok(None)
}

fn composite(
    config: &CycleConfig,
    args: &CompositeArgs,
    json: bool,
    reporter: &mut Reporter,
) -> Result<Option<String>> {
    let kind = ProfileKind::parse_key(&args.kind)?;
    let series = load_series(&args.series)?;
    let range = date_range(&args.series)?;
    let history = ProfileBuilder::new(config).history(kind, &series, range);
    let averager = CompositeAverager::new(config);

    if args.matrix {
        let metric = Metric::parse_key(&args.metric)?;
        let rows = averager.matrix(&history, kind, |r: &InstanceRow| r.bucket, metric);
        if json {
            return Ok(Some(to_json(&rows)?));
        }
        reporter.add_header(&format!("{} composite {}", kind.title(), metric));
        reporter.add_matrix(kind.profile(), &rows);
        return Ok(None);
    }

    let horizon = Horizon::parse_key(&args.horizon)?;
    let rows = averager.profile(&history, kind, horizon);
    if json {
        return Ok(Some(to_json(&rows)?));
    }
    reporter.add_header(&format!(
        "{} composite: {}",
        kind.title(),
        describe_horizon(kind, horizon, config)
    ));
    reporter.add_profile(&rows);
    Ok(None)
}

fn seasonality(
    config: &CycleConfig,
    args: &SeasonalityArgs,
    json: bool,
    reporter: &mut Reporter,
) -> Result<Option<String>> {
    let series = load_series(&args.series)?;
    let method = args
        .method
        .parse::<ReturnMethod>()
        .with_context(|| format!("unknown return method '{}'", args.method))?;
    let cutoff = args.cutoff.unwrap_or_else(|| Utc::now().date_naive());
    if args.horizons.is_empty() {
        bail!("at least one seasonality horizon is required");
    }

    let calc = SeasonalityCalculator::new(config);
    let frame = calc.calculate_seasonality(&series, args.years_back, method, cutoff);
    let curves = calc.generate_cumulative_returns(&frame, &args.horizons);

    if json {
        return Ok(Some(to_json(&curves)?));
    }
    reporter.add_header(&format!("Seasonality to {} ({})", cutoff, method));
    if curves.is_empty() {
        reporter.add_text("No bars in the selected window.");
    }
    reporter.add_curves(&curves);
    Ok(None)
}

fn positions(
    config: &CycleConfig,
    args: &PositionsArgs,
    json: bool,
    reporter: &mut Reporter,
) -> Result<Option<String>> {
    let at: NaiveDateTime = match &args.at {
        Some(raw) => parse_timestamp(raw).with_context(|| format!("unparseable instant '{}'", raw))?,
        None => Utc::now().naive_utc(),
    };
    let positions = current_positions(at, config);

    if json {
        return Ok(Some(to_json(&positions)?));
    }
    reporter.add_header(&format!("Cycle positions at {} UTC", at.format("%Y-%m-%d %H:%M")));
    reporter.add_positions(&positions);
    Ok(None)
}
