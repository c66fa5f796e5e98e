use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::analysis::{CycleProfile, CyclePosition};
use crate::config::{ClosePrice, PriceLike};
use crate::domain::{Bucket, ProfileKind};
use crate::models::{CompositeMatrixRow, Metric, ProfileRow, SeasonalityCurve, SessionRow};

#[derive(Tabled)]
struct ProfileLine {
    #[tabled(rename = "Bucket")]
    label: String,
    #[tabled(rename = "Avg Return")]
    avg_return: String,
    #[tabled(rename = "Avg Range")]
    avg_range: String,
    #[tabled(rename = "Green")]
    prob_green: String,
    #[tabled(rename = "Red")]
    prob_red: String,
    #[tabled(rename = "Bars")]
    observations: usize,
}

impl From<&ProfileRow> for ProfileLine {
    fn from(row: &ProfileRow) -> Self {
        let m = &row.metrics;
        Self {
            label: row.label.clone(),
            avg_return: m.avg_return.to_string(),
            avg_range: m.avg_range.to_string(),
            prob_green: m.prob_green.to_string(),
            prob_red: m.prob_red.to_string(),
            observations: m.observations,
        }
    }
}

#[derive(Tabled)]
struct SessionLine {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Session")]
    session: String,
    #[tabled(inline)]
    line: ProfileLine,
}

#[derive(Tabled)]
struct MatrixLine {
    #[tabled(rename = "Bucket")]
    label: String,
    min_cycle: String,
    short_term: String,
    mid_term: String,
    long_term: String,
    multi_year: String,
}

#[derive(Tabled)]
struct PositionLine {
    #[tabled(rename = "Profile")]
    profile: &'static str,
    #[tabled(rename = "Bucket")]
    label: String,
    #[tabled(rename = "Position")]
    position: String,
}

#[derive(Tabled)]
struct CurveLine {
    #[tabled(rename = "Curve")]
    label: String,
    #[tabled(rename = "Days")]
    points: usize,
    #[tabled(rename = "Last Day")]
    last_day: String,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
}

/// Collects titled sections and prints them in one go.
#[derive(Default)]
pub struct Reporter {
    buffer: Vec<String>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_header(&mut self, title: &str) {
        self.buffer.push(format!("==== {} ====", title));
    }

    pub fn add_text(&mut self, text: impl Into<String>) {
        self.buffer.push(text.into());
    }

    pub fn add_profile(&mut self, rows: &[ProfileRow]) {
        let lines: Vec<ProfileLine> = rows.iter().map(ProfileLine::from).collect();
        self.buffer.push(render(lines));
    }

    pub fn add_sessions(&mut self, rows: &[SessionRow]) {
        let lines: Vec<SessionLine> = rows
            .iter()
            .map(|r| SessionLine {
                day: r.day_label.clone(),
                session: r.session_label.clone(),
                line: ProfileLine::from(&r.row),
            })
            .collect();
        self.buffer.push(render(lines));
    }

    pub fn add_matrix(&mut self, profile: &dyn CycleProfile, rows: &[CompositeMatrixRow<Bucket>]) {
        let fmt = |metric: Metric, v: f64| match metric {
            Metric::AvgReturn => format!("{:+.3}%", v),
            Metric::AvgRange => format!("{:.2}", v),
            Metric::ProbGreen | Metric::ProbRed => format!("{:.1}%", v),
        };
        let lines: Vec<MatrixLine> = rows
            .iter()
            .map(|r| MatrixLine {
                label: profile.label(r.unit),
                min_cycle: fmt(r.metric, r.values[0]),
                short_term: fmt(r.metric, r.values[1]),
                mid_term: fmt(r.metric, r.values[2]),
                long_term: fmt(r.metric, r.values[3]),
                multi_year: fmt(r.metric, r.values[4]),
            })
            .collect();
        self.buffer.push(render(lines));
    }

    pub fn add_positions(&mut self, positions: &[CyclePosition]) {
        let lines: Vec<PositionLine> = positions
            .iter()
            .map(|p| PositionLine {
                profile: p.kind.title(),
                label: p.label.clone().unwrap_or_else(|| "-".to_string()),
                position: p.describe(),
            })
            .collect();
        self.buffer.push(render(lines));
    }

    pub fn add_curves(&mut self, curves: &[SeasonalityCurve]) {
        let lines: Vec<CurveLine> = curves
            .iter()
            .map(|c| {
                let last = c.last();
                CurveLine {
                    label: c.label(),
                    points: c.points.len(),
                    last_day: last.map(|p| p.day_of_year.to_string()).unwrap_or_default(),
                    cumulative: last
                        .map(|p| format!("{:+.2}%", p.cumulative_return))
                        .unwrap_or_default(),
                }
            })
            .collect();
        self.buffer.push(render(lines));
    }

    pub fn lines(&self) -> &[String] {
        &self.buffer
    }

    pub fn print_all(&self) {
        for line in &self.buffer {
            println!("{}", line);
        }
    }
}

fn render<T: Tabled>(lines: Vec<T>) -> String {
    let mut table = Table::new(lines);
    table.with(Style::rounded());
    table.to_string()
}

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One-line summary used under a profile table.
pub fn profile_summary(kind: ProfileKind, rows: &[ProfileRow], last_close: Option<ClosePrice>) -> String {
    let bars: usize = rows.iter().map(|r| r.metrics.observations).sum();
    let observed = rows.iter().filter(|r| !r.metrics.is_empty()).count();
    let mut summary = format!(
        "{}: {} bars across {}/{} buckets",
        kind.title(),
        bars,
        observed,
        rows.len()
    );
    if let Some(price) = last_close {
        summary.push_str(&format!(", last close {}", price.format_price()));
    }
    summary
}
