mod bar_table;
mod composite_row;
mod price_series;
mod profile_row;
mod seasonal;

pub use {
    bar_table::{BarTable, Column},
    composite_row::{CompositeMatrixRow, CompositeRow},
    price_series::PriceSeries,
    profile_row::{InstanceRow, Metric, MetricRecord, MetricValues, ProfileRow, SessionRow},
    seasonal::{
        AnnotatedBar, CurveHorizon, ReturnMethod, SeasonalFrame, SeasonalityCurve,
        SeasonalityPoint,
    },
};
