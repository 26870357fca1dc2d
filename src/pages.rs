//! Page selection and the single dispatch point that builds each page's views.

use crate::config::Config;
use crate::error::{InputError, Result};
use crate::forecast::{self, LinearTrend};
use crate::loader::Dataset;
use crate::reports::{self, Dimension, OTHER_COUNTRIES, OTHER_STATES};
use crate::types::{
    CategoryCountRow, ForecastRow, MonthCountRow, MonthYearRow, ShareRow, SummaryStats,
    YearTotalRow,
};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    Overview,
    Regions,
    States,
    Temporal,
    Forecast,
}

impl PageKind {
    pub const ALL: [PageKind; 5] = [
        PageKind::Overview,
        PageKind::Regions,
        PageKind::States,
        PageKind::Temporal,
        PageKind::Forecast,
    ];

    /// Sidebar label.
    pub fn title(self) -> &'static str {
        match self {
            PageKind::Overview => "Geral",
            PageKind::Regions => "Por Regiões",
            PageKind::States => "Por Estado",
            PageKind::Temporal => "Temporal",
            PageKind::Forecast => "Previsões",
        }
    }

    /// Menu choice, `"1"` through `"5"`.
    pub fn from_choice(choice: &str) -> std::result::Result<Self, InputError> {
        choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| InputError::UnknownPage(choice.trim().to_string()))
    }
}

/// A page together with the parameters the user picked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Overview,
    Regions,
    State { state: String },
    Temporal,
    Forecast { target_year: i32 },
}

impl PageRequest {
    pub fn kind(&self) -> PageKind {
        match self {
            PageRequest::Overview => PageKind::Overview,
            PageRequest::Regions => PageKind::Regions,
            PageRequest::State { .. } => PageKind::States,
            PageRequest::Temporal => PageKind::Temporal,
            PageRequest::Forecast { .. } => PageKind::Forecast,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewPage {
    pub summary: SummaryStats,
    pub yearly: Vec<YearTotalRow>,
    pub top_countries: Vec<CategoryCountRow>,
    pub arrival_channels: Vec<ShareRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionsPage {
    pub regions: Vec<CategoryCountRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatePage {
    pub state: String,
    pub yearly: Vec<YearTotalRow>,
    pub top_states: Vec<CategoryCountRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemporalPage {
    pub yearly: Vec<YearTotalRow>,
    pub months: Vec<MonthCountRow>,
    pub month_year: Vec<MonthYearRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPage {
    pub target_year: i32,
    pub trend: LinearTrend,
    pub history: Vec<YearTotalRow>,
    pub projection: Vec<ForecastRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageReport {
    Overview(OverviewPage),
    Regions(RegionsPage),
    State(StatePage),
    Temporal(TemporalPage),
    Forecast(ForecastPage),
}

/// Compute every view of the requested page. A failure anywhere fails the
/// whole page; no partial report is returned.
pub fn render(dataset: &Dataset, request: &PageRequest, config: &Config) -> Result<PageReport> {
    let data = dataset.records();
    log::debug!("Rendering page {:?}", request.kind());
    let report = match request {
        PageRequest::Overview => PageReport::Overview(OverviewPage {
            summary: reports::summarize(data),
            yearly: reports::yearly_totals(data),
            top_countries: reports::top_n(
                data,
                Dimension::Country,
                Some(OTHER_COUNTRIES),
                config.top_n,
            ),
            arrival_channels: reports::share_breakdown(data, Dimension::ArrivalChannel),
        }),
        PageRequest::Regions => PageReport::Regions(RegionsPage {
            regions: reports::region_ranking(data),
        }),
        PageRequest::State { state } => {
            if !dataset.has_state(state) {
                return Err(InputError::UnknownState(state.clone()).into());
            }
            PageReport::State(StatePage {
                state: state.clone(),
                yearly: reports::state_yearly_totals(data, state),
                top_states: reports::top_n(data, Dimension::State, Some(OTHER_STATES), config.top_n),
            })
        }
        PageRequest::Temporal => PageReport::Temporal(TemporalPage {
            yearly: reports::yearly_totals(data),
            months: reports::month_distribution(data),
            month_year: reports::month_year_trend(data),
        }),
        PageRequest::Forecast { target_year } => {
            let history = reports::yearly_totals(data);
            let (trend, projection) =
                forecast::project(&history, *target_year, config.forecast_max_year)?;
            PageReport::Forecast(ForecastPage {
                target_year: *target_year,
                trend,
                history,
                projection,
            })
        }
    };
    Ok(report)
}
