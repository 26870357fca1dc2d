use crate::util::{format_int, format_number};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use tabled::Tabled;

#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "mes_ano")]
    pub month_year: String,
    #[serde(rename = "ano")]
    pub year: String,
    #[serde(rename = "mes")]
    pub month: String,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "uf")]
    pub state: String,
    #[serde(rename = "regiao")]
    pub region: String,
    #[serde(rename = "via")]
    pub arrival_channel: String,
}

/// Calendar month with its canonical (Portuguese) label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    #[cfg(test)]
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Month::January => "Janeiro",
            Month::February => "Fevereiro",
            Month::March => "Março",
            Month::April => "Abril",
            Month::May => "Maio",
            Month::June => "Junho",
            Month::July => "Julho",
            Month::August => "Agosto",
            Month::September => "Setembro",
            Month::October => "Outubro",
            Month::November => "Novembro",
            Month::December => "Dezembro",
        }
    }

    /// Calendar position, 1 for January through 12 for December.
    pub fn order(self) -> u32 {
        self as u32 + 1
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TourismRecord {
    /// First day of the month. No view reads it; the loader checks `year` against it.
    pub month_year: NaiveDate,
    pub year: i32,
    pub month: Month,
    pub country: String,
    pub state: String,
    pub region: String,
    pub arrival_channel: String,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct YearTotalRow {
    #[serde(rename = "Ano")]
    #[tabled(rename = "Ano")]
    pub year: i32,
    #[serde(rename = "TotalTuristas")]
    #[tabled(rename = "TotalTuristas", display_with = "display_count")]
    pub total: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct CategoryCountRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Categoria")]
    #[tabled(rename = "Categoria")]
    pub label: String,
    #[serde(rename = "TotalTuristas")]
    #[tabled(rename = "TotalTuristas", display_with = "display_count")]
    pub total: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct ShareRow {
    #[serde(rename = "Categoria")]
    #[tabled(rename = "Categoria")]
    pub label: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total", display_with = "display_count")]
    pub total: usize,
    #[serde(rename = "Percentual")]
    #[tabled(rename = "Percentual", display_with = "display_pct")]
    pub share_pct: f64,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct MonthCountRow {
    #[serde(rename = "Mes")]
    #[tabled(rename = "Mes")]
    pub month: Month,
    #[serde(rename = "OrdemMes")]
    #[tabled(skip)]
    pub month_order: u32,
    #[serde(rename = "TotalTuristas")]
    #[tabled(rename = "TotalTuristas", display_with = "display_count")]
    pub total: usize,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq, Eq)]
pub struct MonthYearRow {
    #[serde(rename = "Ano")]
    #[tabled(rename = "Ano")]
    pub year: i32,
    #[serde(rename = "Mes")]
    #[tabled(rename = "Mes")]
    pub month: Month,
    #[serde(rename = "OrdemMes")]
    #[tabled(skip)]
    pub month_order: u32,
    #[serde(rename = "TotalTuristas")]
    #[tabled(rename = "TotalTuristas", display_with = "display_count")]
    pub total: usize,
}

/// One point of the forecast series. `actual` is `None` past the last observed year.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct ForecastRow {
    #[serde(rename = "Ano")]
    #[tabled(rename = "Ano")]
    pub year: i32,
    #[serde(rename = "Historico")]
    #[tabled(rename = "Historico", display_with = "display_actual")]
    pub actual: Option<usize>,
    #[serde(rename = "Previsao")]
    #[tabled(rename = "Previsao", display_with = "display_predicted")]
    pub predicted: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SummaryStats {
    pub total_records: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub total_countries: usize,
    pub total_states: usize,
    pub total_regions: usize,
    pub total_arrival_channels: usize,
}

fn display_count(n: &usize) -> String {
    format_int(*n)
}

fn display_pct(p: &f64) -> String {
    format!("{}%", format_number(*p, 2))
}

fn display_actual(v: &Option<usize>) -> String {
    v.map(format_int).unwrap_or_else(|| "-".to_string())
}

fn display_predicted(v: &f64) -> String {
    format_number(*v, 2)
}
