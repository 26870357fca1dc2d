//! Aggregated views over the tourism table.
//!
//! Every function here is a pure function of its input slice. Grouping is
//! key-ordered (ascending label or year); ranked views then apply a stable
//! sort by count descending, so ties keep ascending label order.

use crate::types::{
    CategoryCountRow, Month, MonthCountRow, MonthYearRow, ShareRow, SummaryStats, TourismRecord,
    YearTotalRow,
};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

pub const OTHER_COUNTRIES: &str = "Outros países";
pub const OTHER_STATES: &str = "Outras Unidades da Federação";

/// Categorical columns of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Country,
    State,
    Region,
    ArrivalChannel,
}

impl Dimension {
    pub fn of(self, record: &TourismRecord) -> &str {
        match self {
            Dimension::Country => &record.country,
            Dimension::State => &record.state,
            Dimension::Region => &record.region,
            Dimension::ArrivalChannel => &record.arrival_channel,
        }
    }
}

fn count_by<'a>(data: &'a [TourismRecord], dim: Dimension) -> BTreeMap<&'a str, usize> {
    let mut map: BTreeMap<&str, usize> = BTreeMap::new();
    for r in data {
        *map.entry(dim.of(r)).or_default() += 1;
    }
    map
}

fn ranked(counts: BTreeMap<&str, usize>, limit: Option<usize>) -> Vec<CategoryCountRow> {
    let mut tmp: Vec<(&str, usize)> = counts.into_iter().collect();
    // `sort_by_key` is stable: equal counts stay in label order.
    tmp.sort_by_key(|(_, total)| Reverse(*total));
    tmp.into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(idx, (label, total))| CategoryCountRow {
            rank: idx + 1,
            label: label.to_string(),
            total,
        })
        .collect()
}

/// Record count per year, ascending by year.
pub fn yearly_totals(data: &[TourismRecord]) -> Vec<YearTotalRow> {
    count_years(data.iter())
}

fn count_years<'a>(records: impl Iterator<Item = &'a TourismRecord>) -> Vec<YearTotalRow> {
    let mut map: BTreeMap<i32, usize> = BTreeMap::new();
    for r in records {
        *map.entry(r.year).or_default() += 1;
    }
    map.into_iter()
        .map(|(year, total)| YearTotalRow { year, total })
        .collect()
}

/// Top `n` labels of `dim` by count, skipping the `exclude` catch-all bucket.
pub fn top_n(
    data: &[TourismRecord],
    dim: Dimension,
    exclude: Option<&str>,
    n: usize,
) -> Vec<CategoryCountRow> {
    let mut counts = count_by(data, dim);
    if let Some(label) = exclude {
        counts.remove(label);
    }
    let rows = ranked(counts, Some(n));
    log::debug!("top_n({dim:?}, n={n}) -> {} rows", rows.len());
    rows
}

/// Count and percentage share per label, in label order.
pub fn share_breakdown(data: &[TourismRecord], dim: Dimension) -> Vec<ShareRow> {
    let total = data.len();
    count_by(data, dim)
        .into_iter()
        .map(|(label, count)| ShareRow {
            label: label.to_string(),
            total: count,
            share_pct: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

/// All regions ranked by count, descending.
pub fn region_ranking(data: &[TourismRecord]) -> Vec<CategoryCountRow> {
    ranked(count_by(data, Dimension::Region), None)
}

/// Yearly totals restricted to one state. Empty if the state has no rows.
pub fn state_yearly_totals(data: &[TourismRecord], state: &str) -> Vec<YearTotalRow> {
    count_years(data.iter().filter(|r| r.state == state))
}

/// Count per month over all years, January first.
pub fn month_distribution(data: &[TourismRecord]) -> Vec<MonthCountRow> {
    let mut map: BTreeMap<Month, usize> = BTreeMap::new();
    for r in data {
        *map.entry(r.month).or_default() += 1;
    }
    map.into_iter()
        .map(|(month, total)| MonthCountRow { month, month_order: month.order(), total })
        .collect()
}

/// Count per (year, month), ordered by year then calendar month.
pub fn month_year_trend(data: &[TourismRecord]) -> Vec<MonthYearRow> {
    let mut map: BTreeMap<(i32, Month), usize> = BTreeMap::new();
    for r in data {
        *map.entry((r.year, r.month)).or_default() += 1;
    }
    let rows: Vec<MonthYearRow> = map
        .into_iter()
        .map(|((year, month), total)| MonthYearRow {
            year,
            month,
            month_order: month.order(),
            total,
        })
        .collect();
    log::debug!("month_year_trend -> {} rows", rows.len());
    rows
}

pub fn summarize(data: &[TourismRecord]) -> SummaryStats {
    let distinct = |dim: Dimension| data.iter().map(|r| dim.of(r)).collect::<BTreeSet<_>>().len();
    SummaryStats {
        total_records: data.len(),
        first_year: data.iter().map(|r| r.year).min(),
        last_year: data.iter().map(|r| r.year).max(),
        total_countries: distinct(Dimension::Country),
        total_states: distinct(Dimension::State),
        total_regions: distinct(Dimension::Region),
        total_arrival_channels: distinct(Dimension::ArrivalChannel),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn rec(
        year: i32,
        month: Month,
        country: &str,
        state: &str,
        region: &str,
        via: &str,
    ) -> TourismRecord {
        TourismRecord {
            month_year: NaiveDate::from_ymd_opt(year, month.order(), 1).unwrap(),
            year,
            month,
            country: country.to_string(),
            state: state.to_string(),
            region: region.to_string(),
            arrival_channel: via.to_string(),
        }
    }

    pub(crate) fn sample() -> Vec<TourismRecord> {
        use Month::*;
        vec![
            rec(2016, March, "Argentina", "Rio de Janeiro", "Sudeste", "Aérea"),
            rec(2014, January, "Argentina", "São Paulo", "Sudeste", "Aérea"),
            rec(2014, December, "Chile", "São Paulo", "Sudeste", "Terrestre"),
            rec(2015, January, "Outros países", "Bahia", "Nordeste", "Aérea"),
            rec(2015, March, "Paraguai", OTHER_STATES, "Sul", "Fluvial"),
            rec(2014, January, "Argentina", "Paraná", "Sul", "Terrestre"),
            rec(2016, December, "Chile", "São Paulo", "Sudeste", "Marítima"),
            rec(2016, January, "Outros países", OTHER_STATES, "Norte", "Aérea"),
        ]
    }

    #[test]
    fn yearly_totals_conserve_counts() {
        let data = sample();
        let rows = yearly_totals(&data);
        assert_eq!(
            rows,
            vec![
                YearTotalRow { year: 2014, total: 3 },
                YearTotalRow { year: 2015, total: 2 },
                YearTotalRow { year: 2016, total: 3 },
            ]
        );
        assert_eq!(rows.iter().map(|r| r.total).sum::<usize>(), data.len());
        assert!(yearly_totals(&[]).is_empty());
    }

    #[test]
    fn top_n_excludes_catch_all_and_sorts_descending() {
        let data = sample();
        let rows = top_n(&data, Dimension::Country, Some(OTHER_COUNTRIES), 10);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Argentina", "Chile", "Paraguai"]);
        assert_eq!(rows[0].total, 3);
        assert_eq!(rows[0].rank, 1);
        assert!(rows.windows(2).all(|w| w[0].total >= w[1].total));
        // Sum matches the filtered subset.
        let expected = data.iter().filter(|r| r.country != OTHER_COUNTRIES).count();
        assert_eq!(rows.iter().map(|r| r.total).sum::<usize>(), expected);
    }

    #[test]
    fn top_n_truncates() {
        let data = sample();
        let rows = top_n(&data, Dimension::State, Some(OTHER_STATES), 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "São Paulo");
        assert_eq!(rows[0].total, 3);
        assert!(top_n(&data, Dimension::State, None, 0).is_empty());
    }

    #[test]
    fn ties_break_by_ascending_label() {
        use Month::*;
        let data = vec![
            rec(2014, May, "Uruguai", "Acre", "Norte", "Aérea"),
            rec(2014, May, "Bolívia", "Acre", "Norte", "Aérea"),
            rec(2014, May, "Peru", "Acre", "Norte", "Aérea"),
            rec(2014, May, "Peru", "Acre", "Norte", "Aérea"),
        ];
        let rows = top_n(&data, Dimension::Country, None, 10);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Peru", "Bolívia", "Uruguai"]);
    }

    #[test]
    fn share_breakdown_keeps_everything() {
        let data = sample();
        let rows = share_breakdown(&data, Dimension::ArrivalChannel);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Aérea", "Fluvial", "Marítima", "Terrestre"]);
        assert_eq!(rows.iter().map(|r| r.total).sum::<usize>(), data.len());
        let pct: f64 = rows.iter().map(|r| r.share_pct).sum();
        assert!((pct - 100.0).abs() < 1e-9);
        assert!((rows[0].share_pct - 50.0).abs() < 1e-9);
        assert!(share_breakdown(&[], Dimension::Region).is_empty());
    }

    #[test]
    fn region_ranking_has_no_filter() {
        let data = sample();
        let rows = region_ranking(&data);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Sudeste", "Sul", "Nordeste", "Norte"]);
        assert_eq!(rows.iter().map(|r| r.total).sum::<usize>(), data.len());
        assert_eq!(rows.last().map(|r| r.rank), Some(4));
    }

    #[test]
    fn state_series_filters_and_handles_absent_state() {
        let data = sample();
        assert_eq!(
            state_yearly_totals(&data, "São Paulo"),
            vec![
                YearTotalRow { year: 2014, total: 2 },
                YearTotalRow { year: 2016, total: 1 },
            ]
        );
        assert!(state_yearly_totals(&data, "Acre").is_empty());
    }

    #[test]
    fn month_distribution_in_calendar_order() {
        use Month::*;
        // December and March before January in input, "Abril" sorts first alphabetically.
        let data = vec![
            rec(2014, December, "Chile", "Acre", "Norte", "Aérea"),
            rec(2014, March, "Chile", "Acre", "Norte", "Aérea"),
            rec(2014, April, "Chile", "Acre", "Norte", "Aérea"),
            rec(2015, January, "Chile", "Acre", "Norte", "Aérea"),
            rec(2015, December, "Chile", "Acre", "Norte", "Aérea"),
        ];
        let rows = month_distribution(&data);
        let months: Vec<Month> = rows.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![January, March, April, December]);
        assert_eq!(rows.iter().map(|r| r.month_order).collect::<Vec<_>>(), vec![1, 3, 4, 12]);
        assert_eq!(rows[3].total, 2);
    }

    #[test]
    fn month_year_trend_orders_by_year_then_month() {
        let data = sample();
        let rows = month_year_trend(&data);
        let keys: Vec<(i32, u32)> = rows.iter().map(|r| (r.year, r.month_order)).collect();
        assert_eq!(
            keys,
            vec![(2014, 1), (2014, 12), (2015, 1), (2015, 3), (2016, 1), (2016, 3), (2016, 12)]
        );
        assert_eq!(rows[0].total, 2);
        assert_eq!(rows.iter().map(|r| r.total).sum::<usize>(), data.len());
    }

    #[test]
    fn summary_counts_distinct_values() {
        let stats = summarize(&sample());
        assert_eq!(stats.total_records, 8);
        assert_eq!(stats.first_year, Some(2014));
        assert_eq!(stats.last_year, Some(2016));
        assert_eq!(stats.total_countries, 4);
        assert_eq!(stats.total_states, 5);
        assert_eq!(stats.total_regions, 4);
        assert_eq!(stats.total_arrival_channels, 4);
    }
}
