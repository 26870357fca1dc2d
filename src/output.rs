use crate::error::OutputError;
use crate::pages::{PageReport, StatePage};
use crate::types::SummaryStats;
use crate::util::{format_int, format_number};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

pub fn preview_table<T>(title: &str, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("\n{}\n", title);
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}", table_str);
    if rows.len() > max_rows {
        println!("({} more rows)", format_int(rows.len() - max_rows));
    }
    println!();
}

fn print_summary(summary: &SummaryStats) {
    let years = match (summary.first_year, summary.last_year) {
        (Some(first), Some(last)) => format!("{first}–{last}"),
        _ => "-".to_string(),
    };
    println!(
        "{} registros | anos {} | {} países | {} UFs | {} regiões | {} vias",
        format_int(summary.total_records),
        years,
        summary.total_countries,
        summary.total_states,
        summary.total_regions,
        summary.total_arrival_channels
    );
}

/// Print every section of a page as Markdown tables.
pub fn print_page(report: &PageReport, max_rows: usize) {
    match report {
        PageReport::Overview(page) => {
            println!("\n# Análise Geral do Turismo no Brasil\n");
            print_summary(&page.summary);
            preview_table("Total de Turistas por Ano", &page.yearly, max_rows);
            preview_table("Top Países de Origem dos Turistas", &page.top_countries, max_rows);
            preview_table("Distribuição por Via de Chegada", &page.arrival_channels, max_rows);
        }
        PageReport::Regions(page) => {
            println!("\n# Análise por Regiões do Brasil");
            preview_table("Distribuição de Turistas por Região", &page.regions, max_rows);
        }
        PageReport::State(StatePage { state, yearly, top_states }) => {
            println!("\n# Análise por Estado");
            preview_table(&format!("Evolução do Turismo em {state}"), yearly, max_rows);
            preview_table("Estados com Maior Fluxo de Turistas", top_states, max_rows);
        }
        PageReport::Temporal(page) => {
            println!("\n# Análise Temporal");
            preview_table("Total de Turistas por Ano", &page.yearly, max_rows);
            preview_table("Total de Turistas por Mês (Todos os Anos)", &page.months, max_rows);
            preview_table("Tendência Mensal ao Longo dos Anos", &page.month_year, max_rows);
        }
        PageReport::Forecast(page) => {
            println!("\n# Previsões de Turismo\n");
            println!(
                "Tendência linear: {} turistas/ano (alvo {})",
                format_number(page.trend.slope, 2),
                page.target_year
            );
            preview_table("Dados Históricos", &page.history, max_rows);
            // The projection is what the user asked for; show it in full.
            preview_table("Previsão de Turistas", &page.projection, page.projection.len());
        }
    }
}

fn export_csv<T: Serialize>(
    dir: &Path,
    name: &str,
    rows: &[T],
    written: &mut Vec<PathBuf>,
) -> Result<(), OutputError> {
    let path = dir.join(name);
    write_csv(&path, rows)?;
    written.push(path);
    Ok(())
}

/// Write each section of a page to `dir` as CSV (plus the overview summary
/// as JSON). Returns the files written.
pub fn export_page(report: &PageReport, dir: &Path) -> Result<Vec<PathBuf>, OutputError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    match report {
        PageReport::Overview(page) => {
            export_csv(dir, "geral_total_por_ano.csv", &page.yearly, &mut written)?;
            export_csv(dir, "geral_top_paises.csv", &page.top_countries, &mut written)?;
            export_csv(dir, "geral_via_chegada.csv", &page.arrival_channels, &mut written)?;
            let path = dir.join("geral_resumo.json");
            write_json(&path, &page.summary)?;
            written.push(path);
        }
        PageReport::Regions(page) => {
            export_csv(dir, "regioes_ranking.csv", &page.regions, &mut written)?;
        }
        PageReport::State(page) => {
            let slug: String = page
                .state
                .chars()
                .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
                .collect();
            export_csv(dir, &format!("estado_{slug}_por_ano.csv"), &page.yearly, &mut written)?;
            export_csv(dir, "estado_top_estados.csv", &page.top_states, &mut written)?;
        }
        PageReport::Temporal(page) => {
            export_csv(dir, "temporal_total_por_ano.csv", &page.yearly, &mut written)?;
            export_csv(dir, "temporal_por_mes.csv", &page.months, &mut written)?;
            export_csv(dir, "temporal_mes_ano.csv", &page.month_year, &mut written)?;
        }
        PageReport::Forecast(page) => {
            let name = format!("previsao_ate_{}.csv", page.target_year);
            export_csv(dir, &name, &page.projection, &mut written)?;
        }
    }
    log::info!("Exported {} file(s) to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::loader::Dataset;
    use crate::pages::{render, PageRequest};
    use crate::reports::tests::sample;

    #[test]
    fn exports_overview_sections() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::new(sample());
        let report = render(&ds, &PageRequest::Overview, &Config::default()).unwrap();
        let files = export_page(&report, dir.path()).unwrap();
        assert_eq!(files.len(), 4);
        assert!(files.iter().all(|f| f.exists()));

        let yearly = std::fs::read_to_string(dir.path().join("geral_total_por_ano.csv")).unwrap();
        assert_eq!(yearly.lines().next(), Some("Ano,TotalTuristas"));
        assert!(yearly.contains("2014,3"));

        let summary = std::fs::read_to_string(dir.path().join("geral_resumo.json")).unwrap();
        assert!(summary.contains("\"total_records\": 8"));
    }

    #[test]
    fn exports_forecast_with_empty_future_actuals() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::new(sample());
        let request = PageRequest::Forecast { target_year: 2018 };
        let report = render(&ds, &request, &Config::default()).unwrap();
        let files = export_page(&report, dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("previsao_ate_2018.csv")]);

        let text = std::fs::read_to_string(&files[0]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Ano,Historico,Previsao");
        assert_eq!(lines.len(), 1 + 5);
        assert!(lines[5].starts_with("2018,,"));
    }

    #[test]
    fn month_columns_use_labels() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::new(sample());
        let report = render(&ds, &PageRequest::Temporal, &Config::default()).unwrap();
        export_page(&report, dir.path()).unwrap();
        let text = std::fs::read_to_string(dir.path().join("temporal_por_mes.csv")).unwrap();
        assert_eq!(text.lines().nth(1), Some("Janeiro,1,4"));
    }
}
