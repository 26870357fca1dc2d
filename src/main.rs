// Entry point and high-level CLI flow.
//
// - With `--page`, one page is rendered (and optionally exported) and the
//   program exits.
// - Without it, a numbered menu offers the five pages until the user exits.
// The dataset is loaded on first use and reused for every later page.
mod config;
mod error;
mod forecast;
mod loader;
mod output;
mod pages;
mod reports;
mod types;
mod util;

use clap::Parser;
use config::{Cli, Config};
use error::{InputError, Result};
use loader::{Dataset, DatasetCache};
use pages::{PageKind, PageRequest};
use std::io::{self, Write};
use std::process::ExitCode;

/// Print `prompt` and read one trimmed line from stdin. `None` at end of input.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Resolve a state picker answer. `None` (end of input) cancels the pick;
/// an empty answer takes the first state.
fn resolve_state(
    answer: Option<String>,
    states: &[&str],
) -> std::result::Result<String, InputError> {
    let answer = answer.ok_or(InputError::Cancelled)?;
    if answer.is_empty() {
        return states
            .first()
            .map(|s| s.to_string())
            .ok_or(InputError::UnknownState(answer));
    }
    if let Ok(n) = answer.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|idx| states.get(idx))
            .map(|s| s.to_string())
            .ok_or(InputError::UnknownState(answer));
    }
    // Names are validated by the page itself.
    Ok(answer)
}

/// Resolve a target-year answer. `None` cancels; empty takes `default`.
fn resolve_target_year(
    answer: Option<String>,
    default: i32,
) -> std::result::Result<i32, InputError> {
    let answer = answer.ok_or(InputError::Cancelled)?;
    if answer.is_empty() {
        return Ok(default);
    }
    answer.parse::<i32>().map_err(|_| InputError::NotANumber(answer))
}

fn prompt_state(dataset: &Dataset) -> std::result::Result<String, InputError> {
    let states = dataset.states();
    println!("\nSelecione o Estado:");
    for (idx, state) in states.iter().enumerate() {
        println!("[{}] {}", idx + 1, state);
    }
    resolve_state(read_line("Estado: "), &states)
}

fn prompt_target_year(min: i32, max: i32, default: i32) -> std::result::Result<i32, InputError> {
    let answer = read_line(&format!("Ano para previsão ({min}–{max}) [{default}]: "));
    resolve_target_year(answer, default)
}

/// Turn a page choice into a full request, asking for parameters
/// interactively or taking them from the command line.
fn build_request(
    kind: PageKind,
    dataset: &Dataset,
    cli: &Cli,
    config: &Config,
    interactive: bool,
) -> Result<PageRequest> {
    let request = match kind {
        PageKind::Overview => PageRequest::Overview,
        PageKind::Regions => PageRequest::Regions,
        PageKind::Temporal => PageRequest::Temporal,
        PageKind::States => {
            let state = match (&cli.state, interactive) {
                (_, true) => prompt_state(dataset)?,
                (Some(state), false) => state.clone(),
                (None, false) => resolve_state(Some(String::new()), &dataset.states())?,
            };
            PageRequest::State { state }
        }
        PageKind::Forecast => {
            // Without history the projector reports the error itself.
            let last_year = dataset.year_bounds().map(|(_, last)| last).unwrap_or_default();
            let (min, max) = forecast::target_year_range(last_year, config.forecast_max_year)
                .ok_or(InputError::NoForecastYears { last_year })?;
            let default = forecast::default_target_year(last_year, config.forecast_max_year)
                .unwrap_or(min);
            let target_year = match (cli.target_year, interactive) {
                (_, true) => prompt_target_year(min, max, default)?,
                (Some(year), false) => year,
                (None, false) => default,
            };
            PageRequest::Forecast { target_year }
        }
    };
    Ok(request)
}

/// Load (or reuse) the dataset, render one page, print and export it.
fn show_page(
    cache: &DatasetCache,
    kind: PageKind,
    cli: &Cli,
    config: &Config,
    interactive: bool,
) -> Result<()> {
    if !cache.is_loaded() {
        println!("Processing dataset {}...", cache.path().display());
    }
    let dataset = cache.get()?;
    if dataset.is_empty() {
        log::warn!("Dataset {} has no rows", cache.path().display());
    } else {
        log::debug!("{} records available", dataset.len());
    }
    let request = build_request(kind, dataset, cli, config, interactive)?;
    let report = pages::render(dataset, &request, config)?;
    output::print_page(&report, config.preview_rows);
    if let Some(dir) = &config.export_dir {
        let files = output::export_page(&report, dir)?;
        println!("(Exportado para {} arquivo(s) em {})\n", files.len(), dir.display());
    }
    Ok(())
}

fn run_menu(cache: &DatasetCache, cli: &Cli, config: &Config) {
    loop {
        println!("Análises — selecione a página:");
        for (idx, kind) in PageKind::ALL.iter().enumerate() {
            println!("[{}] {}", idx + 1, kind.title());
        }
        println!("[0] Sair\n");
        let Some(choice) = read_line("Enter choice: ") else {
            break;
        };
        if choice == "0" {
            println!("Exiting the program.");
            break;
        }
        let result = PageKind::from_choice(&choice)
            .map_err(Into::into)
            .and_then(|kind| show_page(cache, kind, cli, config, true));
        if let Err(e) = result {
            log::error!("Page render failed: {e}");
            println!("Error: {e}\n");
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::from(&cli);
    let cache = DatasetCache::new(&config.data_path);
    log::debug!("Using dataset {}", cache.path().display());

    match cli.page {
        Some(kind) => match show_page(&cache, kind, &cli, &config, false) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("Page render failed: {e}");
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        None => {
            run_menu(&cache, &cli, &config);
            ExitCode::SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [&str; 2] = ["São Paulo", "Bahia"];

    #[test]
    fn state_pick_by_number_name_or_default() {
        assert_eq!(resolve_state(Some("2".into()), &STATES).unwrap(), "Bahia");
        assert_eq!(resolve_state(Some("Acre".into()), &STATES).unwrap(), "Acre");
        assert_eq!(resolve_state(Some(String::new()), &STATES).unwrap(), "São Paulo");
        assert!(matches!(
            resolve_state(Some("3".into()), &STATES),
            Err(InputError::UnknownState(_))
        ));
        assert!(matches!(
            resolve_state(Some(String::new()), &[]),
            Err(InputError::UnknownState(_))
        ));
    }

    #[test]
    fn end_of_input_cancels_the_pick() {
        assert!(matches!(resolve_state(None, &STATES), Err(InputError::Cancelled)));
        assert!(matches!(resolve_target_year(None, 2029), Err(InputError::Cancelled)));
    }

    #[test]
    fn target_year_answers() {
        assert_eq!(resolve_target_year(Some(String::new()), 2029).unwrap(), 2029);
        assert_eq!(resolve_target_year(Some("2027".into()), 2029).unwrap(), 2027);
        assert!(matches!(
            resolve_target_year(Some("soon".into()), 2029),
            Err(InputError::NotANumber(_))
        ));
    }
}
