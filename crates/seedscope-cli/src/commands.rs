use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::num::NonZeroUsize;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use seedscope_cli::config::{Config, ConfigOrigin, LoadedConfig};
use seedscope_cli::interactive;
use seedscope_cli::render::{Renderer, dataset_status};
use seedscope_core::{
    DatasetStats, Debouncer, DetailView, Session, SessionOptions, SortDirection, SortState,
    Vocabulary, export_csv,
};
use seedscope_model::canonical_state_name;

use crate::cli::{BrowseArgs, ExportArgs, ShowArgs, SortArgs, SourceArgs, StatsArgs, VocabArgs};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// JSON form of `stats`: the counts plus when the catalog was read.
#[derive(Serialize)]
struct StatsJson {
    loaded_at: String,
    #[serde(flatten)]
    stats: DatasetStats,
}

pub fn run_browse(config: &Config, renderer: Renderer, args: &BrowseArgs) -> Result<()> {
    let page_size = match args.page_size {
        Some(size) => NonZeroUsize::new(usize::try_from(size)?)
            .context("page size must be at least 1")?,
        None => config.page_size(),
    };
    let mut session = open_session(
        config,
        &args.source,
        page_size,
        sort_state(config, &args.sort),
    )?;
    let explorer = session.explorer_mut()?;
    explorer.set_criteria(args.filters.criteria());
    explorer.go_to_page(args.page);

    if args.interactive {
        let mut debouncer = Debouncer::new(config.debounce());
        let stdin = io::stdin();
        let mut stdout = io::stdout().lock();
        interactive::run(
            explorer,
            renderer,
            &mut debouncer,
            stdin.lock(),
            &mut stdout,
            Instant::now,
        )
        .context("interactive session failed")?;
        return Ok(());
    }

    let page = explorer.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        println!("{}", renderer.page(&page));
    }
    Ok(())
}

pub fn run_show(config: &Config, renderer: Renderer, args: &ShowArgs) -> Result<()> {
    let session = open_session(config, &args.source, config.page_size(), config.sort_state())?;
    let view = DetailView::find(session.explorer()?.dataset(), &args.id)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", renderer.detail(&view));
    }
    Ok(())
}

pub fn run_export(config: &Config, args: &ExportArgs) -> Result<()> {
    let mut session = open_session(
        config,
        &args.source,
        config.page_size(),
        sort_state(config, &args.sort),
    )?;
    let explorer = session.explorer_mut()?;
    explorer.set_criteria(args.filters.criteria());

    let rows = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let rows = export_csv(explorer.filtered(), BufWriter::new(file))?;
            println!("Exported {rows} varieties to {}", path.display());
            rows
        }
        None => {
            let mut stdout = io::stdout().lock();
            let rows = export_csv(explorer.filtered(), &mut stdout)?;
            stdout.flush()?;
            rows
        }
    };
    info!(rows, "export finished");
    Ok(())
}

pub fn run_vocab(config: &Config, renderer: Renderer, args: &VocabArgs) -> Result<()> {
    let session = open_session(config, &args.source, config.page_size(), config.sort_state())?;
    let states: BTreeSet<String> = args
        .within_states
        .iter()
        .filter_map(|state| canonical_state_name(state))
        .collect();
    let vocab = Vocabulary::within_states(session.explorer()?.dataset().records(), &states);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&vocab)?);
    } else {
        println!("{}", renderer.vocab_table(&vocab));
    }
    Ok(())
}

pub fn run_stats(config: &Config, renderer: Renderer, args: &StatsArgs) -> Result<()> {
    let mut session = open_session(config, &args.source, config.page_size(), config.sort_state())?;
    let explorer = session.explorer_mut()?;
    explorer.set_criteria(args.filters.criteria());
    let stats = DatasetStats::from_records(explorer.filtered());
    if args.json {
        let json = StatsJson {
            loaded_at: explorer.dataset().loaded_at().to_rfc3339(),
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", dataset_status(explorer.dataset()));
        println!("{}", renderer.stats_table(&stats));
    }
    Ok(())
}

pub fn run_config(loaded: &LoadedConfig) -> Result<()> {
    let source = match &loaded.origin {
        ConfigOrigin::Explicit(path) | ConfigOrigin::DefaultFile(path) => {
            format!("# from {}", path.display())
        }
        ConfigOrigin::Defaults(Some(path)) => {
            format!("# built-in defaults (no usable file at {})", path.display())
        }
        ConfigOrigin::Defaults(None) => "# built-in defaults".to_string(),
    };
    println!("{source}");
    print!("{}", loaded.config.to_toml().context("failed to render configuration")?);
    Ok(())
}

/// Load a source into a ready session, with CLI flags over config values.
fn open_session(
    config: &Config,
    source: &SourceArgs,
    page_size: NonZeroUsize,
    sort: SortState,
) -> Result<Session> {
    let mut load = config.load_options();
    if let Some(format) = source.format {
        load.format = format;
    }
    if let Some(mb) = source.max_file_size_mb {
        load.max_file_size = mb.saturating_mul(BYTES_PER_MB);
    }
    let mut session = Session::new(SessionOptions {
        load,
        page_size,
        sort,
    });
    session
        .load(&source.source)
        .with_context(|| format!("failed to load {}", source.source.display()))?;
    if let Some(report) = session.report()
        && report.skipped > 0
    {
        tracing::warn!(skipped = report.skipped, "some entries were not records");
    }
    Ok(session)
}

/// `--sort` picks the key; `--desc` alone reverses the configured sort.
fn sort_state(config: &Config, args: &SortArgs) -> SortState {
    let mut state = config.sort_state();
    if let Some(key) = args.sort {
        state = SortState::by(key, SortDirection::Ascending);
    }
    if args.descending {
        state.direction = SortDirection::Descending;
    }
    state
}
