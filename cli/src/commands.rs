//! Command handlers.
//!
//! Each handler resolves its inputs against the configuration, drives
//! the shared library, and turns library errors into user-facing
//! messages. Exit codes are decided in `main`, never in the library.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use vintry_shared::cellar::Cellar;
use vintry_shared::config::{AppConfig, ConfigManager};
use vintry_shared::core::{Codec, TextStore};
use vintry_shared::models::{Record, Wine, WineColor};
use vintry_shared::utils::{export_wines, validate_new_wine, ExportFormat, WineFilter};

use crate::seed;
use crate::{Args, Command, ExportArg};

/// Options resolved from the config file and the command line
struct Settings {
    path: PathBuf,
    separator: char,
    list_template: Option<String>,
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let config = match ConfigManager::default_config_path() {
        Some(config_path) => {
            let mut manager = ConfigManager::new(config_path);
            manager
                .load()
                .context("failed to load the configuration file")?;
            manager.config().clone()
        }
        None => AppConfig::default(),
    };

    let path = args
        .file
        .clone()
        .or_else(|| config.cellar_path.clone())
        .unwrap_or_else(|| PathBuf::from("cellar.txt"));
    let separator = args.separator.unwrap_or(config.separator);

    debug!(path = %path.display(), separator = %separator, "resolved settings");
    Ok(Settings {
        path,
        separator,
        list_template: config.list_template,
    })
}

pub fn run(args: Args) -> Result<()> {
    let settings = resolve_settings(&args)?;

    match args.command {
        Command::Init { force, seed } => init(&settings, force, seed),
        Command::Add {
            color,
            appellation,
            vintage,
            name,
            price,
        } => add(&settings, &color, &appellation, &vintage, &name, &price),
        Command::List {
            template,
            rated,
            unrated,
            pattern,
        } => list(&settings, template.as_deref(), rated, unrated, pattern.as_deref()),
        Command::Rate {
            id,
            rating,
            comment,
        } => rate(&settings, id, rating, &comment),
        Command::Remove { id } => remove(&settings, id),
        Command::Sort {
            keys,
            reverse,
            template,
        } => sort(&settings, &keys, reverse, template.as_deref()),
        Command::Export { format, output } => export(&settings, format, output.as_deref()),
    }
}

fn open_cellar(settings: &Settings) -> Result<Cellar> {
    Cellar::open(&settings.path, settings.separator)
        .with_context(|| format!("failed to open cellar '{}'", settings.path.display()))
}

fn init(settings: &Settings, force: bool, seed: bool) -> Result<()> {
    let store = TextStore::<Wine>::delimited(settings.separator)?;
    store.init(&settings.path, force)?;

    if seed {
        let wines = seed::demonstration_cellar();
        let codec = Codec::delimited(settings.separator)?;

        let mut contents = String::new();
        for wine in &wines {
            contents.push_str(&codec.encode(wine)?);
            contents.push('\n');
        }
        fs::write(&settings.path, contents)?;

        println!(
            "initialized '{}' with {} demonstration wines",
            settings.path.display(),
            wines.len()
        );
    } else {
        println!("initialized empty cellar '{}'", settings.path.display());
    }
    Ok(())
}

fn add(
    settings: &Settings,
    color: &str,
    appellation: &str,
    vintage: &str,
    name: &str,
    price: &str,
) -> Result<()> {
    let validation = validate_new_wine(color, appellation, vintage, name, price);
    if !validation.is_valid {
        bail!("invalid wine: {}", validation.errors.join("; "));
    }

    let color: WineColor = color.parse()?;
    let vintage: u16 = vintage.parse().context("vintage is not a number")?;
    let price: f64 = price.parse().context("price is not a number")?;

    let mut cellar = open_cellar(settings)?;
    let id = cellar.add(color, appellation, vintage, name, price);
    cellar.close()?;

    println!("added wine {id}");
    Ok(())
}

fn list(
    settings: &Settings,
    template: Option<&str>,
    rated: bool,
    unrated: bool,
    pattern: Option<&str>,
) -> Result<()> {
    let cellar = open_cellar(settings)?;

    let mut filter = WineFilter::new();
    if rated {
        filter = filter.rated_only();
    }
    if unrated {
        filter = filter.unrated_only();
    }
    if let Some(pattern) = pattern {
        filter = filter.pattern(pattern)?;
    }

    let template = template.or(settings.list_template.as_deref());
    for wine in cellar.select(&filter)? {
        println!("{}", wine.render(template)?);
    }
    Ok(())
}

fn rate(settings: &Settings, id: u32, rating: u8, comment: &str) -> Result<()> {
    let mut cellar = open_cellar(settings)?;
    cellar.rate(id, rating, comment)?;
    cellar.close()?;

    println!("rated wine {id}: {rating}");
    Ok(())
}

fn remove(settings: &Settings, id: u32) -> Result<()> {
    let mut cellar = open_cellar(settings)?;
    let removed = cellar.remove(id)?;
    cellar.close()?;

    println!("removed wine {id} ({})", removed.name());
    Ok(())
}

fn sort(settings: &Settings, keys: &[String], reverse: bool, template: Option<&str>) -> Result<()> {
    let cellar = open_cellar(settings)?;

    let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
    let template = template.or(settings.list_template.as_deref());
    for wine in cellar.sorted(&keys, reverse)? {
        println!("{}", wine.render(template)?);
    }
    Ok(())
}

fn export(settings: &Settings, format: ExportArg, output: Option<&Path>) -> Result<()> {
    let cellar = open_cellar(settings)?;

    let format = match format {
        ExportArg::Json => ExportFormat::Json,
        ExportArg::Csv => ExportFormat::Csv,
    };
    let bytes = export_wines(cellar.wines(), format)?;

    match output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            println!("exported {} wines to '{}'", cellar.len(), path.display());
        }
        None => std::io::stdout().write_all(&bytes)?,
    }
    Ok(())
}
