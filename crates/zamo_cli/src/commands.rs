use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Subcommand;
use zamo_app::AppPreferences;
use zamo_i18n::{ArgValue, Args, Locale};
use zamo_theme::watcher::{SystemSchemeWatcher, WatcherConfig};
use zamo_theme::{palette_for, ColorScheme, ThemeMode, ThemeSnapshot};

use crate::config::ZamoConfig;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a catalog key
    Translate {
        /// Dotted key, e.g. auth.createPinDescription
        key: String,
        /// Placeholder value, repeatable
        #[arg(long = "arg", value_name = "NAME=VALUE", value_parser = parse_arg)]
        args: Vec<(String, String)>,
        /// Translate in this locale instead of the active one
        #[arg(long, value_name = "CODE")]
        locale: Option<String>,
    },
    /// Show or change the language
    Locale {
        #[command(subcommand)]
        action: LocaleCommand,
    },
    /// Show or change the theme mode
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },
    /// Print the resolved palette
    Palette {
        /// Print this scheme instead of the active one
        #[arg(long, value_parser = parse_scheme)]
        scheme: Option<ColorScheme>,
        /// Emit CSS custom properties
        #[arg(long)]
        css: bool,
    },
    /// Check the bundled catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },
    /// Show the effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
    /// Follow system appearance and preference changes until interrupted
    Watch,
}

#[derive(Subcommand, Debug)]
pub enum LocaleCommand {
    /// Print the active locale
    Get,
    /// Switch and persist the locale
    Set { code: String },
    /// List supported locales
    List,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
    /// Print the theme mode and resolved scheme
    Get,
    /// Set and persist the mode (light, dark, system)
    Set { mode: String },
    /// Switch to the opposite of the shown scheme
    Toggle,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the configuration in effect, defaults filled in, as TOML
    Show,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Report keys missing from any locale; fails if there are some
    Check,
}

fn parse_arg(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got {s:?}")),
    }
}

fn parse_scheme(s: &str) -> Result<ColorScheme, String> {
    match s.parse::<ThemeMode>() {
        Ok(ThemeMode::Light) => Ok(ColorScheme::Light),
        Ok(ThemeMode::Dark) => Ok(ColorScheme::Dark),
        _ => Err(format!("expected light or dark, got {s:?}")),
    }
}

/// Numbers stay numbers so templates format them the same way the app does.
fn arg_value(raw: &str) -> ArgValue {
    if let Ok(n) = raw.parse::<i64>() {
        return ArgValue::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return ArgValue::from(f);
    }
    ArgValue::from(raw)
}

pub async fn dispatch(command: Command, prefs: &AppPreferences, config: &ZamoConfig) -> Result<ExitCode> {
    match command {
        Command::Translate { key, args, locale } => {
            let args: Args = args
                .iter()
                .map(|(name, value)| (name.clone(), arg_value(value)))
                .collect();
            let language = prefs.language();
            let text = match locale {
                Some(code) => {
                    let locale: Locale = code.parse().context("Invalid --locale")?;
                    language
                        .catalogs()
                        .translate(locale, language.default_locale(), &key, &args)
                }
                None => language.translate_with(&key, &args),
            };
            println!("{text}");
        }

        Command::Locale { action } => locale(action, prefs).await?,
        Command::Theme { action } => theme(action, prefs).await?,

        Command::Palette { scheme, css } => {
            let palette = match scheme {
                Some(scheme) => palette_for(scheme),
                None => prefs.theme().palette(),
            };
            if css {
                print!("{}", palette.to_css_variables());
            } else {
                for (role, value) in palette.iter() {
                    println!("{role:<18} {value}");
                }
            }
        }

        Command::Catalog {
            action: CatalogCommand::Check,
        } => return Ok(check_catalogs(prefs)),

        Command::Config {
            action: ConfigCommand::Show,
        } => print!("{}", config.to_toml()?),

        Command::Watch => watch(prefs, config).await?,
    }

    Ok(ExitCode::SUCCESS)
}

async fn locale(action: LocaleCommand, prefs: &AppPreferences) -> Result<()> {
    let language = prefs.language();
    match action {
        LocaleCommand::Get => {
            let locale = language.locale();
            println!("{}\t{}", locale.code(), locale.native_name());
        }
        LocaleCommand::Set { code } => {
            let locale: Locale = code.parse().context("Unsupported locale")?;
            language.set_locale(locale).settled().await;
            println!("{}", language.translate("settings.language"));
        }
        LocaleCommand::List => {
            let active = language.locale();
            for locale in language.supported_locales() {
                let marker = if *locale == active { '*' } else { ' ' };
                println!("{marker} {:<8} {}", locale.code(), locale.native_name());
            }
        }
    }
    Ok(())
}

async fn theme(action: ThemeCommand, prefs: &AppPreferences) -> Result<()> {
    let theme = prefs.theme();
    match action {
        ThemeCommand::Get => {}
        ThemeCommand::Set { mode } => {
            let mode: ThemeMode = mode.parse()?;
            theme.set_theme_mode(mode).settled().await;
        }
        ThemeCommand::Toggle => theme.toggle().settled().await,
    }
    print_theme(theme.snapshot());
    Ok(())
}

fn print_theme(s: ThemeSnapshot) {
    println!("mode: {}  showing: {}  system: {}", s.mode, s.resolved, s.system);
}

fn check_catalogs(prefs: &AppPreferences) -> ExitCode {
    let language = prefs.language();
    let reference = language.default_locale();
    let missing = language.catalogs().missing_keys(reference);

    if missing.is_empty() {
        let keys = language
            .catalogs()
            .catalog(reference)
            .map_or(0, |c| c.len());
        println!(
            "{} locales complete ({} keys each)",
            language.supported_locales().len(),
            keys
        );
        return ExitCode::SUCCESS;
    }

    for (locale, keys) in &missing {
        println!("{}: {} missing", locale.code(), keys.len());
        for key in keys {
            println!("  {key}");
        }
    }
    ExitCode::FAILURE
}

async fn watch(prefs: &AppPreferences, config: &ZamoConfig) -> Result<()> {
    let _watcher = SystemSchemeWatcher::start(
        prefs.appearance().clone(),
        WatcherConfig {
            poll_interval: config.watch_interval(),
        },
    );
    if !config.theme.follow_system {
        tracing::info!("theme.follow_system is off; system changes will not affect the theme");
    }

    let mut theme_rx = prefs.theme().subscribe();
    let mut language_rx = prefs.language().subscribe();
    print_theme(*theme_rx.borrow_and_update());
    println!("locale: {}", language_rx.borrow_and_update().locale);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = theme_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                print_theme(*theme_rx.borrow_and_update());
            }
            changed = language_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = *language_rx.borrow_and_update();
                println!("locale: {} (revision {})", snapshot.locale, snapshot.revision);
            }
            _ = &mut ctrl_c => break,
        }
    }
    Ok(())
}
