// SPDX-License-Identifier: MIT
//
// Command implementations.
//
// A Session is built once per invocation:
//
//   config → stylesheet (file or builtin) → active theme → TokenStore
//
// and each command reads or mutates it. Commands write their primary
// output to the given writer so they can be tested without a terminal.
// Anything that changes tokens is written back to the stylesheet file when
// one was given, otherwise the resulting CSS is printed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sm_tokens::builtin;
use sm_tokens::theme::{FilePreferences, MemoryPreferences, PreferenceError, PreferenceStore};
use sm_tokens::{
    Categories, Category, ExportFormat, Palette, StyleSheet, ThemeManager, ThemeMode, TokenStore,
    contrast,
};
use tracing::{debug, info};

use crate::config::Config;

// ─── Preferences ────────────────────────────────────────────────────────────

/// The preference store in use: a file when a config dir exists.
#[derive(Debug)]
pub enum Preferences {
    File(FilePreferences),
    Memory(MemoryPreferences),
}

impl Preferences {
    pub fn from_config(config: &Config) -> Self {
        config
            .preferences_path
            .clone()
            .or_else(FilePreferences::default_path)
            .map_or_else(|| Self::Memory(MemoryPreferences::new()), |p| Self::File(FilePreferences::new(p)))
    }
}

impl PreferenceStore for Preferences {
    fn load(&self) -> Option<ThemeMode> {
        match self {
            Self::File(p) => p.load(),
            Self::Memory(p) => p.load(),
        }
    }

    fn save(&mut self, mode: ThemeMode) -> Result<(), PreferenceError> {
        match self {
            Self::File(p) => p.save(mode),
            Self::Memory(p) => p.save(mode),
        }
    }
}

// ─── Session ────────────────────────────────────────────────────────────────

/// What the user asked for on the command line besides the subcommand.
#[derive(Debug, Default)]
pub struct Options {
    pub stylesheet: Option<PathBuf>,
    pub theme: Option<ThemeMode>,
}

pub struct Session {
    pub config: Config,
    pub sheet: StyleSheet,
    pub sheet_path: Option<PathBuf>,
    pub store: TokenStore,
    pub themes: ThemeManager<Preferences>,
}

impl Session {
    pub fn open(config: Config, options: Options) -> Result<Self> {
        let sheet_path = options.stylesheet.or_else(|| config.stylesheet.clone());
        let mut sheet = match &sheet_path {
            Some(path) => StyleSheet::from_path(path)?,
            None => builtin::default_stylesheet().context("builtin stylesheet is malformed")?,
        };

        let (themes, resolved) = ThemeManager::init(Preferences::from_config(&config), config.prefers_dark);
        // --theme is a one-off view; it is not saved.
        let theme = options.theme.unwrap_or(resolved.theme);
        sheet.set_theme(theme);

        let store = TokenStore::from_environment(&sheet);
        debug!(%theme, tokens = store.tokens().len(), "session ready");
        Ok(Self { config, sheet, sheet_path, store, themes })
    }

    fn format_or_default(&self, format: Option<ExportFormat>) -> Result<ExportFormat> {
        format.map_or_else(|| self.config.export_format(), Ok)
    }

    /// Persist the sheet if it came from a file, otherwise print it.
    fn save_sheet(&self, out: &mut dyn Write) -> Result<()> {
        match &self.sheet_path {
            Some(path) => {
                self.sheet.write_to(path)?;
                info!(path = %path.display(), "stylesheet updated");
                Ok(())
            }
            None => {
                write!(out, "{}", self.sheet.to_css())?;
                Ok(())
            }
        }
    }

    // ─── Commands ────────────────────────────────────────────────────────

    pub fn palette(
        &mut self,
        base: &str,
        family: Option<&str>,
        format: Option<ExportFormat>,
        apply: bool,
        out: &mut dyn Write,
    ) -> Result<()> {
        let palette = Palette::derive(base)?;
        let family = family.unwrap_or(&self.config.default_family).to_string();

        match format {
            Some(format) => {
                let text = sm_tokens::export(&palette.to_token_set(&family), format);
                writeln!(out, "{text}")?;
            }
            None => write_palette_table(&palette, &family, out)?,
        }

        if apply {
            self.store.replace_palette(&family, &palette, &mut self.sheet);
            self.save_sheet(out)?;
        }
        Ok(())
    }

    pub fn export(
        &self,
        format: Option<ExportFormat>,
        only: &[Category],
        output: Option<&Path>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let format = self.format_or_default(format)?;
        let categories = if only.is_empty() {
            Categories::all()
        } else {
            only.iter().copied().collect()
        };
        let mut text = self.store.export(format, categories);
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }

        match output {
            Some(path) => {
                fs::write(path, &text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), %format, "exported tokens");
            }
            None => out.write_all(text.as_bytes())?,
        }
        Ok(())
    }

    pub fn import(&mut self, file: &Path, out: &mut dyn Write) -> Result<()> {
        let text = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        self.store
            .import_json(&text, &mut self.sheet)
            .with_context(|| format!("failed to import {}", file.display()))?;
        self.save_sheet(out)
    }

    pub fn set(&mut self, name: &str, value: &str, out: &mut dyn Write) -> Result<()> {
        self.store.set_token(name, value, &mut self.sheet)?;
        self.save_sheet(out)
    }

    pub fn theme(&mut self, action: ThemeAction, out: &mut dyn Write) -> Result<()> {
        let changed = match action {
            ThemeAction::Show => {
                let source = if self.themes.has_saved_choice() { "saved" } else { "system" };
                writeln!(out, "{} ({source})", self.themes.current())?;
                return Ok(());
            }
            ThemeAction::Toggle => self.themes.toggle()?,
            ThemeAction::Light => self.themes.set(ThemeMode::Light)?,
            ThemeAction::Dark => self.themes.set(ThemeMode::Dark)?,
        };
        // Follow the change the way the page does: switch block, reload.
        self.sheet.set_theme(changed.theme);
        self.store.load(&self.sheet);
        writeln!(out, "{}", changed.theme)?;
        Ok(())
    }
}

/// `contrast` needs no session.
pub fn check_contrast(fg: &str, bg: &str, out: &mut dyn Write) -> Result<()> {
    let report = contrast::check(fg, bg)?;
    writeln!(out, "{report} ({})", report.rating.severity())?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeAction {
    Show,
    Toggle,
    Light,
    Dark,
}

fn write_palette_table(palette: &Palette, family: &str, out: &mut dyn Write) -> Result<()> {
    for entry in palette.entries() {
        writeln!(
            out,
            "{:<26} {:<12} {}",
            Palette::token_name(family, entry.step),
            entry.value,
            entry.foreground.css_value()
        )?;
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const SHEET: &str = ":root {\n  --color-white: #ffffff;\n  --space-4: 1rem;\n}\n\n\
                         [data-theme=\"dark\"] {\n  --color-white: #0f172a;\n}\n";

    struct Fixture {
        dir: TempDir,
        session: Session,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("tokens.css");
        fs::write(&sheet, SHEET).unwrap();
        let config = Config {
            preferences_path: Some(dir.path().join("prefs.toml")),
            ..Config::default()
        };
        let session = Session::open(config, Options { stylesheet: Some(sheet), theme: None }).unwrap();
        Fixture { dir, session }
    }

    fn run(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn export_defaults_to_css() {
        let fx = fixture();
        let text = run(|out| fx.session.export(None, &[], None, out));
        assert_eq!(text, ":root {\n  --color-white: #ffffff;\n  --space-4: 1rem;\n}\n");
    }

    #[test]
    fn export_only_and_output_file() {
        let fx = fixture();
        let path = fx.dir.path().join("out.scss");
        let text = run(|out| {
            fx.session
                .export(Some(ExportFormat::Scss), &[Category::Spacing], Some(&path), out)
        });
        assert_eq!(text, "");
        assert_eq!(fs::read_to_string(&path).unwrap(), "$space-4: 1rem;\n");
    }

    #[test]
    fn palette_table_and_apply_writes_sheet() {
        let mut fx = fixture();
        let text = run(|out| fx.session.palette("#3b82f6", None, None, true, out));
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("--color-primary-50 "), "{first}");
        assert!(first.ends_with("var(--color-gray-800)"), "{first}");
        assert_eq!(text.lines().count(), 10);

        let saved = fs::read_to_string(fx.dir.path().join("tokens.css")).unwrap();
        assert!(saved.contains("--color-primary-500: #3b82f6;"));
    }

    #[test]
    fn palette_invalid_color() {
        let mut fx = fixture();
        let err = fx.session.palette("nope", None, None, false, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "invalid color format: \"nope\"");
    }

    #[test]
    fn import_merges_and_saves() {
        let mut fx = fixture();
        let file = fx.dir.path().join("tokens.json");
        fs::write(&file, r#"{"radii": {"--radius-md": "4px"}}"#).unwrap();
        run(|out| fx.session.import(&file, out));
        let saved = fs::read_to_string(fx.dir.path().join("tokens.css")).unwrap();
        assert!(saved.contains("--radius-md: 4px;"));
        assert!(saved.contains("--space-4: 1rem;"));
    }

    #[test]
    fn set_rejects_unknown_prefix() {
        let mut fx = fixture();
        assert!(fx.session.set("--z-index", "10", &mut Vec::new()).is_err());
        run(|out| fx.session.set("--space-4", "2rem", out));
        assert_eq!(fx.session.store.tokens().get("--space-4"), Some("2rem"));
    }

    #[test]
    fn theme_toggle_persists_and_reloads() {
        let mut fx = fixture();
        // Opening the session already saved the resolved theme.
        assert_eq!(
            fs::read_to_string(fx.dir.path().join("prefs.toml")).unwrap().trim(),
            "theme = \"light\""
        );
        assert_eq!(run(|out| fx.session.theme(ThemeAction::Show, out)), "light (saved)\n");
        assert_eq!(run(|out| fx.session.theme(ThemeAction::Toggle, out)), "dark\n");
        assert_eq!(fx.session.store.tokens().get("--color-white"), Some("#0f172a"));
        assert_eq!(
            fs::read_to_string(fx.dir.path().join("prefs.toml")).unwrap().trim(),
            "theme = \"dark\""
        );
        assert_eq!(run(|out| fx.session.theme(ThemeAction::Show, out)), "dark (saved)\n");
    }

    #[test]
    fn contrast_report() {
        assert_eq!(run(|out| check_contrast("#000", "#fff", out)), "21.00:1 AAA (success)\n");
    }

    #[test]
    fn builtin_sheet_without_path_prints_css() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            preferences_path: Some(dir.path().join("prefs.toml")),
            ..Config::default()
        };
        let mut session = Session::open(config, Options::default()).unwrap();
        let text = run(|out| session.set("--radius-md", "1rem", out));
        assert!(text.starts_with(":root {\n"));
        assert!(text.contains("--radius-md: 1rem;"));
    }
}
