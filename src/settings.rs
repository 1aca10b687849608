use crate::hunt::{HuntOptions, ResumeClamp};
use crate::puzzle::{default_clues, Clue, PuzzleError, PuzzleSet};
use crate::screen::{DEFAULT_CLUE, DEFAULT_FINISH, DEFAULT_HOME};
use crate::store::{check_key, DEFAULT_KEY};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

pub const FILENAME: &str = "treasure-hunt.toml";

/// A screen template: either an inline minijinja string or a path to a
/// template file (relative to the data directory).
///
/// In TOML this looks like one of:
///
/// ```toml
/// [templates.finish]
/// inline = "You found it!"
///
/// # — or —
///
/// [templates.finish]
/// file = "finish.j2"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ScreenTemplate {
    Inline(String),
    File(String),
}

impl ScreenTemplate {
    /// Resolve the template to its source text.
    pub fn source(&self, dir: &Path) -> Result<String> {
        match self {
            ScreenTemplate::Inline(s) => Ok(s.clone()),
            ScreenTemplate::File(filename) => {
                let path = dir.join(filename);
                fs::read_to_string(&path)
                    .with_context(|| format!("reading template {}", path.display()))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Templates {
    #[serde(default = "default_home")]
    pub home: ScreenTemplate,
    #[serde(default = "default_clue")]
    pub clue: ScreenTemplate,
    #[serde(default = "default_finish")]
    pub finish: ScreenTemplate,
}

fn default_home() -> ScreenTemplate {
    ScreenTemplate::Inline(DEFAULT_HOME.into())
}

fn default_clue() -> ScreenTemplate {
    ScreenTemplate::Inline(DEFAULT_CLUE.into())
}

fn default_finish() -> ScreenTemplate {
    ScreenTemplate::Inline(DEFAULT_FINISH.into())
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            home: default_home(),
            clue: default_clue(),
            finish: default_finish(),
        }
    }
}

/// Settings stored in `<data-dir>/treasure-hunt.toml`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Store key for the saved progress record.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// How far a saved clue index may resume: "last_clue" or "finished".
    #[serde(default)]
    pub resume_clamp: ResumeClamp,

    /// Duration of the invalid-attempt cue, in milliseconds.
    #[serde(default = "default_cue_millis")]
    pub cue_millis: u64,

    #[serde(default)]
    pub templates: Templates,

    /// The puzzle set, in order. Omit to use the built-in riddles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clues: Option<Vec<Clue>>,
}

fn default_storage_key() -> String {
    DEFAULT_KEY.into()
}

fn default_cue_millis() -> u64 {
    350
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            resume_clamp: ResumeClamp::default(),
            cue_millis: default_cue_millis(),
            templates: Templates::default(),
            clues: Some(default_clues()),
        }
    }
}

impl Settings {
    /// Load settings from `<dir>/treasure-hunt.toml`.
    ///
    /// If the file doesn't exist it is created with defaults, so the clue
    /// list is there to edit. Missing keys in an existing file are filled in
    /// with defaults via serde.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(FILENAME);
        match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("parsing {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let settings = Settings::default();
                let toml_str =
                    toml::to_string_pretty(&settings).context("serializing default settings")?;
                fs::write(&path, &toml_str)
                    .with_context(|| format!("writing default {}", path.display()))?;
                Ok(settings)
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Load settings from an explicit file. Unlike [`Settings::load`], a
    /// missing file is an error.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn puzzle_set(&self) -> Result<PuzzleSet, PuzzleError> {
        match &self.clues {
            Some(clues) => PuzzleSet::new(clues.clone()),
            None => Ok(PuzzleSet::default()),
        }
    }

    pub fn hunt_options(&self) -> Result<HuntOptions> {
        check_key(&self.storage_key).context("invalid storage_key setting")?;
        Ok(HuntOptions {
            key: self.storage_key.clone(),
            resume_clamp: self.resume_clamp,
            cue: Duration::from_millis(self.cue_millis),
        })
    }
}
