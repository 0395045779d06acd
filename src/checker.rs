//! Checker values and the startup registry.

use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::config::Config;
use crate::content::Content;
use crate::error::Error;
use crate::git::GitRepo;
use crate::hook::HookKind;

/// Implementation invoked once per applicable content item.
pub type CheckFn = Box<dyn Fn(&GitRepo, HookKind, &Content) -> anyhow::Result<()> + Send + Sync>;

/// Implementation invoked once per hook firing with every content
/// item of that firing.
pub type CheckAllFn =
    Box<dyn Fn(&GitRepo, HookKind, &[Content]) -> anyhow::Result<()> + Send + Sync>;

/// How a checker consumes content.
pub enum CheckerAction {
    Each(CheckFn),
    Once(CheckAllFn),
}

/// Activation predicate over file paths. Only consulted for content
/// that carries a file path; ref-level content always passes.
pub enum FileFilter {
    Any,
    /// Extension without the leading dot.
    Extension(String),
    Names(Vec<String>),
    Pattern(Regex),
    Custom(Box<dyn Fn(&Path) -> bool + Send + Sync>),
}

impl FileFilter {
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            FileFilter::Any => true,
            FileFilter::Extension(ext) => path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == ext)
                .unwrap_or(false),
            FileFilter::Names(names) => path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| names.iter().any(|candidate| candidate == n))
                .unwrap_or(false),
            FileFilter::Pattern(re) => path.to_str().map(|p| re.is_match(p)).unwrap_or(false),
            FileFilter::Custom(predicate) => predicate(path),
        }
    }
}

impl fmt::Display for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFilter::Any => write!(f, "any file"),
            FileFilter::Extension(ext) => write!(f, "*.{}", ext),
            FileFilter::Names(names) => write!(f, "{}", names.join(", ")),
            FileFilter::Pattern(re) => write!(f, "/{}/", re.as_str()),
            FileFilter::Custom(_) => write!(f, "custom"),
        }
    }
}

/// A named validation unit with activation metadata. Immutable once
/// registered.
pub struct Checker {
    name: String,
    active_hooks: Vec<HookKind>,
    file_filter: FileFilter,
    action: CheckerAction,
}

impl Checker {
    /// Checker invoked once per content item. By default it is active
    /// for every hook and every file.
    pub fn each(
        name: impl Into<String>,
        f: impl Fn(&GitRepo, HookKind, &Content) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            active_hooks: Vec::new(),
            file_filter: FileFilter::Any,
            action: CheckerAction::Each(Box::new(f)),
        }
    }

    /// Checker invoked exactly once per hook firing, receiving the
    /// full content collection (possibly empty).
    pub fn once(
        name: impl Into<String>,
        f: impl Fn(&GitRepo, HookKind, &[Content]) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            active_hooks: Vec::new(),
            file_filter: FileFilter::Any,
            action: CheckerAction::Once(Box::new(f)),
        }
    }

    /// Restrict the checker to specific hooks. No restriction means
    /// every hook.
    pub fn active_hooks(mut self, hooks: impl IntoIterator<Item = HookKind>) -> Self {
        self.active_hooks.extend(hooks);
        self
    }

    /// Restrict to paths with the given extension; a leading dot is
    /// accepted and ignored.
    pub fn file_extension(mut self, ext: &str) -> Self {
        self.file_filter = FileFilter::Extension(ext.trim_start_matches('.').to_string());
        self
    }

    /// Restrict to exact file names (the final path component).
    pub fn file_names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.file_filter = FileFilter::Names(names.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict to paths matching a regular expression.
    pub fn file_pattern(mut self, pattern: Regex) -> Self {
        self.file_filter = FileFilter::Pattern(pattern);
        self
    }

    /// Restrict with an arbitrary path predicate.
    pub fn file_filter(mut self, predicate: impl Fn(&Path) -> bool + Send + Sync + 'static) -> Self {
        self.file_filter = FileFilter::Custom(Box::new(predicate));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hooks(&self) -> &[HookKind] {
        &self.active_hooks
    }

    pub fn filter(&self) -> &FileFilter {
        &self.file_filter
    }

    pub fn action(&self) -> &CheckerAction {
        &self.action
    }

    pub fn runs_once(&self) -> bool {
        matches!(self.action, CheckerAction::Once(_))
    }

    pub fn is_active_for_hook(&self, hook: HookKind) -> bool {
        self.active_hooks.is_empty() || self.active_hooks.contains(&hook)
    }

    pub fn is_active_for_path(&self, path: &Path) -> bool {
        self.file_filter.matches(path)
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("name", &self.name)
            .field("active_hooks", &self.active_hooks)
            .field("runs_once", &self.runs_once())
            .finish()
    }
}

/// Explicit checker registration list, assembled at process startup.
#[derive(Default, Debug)]
pub struct Registry {
    checkers: Vec<Checker>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every checker shipped with grapnel.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(crate::checkers::json::checker());
        registry.register(crate::checkers::merge_conflict::checker());
        registry
    }

    /// The builtin registry restricted to the names enabled in config.
    /// An unknown name is a startup error.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut registry = Self::builtin();
        if let Some(enabled) = &config.checkers {
            for name in enabled {
                if !registry.checkers.iter().any(|c| c.name() == name) {
                    return Err(Error::UnknownChecker(name.clone()));
                }
            }
            registry
                .checkers
                .retain(|checker| enabled.iter().any(|name| name == checker.name()));
        }
        Ok(registry)
    }

    pub fn register(&mut self, checker: Checker) {
        self.checkers.push(checker);
    }

    /// Checkers active for the given hook, in registration order.
    pub fn active_for(&self, hook: HookKind) -> impl Iterator<Item = &Checker> {
        self.checkers
            .iter()
            .filter(move |checker| checker.is_active_for_hook(hook))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checker> {
        self.checkers.iter()
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}
