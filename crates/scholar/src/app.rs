//! Shared state for command execution.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use scholar_config::{Config, Settings};
use scholar_core::{Entry, Library, Reconcile, Registry, matches_key, search, split_query};

/// Loaded settings plus the options every command shares.
#[derive(Debug)]
pub struct App {
    pub settings: Settings,
    library_name: Option<String>,
    assume_yes: bool,
}

impl App {
    pub fn new(settings: Settings, library_name: Option<String>, assume_yes: bool) -> Self {
        Self {
            settings,
            library_name,
            assume_yes,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.settings.registry
    }

    pub fn config(&self) -> &Config {
        &self.settings.config
    }

    /// Whether to ask before destructive actions.
    pub fn interactive(&self) -> bool {
        self.config().general.interactive && !self.assume_yes
    }

    /// The library selected with `--library`, or the default one.
    pub fn library(&self) -> Result<Library> {
        self.library_named(None)
    }

    /// The library called `name`, falling back to [`App::library`].
    pub fn library_named(&self, name: Option<&str>) -> Result<Library> {
        let name = name.or(self.library_name.as_deref());
        let path = self.config().library_path(name)?;
        Ok(Library::new(path))
    }

    /// Every entry of the library, with directory names repaired.
    pub async fn entries(&self, library: &Library) -> Result<Vec<Entry>> {
        library.entry_list().await.with_context(|| {
            format!(
                "could not read library at {}\nadd an entry to create it, or run `scholar config` to fix its path",
                library.root().display()
            )
        })
    }

    /// Entries matching every query term, or all entries for an empty query.
    pub async fn query(&self, library: &Library, query: &[String]) -> Result<Vec<Entry>> {
        let terms = split_query(&query.join(" "));
        let entries = self.entries(library).await?;
        Ok(search(&terms, entries, matches_key).await)
    }

    /// The single entry a query selects.
    ///
    /// A query equal to the key of one of the matches selects that entry even
    /// when other keys contain it.
    pub async fn find_one(&self, library: &Library, query: &[String]) -> Result<Entry> {
        let mut found = self.query(library, query).await?;
        let exact = query.join(" ");
        if let Some(pos) = found.iter().position(|entry| entry.key == exact) {
            return Ok(found.swap_remove(pos));
        }
        match found.len() {
            0 => bail!("no entries found"),
            1 => Ok(found.remove(0)),
            n => bail!("too many entries ({n}) matched\nplease, refine your query"),
        }
    }

    /// Asks a yes/no question on the terminal. Always yes when not
    /// interactive.
    pub fn confirm(&self, question: &str) -> Result<bool> {
        if !self.interactive() {
            return Ok(true);
        }
        let stdin = io::stdin();
        ask(question, &mut stdin.lock(), &mut io::stderr())
    }

    /// Opens `path` in the configured editor and waits for it to exit.
    pub fn launch_editor(&self, path: &Path) -> Result<()> {
        let editor = self.config().editor();
        let mut words = editor.split_whitespace();
        let program = words.next().context("no editor configured")?;

        debug!(editor = %editor, path = %path.display(), "Launching editor");
        let status = Command::new(program)
            .args(words)
            .arg(path)
            .status()
            .with_context(|| format!("failed to run editor {editor:?}"))?;
        if !status.success() {
            bail!("editor {editor:?} exited with {status}");
        }
        Ok(())
    }

    /// Lets the user edit an entry record, then reads it back and repairs
    /// the directory name if the key was changed.
    pub fn edit_entry(&self, library: &Library, entry: &Entry) -> Result<Entry> {
        let dir = entry.derived_key();
        self.launch_editor(&library.record_path(entry))?;

        let mut edited = library
            .read_entry(&dir)
            .with_context(|| format!("could not read back entry {dir}"))?;
        if let Reconcile::Renamed { from, to } = library.reconcile(&dir, &mut edited)? {
            info!(from = %from, to = %to, "Entry key changed");
        }
        Ok(edited)
    }
}

/// Prompts with `question [y/N]` and reads one answer line.
pub fn ask(question: &str, input: &mut impl BufRead, prompt: &mut impl Write) -> Result<bool> {
    write!(prompt, "{question} [y/N] ")?;
    prompt.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes" | "YES"))
}

/// Hands a file or URL to the platform opener.
pub fn open_with_system(target: &str) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };

    info!(location = %target, "Opening");
    let status = command
        .arg(target)
        .status()
        .with_context(|| format!("failed to open {target}"))?;
    if !status.success() {
        bail!("could not open {target} ({status})");
    }
    Ok(())
}
