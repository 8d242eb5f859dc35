//! Interactive mode: a command loop over one long-lived session.
//!
//! Failures inside the loop are reported and the loop continues with the
//! session state preserved; only `exit` (or end of input) leaves it.

use std::io::BufRead;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use anyhow::bail;
use console::Term;
use console::style;
use rearc_core::ArchiveError;
use rearc_core::Format;
use rearc_core::Session;

use crate::error::convert_archive_error;

pub fn execute(quiet: bool) -> Result<()> {
    let term = Term::stdout();
    if !quiet {
        term.write_line("Entering interactive mode. Type 'help' for commands.")?;
    }

    let shell = Shell {
        session: super::new_session(quiet)?,
        current: None,
        loaded: false,
        term,
    };
    shell.run()
}

struct Shell {
    session: Session,
    /// Archive identity shown in the prompt, if one was opened or saved.
    current: Option<PathBuf>,
    /// Whether `current` actually imported (false after a failed `open`).
    loaded: bool,
    term: Term,
}

impl Shell {
    fn run(mut self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            self.write_prompt()?;
            let Some(line) = lines.next() else { break };
            let line = line?;

            let mut parts = line.split_whitespace();
            let Some(cmd) = parts.next() else { continue };
            let args: Vec<&str> = parts.collect();

            match cmd.to_ascii_lowercase().as_str() {
                "exit" | "quit" | "q" => break,
                "help" => self.help()?,
                other => {
                    if let Err(err) = self.dispatch(other, &args) {
                        self.term.write_line(&format!(
                            "{} {err:#}",
                            style("error:").red().bold()
                        ))?;
                    }
                }
            }
        }

        self.session.close()?;
        Ok(())
    }

    fn dispatch(&mut self, cmd: &str, args: &[&str]) -> Result<()> {
        match cmd {
            "open" => self.open(args),
            "save" => self.save(args),
            "new" | "close" => {
                self.session.reset().map_err(|e| self.cli_err(e))?;
                self.current = None;
                self.loaded = false;
                self.term
                    .write_line("Workspace cleared. Ready for a new archive.")?;
                Ok(())
            }
            "info" => self.info(),
            "ls" => self.list(),
            "add" => {
                let Some(source) = args.first() else {
                    return self.usage("add <local_path> [dest_path]");
                };
                let dest = args.get(1).copied().unwrap_or("");
                self.session
                    .add(Path::new(source), dest)
                    .map_err(|e| self.cli_err(e))
            }
            "rm" => {
                let Some(target) = args.first() else {
                    return self.usage("rm <path_in_archive>");
                };
                self.session.remove(target).map_err(|e| self.cli_err(e))
            }
            "enc" => {
                let Some(password) = args.first() else {
                    return self.usage("enc <password>");
                };
                self.session
                    .set_export_password(password)
                    .map_err(|e| self.cli_err(e))
            }
            "dec" => self.decrypt(args),
            other => {
                self.term
                    .write_line(&format!("Unknown command: {other}"))?;
                Ok(())
            }
        }
    }

    fn open(&mut self, args: &[&str]) -> Result<()> {
        let Some(raw) = args.first() else {
            return self.usage("open <path> [password]");
        };
        let path = PathBuf::from(raw.trim_matches(|c| c == '\'' || c == '"'));
        let password = args.get(1).copied();

        // A fresh import always starts from an empty staging area.
        self.session.reset().map_err(|e| self.cli_err(e))?;
        match self.session.import(&path, password) {
            Ok(()) => {
                self.current = Some(path);
                self.loaded = true;
                Ok(())
            }
            Err(err) => {
                self.current = Some(path.clone());
                self.loaded = false;
                Err(convert_archive_error(err, &path))
            }
        }
    }

    fn save(&mut self, args: &[&str]) -> Result<()> {
        let Some(raw) = args.first() else {
            return self.usage("save <path> [format]");
        };
        let path = PathBuf::from(raw);
        let format = match args.get(1) {
            Some(tag) => match Format::from_tag(tag) {
                Format::Unknown => bail!("unknown format '{tag}'"),
                format => Some(format),
            },
            None => None,
        };

        self.session
            .export(&path, format)
            .map_err(|e| convert_archive_error(e, &path))?;
        self.current = Some(path);
        self.loaded = true;
        Ok(())
    }

    fn decrypt(&mut self, args: &[&str]) -> Result<()> {
        match args.first() {
            // With a password: the retry path after a failed encrypted
            // import.
            Some(password) => {
                self.session
                    .retry_import_with_password(password)
                    .map_err(|e| self.cli_err(e))?;
                self.loaded = true;
                Ok(())
            }
            // Without one: turn export encryption back off.
            None => {
                self.session.clear_export_password();
                Ok(())
            }
        }
    }

    fn list(&mut self) -> Result<()> {
        let entries = self.session.list("").map_err(|e| self.cli_err(e))?;
        if entries.is_empty() {
            self.term.write_line(" (empty)")?;
        }
        for entry in &entries {
            self.term.write_line(&format!(" {entry}"))?;
        }
        Ok(())
    }

    fn info(&mut self) -> Result<()> {
        let archive = self.current.as_ref().map_or_else(
            || "(none)".to_string(),
            |path| path.display().to_string(),
        );
        let entries = self.session.list("").map_err(|e| self.cli_err(e))?;

        self.term.write_line(&format!("Current archive: {archive}"))?;
        self.term.write_line(&format!(
            "Staging dir    : {}",
            self.session.staging_root().display()
        ))?;
        self.term.write_line(&format!(
            "Encryption     : {}",
            if self.session.export_password_set() {
                "enabled"
            } else {
                "disabled"
            }
        ))?;
        if self.session.import_known_encrypted() {
            self.term
                .write_line("Pending        : encrypted import awaiting 'dec <password>'")?;
        }
        self.term
            .write_line(&format!("Total entries  : {}", entries.len()))?;
        Ok(())
    }

    fn help(&self) -> Result<()> {
        self.term.write_line(&format!(
            "\n{}\n  {}\n    open <path> [pwd]      Import an archive\n    save <path> [fmt]      Export the current state (fmt: zip, tar, 7z...)\n    new / close            Close the current archive and start fresh\n    info                   Show details about the current session\n\n  {}\n    ls                     List files in the current working state\n    add <src> [dest_path]  Add a local file/dir to the archive\n    rm <path_in_arc>       Remove a file/dir from the archive\n\n  {}\n    enc <pass>             Set the encryption password for saving\n    dec [pass]             Retry import with a password, or clear the export password\n\n  exit                   Exit\n",
            style("Commands:").blue(),
            style("File operations:").green(),
            style("Content operations:").green(),
            style("Security:").green(),
        ))?;
        Ok(())
    }

    fn usage(&self, text: &str) -> Result<()> {
        self.term.write_line(&format!("usage: {text}"))?;
        Ok(())
    }

    fn write_prompt(&self) -> Result<()> {
        let name = match &self.current {
            None => style("new/unsaved".to_string()).yellow(),
            Some(path) => {
                let base = path.file_name().map_or_else(
                    || path.display().to_string(),
                    |n| n.to_string_lossy().into_owned(),
                );
                if self.loaded {
                    style(base).cyan()
                } else {
                    style(format!("{base} (load failed)")).yellow()
                }
            }
        };
        self.term.write_str(&format!("[{name}] > "))?;
        Ok(())
    }

    fn cli_err(&self, err: ArchiveError) -> anyhow::Error {
        let path = self
            .current
            .clone()
            .unwrap_or_else(|| PathBuf::from("(unsaved)"));
        convert_archive_error(err, &path)
    }
}
