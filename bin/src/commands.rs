//! Command handlers for the `docwin` binary.
//!
//! Every command loads the host file and window descriptor fresh, runs against an in-memory
//! [`TextBuffer`], and writes the host back only if the command changed it.

use crate::cli::{Cli, Command};
use anyhow::{Context, Result};
use docwin::{WindowConfig, WindowedDocument};
use docwin_text::{shared, HostBuffer, SharedBuffer, TextBuffer};
use std::{fs, io::Write, path::Path};

/// A window opened over a host file.
pub struct Session {
    host: SharedBuffer,
    window: WindowedDocument,
}

impl Session {
    pub fn open(host_path: &Path, window_path: &Path) -> Result<Self> {
        let text = fs::read_to_string(host_path)
            .with_context(|| format!("Failed to read host file: {}", host_path.display()))?;
        let config = WindowConfig::load(window_path)?;

        let host = shared(TextBuffer::from_text(&text));
        let window = config
            .open(host.clone())
            .with_context(|| format!("Failed to open window: {}", window_path.display()))?;
        Ok(Self { host, window })
    }

    pub fn window(&self) -> &WindowedDocument {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut WindowedDocument {
        &mut self.window
    }

    /// Whether the host changed since it was loaded.
    pub fn is_dirty(&self) -> bool {
        self.host.read().version() > 0
    }

    pub fn save(&self, host_path: &Path) -> Result<()> {
        fs::write(host_path, self.host.read().text())
            .with_context(|| format!("Failed to write host file: {}", host_path.display()))?;
        tracing::info!(path = %host_path.display(), "host file written");
        Ok(())
    }
}

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let mut session = Session::open(&cli.host, &cli.window)?;
    execute(&mut session, &cli.command, out)?;
    if session.is_dirty() {
        session.save(&cli.host)?;
    }
    Ok(())
}

pub fn execute(session: &mut Session, command: &Command, out: &mut impl Write) -> Result<()> {
    tracing::debug!(?command, "executing");
    match command {
        Command::Text => {
            writeln!(out, "{}", session.window().text())?;
        },
        Command::HostOffset { offset } => {
            let host_offset = session
                .window()
                .virtual_to_host(*offset)
                .context("Every host range of the window has been deleted")?;
            writeln!(out, "{host_offset}")?;
        },
        Command::VirtualOffset { offset } => {
            let virtual_offset = session
                .window()
                .host_to_virtual(*offset)
                .context("Every host range of the window has been deleted")?;
            writeln!(out, "{virtual_offset}")?;
        },
        Command::Line { offset } => {
            let line = session.window().line_number(*offset);
            let host_line = session
                .window()
                .virtual_to_host_line(line)
                .context("Every host range of the window has been deleted")?;
            writeln!(out, "{line} {host_line}")?;
        },
        Command::Set { file } => {
            let text = fs::read_to_string(file)
                .with_context(|| format!("Failed to read window text: {}", file.display()))?;
            session.window_mut().set_text(&text)?;
        },
        Command::Replace { start, end, text } => {
            session.window_mut().replace(*start..*end, text)?;
        },
    }
    Ok(())
}
