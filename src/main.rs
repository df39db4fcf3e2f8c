use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use playshell::app::{Shell, ShellCommand};
use playshell::app::command::HELP;
use playshell::kernel::services::adapters::{
    ensure_settings_file, get_share_dir, get_workspace_file_path, load_settings, ClipboardService,
    DirRemoteStore, FileLocalStore, LintOptions, MemorySession, PageAddress,
};
use playshell::kernel::services::ports::ShellConfig;
use playshell::kernel::PersistenceGateway;

mod logging;

const SHARE_TIMEOUT: Duration = Duration::from_secs(5);

/// Page address to start from: the command-line argument, else the configured one.
fn resolve_page_url(config: &ShellConfig, arg: Option<&str>) -> String {
    match arg.map(str::trim).filter(|arg| !arg.is_empty()) {
        Some(arg) => arg.to_string(),
        None => config.page_url.clone(),
    }
}

fn data_path(path: Option<PathBuf>, file: &str) -> PathBuf {
    path.unwrap_or_else(|| std::env::temp_dir().join("playshell").join(file))
}

fn build_gateway(page_url: &str, clipboard: ClipboardService) -> PersistenceGateway {
    let remote = DirRemoteStore::new(data_path(get_share_dir(), "shares"));
    let local = FileLocalStore::new(data_path(get_workspace_file_path(), "workspace.json"));
    PersistenceGateway::new(
        Arc::new(remote),
        Box::new(local),
        Box::new(PageAddress::parse(page_url)),
        Box::new(clipboard),
    )
}

fn print_files(shell: &Shell<MemorySession>, out: &mut impl Write) -> io::Result<()> {
    for entry in shell.files() {
        let marker = if entry.selected { '*' } else { ' ' };
        writeln!(out, "{marker} {}", entry.name)?;
    }
    Ok(())
}

fn print_analysis(shell: &Shell<MemorySession>, out: &mut impl Write) -> io::Result<()> {
    if let Some(error) = shell.analysis_error() {
        return writeln!(out, "error: {error}");
    }
    let diagnostics = shell.diagnostics();
    if diagnostics.is_empty() {
        return writeln!(out, "no diagnostics");
    }
    for diagnostic in diagnostics {
        writeln!(out, "{diagnostic}")?;
    }
    Ok(())
}

/// Runs one command; returns `false` when the shell should exit.
fn run_command(
    shell: &mut Shell<MemorySession>,
    cmd: ShellCommand,
    out: &mut impl Write,
) -> io::Result<bool> {
    let name = cmd.name();
    let changed = match cmd {
        ShellCommand::Quit => return Ok(false),
        ShellCommand::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(true);
        }
        ShellCommand::List => {
            print_files(shell, out)?;
            return Ok(true);
        }
        ShellCommand::Show => {
            if let Some(active) = shell.active() {
                writeln!(out, "{}", active.content)?;
            }
            return Ok(true);
        }
        ShellCommand::Url => {
            writeln!(out, "{}", shell.location_href())?;
            return Ok(true);
        }
        ShellCommand::Check => {
            shell.settle_analysis();
            print_analysis(shell, out)?;
            return Ok(true);
        }
        ShellCommand::Share => {
            if !shell.share() {
                writeln!(out, "nothing to share")?;
                return Ok(true);
            }
            shell.wait_for_share(SHARE_TIMEOUT);
            match (shell.notice(), shell.share_url()) {
                (Some(notice), _) => writeln!(out, "{notice}")?,
                (None, Some(url)) if !shell.is_sharing() => {
                    writeln!(out, "link copied to clipboard: {url}")?
                }
                _ => writeln!(out, "still uploading...")?,
            }
            return Ok(true);
        }
        ShellCommand::Open(name) => shell.select(&name),
        ShellCommand::New(name) => shell.add_file(name.as_deref()),
        ShellCommand::Remove(name) => shell.remove(&name),
        ShellCommand::Rename { from, to } => shell.rename(&from, &to),
        ShellCommand::Set(text) => shell.edit(&text),
        ShellCommand::Append(text) => {
            let mut content = shell
                .active()
                .map(|active| active.content.clone())
                .unwrap_or_default();
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(&text);
            shell.edit(&content)
        }
    };

    if changed {
        let active = shell.active().map(|f| f.name.to_string()).unwrap_or_default();
        writeln!(out, "[rev {}] {active}", shell.revision())?;
    } else {
        writeln!(out, "{name}: nothing changed")?;
    }
    Ok(true)
}

fn main() -> io::Result<()> {
    let _logging = logging::init();

    let arg = std::env::args().nth(1);
    if matches!(arg.as_deref(), Some("-h" | "--help")) {
        println!("usage: playshell [PAGE_URL]\n\n{HELP}");
        return Ok(());
    }

    if let Err(err) = ensure_settings_file() {
        tracing::warn!(error = %err, "settings file unavailable");
    }
    let config = load_settings();
    let page_url = resolve_page_url(&config, arg.as_deref());

    let clipboard = ClipboardService::new();
    let gateway = build_gateway(&page_url, clipboard);
    let session = MemorySession::with_lint_options(LintOptions {
        max_line_length: config.max_line_length,
    });
    let mut shell = Shell::new(session, gateway, &config)?;
    shell.start();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_files(&shell, &mut stdout)?;

    let mut line = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match ShellCommand::parse(&line) {
            Ok(Some(cmd)) => {
                if !run_command(&mut shell, cmd, &mut stdout)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => writeln!(stdout, "{err} (try `help`)")?,
        }

        if shell.tick(Instant::now()) {
            tracing::debug!(revision = shell.revision(), "tick applied updates");
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/cli_startup.rs"]
mod tests;
