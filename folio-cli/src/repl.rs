//! Line-mode shell on stdin/stdout, used with `--no-tui` and `-c`.

use folio_core::{Block, Completion, Dispatcher, Effect, Input, LineKind, Session};
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

const RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// The session plus the plumbing for its collaborator calls.
pub struct LineShell {
    session: Session,
    dispatcher: Dispatcher,
    completions: mpsc::UnboundedReceiver<Completion>,
}

impl LineShell {
    pub fn new(
        session: Session,
        dispatcher: Dispatcher,
        completions: mpsc::UnboundedReceiver<Completion>,
    ) -> Self {
        Self {
            session,
            dispatcher,
            completions,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Print the banner and greeting.
    pub fn print_intro(&self, out: &mut impl Write, width: u16) -> io::Result<()> {
        for line in self.session.transcript().lines(width) {
            writeln!(out, "{}", paint(&line.text, line.kind))?;
        }
        Ok(())
    }

    /// Run one line and print what it produced. Returns false once the
    /// session has ended.
    pub async fn run_line(&mut self, line: &str, out: &mut impl Write) -> anyhow::Result<bool> {
        let effect = self.session.handle(Input::Submit(line.to_string()));

        match effect {
            Effect::Spawn(job) => {
                writeln!(out, "{}", paint(&job.request.placeholder(), LineKind::Pending))?;
                out.flush()?;
                self.dispatcher.spawn(job);
                while self.session.transcript().has_pending() {
                    match self.completions.recv().await {
                        Some(completion) => self.session.apply(completion),
                        None => break,
                    }
                }
            }
            Effect::Exit => {
                self.print_last(out)?;
                return Ok(false);
            }
            Effect::None | Effect::ReplaceInput(_) => {}
        }

        // Every command but `clear` leaves a block behind.
        if self.session.transcript().is_empty() {
            write!(out, "{CLEAR_SCREEN}")?;
            return Ok(true);
        }

        if let Some(pager) = self.session.pager() {
            for line in pager.lines() {
                writeln!(out, "{line}")?;
            }
            self.session.handle(Input::Dismiss);
            return Ok(true);
        }

        self.print_last(out)?;
        Ok(true)
    }

    fn print_last(&self, out: &mut impl Write) -> io::Result<()> {
        if let Some(text) = self.session.transcript().blocks().last().and_then(format_block) {
            writeln!(out, "{text}")?;
        }
        out.flush()
    }
}

/// Output of a settled block, coloured red for errors. `None` when the
/// command printed nothing.
pub fn format_block(block: &Block) -> Option<String> {
    if block.text.is_empty() {
        return None;
    }
    let kind = if block.is_error {
        LineKind::Error
    } else {
        LineKind::Output
    };
    Some(paint(&block.text, kind))
}

fn paint(text: &str, kind: LineKind) -> String {
    let color = match kind {
        LineKind::Banner => "\x1b[1;35m",
        LineKind::Greeting => "\x1b[90m",
        LineKind::Prompt => "\x1b[1;32m",
        LineKind::Pending => "\x1b[3;90m",
        LineKind::Error => "\x1b[31m",
        LineKind::Output => return text.to_string(),
    };
    format!("{color}{text}{RESET}")
}

/// Run the shell interactively until `exit` or end of input.
pub async fn run_interactive(mut shell: LineShell) -> anyhow::Result<()> {
    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(80);
    let mut stdout = io::stdout();
    shell.print_intro(&mut stdout, width)?;

    let stdin = io::stdin();
    loop {
        print!("{}", paint(&shell.session().prompt(), LineKind::Prompt));
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!();
            break;
        }
        let line = input.trim_end_matches(['\n', '\r']);
        if !shell.run_line(line, &mut stdout).await? {
            break;
        }
    }

    Ok(())
}

/// Run a single line non-interactively and print its output.
pub async fn run_single_command(mut shell: LineShell, line: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    shell.run_line(line, &mut stdout).await?;
    Ok(())
}
