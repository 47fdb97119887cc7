//! Per-user shell session.
//!
//! [`Session`] owns every piece of mutable shell state and is driven by one
//! input event at a time through [`Session::handle`]. Collaborator results come
//! back through [`Session::apply`]. Nothing in here blocks or awaits.

use crate::builtins;
use crate::command::{Command, CommandRegistry};
use crate::complete::complete_line;
use crate::config::FolioConfig;
use crate::error::{Result, ShellError};
use crate::history::History;
use crate::pager::Pager;
use crate::sandbox::{Sandbox, WorkDir};
use crate::services::{Completion, Job, JobId, Payload, Request};
use crate::transcript::{Block, Transcript};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// How far to move a scrollable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollKind {
    LineUp,
    LineDown,
    HalfPageUp,
    HalfPageDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// One input event from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Enter pressed with this line in the input buffer.
    Submit(String),
    RecallPrevious,
    RecallNext,
    /// Tab pressed with this text in the input buffer.
    Complete(String),
    Scroll(ScrollKind),
    /// Leave the pager.
    Dismiss,
}

/// What the transport must do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Replace the input buffer with this text.
    ReplaceInput(String),
    /// Hand this job to the dispatcher.
    Spawn(Job),
    /// End the session.
    Exit,
}

/// Result of executing one classified command.
enum Outcome {
    Text(String),
    Spawn(Request),
    Clear,
    Exit,
}

pub struct Session {
    config: FolioConfig,
    registry: CommandRegistry,
    sandbox: Sandbox,
    cwd: WorkDir,
    history: History,
    transcript: Transcript,
    pager: Option<Pager>,
    viewport: (u16, u16),
    next_job: u64,
    rng: StdRng,
}

impl Session {
    pub fn new(sandbox: Sandbox, config: FolioConfig) -> Self {
        let banner = config
            .shell
            .show_banner
            .then(|| builtins::BANNER.to_string());
        let greeting = Some(config.shell.greeting.clone());
        info!(root = %sandbox.root().display(), user = %config.shell.user, "Session started");
        Self {
            registry: CommandRegistry::with_defaults(),
            sandbox,
            cwd: WorkDir::root(),
            history: History::new(),
            transcript: Transcript::new(banner, greeting),
            pager: None,
            viewport: (80, 24),
            next_job: 0,
            rng: StdRng::from_entropy(),
            config,
        }
    }

    /// Use a fixed RNG seed for `yoda` and `coinflip`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Set the size of the body area (transcript or pager, including the
    /// pager's header and footer rows).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width.max(1), height.max(1));
        self.transcript.set_width(self.viewport.0);
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    /// Rows of file content the pager shows at the current size.
    pub fn pager_height(&self) -> usize {
        usize::from(self.viewport.1.saturating_sub(2)).max(1)
    }

    /// `user@host:~/dir$ `
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$ ",
            self.config.shell.user, self.config.shell.host, self.cwd
        )
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn pager(&self) -> Option<&Pager> {
        self.pager.as_ref()
    }

    pub fn is_paging(&self) -> bool {
        self.pager.is_some()
    }

    pub fn cwd(&self) -> &WorkDir {
        &self.cwd
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Route one input event. While the pager is open it receives the event
    /// and the command parser is never reached.
    pub fn handle(&mut self, input: Input) -> Effect {
        if self.pager.is_some() {
            self.handle_paging(input);
            return Effect::None;
        }

        match input {
            Input::Submit(line) => self.submit(line),
            Input::RecallPrevious => self
                .history
                .recall_previous()
                .map(|line| Effect::ReplaceInput(line.to_string()))
                .unwrap_or(Effect::None),
            Input::RecallNext => self
                .history
                .recall_next()
                .map(|line| Effect::ReplaceInput(line.to_string()))
                .unwrap_or(Effect::None),
            Input::Complete(text) => self.complete(&text),
            Input::Scroll(kind) => {
                self.scroll_transcript(kind);
                Effect::None
            }
            Input::Dismiss => Effect::None,
        }
    }

    fn handle_paging(&mut self, input: Input) {
        let height = self.pager_height();
        let Some(pager) = self.pager.as_mut() else {
            return;
        };
        match input {
            Input::Dismiss => {
                debug!(file = %pager.title(), "Closing pager");
                self.pager = None;
            }
            Input::Scroll(kind) => match kind {
                ScrollKind::LineUp => pager.scroll_up(1),
                ScrollKind::LineDown => pager.scroll_down(1, height),
                ScrollKind::HalfPageUp => pager.half_page_up(height),
                ScrollKind::HalfPageDown => pager.half_page_down(height),
                ScrollKind::PageUp => pager.page_up(height),
                ScrollKind::PageDown => pager.page_down(height),
                ScrollKind::Top => pager.top(),
                ScrollKind::Bottom => pager.bottom(height),
            },
            other => debug!(input = ?other, "Ignoring input while paging"),
        }
    }

    fn scroll_transcript(&mut self, kind: ScrollKind) {
        let (width, height) = self.viewport;
        let max = self.transcript.max_scroll(width, height);
        let page = usize::from(height);
        let half = (page / 2).max(1);
        match kind {
            ScrollKind::LineUp => self.transcript.scroll_up(1, max),
            ScrollKind::LineDown => self.transcript.scroll_down(1),
            ScrollKind::HalfPageUp => self.transcript.scroll_up(half, max),
            ScrollKind::HalfPageDown => self.transcript.scroll_down(half),
            ScrollKind::PageUp => self.transcript.scroll_up(page, max),
            ScrollKind::PageDown => self.transcript.scroll_down(page),
            ScrollKind::Top => self.transcript.scroll_to_top(max),
            ScrollKind::Bottom => self.transcript.scroll_to_bottom(),
        }
    }

    fn complete(&self, text: &str) -> Effect {
        // An unreadable directory still completes command names.
        let entries = self.sandbox.list(&self.cwd).unwrap_or_default();
        let names = self.registry.names();
        match complete_line(text, &entries, &names) {
            Some(completed) => Effect::ReplaceInput(completed),
            None => Effect::None,
        }
    }

    fn submit(&mut self, line: String) -> Effect {
        let prompt = format!("{}{}", self.prompt(), line);
        self.history.record(line.as_str());
        let command = self.registry.parse(&line);
        debug!(?command, "Executing command");

        match self.execute(command) {
            Ok(Outcome::Text(text)) => {
                self.transcript.append(Block::output(prompt, text));
                Effect::None
            }
            Ok(Outcome::Spawn(request)) => {
                let id = JobId(self.next_job);
                self.next_job += 1;
                self.transcript
                    .append(Block::pending(prompt, request.placeholder(), id));
                Effect::Spawn(Job { id, request })
            }
            Ok(Outcome::Clear) => {
                self.transcript.clear();
                Effect::None
            }
            Ok(Outcome::Exit) => {
                info!("Session ended by exit command");
                self.transcript.append(Block::output(prompt, "Goodbye!"));
                Effect::Exit
            }
            Err(e) => {
                debug!(error = %e, "Command failed");
                self.transcript.append(Block::error(prompt, e.to_string()));
                Effect::None
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Outcome> {
        let shell = &self.config.shell;
        let text = match command {
            Command::Empty => String::new(),
            Command::Help => self.registry.help_text(),
            Command::Ls => builtins::ls(&self.sandbox.list(&self.cwd)?),
            Command::Pwd => builtins::pwd(&self.cwd),
            Command::Cd(target) => {
                self.cwd = self.sandbox.resolve(&self.cwd, &target)?;
                String::new()
            }
            Command::Cat(name) => {
                let bytes = self.sandbox.read_file(&self.cwd, &name)?;
                self.pager = Some(Pager::new(name.clone(), &bytes));
                format!("Viewing {name}")
            }
            Command::Whoami => builtins::whoami(&shell.user),
            Command::Date => builtins::date(chrono::Local::now().date_naive()),
            Command::Clear => return Ok(Outcome::Clear),
            Command::Exit => return Ok(Outcome::Exit),
            Command::Echo(text) => builtins::echo(&text),
            Command::Wiki(term) if term.trim().is_empty() => {
                "Please provide a search term.".to_string()
            }
            Command::Wiki(term) => return Ok(Outcome::Spawn(Request::Wiki(term))),
            Command::Joke => return Ok(Outcome::Spawn(Request::Joke)),
            Command::Qr(text) => builtins::qr(&text)?,
            Command::Yoda(text) => builtins::yoda(&text, &mut self.rng),
            Command::Coinflip => builtins::coinflip(&mut self.rng),
            Command::Skills => builtins::skills(&self.config.profile),
            Command::Contact => builtins::contact(&self.config.profile),
            Command::Version => builtins::version(),
            Command::Neofetch => builtins::neofetch(&shell.user, &shell.host),
            Command::Unknown(input) => return Err(ShellError::UnknownCommand { input }),
        };
        Ok(Outcome::Text(text))
    }

    /// Fold a collaborator event into the transcript. Events for blocks that
    /// were cleared in the meantime are dropped.
    pub fn apply(&mut self, completion: Completion) {
        let Completion { job, payload } = completion;
        let applied = match payload {
            Payload::Chunk(chunk) => self.transcript.append_chunk(job, &chunk),
            Payload::Done(result) => self.transcript.resolve(job, result),
        };
        if !applied {
            debug!(%job, "Dropping completion for a cleared block");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::LineKind;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn setup() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Projects/folio")).unwrap();
        fs::create_dir(dir.path().join(".secret")).unwrap();
        fs::write(dir.path().join("README.md"), "line one\nline two\n").unwrap();
        fs::write(dir.path().join("Projects/notes.txt"), "notes").unwrap();
        let sandbox = Sandbox::local(dir.path()).unwrap();
        let session = Session::new(sandbox, FolioConfig::default()).with_seed(7);
        (dir, session)
    }

    fn submit(session: &mut Session, line: &str) -> Effect {
        session.handle(Input::Submit(line.to_string()))
    }

    fn last_text(session: &Session) -> &str {
        &session.transcript().blocks().last().unwrap().text
    }

    #[test]
    fn test_prompt_tracks_directory() {
        let (_dir, mut session) = setup();
        assert_eq!(session.prompt(), "guest@folio:~$ ");
        submit(&mut session, "cd Projects");
        assert_eq!(session.prompt(), "guest@folio:~/Projects$ ");
        assert_eq!(
            session.transcript().blocks()[0].prompt,
            "guest@folio:~$ cd Projects"
        );
    }

    #[test]
    fn test_cd_errors_leave_directory_unchanged() {
        let (_dir, mut session) = setup();
        submit(&mut session, "cd .secret");
        assert_eq!(
            last_text(&session),
            "Access denied: Hidden directories are not accessible"
        );
        submit(&mut session, "cd nowhere");
        assert_eq!(last_text(&session), "Invalid directory: nowhere");
        assert!(session.transcript().blocks()[1].is_error);
        assert!(session.cwd().is_root());
    }

    #[test]
    fn test_cd_parent_saturates_at_root() {
        let (_dir, mut session) = setup();
        submit(&mut session, "cd Projects");
        for _ in 0..5 {
            submit(&mut session, "cd ..");
        }
        assert!(session.cwd().is_root());
    }

    #[test]
    fn test_ls_hides_dotfiles() {
        let (_dir, mut session) = setup();
        submit(&mut session, "ls");
        let text = last_text(&session);
        assert!(text.contains("📁 Projects"));
        assert!(text.contains("📄 README.md"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn test_cat_enters_pager_and_routes_input() {
        let (_dir, mut session) = setup();
        submit(&mut session, "cat README.md");
        assert!(session.is_paging());
        assert_eq!(session.pager().unwrap().lines()[0], "line one");
        let blocks = session.transcript().len();

        // Submissions are not parsed while paging.
        assert_eq!(submit(&mut session, "clear"), Effect::None);
        assert_eq!(session.handle(Input::RecallPrevious), Effect::None);
        assert_eq!(session.transcript().len(), blocks);
        assert_eq!(session.history().len(), 1);

        session.handle(Input::Scroll(ScrollKind::LineDown));
        session.handle(Input::Dismiss);
        assert!(!session.is_paging());
    }

    #[test]
    fn test_cat_failures_stay_in_normal_mode() {
        let (_dir, mut session) = setup();
        submit(&mut session, "cat missing.txt");
        assert!(!session.is_paging());
        assert_eq!(session.transcript().len(), 1);
        assert!(last_text(&session).starts_with("Error reading file"));

        submit(&mut session, "cat .env");
        assert_eq!(
            last_text(&session),
            "Access denied: Hidden files are not accessible"
        );
        submit(&mut session, "cat Projects");
        assert!(!session.is_paging());
    }

    #[test]
    fn test_clear_resets_transcript_but_not_history() {
        let (_dir, mut session) = setup();
        submit(&mut session, "pwd");
        submit(&mut session, "whoami");
        submit(&mut session, "clear");
        assert_eq!(session.transcript().len(), 0);
        assert_eq!(session.history().len(), 3);
        let lines = session.transcript().lines(120);
        assert!(lines.iter().all(|l| l.kind == LineKind::Banner));
    }

    #[test]
    fn test_every_command_but_clear_adds_one_block() {
        let (_dir, mut session) = setup();
        for line in ["", "help", "pwd", "whoami", "date", "echo hi", "frob", "coinflip"] {
            submit(&mut session, line);
        }
        assert_eq!(session.transcript().len(), 8);
    }

    #[test]
    fn test_unknown_command_message() {
        let (_dir, mut session) = setup();
        submit(&mut session, "frob 1");
        assert_eq!(
            last_text(&session),
            "frob 1 is not a valid command, try running help for commands"
        );
    }

    #[test]
    fn test_history_recall_effects() {
        let (_dir, mut session) = setup();
        submit(&mut session, "pwd");
        submit(&mut session, "ls");
        assert_eq!(
            session.handle(Input::RecallPrevious),
            Effect::ReplaceInput("ls".into())
        );
        assert_eq!(
            session.handle(Input::RecallPrevious),
            Effect::ReplaceInput("pwd".into())
        );
        assert_eq!(
            session.handle(Input::RecallNext),
            Effect::ReplaceInput("ls".into())
        );
        assert_eq!(
            session.handle(Input::RecallNext),
            Effect::ReplaceInput(String::new())
        );
        assert_eq!(session.handle(Input::RecallNext), Effect::None);
    }

    #[test]
    fn test_tab_completion_prefers_entries() {
        let (_dir, mut session) = setup();
        assert_eq!(
            session.handle(Input::Complete("cd Pro".into())),
            Effect::ReplaceInput("cd Projects".into())
        );
        assert_eq!(
            session.handle(Input::Complete("whoa".into())),
            Effect::ReplaceInput("whoami".into())
        );
        assert_eq!(session.handle(Input::Complete("zzz".into())), Effect::None);
    }

    #[test]
    fn test_joke_spawns_and_completion_fills_block() {
        let (_dir, mut session) = setup();
        let Effect::Spawn(job) = submit(&mut session, "joke") else {
            panic!("joke should spawn a job");
        };
        assert_eq!(job.request, Request::Joke);
        assert!(session.transcript().has_pending());

        session.apply(Completion {
            job: job.id,
            payload: Payload::Done(Ok("A joke.".into())),
        });
        assert_eq!(last_text(&session), "A joke.");
        assert!(!session.transcript().has_pending());
    }

    #[test]
    fn test_job_ids_are_unique() {
        let (_dir, mut session) = setup();
        let Effect::Spawn(first) = submit(&mut session, "joke") else {
            panic!()
        };
        let Effect::Spawn(second) = submit(&mut session, "wiki rust") else {
            panic!()
        };
        assert_ne!(first.id, second.id);
        assert_eq!(second.request, Request::Wiki("rust".into()));
    }

    #[test]
    fn test_completion_after_clear_is_dropped() {
        let (_dir, mut session) = setup();
        let Effect::Spawn(job) = submit(&mut session, "joke") else {
            panic!()
        };
        submit(&mut session, "clear");
        session.apply(Completion {
            job: job.id,
            payload: Payload::Done(Ok("late".into())),
        });
        assert_eq!(session.transcript().len(), 0);
    }

    #[test]
    fn test_wiki_without_term() {
        let (_dir, mut session) = setup();
        assert_eq!(submit(&mut session, "wiki "), Effect::None);
        assert_eq!(last_text(&session), "Please provide a search term.");
        assert_eq!(submit(&mut session, "wiki    "), Effect::None);
    }

    #[test]
    fn test_exit_effect() {
        let (_dir, mut session) = setup();
        assert_eq!(submit(&mut session, "exit"), Effect::Exit);
    }

    #[test]
    fn test_qr_is_synchronous() {
        let (_dir, mut session) = setup();
        assert_eq!(submit(&mut session, "qr hello"), Effect::None);
        assert!(last_text(&session).starts_with("QR code for: hello"));
    }

    #[test]
    fn test_scroll_moves_transcript_until_next_command() {
        let (_dir, mut session) = setup();
        session.resize(80, 5);
        for i in 0..20 {
            submit(&mut session, &format!("echo {i}"));
        }
        session.handle(Input::Scroll(ScrollKind::PageUp));
        assert_eq!(session.transcript().scroll_offset(), 5);
        session.handle(Input::Scroll(ScrollKind::LineDown));
        assert_eq!(session.transcript().scroll_offset(), 4);
        submit(&mut session, "pwd");
        assert_eq!(session.transcript().scroll_offset(), 0);
    }

    #[test]
    fn test_completion_does_not_move_scrolled_view() {
        let (_dir, mut session) = setup();
        session.resize(80, 4);
        for i in 0..10 {
            submit(&mut session, &format!("echo {i}"));
        }
        let Effect::Spawn(job) = submit(&mut session, "joke") else {
            panic!("joke should spawn a job");
        };
        session.handle(Input::Scroll(ScrollKind::PageUp));
        let before = session.transcript().render(80, 4);

        session.apply(Completion {
            job: job.id,
            payload: Payload::Done(Ok("line one\nline two\nline three".into())),
        });
        assert_eq!(session.transcript().render(80, 4), before);
    }

    #[test]
    fn test_pager_scroll_uses_viewport() {
        let dir = tempfile::tempdir().unwrap();
        let text: String = (0..50).map(|i| format!("{i}\n")).collect();
        fs::write(dir.path().join("long.txt"), text).unwrap();
        let sandbox = Sandbox::local(dir.path()).unwrap();
        let mut session = Session::new(sandbox, FolioConfig::default());
        session.resize(80, 12);
        submit(&mut session, "cat long.txt");
        session.handle(Input::Scroll(ScrollKind::PageDown));
        assert_eq!(session.pager().unwrap().scroll(), 10);
        session.handle(Input::Scroll(ScrollKind::Top));
        assert_eq!(session.pager().unwrap().scroll(), 0);
    }
}
