//! Command registry and line parser.
//!
//! Every command the shell understands is one row in [`CommandRegistry`]:
//! a literal pattern (exact word, or prefix with its trailing space), the
//! metadata shown by `help`, and a constructor for the parsed [`Command`].
//! Parsing is pure; executing the command is the session's job.

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Empty input line.
    Empty,
    Help,
    Ls,
    Pwd,
    Cd(String),
    Cat(String),
    Whoami,
    Date,
    Clear,
    Exit,
    Echo(String),
    Wiki(String),
    Qr(String),
    Yoda(String),
    Joke,
    Coinflip,
    Skills,
    Contact,
    Version,
    Neofetch,
    /// No pattern matched; carries the original input.
    Unknown(String),
}

/// How a registry row matches an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// The whole line must equal the word.
    Exact(&'static str),
    /// The line must start with this literal (including its delimiter); the
    /// remainder is the argument.
    Prefix(&'static str),
}

/// Categories for grouping commands in `help` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCategory {
    Navigation,
    System,
    Portfolio,
    Utilities,
}

impl CommandCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CommandCategory::Navigation => "Navigation",
            CommandCategory::System => "System Info",
            CommandCategory::Portfolio => "Portfolio",
            CommandCategory::Utilities => "Utilities",
        }
    }

    pub fn all() -> &'static [CommandCategory] {
        &[
            CommandCategory::Navigation,
            CommandCategory::System,
            CommandCategory::Portfolio,
            CommandCategory::Utilities,
        ]
    }
}

impl std::fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Metadata and constructor for one command.
#[derive(Clone)]
pub struct CommandInfo {
    /// Bare command word, e.g. "cd". Used for completion.
    pub name: &'static str,
    pub pattern: Pattern,
    /// Usage pattern, e.g. "cd <dir>".
    pub usage: &'static str,
    /// One-line description shown in `help`.
    pub description: &'static str,
    pub category: CommandCategory,
    build: fn(String) -> Command,
}

impl std::fmt::Debug for CommandInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandInfo")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("category", &self.category)
            .finish()
    }
}

impl CommandInfo {
    fn exact(
        name: &'static str,
        description: &'static str,
        category: CommandCategory,
        build: fn(String) -> Command,
    ) -> Self {
        Self {
            name,
            pattern: Pattern::Exact(name),
            usage: name,
            description,
            category,
            build,
        }
    }

    fn prefix(
        name: &'static str,
        prefix: &'static str,
        usage: &'static str,
        description: &'static str,
        category: CommandCategory,
        build: fn(String) -> Command,
    ) -> Self {
        Self {
            name,
            pattern: Pattern::Prefix(prefix),
            usage,
            description,
            category,
            build,
        }
    }

    /// Try to match `line`, returning the built command on success.
    fn matches(&self, line: &str) -> Option<Command> {
        match self.pattern {
            Pattern::Exact(word) if line == word => Some((self.build)(String::new())),
            Pattern::Prefix(prefix) => line
                .strip_prefix(prefix)
                .map(|rest| (self.build)(rest.to_string())),
            _ => None,
        }
    }
}

/// Registry holding all commands with their metadata.
pub struct CommandRegistry {
    commands: Vec<CommandInfo>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Create a registry pre-populated with all built-in commands.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    pub fn register(&mut self, info: CommandInfo) {
        self.commands.push(info);
    }

    /// Register all built-in commands.
    pub fn register_defaults(&mut self) {
        use CommandCategory::*;

        self.register(CommandInfo::exact(
            "help",
            "Show this help message",
            Utilities,
            |_| Command::Help,
        ));
        self.register(CommandInfo::exact(
            "ls",
            "List files and directories",
            Navigation,
            |_| Command::Ls,
        ));
        self.register(CommandInfo::exact(
            "pwd",
            "Show current directory",
            Navigation,
            |_| Command::Pwd,
        ));
        self.register(CommandInfo::prefix(
            "cd",
            "cd ",
            "cd <dir>",
            "Change directory (use '..' to go up)",
            Navigation,
            Command::Cd,
        ));
        self.register(CommandInfo::prefix(
            "cat",
            "cat ",
            "cat <file>",
            "View file contents in pager mode",
            Navigation,
            Command::Cat,
        ));
        self.register(CommandInfo::exact(
            "whoami",
            "Show current user",
            System,
            |_| Command::Whoami,
        ));
        self.register(CommandInfo::exact(
            "date",
            "Show current date",
            System,
            |_| Command::Date,
        ));
        self.register(CommandInfo::exact(
            "version",
            "Show shell version and build info",
            System,
            |_| Command::Version,
        ));
        self.register(CommandInfo::exact(
            "neofetch",
            "Display system information with ASCII art",
            System,
            |_| Command::Neofetch,
        ));
        self.register(CommandInfo::exact(
            "skills",
            "Show technical skills",
            Portfolio,
            |_| Command::Skills,
        ));
        self.register(CommandInfo::exact(
            "contact",
            "Show contact information",
            Portfolio,
            |_| Command::Contact,
        ));
        self.register(CommandInfo::prefix(
            "qr",
            "qr ",
            "qr <text>",
            "Generate a QR code for text",
            Portfolio,
            Command::Qr,
        ));
        self.register(CommandInfo::exact(
            "coinflip",
            "Flip a coin (heads or tails)",
            Portfolio,
            |_| Command::Coinflip,
        ));
        self.register(CommandInfo::prefix(
            "echo",
            "echo ",
            "echo <text>",
            "Echo back the provided text",
            Utilities,
            Command::Echo,
        ));
        self.register(CommandInfo::exact(
            "joke",
            "Get a random dad joke",
            Utilities,
            |_| Command::Joke,
        ));
        self.register(CommandInfo::prefix(
            "wiki",
            "wiki ",
            "wiki <term>",
            "Search Wikipedia for a term",
            Utilities,
            Command::Wiki,
        ));
        self.register(CommandInfo::prefix(
            "yoda",
            "yoda ",
            "yoda <text>",
            "Say it the way Yoda would",
            Utilities,
            Command::Yoda,
        ));
        self.register(CommandInfo::exact(
            "clear",
            "Clear the terminal output",
            Utilities,
            |_| Command::Clear,
        ));
        self.register(CommandInfo::exact(
            "exit",
            "Exit the shell",
            Utilities,
            |_| Command::Exit,
        ));
    }

    /// Classify a raw input line. Nothing is trimmed.
    pub fn parse(&self, line: &str) -> Command {
        if line.is_empty() {
            return Command::Empty;
        }
        self.commands
            .iter()
            .find_map(|info| info.matches(line))
            .unwrap_or_else(|| Command::Unknown(line.to_string()))
    }

    /// All registered commands, in registration order.
    pub fn all(&self) -> &[CommandInfo] {
        &self.commands
    }

    /// Bare command words, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name).collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandInfo> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn by_category(&self, category: CommandCategory) -> Vec<&CommandInfo> {
        self.commands
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Help text grouped by category.
    pub fn help_text(&self) -> String {
        let width = self
            .commands
            .iter()
            .map(|c| c.usage.len())
            .max()
            .unwrap_or(0);

        let mut out = String::from("Available Commands:\n===================\n");
        for category in CommandCategory::all() {
            let commands = self.by_category(*category);
            if commands.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{}:\n", category));
            for cmd in commands {
                out.push_str(&format!(
                    "  {:<width$} - {}\n",
                    cmd.usage,
                    cmd.description,
                    width = width
                ));
            }
        }
        out.push_str(
            "\nNavigation Tips:\n\
             \x20 - Use up/down arrows to browse command history\n\
             \x20 - Use Page Up/Page Down to scroll the output\n\
             \x20 - Press Tab to complete commands and file names\n\
             \x20 - Press 'q' or 'esc' to exit the file viewer\n\
             \x20 - Use 'cd ..' to go to the parent directory",
        );
        out
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
