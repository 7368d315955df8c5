//! Static bash and zsh completion scripts.

use std::fmt::Write;
use std::str::FromStr;

use crate::pairing::IgnoreTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
}

impl FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            other => Err(format!("Unsupported shell: {other}. Use 'bash' or 'zsh'.")),
        }
    }
}

struct Flag {
    name: &'static str,
    short: Option<char>,
    help: &'static str,
    /// Value placeholder; `None` for switches.
    value: Option<&'static str>,
}

const fn switch(name: &'static str, help: &'static str) -> Flag {
    Flag {
        name,
        short: None,
        help,
        value: None,
    }
}

const fn valued(name: &'static str, help: &'static str, value: &'static str) -> Flag {
    Flag {
        name,
        short: None,
        help,
        value: Some(value),
    }
}

struct Command {
    name: &'static str,
    about: &'static str,
    positionals: &'static [&'static str],
    flags: &'static [Flag],
}

/// Accepted by every subcommand.
const GLOBAL_FLAGS: &[Flag] = &[Flag {
    name: "--verbose",
    short: Some('v'),
    help: "Debug logging on stderr",
    value: None,
}];

const COMMANDS: &[Command] = &[
    Command {
        name: "add-server",
        about: "Register a Syncthing server",
        positionals: &["name", "url"],
        flags: &[valued("--api-key", "Server API key", "key")],
    },
    Command {
        name: "list-servers",
        about: "List registered servers",
        positionals: &[],
        flags: &[],
    },
    Command {
        name: "remove-server",
        about: "Remove a registered server",
        positionals: &["name"],
        flags: &[],
    },
    Command {
        name: "pair",
        about: "Pair a local folder with a server",
        positionals: &[],
        flags: &[
            valued("--server", "Server name", "name"),
            valued("--folder-id", "Folder ID", "id"),
            valued("--label", "Folder label", "label"),
            valued("--local-path", "Local path", "path"),
            valued("--server-path", "Server path", "path"),
            valued("--local-url", "Local Syncthing URL", "url"),
            valued("--server-key", "Server API key", "key"),
            valued("--local-name", "Name the server gives this device", "name"),
            valued("--local-config", "Local Syncthing config.xml", "file"),
            valued("--ssh", "SSH host", "host"),
            switch("--ignore-git", "Ignore .git directory"),
            valued("--ignore-template", "Ignore template", "template"),
        ],
    },
    Command {
        name: "status",
        about: "Query Syncthing status",
        positionals: &[],
        flags: &[
            valued("--server", "Server name", "name"),
            switch("--all", "Query all servers"),
            switch("--json", "Output as JSON"),
        ],
    },
    Command {
        name: "errors",
        about: "View or clear Syncthing errors",
        positionals: &[],
        flags: &[
            valued("--server", "Server name", "name"),
            switch("--all", "Query all servers"),
            switch("--json", "Output as JSON"),
            switch("--clear", "Clear errors"),
        ],
    },
    Command {
        name: "events",
        about: "View Syncthing events",
        positionals: &[],
        flags: &[
            valued("--server", "Server name", "name"),
            valued("--types", "Event types", "types"),
            valued("--since", "Event ID to start from", "id"),
            valued("--limit", "Max events", "n"),
            switch("--json", "Output as JSON"),
        ],
    },
    Command {
        name: "completion",
        about: "Generate shell completion script",
        positionals: &["shell"],
        flags: &[],
    },
];

const EVENT_TYPES: &[&str] = &[
    "FolderCompletion",
    "FolderSummary",
    "DeviceConnected",
    "DeviceDisconnected",
    "ItemStarted",
    "ItemFinished",
    "StateChanged",
    "ConfigSaved",
];

/// A command as the completion scripts know it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: &'static str,
    pub positionals: &'static [&'static str],
    /// Long flags, without the global ones.
    pub flags: Vec<&'static str>,
}

/// Commands covered by the completion scripts.
pub fn commands() -> Vec<CommandEntry> {
    COMMANDS
        .iter()
        .map(|c| CommandEntry {
            name: c.name,
            positionals: c.positionals,
            flags: c.flags.iter().map(|f| f.name).collect(),
        })
        .collect()
}

/// Long flags offered on every command.
pub fn global_flags() -> Vec<&'static str> {
    GLOBAL_FLAGS.iter().map(|f| f.name).collect()
}

pub fn generate(shell: Shell) -> String {
    match shell {
        Shell::Bash => bash(),
        Shell::Zsh => zsh(),
    }
}

fn template_names() -> String {
    IgnoreTemplate::ALL
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(" ")
}

fn bash() -> String {
    let subcommands = COMMANDS.iter().map(|c| c.name).collect::<Vec<_>>().join(" ");
    let mut flag_cases = String::new();
    let global: Vec<String> = GLOBAL_FLAGS
        .iter()
        .flat_map(|f| f.short.map(|c| format!("-{c}")).into_iter().chain([f.name.to_string()]))
        .collect();
    for command in COMMANDS {
        let flags = command
            .flags
            .iter()
            .map(|f| f.name.to_string())
            .chain(global.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            flag_cases,
            "            {}) COMPREPLY=( $(compgen -W \"{flags}\" -- \"${{cur}}\") ) ;;",
            command.name
        );
    }

    format!(
        r#"# Bash completion for stx
# Install: stx completion bash >> ~/.bashrc && source ~/.bashrc

_stx_completions() {{
    local cur prev words cword
    _init_completion || return

    local subcommands="{subcommands}"

    if [[ ${{cword}} -eq 1 ]]; then
        COMPREPLY=( $(compgen -W "${{subcommands}}" -- "${{cur}}") )
        return
    fi

    local subcmd="${{words[1]}}"

    if [[ "${{cur}}" == -* ]]; then
        case "${{subcmd}}" in
{flag_cases}            *) COMPREPLY=() ;;
        esac
        return
    fi

    case "${{subcmd}}:${{prev}}" in
        completion:*)
            COMPREPLY=( $(compgen -W "bash zsh" -- "${{cur}}") )
            ;;
        *:--local-path|*:--local-config)
            _filedir
            ;;
        *:--ignore-template)
            COMPREPLY=( $(compgen -W "{templates}" -- "${{cur}}") )
            ;;
        *:--types)
            COMPREPLY=( $(compgen -W "{events}" -- "${{cur}}") )
            ;;
    esac
}}

complete -F _stx_completions stx
"#,
        templates = template_names(),
        events = EVENT_TYPES.join(" "),
    )
}

fn zsh_flag(flag: &Flag) -> String {
    if let Some(short) = flag.short {
        return format!(
            "'(-{short} {name})'{{-{short},{name}}}'[{}]'",
            flag.help,
            name = flag.name
        );
    }
    match (flag.name, flag.value) {
        (_, None) => format!("'{}[{}]'", flag.name, flag.help),
        ("--local-path" | "--local-config", Some(value)) => {
            format!("'{}[{}]:{value}:_files'", flag.name, flag.help)
        }
        ("--ignore-template", Some(value)) => format!(
            "'{}[{}]:{value}:({})'",
            flag.name,
            flag.help,
            template_names()
        ),
        (_, Some(value)) => format!("'{}[{}]:{value}:'", flag.name, flag.help),
    }
}

fn zsh() -> String {
    let mut descriptions = String::new();
    for command in COMMANDS {
        let _ = writeln!(descriptions, "        '{}:{}'", command.name, command.about);
    }

    let mut cases = String::new();
    for command in COMMANDS {
        let mut specs: Vec<String> = command
            .positionals
            .iter()
            .enumerate()
            .map(|(i, p)| match *p {
                "shell" => format!("'{}:{p}:(bash zsh)'", i + 1),
                _ => format!("'{}:{p}:'", i + 1),
            })
            .collect();
        specs.extend(command.flags.iter().chain(GLOBAL_FLAGS).map(zsh_flag));

        let _ = writeln!(cases, "                {})", command.name);
        let _ = writeln!(
            cases,
            "                    _arguments \\\n                        {}",
            specs.join(" \\\n                        ")
        );
        let _ = writeln!(cases, "                    ;;");
    }

    format!(
        r#"#compdef stx
# Zsh completion for stx
# Install: stx completion zsh > ~/.zsh/completions/_stx

_stx() {{
    local -a subcommands
    subcommands=(
{descriptions}    )

    _arguments -C \
        '1: :->command' \
        '*: :->args'

    case $state in
        command)
            _describe -t commands 'stx commands' subcommands
            ;;
        args)
            case $words[2] in
{cases}            esac
            ;;
    esac
}}

_stx "$@"
"#
    )
}
