use clap::{Command, ValueEnum};
use clap_complete::{Shell as CompleteShell, generate};
use std::io;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl From<Shell> for CompleteShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompleteShell::Bash,
            Shell::Zsh => CompleteShell::Zsh,
            Shell::Fish => CompleteShell::Fish,
        }
    }
}

/// Print clap-generated completions followed by a hook that also offers
/// workspace names in the first position
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    let bin = cmd.get_name().to_string();
    generate(CompleteShell::from(shell), cmd, bin.clone(), &mut io::stdout());
    print!("{}", workspace_name_hook(shell, &bin));
}

/// Shell snippet that completes workspace names from `ls --list-completions`
#[must_use]
pub fn workspace_name_hook(shell: Shell, bin: &str) -> String {
    match shell {
        Shell::Bash => format!(
            r#"
# Workspace names for {bin}
_{bin}_with_workspaces() {{
    _{bin} "$@"
    if [ "$COMP_CWORD" -eq 1 ]; then
        local cur="${{COMP_WORDS[1]}}"
        COMPREPLY+=($(compgen -W "$({bin} ls --list-completions 2>/dev/null)" -- "$cur"))
    fi
}}
complete -F _{bin}_with_workspaces -o bashdefault -o default {bin}
"#
        ),
        Shell::Zsh => format!(
            r#"
# Workspace names for {bin}
_{bin}_with_workspaces() {{
    if (( CURRENT == 2 )); then
        local -a workspaces
        workspaces=(${{(f)"$({bin} ls --list-completions 2>/dev/null)"}})
        compadd -a workspaces
    fi
    _{bin} "$@"
}}
compdef _{bin}_with_workspaces {bin}
"#
        ),
        Shell::Fish => format!(
            r#"
# Workspace names for {bin}
complete -c {bin} -n "__fish_use_subcommand" -f -a "({bin} ls --list-completions 2>/dev/null)"
"#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hooks_use_list_completions() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            let hook = workspace_name_hook(shell, "cws");
            assert!(hook.contains("cws ls --list-completions"), "{shell:?}");
        }
    }

    #[test]
    fn test_bash_hook_wraps_generated_function() {
        let hook = workspace_name_hook(Shell::Bash, "cws");
        assert!(hook.contains("_cws \"$@\""));
        assert!(hook.contains("complete -F _cws_with_workspaces"));
    }
}
