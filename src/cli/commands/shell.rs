//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::TimeCraftError;

/// Execute completions command: the script, or how to install it.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell, install: bool) -> Result<String, TimeCraftError> {
    if install {
        return Ok(completion_install_instructions(shell));
    }

    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "timecraft", &mut buf);
    String::from_utf8(buf)
        .map_err(|e| TimeCraftError::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc or ~/.bash_profile:
source <(timecraft completions bash)

# Or save to a file:
timecraft completions bash > /usr/local/etc/bash_completion.d/timecraft
"
        .to_string(),

        Shell::Zsh => r"# Save to your fpath:
timecraft completions zsh > ~/.zsh/completions/_timecraft
# Then add to ~/.zshrc:
fpath=(~/.zsh/completions $fpath)
autoload -Uz compinit && compinit
"
        .to_string(),

        Shell::Fish => r"# Save to fish completions directory:
timecraft completions fish > ~/.config/fish/completions/timecraft.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
timecraft completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        _ => format!(
            "# Save the output of `timecraft completions {shell}` where your shell loads \
             completions\n"
        ),
    }
}
