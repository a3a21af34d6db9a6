use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    kcm completions bash > ~/.bash_completion.d/kcm\n\n\
                  Generate zsh completions:\n    kcm completions zsh > ~/.zfunc/_kcm\n\n\
                  Generate fish completions:\n    kcm completions fish > ~/.config/fish/completions/kcm.fish")]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
