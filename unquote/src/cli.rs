//! CLI argument parsing using clap

use clap::Parser;

/// Edit a JSON string field as first-class JSON
#[derive(Parser, Debug)]
#[command(name = "unquote")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Open the string literal under line 3, column 14 in $EDITOR,
    # write the edited content back on save
    unquote config.json -p 3:14

    # Print the unescaped, pretty-printed payload without editing
    unquote config.json -p 3:14 --print

    # Show where the target is and what it contains, as JSON
    unquote config.json -p 3:14 --locate

    # Non-interactive write-back from an already-edited file
    unquote config.json -p 3:14 --apply payload.json

    # Use an explicit selection instead of a caret position
    unquote config.json -s 3:13-3:42 --print
"#)]
pub struct Args {
    /// File containing the embedded JSON string
    #[arg()]
    pub file: String,

    /// Caret position as line:col (1-based; columns are byte offsets)
    #[arg(short = 'p', long = "position")]
    pub position: Option<String>,

    /// Selection as line:col-line:col, covering the content with or
    /// without its quotes
    #[arg(short = 's', long = "select")]
    pub select: Option<String>,

    /// Print the editable document to stdout instead of editing
    #[arg(long = "print")]
    pub print: bool,

    /// Print the located target (body and range) as JSON and exit
    #[arg(long = "locate")]
    pub locate: bool,

    /// Write back the content of this file instead of launching an editor
    #[arg(long = "apply")]
    pub apply: Option<String>,

    /// Editor command to launch (defaults to $EDITOR, then vi)
    #[arg(long = "editor")]
    pub editor: Option<String>,

    /// Show verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
