use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "grabtext", version, about = "Select a screen region and extract its text")]
pub struct Cli {
    /// JSON config file; environment variables still take precedence
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Default, Subcommand)]
pub enum Command {
    /// Wait for the hotkey and run capture sessions
    #[default]
    Listen,
    /// Capture a fixed screen rectangle and print its text
    Region {
        #[arg(long, allow_negative_numbers = true)]
        x: i32,
        #[arg(long, allow_negative_numbers = true)]
        y: i32,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
    },
    /// Print the text of an image file
    File { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_is_default() {
        let cli = Cli::try_parse_from(["grabtext"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Command::Listen));
    }

    #[test]
    fn test_region_args() {
        let cli = Cli::try_parse_from([
            "grabtext", "region", "--x", "-1920", "--y", "40", "--width", "300", "--height", "90",
            "--log-json",
        ])
        .unwrap();

        assert!(cli.log_json);
        match cli.command {
            Some(Command::Region {
                x,
                y,
                width,
                height,
            }) => assert_eq!((x, y, width, height), (-1920, 40, 300, 90)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_file_with_config() {
        let cli =
            Cli::try_parse_from(["grabtext", "--config", "grabtext.json", "file", "shot.png"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("grabtext.json")));
        assert!(matches!(
            cli.command,
            Some(Command::File { path }) if path == PathBuf::from("shot.png")
        ));
    }

    #[test]
    fn test_region_requires_size() {
        assert!(Cli::try_parse_from(["grabtext", "region", "--x", "0", "--y", "0"]).is_err());
    }
}
