//! Command-line argument parsing.

use clap::{Parser, Subcommand};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "echoscape")]
#[command(about = "Audio-reactive mood visualizer with a generated phrase", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the phrase service (reads OPENAI_API_KEY)
    Serve {
        /// Bind host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Bind port
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },

    /// Open the visualizer window
    Visualize {
        /// Scene description sent to the phrase service
        #[arg(long, short)]
        description: Option<String>,

        /// Phrase service base URL
        #[arg(long, value_name = "URL", default_value = "http://127.0.0.1:3000")]
        server: String,

        /// Input device name (substring match; default device if omitted)
        #[arg(long, value_name = "NAME")]
        device: Option<String>,

        /// Start with the microphone off
        #[arg(long)]
        no_mic: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let args = Args::try_parse_from(["echoscape", "serve"]).unwrap();
        match args.command {
            Command::Serve { host, port } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 3000);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_visualize() {
        let args = Args::try_parse_from([
            "echoscape",
            "visualize",
            "--description",
            "forest at dawn",
            "--device",
            "USB",
        ])
        .unwrap();
        match args.command {
            Command::Visualize {
                description,
                server,
                device,
                no_mic,
            } => {
                assert_eq!(description.as_deref(), Some("forest at dawn"));
                assert_eq!(server, "http://127.0.0.1:3000");
                assert_eq!(device.as_deref(), Some("USB"));
                assert!(!no_mic);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["echoscape"]).is_err());
    }
}
