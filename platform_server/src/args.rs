//! Command line options

use std::path::PathBuf;

use clap::Parser;

/// Headless platformer server driven by scripted bots
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "platform_server", version, about)]
pub struct Args {
    /// Engine configuration file (`.toml` or `.ron`)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// World definition file (`.toml` or `.ron`)
    #[arg(long, value_name = "FILE")]
    pub world: Option<PathBuf>,

    /// Scripted clients to attach
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub bots: usize,

    /// Stop after this many ticks (overrides `tick.max_ticks`)
    #[arg(long, value_name = "N")]
    pub ticks: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("platform_server").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.config, None);
        assert_eq!(args.world, None);
        assert_eq!(args.bots, 3);
        assert_eq!(args.ticks, None);
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&["--config", "engine.toml", "--world", "w.ron", "--bots", "5", "--ticks", "600"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("engine.toml")));
        assert_eq!(args.world, Some(PathBuf::from("w.ron")));
        assert_eq!(args.bots, 5);
        assert_eq!(args.ticks, Some(600));
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["--bots"]).is_err());
        assert!(parse(&["--bots", "many"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
