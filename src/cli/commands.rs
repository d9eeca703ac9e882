use crate::service::BoundingBox;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Finds the tile and group layers published by an online historical map viewer
#[derive(Parser, Debug)]
#[command(
    name = "tilefinder",
    about = "Find the tile layers published by an online historical map viewer",
    version,
    author,
    long_about = "tilefinder reads the map viewer's live layer configuration, extracts every \
                  tile layer and group layer it declares, optionally cleans the result against \
                  the feature service catalogue, and saves both tables as CSV. Per-layer \
                  metadata can then be retrieved from the feature service."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Fetch the live configuration and save the layer tables",
        long_about = "Locates the live configuration file, extracts tile and group layers \
                      and writes them as two CSV files.\n\n\
                      Examples:\n  \
                      tilefinder fetch\n  \
                      tilefinder fetch --clean\n  \
                      tilefinder fetch --tiles-output tiles --groups-output groups\n  \
                      tilefinder fetch --clean --name os_one_inch --metadata-dir meta"
    )]
    Fetch(FetchArgs),

    #[command(
        about = "List layers from the saved tables",
        long_about = "Prints the tile layers (or group layers with --groups) saved by a \
                      previous fetch.\n\n\
                      Examples:\n  \
                      tilefinder list\n  \
                      tilefinder list --groups --format json"
    )]
    List(ListArgs),

    #[command(
        about = "Retrieve feature metadata for saved layers",
        long_about = "Looks each name up in the saved tables and requests its features from \
                      the feature service, writing <name>.json per layer.\n\n\
                      Examples:\n  \
                      tilefinder metadata os_one_inch\n  \
                      tilefinder metadata os_one_inch --bbox -4.5,55.8,-3.9,56.1"
    )]
    Metadata(MetadataArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct FetchArgs {
    #[arg(long, help = "Drop records the feature service cannot serve")]
    pub clean: bool,

    #[arg(
        long,
        value_name = "FILE",
        help = "Tile layer table (.csv is appended when missing)"
    )]
    pub tiles_output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Group layer table (.csv is appended when missing)"
    )]
    pub groups_output: Option<PathBuf>,

    #[arg(
        long = "name",
        value_name = "NAME",
        help = "Also retrieve metadata for this layer (repeatable)"
    )]
    pub names: Vec<String>,

    #[arg(
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Directory for metadata documents"
    )]
    pub metadata_dir: PathBuf,

    #[arg(long, value_name = "SECONDS", help = "Per-request timeout in seconds")]
    pub timeout: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, help = "List group layers instead of tile layers")]
    pub groups: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "FILE", help = "Tile layer table to read")]
    pub tiles_file: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Group layer table to read")]
    pub groups_file: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct MetadataArgs {
    #[arg(value_name = "NAME", required = true, help = "Layer names to query")]
    pub names: Vec<String>,

    #[arg(
        long,
        value_name = "MINX,MINY,MAXX,MAXY[,CRS]",
        allow_hyphen_values = true,
        value_parser = parse_bbox,
        help = "Bounding box to query (defaults to the layer's declared extent)"
    )]
    pub bbox: Option<BoundingBox>,

    #[arg(long = "srsname", value_name = "SRS", help = "Output spatial reference system")]
    pub srs_name: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Directory for metadata documents"
    )]
    pub output_dir: PathBuf,

    #[arg(long, value_name = "FILE", help = "Tile layer table to read")]
    pub tiles_file: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Group layer table to read")]
    pub groups_file: Option<PathBuf>,

    #[arg(long, value_name = "SECONDS", help = "Per-request timeout in seconds")]
    pub timeout: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_bbox(s: &str) -> Result<BoundingBox, String> {
    s.parse::<BoundingBox>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_fetch_args() {
        let args = CliArgs::parse_from(["tilefinder", "fetch"]);
        match args.command {
            Commands::Fetch(fetch_args) => {
                assert!(!fetch_args.clean);
                assert!(fetch_args.tiles_output.is_none());
                assert!(fetch_args.groups_output.is_none());
                assert!(fetch_args.names.is_empty());
                assert_eq!(fetch_args.metadata_dir, PathBuf::from("."));
                assert!(fetch_args.timeout.is_none());
            }
            _ => panic!("Expected Fetch command"),
        }
    }

    #[test]
    fn test_fetch_with_options() {
        let args = CliArgs::parse_from([
            "tilefinder",
            "fetch",
            "--clean",
            "--tiles-output",
            "tiles",
            "--groups-output",
            "out/groups.csv",
            "--name",
            "foo",
            "--name",
            "bar",
            "--timeout",
            "30",
        ]);
        match args.command {
            Commands::Fetch(fetch_args) => {
                assert!(fetch_args.clean);
                assert_eq!(fetch_args.tiles_output, Some(PathBuf::from("tiles")));
                assert_eq!(
                    fetch_args.groups_output,
                    Some(PathBuf::from("out/groups.csv"))
                );
                assert_eq!(fetch_args.names, vec!["foo", "bar"]);
                assert_eq!(fetch_args.timeout, Some(30));
            }
            _ => panic!("Expected Fetch command"),
        }
    }

    #[test]
    fn test_list_command() {
        let args = CliArgs::parse_from(["tilefinder", "list", "--groups", "--format", "yaml"]);
        match args.command {
            Commands::List(list_args) => {
                assert!(list_args.groups);
                assert_eq!(list_args.format, OutputFormatArg::Yaml);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_metadata_with_negative_bbox() {
        let args = CliArgs::parse_from([
            "tilefinder",
            "metadata",
            "foo",
            "--bbox",
            "-4.5,55.8,-3.9,56.1",
            "--srsname",
            "EPSG:27700",
        ]);
        match args.command {
            Commands::Metadata(metadata_args) => {
                assert_eq!(metadata_args.names, vec!["foo"]);
                assert_eq!(
                    metadata_args.bbox,
                    Some(BoundingBox::wgs84(-4.5, 55.8, -3.9, 56.1))
                );
                assert_eq!(metadata_args.srs_name.as_deref(), Some("EPSG:27700"));
            }
            _ => panic!("Expected Metadata command"),
        }
    }

    #[test]
    fn test_metadata_requires_name() {
        assert!(CliArgs::try_parse_from(["tilefinder", "metadata"]).is_err());
    }

    #[test]
    fn test_metadata_rejects_bad_bbox() {
        assert!(
            CliArgs::try_parse_from(["tilefinder", "metadata", "foo", "--bbox", "1,2"]).is_err()
        );
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["tilefinder", "-v", "config"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["tilefinder", "--log-level", "debug", "config"]);
        assert_eq!(args.log_level, Some("debug".to_string()));
        assert!(matches!(args.command, Commands::Config(_)));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(CliArgs::try_parse_from(["tilefinder", "-q", "-v", "config"]).is_err());
    }
}
