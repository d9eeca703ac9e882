//! Command handlers. Each returns the process exit code.

use super::commands::{ConfigArgs, FetchArgs, ListArgs, MetadataArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::FinderConfig;
use crate::dataset::Dataset;
use crate::error::FinderError;
use crate::http::HttpFetcher;
use crate::metadata::{MetadataRequest, MetadataResolver, QueryLog, QueryStore};
use crate::output::{load_dataset, save_dataset, write_feature_document};
use crate::pipeline::TileLayerFinder;
use crate::service::{Catalogue, FeatureService, WfsClient};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<FinderError>() {
        Some(finder_err) => eprintln!("{}", finder_err.help_message()),
        None => eprintln!("Error: {:#}", err),
    }
}

fn exit_code(result: Result<bool>) -> i32 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            report(&e);
            1
        }
    }
}

fn validated(mut config: FinderConfig, timeout: Option<u64>) -> Result<FinderConfig> {
    if timeout.is_some() {
        config.request_timeout_secs = timeout;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Resolve each name and write its document. Failures are reported and skipped.
fn write_metadata<S: FeatureService>(
    service: S,
    catalogue: &Catalogue,
    dataset: &Dataset,
    names: &[String],
    request: &MetadataRequest,
    output_dir: &Path,
) -> Result<bool> {
    let log = QueryLog::new();
    let resolver = MetadataResolver::new(service, catalogue, &log);
    let mut documents = Vec::new();
    let mut all_ok = true;

    for name in names {
        let written = resolver.resolve(dataset, name, request).and_then(|doc| {
            write_feature_document(output_dir, &doc)?;
            Ok(doc)
        });
        match written {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                error!("Metadata for '{}' failed: {}", name, e);
                eprintln!("{}", e.help_message());
                all_ok = false;
            }
        }
    }

    info!("Queried layers: {}", log.names().join(", "));
    if !documents.is_empty() {
        let summary = OutputFormatter::new(OutputFormat::Human).format_documents(&documents)?;
        print!("{}", summary);
    }
    Ok(all_ok)
}

pub fn handle_fetch(args: &FetchArgs, config: FinderConfig) -> i32 {
    exit_code(run_fetch(args, config))
}

fn run_fetch(args: &FetchArgs, config: FinderConfig) -> Result<bool> {
    let config = validated(config, args.timeout)?;
    debug!("Configuration: {:?}", config);

    let fetcher = HttpFetcher::new(config.request_timeout())?;
    let service = WfsClient::new(&fetcher, &config.wfs_url, &config.wfs_version);
    let finder = TileLayerFinder::new(&fetcher, &config.status_url, &service);

    let dataset = finder.get_data(args.clean)?;

    let tiles_path = args.tiles_output.as_ref().unwrap_or(&config.tiles_file);
    let groups_path = args.groups_output.as_ref().unwrap_or(&config.groups_file);
    let (tiles_path, groups_path) = save_dataset(&dataset, tiles_path, groups_path)?;
    println!(
        "Saved {} tile layers to {} and {} group layers to {}",
        dataset.tiles().len(),
        tiles_path.display(),
        dataset.groups().len(),
        groups_path.display()
    );

    if args.names.is_empty() {
        return Ok(true);
    }

    let catalogue = finder.catalogue()?;
    write_metadata(
        &service,
        &catalogue,
        &dataset,
        &args.names,
        &MetadataRequest::default(),
        &args.metadata_dir,
    )
}

pub fn handle_list(args: &ListArgs, config: FinderConfig) -> i32 {
    exit_code(run_list(args, config))
}

fn run_list(args: &ListArgs, config: FinderConfig) -> Result<bool> {
    let tiles_path = args.tiles_file.as_ref().unwrap_or(&config.tiles_file);
    let groups_path = args.groups_file.as_ref().unwrap_or(&config.groups_file);
    let dataset = load_dataset(tiles_path, groups_path)?;

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    let output = if args.groups {
        formatter.format_groups(dataset.groups())?
    } else {
        formatter.format_tiles(dataset.tiles())?
    };
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(true)
}

pub fn handle_metadata(args: &MetadataArgs, config: FinderConfig) -> i32 {
    exit_code(run_metadata(args, config))
}

fn run_metadata(args: &MetadataArgs, config: FinderConfig) -> Result<bool> {
    let config = validated(config, args.timeout)?;

    let tiles_path = args.tiles_file.as_ref().unwrap_or(&config.tiles_file);
    let groups_path = args.groups_file.as_ref().unwrap_or(&config.groups_file);
    let dataset = load_dataset(tiles_path, groups_path)
        .context("Failed to load saved layer tables; run 'tilefinder fetch' first")?;
    info!(
        "Loaded {} tile layers and {} group layers",
        dataset.tiles().len(),
        dataset.groups().len()
    );

    let fetcher = HttpFetcher::new(config.request_timeout())?;
    let service = WfsClient::new(&fetcher, &config.wfs_url, &config.wfs_version);
    let catalogue = service.catalogue()?;

    let request = MetadataRequest {
        bbox: args.bbox.clone(),
        srs_name: args.srs_name.clone(),
    };
    write_metadata(
        &service,
        &catalogue,
        &dataset,
        &args.names,
        &request,
        &args.output_dir,
    )
}

pub fn handle_config(args: &ConfigArgs, config: FinderConfig) -> i32 {
    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    let result = formatter.format_config(&config).map(|output| {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
        if let Err(e) = config.validate() {
            eprintln!("Warning: {}", e);
        }
        true
    });
    exit_code(result)
}
