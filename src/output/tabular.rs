//! CSV persistence of a [`Dataset`]
//!
//! Each table starts with an unnamed index column, which is written as a running row
//! number and ignored on load. Group members are stored as a list literal such as
//! `['a', 'b']` in the `Layers` column.

use crate::dataset::Dataset;
use crate::error::{FinderError, Result};
use crate::extract::{GroupLayerRecord, TileLayerRecord};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const TILE_HEADERS: [&str; 6] = ["", "Name", "Title", "Typename", "XYZ URL", "Max Z"];
pub const GROUP_HEADERS: [&str; 5] = ["", "Name", "Title", "Typename", "Layers"];

/// Append `.csv` unless the name already ends with it
pub fn ensure_csv_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.to_string_lossy().ends_with(".csv") {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".csv");
    PathBuf::from(name)
}

fn format_members(members: &[String]) -> String {
    let quoted: Vec<String> = members.iter().map(|m| format!("'{}'", m)).collect();
    format!("[{}]", quoted.join(", "))
}

fn parse_members(cell: &str) -> Vec<String> {
    let inner = cell.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    inner
        .split(',')
        .map(|m| m.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whole numbers only; spreadsheet round-trips turn `12` into `12.0`
fn parse_max_zoom(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    if let Ok(z) = cell.parse::<u32>() {
        return Some(z);
    }
    match cell.parse::<f64>() {
        Ok(z) if z >= 0.0 && z.fract() == 0.0 && z <= f64::from(u32::MAX) => Some(z as u32),
        _ => {
            warn!(value = cell, "Ignoring unparseable Max Z");
            None
        }
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Column lookup by header name; missing columns and empty cells read as absent.
/// Cell text is returned as written, so padded titles survive a round trip.
struct Columns {
    headers: StringRecord,
}

impl Columns {
    fn get<'r>(&self, row: &'r StringRecord, header: &str) -> Option<&'r str> {
        let idx = self.headers.iter().position(|h| h.trim() == header)?;
        row.get(idx).filter(|v| !v.is_empty())
    }

    fn owned(&self, row: &StringRecord, header: &str) -> Option<String> {
        self.get(row, header).map(str::to_string)
    }
}

pub fn write_tiles<W: Write>(writer: W, tiles: &[TileLayerRecord]) -> csv::Result<()> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(TILE_HEADERS)?;
    for (i, tile) in tiles.iter().enumerate() {
        let max_zoom = tile.max_zoom.map(|z| z.to_string()).unwrap_or_default();
        csv.write_record([
            i.to_string().as_str(),
            tile.name.as_str(),
            opt(&tile.title),
            opt(&tile.typename),
            opt(&tile.xyz_url),
            max_zoom.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_groups<W: Write>(writer: W, groups: &[GroupLayerRecord]) -> csv::Result<()> {
    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(GROUP_HEADERS)?;
    for (i, group) in groups.iter().enumerate() {
        csv.write_record([
            i.to_string().as_str(),
            group.name.as_str(),
            opt(&group.title),
            opt(&group.typename),
            format_members(&group.members).as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn read_tiles<R: Read>(reader: R) -> csv::Result<Vec<TileLayerRecord>> {
    let mut csv = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns {
        headers: csv.headers()?.clone(),
    };

    let mut tiles = Vec::new();
    for row in csv.records() {
        let row = row?;
        let Some(name) = columns.owned(&row, "Name") else {
            continue;
        };
        tiles.push(TileLayerRecord {
            name,
            title: columns.owned(&row, "Title"),
            typename: columns.owned(&row, "Typename"),
            xyz_url: columns.owned(&row, "XYZ URL"),
            max_zoom: columns.get(&row, "Max Z").and_then(parse_max_zoom),
        });
    }
    Ok(tiles)
}

pub fn read_groups<R: Read>(reader: R) -> csv::Result<Vec<GroupLayerRecord>> {
    let mut csv = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns {
        headers: csv.headers()?.clone(),
    };

    let mut groups = Vec::new();
    for row in csv.records() {
        let row = row?;
        let Some(name) = columns.owned(&row, "Name") else {
            continue;
        };
        groups.push(GroupLayerRecord {
            name,
            title: columns.owned(&row, "Title"),
            typename: columns.owned(&row, "Typename"),
            members: columns.get(&row, "Layers").map(parse_members).unwrap_or_default(),
        });
    }
    Ok(groups)
}

fn create(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FinderError::io(parent, e))?;
    }
    std::fs::File::create(path).map_err(|e| FinderError::io(path, e))
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> FinderError + '_ {
    move |source| FinderError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Write both tables, returning the paths actually written
pub fn save_dataset(
    dataset: &Dataset,
    tiles_path: impl AsRef<Path>,
    groups_path: impl AsRef<Path>,
) -> Result<(PathBuf, PathBuf)> {
    let tiles_path = ensure_csv_extension(tiles_path);
    let groups_path = ensure_csv_extension(groups_path);

    write_tiles(create(&tiles_path)?, dataset.tiles()).map_err(csv_error(&tiles_path))?;
    info!("Saved tile dataset to '{}'", tiles_path.display());

    write_groups(create(&groups_path)?, dataset.groups()).map_err(csv_error(&groups_path))?;
    info!("Saved group dataset to '{}'", groups_path.display());

    Ok((tiles_path, groups_path))
}

pub fn load_dataset(tiles_path: impl AsRef<Path>, groups_path: impl AsRef<Path>) -> Result<Dataset> {
    let tiles_path = ensure_csv_extension(tiles_path);
    let groups_path = ensure_csv_extension(groups_path);

    let open = |path: &Path| std::fs::File::open(path).map_err(|e| FinderError::io(path, e));
    let tiles = read_tiles(open(&tiles_path)?).map_err(csv_error(&tiles_path))?;
    let groups = read_groups(open(&groups_path)?).map_err(csv_error(&groups_path))?;

    let mut dataset = Dataset::new();
    for tile in tiles {
        dataset.insert_tile(tile);
    }
    for group in groups {
        dataset.insert_group(group);
    }
    Ok(dataset)
}
