use crate::error::{FinderError, Result};
use crate::metadata::FeatureDocument;
use std::path::{Path, PathBuf};
use tracing::info;

/// `<dir>/<name>.json`
pub fn metadata_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.json", name))
}

/// Write the raw feature response for a layer, returning the file path
pub fn write_feature_document(dir: impl AsRef<Path>, document: &FeatureDocument) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| FinderError::io(dir, e))?;

    let path = metadata_path(dir, &document.name);
    std::fs::write(&path, &document.body).map_err(|e| FinderError::io(&path, e))?;
    info!("Wrote metadata for '{}' to '{}'", document.name, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::BoundingBox;

    #[test]
    fn test_write_feature_document() {
        let dir = tempfile::tempdir().unwrap();
        let document = FeatureDocument {
            name: "foo".to_string(),
            typename: "nls:foo".to_string(),
            bbox: BoundingBox::service_area(),
            srs_name: "EPSG:4326".to_string(),
            body: br#"{"type":"FeatureCollection"}"#.to_vec(),
        };

        let out = dir.path().join("meta");
        let path = write_feature_document(&out, &document).unwrap();
        assert_eq!(path, out.join("foo.json"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            r#"{"type":"FeatureCollection"}"#
        );
    }
}
