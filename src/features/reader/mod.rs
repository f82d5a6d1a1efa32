// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use geojson::GeoJson;
use graph_builder::GraphBuilder;

use crate::{Buildings, Graph};

mod graph_builder;
mod model;
mod parse;

/// Format of the input GeoJSON file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    /// Unknown format - guess the compression based on the content
    #[default]
    Unknown,

    /// Force uncompressed [GeoJSON](https://geojson.org/)
    Json,

    /// Force [GeoJSON](https://geojson.org/)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    JsonGz,

    /// Force [GeoJSON](https://geojson.org/)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    JsonBz2,
}

impl FileFormat {
    /// Guesses the format based on the first few bytes of a file.
    fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1f, 0x8b]) {
            Self::JsonGz
        } else if prefix.starts_with(b"BZh") {
            Self::JsonBz2
        } else {
            Self::Json
        }
    }
}

/// Additional controls for interpreting campus features as a routing [Graph].
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,

    /// Filter features by a specific bounding box. In order: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat). A feature is skipped if any of its positions is outside.
    /// Ignored if all values are set to zero, or at least one of them is not finite.
    pub bbox: [f64; 4],
}

/// Errors which prevent the whole input from being loaded.
///
/// Individual invalid features never cause an error; they are logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("expected a FeatureCollection, got a {0}")]
    NotAFeatureCollection(&'static str),
}

fn read_feature_collection<R: io::Read>(reader: R) -> Result<Vec<geojson::Feature>, Error> {
    into_features(serde_json::from_reader(reader)?)
}

fn into_features(value: serde_json::Value) -> Result<Vec<geojson::Feature>, Error> {
    match GeoJson::from_json_value(value)? {
        GeoJson::FeatureCollection(fc) => Ok(fc.features),
        GeoJson::Feature(_) => Err(Error::NotAFeatureCollection("Feature")),
        GeoJson::Geometry(_) => Err(Error::NotAFeatureCollection("Geometry")),
    }
}

/// Parse campus features from a reader into a [Graph] and [Buildings] as per the provided [Options].
///
/// The provided stream is always wrapped in a buffered reader.
pub fn add_features_from_io<R: io::Read>(
    g: &mut Graph,
    buildings: &mut Buildings,
    options: &Options,
    reader: R,
) -> Result<(), Error> {
    let mut b = io::BufReader::new(reader);
    let format = match options.file_format {
        FileFormat::Unknown => {
            let format = FileFormat::detect(b.fill_buf()?);
            log::debug!("detected input format: {format:?}");
            format
        }
        f => f,
    };

    let features = match format {
        FileFormat::Unknown | FileFormat::Json => read_feature_collection(b)?,

        FileFormat::JsonGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            read_feature_collection(io::BufReader::new(d))?
        }

        FileFormat::JsonBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            read_feature_collection(io::BufReader::new(d))?
        }
    };

    GraphBuilder::new(g, buildings, options).add_features(features);
    Ok(())
}

/// Parse campus features from a file at the provided path into a [Graph] and [Buildings]
/// as per the provided [Options].
pub fn add_features_from_file<P: AsRef<Path>>(
    g: &mut Graph,
    buildings: &mut Buildings,
    options: &Options,
    path: P,
) -> Result<(), Error> {
    let f = File::open(path)?;
    add_features_from_io(g, buildings, options, f)
}

/// Parse campus features from a static buffer into a [Graph] and [Buildings]
/// as per the provided [Options].
pub fn add_features_from_buffer(
    g: &mut Graph,
    buildings: &mut Buildings,
    options: &Options,
    data: &[u8],
) -> Result<(), Error> {
    let format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(data),
        f => f,
    };

    if format == FileFormat::Json {
        // Fast path is available for in-memory JSON data
        let features = into_features(serde_json::from_slice(data)?)?;
        GraphBuilder::new(g, buildings, options).add_features(features);
        Ok(())
    } else {
        // Wrap the buffer in a cursor and use the IO path
        let cursor = io::Cursor::new(data);
        let options = Options {
            file_format: format,
            ..options.clone()
        };
        add_features_from_io(g, buildings, &options, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_format() {
        assert_eq!(FileFormat::detect(&[0x1f, 0x8b, 0x08]), FileFormat::JsonGz);
        assert_eq!(FileFormat::detect(b"BZh91AY"), FileFormat::JsonBz2);
        assert_eq!(FileFormat::detect(b"{\"type\":"), FileFormat::Json);
        assert_eq!(FileFormat::detect(b""), FileFormat::Json);
    }

    #[test]
    fn not_a_feature_collection() {
        let mut g = Graph::default();
        let mut b = Buildings::default();
        let data = br#"{"type": "Point", "coordinates": [-80.54, 43.47]}"#;

        let err = add_features_from_buffer(&mut g, &mut b, &Options::default(), data).unwrap_err();
        assert!(matches!(err, Error::NotAFeatureCollection("Geometry")));
    }

    #[test]
    fn invalid_json() {
        let mut g = Graph::default();
        let mut b = Buildings::default();

        let err = add_features_from_buffer(&mut g, &mut b, &Options::default(), b"{\"type\": ")
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
