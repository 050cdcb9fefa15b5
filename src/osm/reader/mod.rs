// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use segment_builder::SegmentBuilder;

use crate::osm::Profile;
use crate::Segment;

mod model;
mod segment_builder;
mod xml;

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    #[default]
    Unknown,

    /// Force uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

impl FileFormat {
    /// Guesses the format of a file from its first few bytes.
    /// Anything without a known compression signature is assumed to be plain XML.
    pub fn detect(header: &[u8]) -> Self {
        if header.starts_with(&[0x1F, 0x8B]) {
            Self::XmlGz
        } else if header.starts_with(b"BZh") {
            Self::XmlBz2
        } else {
            Self::Xml
        }
    }
}

/// Error conditions which may occur while reading OSM data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid OSM XML: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Additional controls for interpreting OSM data as road [Segments](Segment).
#[derive(Debug)]
pub struct Options<'a> {
    /// Which OSM ways are considered traversable.
    pub profile: &'a Profile<'a>,

    /// Format of the input data.
    pub file_format: FileFormat,

    /// Filter nodes by a specific bounding box. In order: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat). Ignored if all values are set to zero, or at least one
    /// of them is not finite.
    ///
    /// Ways are split wherever they leave the bounding box.
    pub bbox: [f64; 4],
}

impl<'a> Options<'a> {
    /// Options with the given profile, automatic format detection and no bounding box.
    pub fn new(profile: &'a Profile<'a>) -> Self {
        Self {
            profile,
            file_format: FileFormat::Unknown,
            bbox: [0.0; 4],
        }
    }
}

/// Parse traversable road [Segments](Segment) from OSM data in a reader,
/// as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn read_segments_from_io<R: io::Read>(
    options: &Options<'_>,
    reader: R,
) -> Result<Vec<Segment>, Error> {
    let mut b = io::BufReader::new(reader);
    let format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        f => f,
    };
    log::debug!("reading OSM data as {:?}", format);

    let mut builder = SegmentBuilder::new(options);
    match format {
        FileFormat::Unknown | FileFormat::Xml => {
            builder.add_features(xml::Reader::from_io(b))?;
        }

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            let b = io::BufReader::new(d);
            builder.add_features(xml::Reader::from_io(b))?;
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            let b = io::BufReader::new(d);
            builder.add_features(xml::Reader::from_io(b))?;
        }
    }
    Ok(builder.finish())
}

/// Parse traversable road [Segments](Segment) from an OSM file at the provided path,
/// as per the provided [Options].
pub fn read_segments_from_file<P: AsRef<Path>>(
    options: &Options<'_>,
    path: P,
) -> Result<Vec<Segment>, Error> {
    let f = File::open(path)?;
    read_segments_from_io(options, f)
}

/// Parse traversable road [Segments](Segment) from a static buffer with OSM data,
/// as per the provided [Options].
pub fn read_segments_from_buffer(
    options: &Options<'_>,
    data: &[u8],
) -> Result<Vec<Segment>, Error> {
    let format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(data),
        f => f,
    };

    if format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        let mut builder = SegmentBuilder::new(options);
        builder.add_features(xml::Reader::from_buffer(data))?;
        Ok(builder.finish())
    } else {
        // Wrap the buffer in a cursor and use the IO path
        let cursor = io::Cursor::new(data);
        read_segments_from_io(options, cursor)
    }
}
