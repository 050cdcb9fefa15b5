// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! [RoadSource] over [OpenStreetMap](https://www.openstreetmap.org/) data.

use std::convert::Infallible;
use std::io;
use std::path::Path;

use crate::{Coordinate, MemorySource, RoadSource, Segment};

mod profile;
mod reader;

pub use profile::{Profile, TagMatch, BICYCLE_PROFILE, CAR_PROFILE, FOOT_PROFILE};
pub use reader::{
    read_segments_from_buffer, read_segments_from_file, read_segments_from_io, Error, FileFormat,
    Options,
};

/// [RoadSource] with ways from an OSM file, loaded into memory up front.
///
/// Way geometry is kept as-is: every accepted way becomes a single segment,
/// unless it references nodes which were not loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OsmSource(MemorySource);

impl OsmSource {
    /// Loads all ways accepted by the given [Profile] from a file,
    /// detecting its [FileFormat] automatically.
    pub fn from_file<P: AsRef<Path>>(path: P, profile: &Profile<'_>) -> Result<Self, Error> {
        Self::with_options(&Options::new(profile), |o| read_segments_from_file(o, path))
    }

    /// Loads all ways accepted by the given [Profile] from a reader,
    /// detecting its [FileFormat] automatically.
    pub fn from_io<R: io::Read>(reader: R, profile: &Profile<'_>) -> Result<Self, Error> {
        Self::with_options(&Options::new(profile), |o| read_segments_from_io(o, reader))
    }

    /// Loads all ways accepted by the given [Profile] from a buffer,
    /// detecting its [FileFormat] automatically.
    pub fn from_buffer(data: &[u8], profile: &Profile<'_>) -> Result<Self, Error> {
        Self::with_options(&Options::new(profile), |o| read_segments_from_buffer(o, data))
    }

    /// Loads OSM data with explicit [Options], using one of the `read_segments_from_*` functions.
    pub fn with_options<'a, F>(options: &Options<'a>, read: F) -> Result<Self, Error>
    where
        F: FnOnce(&Options<'a>) -> Result<Vec<Segment>, Error>,
    {
        read(options).map(|segments| Self(MemorySource::new(segments)))
    }

    pub fn segments(&self) -> &[Segment] {
        self.0.segments()
    }
}

impl RoadSource for OsmSource {
    type Error = Infallible;

    /// Returns loaded ways, cut down to pieces touching the `radius` around `center`.
    fn fetch_segments(
        &self,
        center: Coordinate,
        radius: f64,
    ) -> Result<Vec<Segment>, Infallible> {
        self.0.fetch_segments(center, radius)
    }
}
