// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::{Coordinate, Segment};

use super::{model, Options};

/// Helper object used for storing state related to converting
/// [OSM features](super::model::Feature) into road [Segments](Segment).
///
/// Nodes must precede the ways referencing them, as in every
/// [sorted](https://wiki.openstreetmap.org/wiki/OSM_XML#Contents) OSM file.
pub(super) struct SegmentBuilder<'a> {
    options: &'a Options<'a>,
    nodes: HashMap<i64, Coordinate>,
    segments: Vec<Segment>,
    ignore_bbox: bool,
}

impl<'a> SegmentBuilder<'a> {
    /// Create a new, empty segment builder.
    pub(super) fn new(options: &'a Options<'a>) -> Self {
        let ignore_bbox =
            options.bbox.iter().all(|&x| x == 0.0) || options.bbox.iter().any(|x| !x.is_finite());
        if ignore_bbox && options.bbox.iter().any(|&x| x != 0.0) {
            log::warn!("ignoring invalid bounding box {:?}", options.bbox);
        }

        Self {
            options,
            nodes: HashMap::default(),
            segments: Vec::default(),
            ignore_bbox,
        }
    }

    /// Add all features from the provided iterator, stopping at the first error.
    pub(super) fn add_features<I, E>(&mut self, features: I) -> Result<(), E>
    where
        I: IntoIterator<Item = Result<model::Feature, E>>,
    {
        for f in features {
            match f? {
                model::Feature::Node(n) => self.add_node(n),
                model::Feature::Way(w) => self.add_way(w),
            }
        }
        Ok(())
    }

    /// Returns all collected segments, in the order of ways in the input.
    pub(super) fn finish(self) -> Vec<Segment> {
        log::debug!(
            "loaded {} road segments over {} nodes with the {} profile",
            self.segments.len(),
            self.nodes.len(),
            self.options.profile.name,
        );
        self.segments
    }

    fn add_node(&mut self, n: model::Node) {
        if self.is_in_bbox(n.position) {
            self.nodes.insert(n.id, n.position);
        }
    }

    fn is_in_bbox(&self, p: Coordinate) -> bool {
        if self.ignore_bbox {
            return true;
        }
        let [min_lon, min_lat, max_lon, max_lat] = self.options.bbox;
        p.lat >= min_lat && p.lat <= max_lat && p.lon >= min_lon && p.lon <= max_lon
    }

    fn add_way(&mut self, w: model::Way) {
        if !self.options.profile.accepts(&w.tags) {
            return;
        }

        // Split the way at references to unknown nodes (outside of the bbox
        // or missing from the file), so that no edge jumps over a gap.
        let mut current: Segment = Vec::default();
        for node_id in &w.nodes {
            match self.nodes.get(node_id) {
                Some(&position) => current.push(position),
                None => {
                    log::trace!("way {} references unknown node {}", w.id, node_id);
                    self.push_segment(std::mem::take(&mut current));
                }
            }
        }
        self.push_segment(current);
    }

    fn push_segment(&mut self, segment: Segment) {
        if segment.len() >= 2 {
            self.segments.push(segment);
        }
    }
}
