// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Describes which OSM ways are traversable for a specific mode of transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile<'a> {
    /// Human readable name of the profile,
    /// customary the most specific [access tag](https://wiki.openstreetmap.org/wiki/Key:access).
    ///
    /// This value is not used for actual OSM data interpretation.
    pub name: &'a str,

    /// Array of tags which mark OSM ways as traversable.
    ///
    /// A way is accepted if any of its tags is an exact key and value match of
    /// any [TagMatch]. E.g. `highway=footway` accepts footways, but not
    /// `highway=footway_link` nor `footway=sidewalk`.
    pub ways: &'a [TagMatch<'a>],

    /// Array of OSM [access tags](https://wiki.openstreetmap.org/wiki/Key:access#Land-based_transportation)
    /// (in order from least to most specific) to consider when checking for road prohibitions.
    /// See [Profile::is_allowed].
    pub access: &'a [&'a str],

    /// Force no travel over [motorroad=yes](https://wiki.openstreetmap.org/wiki/Key:motorroad) ways.
    pub disallow_motorroad: bool,
}

/// Exact key and value of an OSM tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatch<'a> {
    /// Key of an OSM tag, e.g. "highway" or "railway".
    pub key: &'a str,

    /// Value under [TagMatch::key], e.g. "residential" or "platform".
    pub value: &'a str,
}

impl<'a> TagMatch<'a> {
    pub const fn new(key: &'a str, value: &'a str) -> Self {
        Self { key, value }
    }

    fn matches(&self, tags: &HashMap<String, String>) -> bool {
        tags.get(self.key).map(|v| v.as_str()) == Some(self.value)
    }
}

impl<'a> Profile<'a> {
    /// Checks if a way with given tags may be used: it must match any of
    /// [Profile::ways] and not be disallowed by [Profile::is_allowed].
    pub fn accepts(&self, tags: &HashMap<String, String>) -> bool {
        self.ways.iter().any(|m| m.matches(tags)) && self.is_allowed(tags)
    }

    /// Checks if the way is traversable, by considering motor roads ([Profile::disallow_motorroad])
    /// and access tags ([Profile::access]).
    pub fn is_allowed(&self, tags: &HashMap<String, String>) -> bool {
        // Check against the motorroad tag
        if self.disallow_motorroad && tags.get("motorroad").map(|v| v.as_str()) == Some("yes") {
            return false;
        }

        // Check against the access tags
        match self
            .access
            .iter()
            .rev()
            .find_map(|&mode| tags.get(mode).map(|v| v.as_str()))
        {
            Some("no") | Some("private") => false,
            _ => true,
        }
    }
}

/// Example [Profile] for cars, with appropriate
/// [access tags](https://wiki.openstreetmap.org/wiki/Key:access).
pub const CAR_PROFILE: Profile = Profile {
    name: "motorcar",
    ways: &[
        TagMatch::new("highway", "motorway"),
        TagMatch::new("highway", "motorway_link"),
        TagMatch::new("highway", "trunk"),
        TagMatch::new("highway", "trunk_link"),
        TagMatch::new("highway", "primary"),
        TagMatch::new("highway", "primary_link"),
        TagMatch::new("highway", "secondary"),
        TagMatch::new("highway", "secondary_link"),
        TagMatch::new("highway", "tertiary"),
        TagMatch::new("highway", "tertiary_link"),
        TagMatch::new("highway", "unclassified"),
        TagMatch::new("highway", "minor"),
        TagMatch::new("highway", "residential"),
        TagMatch::new("highway", "living_street"),
        TagMatch::new("highway", "track"),
        TagMatch::new("highway", "service"),
    ],
    access: &["access", "vehicle", "motor_vehicle", "motorcar"],
    disallow_motorroad: false,
};

/// Example [Profile] for bicycles, with appropriate
/// [access tags](https://wiki.openstreetmap.org/wiki/Key:access).
pub const BICYCLE_PROFILE: Profile = Profile {
    name: "bicycle",
    ways: &[
        TagMatch::new("highway", "trunk"),
        TagMatch::new("highway", "trunk_link"),
        TagMatch::new("highway", "primary"),
        TagMatch::new("highway", "primary_link"),
        TagMatch::new("highway", "secondary"),
        TagMatch::new("highway", "secondary_link"),
        TagMatch::new("highway", "tertiary"),
        TagMatch::new("highway", "tertiary_link"),
        TagMatch::new("highway", "unclassified"),
        TagMatch::new("highway", "minor"),
        TagMatch::new("highway", "cycleway"),
        TagMatch::new("highway", "residential"),
        TagMatch::new("highway", "living_street"),
        TagMatch::new("highway", "track"),
        TagMatch::new("highway", "service"),
        TagMatch::new("highway", "bridleway"),
        TagMatch::new("highway", "footway"),
        TagMatch::new("highway", "steps"),
        TagMatch::new("highway", "path"),
    ],
    access: &["access", "vehicle", "bicycle"],
    disallow_motorroad: true,
};

/// Example [Profile] for walking, with appropriate
/// [access tags](https://wiki.openstreetmap.org/wiki/Key:access).
/// This is the default profile for isochrones.
pub const FOOT_PROFILE: Profile = Profile {
    name: "foot",
    ways: &[
        TagMatch::new("highway", "trunk"),
        TagMatch::new("highway", "trunk_link"),
        TagMatch::new("highway", "primary"),
        TagMatch::new("highway", "primary_link"),
        TagMatch::new("highway", "secondary"),
        TagMatch::new("highway", "secondary_link"),
        TagMatch::new("highway", "tertiary"),
        TagMatch::new("highway", "tertiary_link"),
        TagMatch::new("highway", "unclassified"),
        TagMatch::new("highway", "minor"),
        TagMatch::new("highway", "residential"),
        TagMatch::new("highway", "living_street"),
        TagMatch::new("highway", "track"),
        TagMatch::new("highway", "service"),
        TagMatch::new("highway", "bridleway"),
        TagMatch::new("highway", "footway"),
        TagMatch::new("highway", "path"),
        TagMatch::new("highway", "steps"),
        TagMatch::new("highway", "pedestrian"),
        TagMatch::new("highway", "platform"),
        TagMatch::new("railway", "platform"),
        TagMatch::new("public_transport", "platform"),
    ],
    access: &["access", "foot"],
    disallow_motorroad: true,
};
