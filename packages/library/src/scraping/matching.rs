//! Ranking volume search results against what was searched for.

use serde::Serialize;

use crate::models::ScrapingVolume;

/// How well a volume fits a series name and start year.
///
/// Ordered best first, so sorting by it puts exact matches on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolumeMatch {
    /// Same name and same start year.
    Exact,
    /// Same name, different start year.
    Near,
    NoMatch,
}

pub fn classify(volume: &ScrapingVolume, series: &str, year: &str) -> VolumeMatch {
    if volume.name != series {
        VolumeMatch::NoMatch
    } else if volume.start_year == year {
        VolumeMatch::Exact
    } else {
        VolumeMatch::Near
    }
}

/// Pair every volume with its match and order them best first.
///
/// Volumes with the same match keep the order the server returned them in.
pub fn rank(
    volumes: &[ScrapingVolume],
    series: &str,
    year: &str,
) -> Vec<(VolumeMatch, ScrapingVolume)> {
    let mut ranked: Vec<_> = volumes
        .iter()
        .map(|v| (classify(v, series, year), v.clone()))
        .collect();
    ranked.sort_by_key(|(m, _)| *m);
    ranked
}
