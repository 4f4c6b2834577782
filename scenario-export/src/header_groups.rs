//! Sharing of header definitions between requests.
//!
//! Recorded traffic repeats the same headers over and over. Every request keeps only the headers the
//! protocol definition doesn't already cover (its "extra" headers), and requests with identical extra
//! headers share one definition, held by the first request that used it.

use crate::{
    data::{AnnotatedRequest, NormalizedRequest, RequestElement, ScenarioElement},
    frequency::Baseline,
    util,
};
use std::collections::{btree_map, BTreeMap, HashMap};

pub type HeaderList = Vec<(String, String)>;

/// Headers that never end up in a generated header definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFilter {
    names: Vec<&'static str>,
}

impl HeaderFilter {
    pub fn new(automatic_referer: bool) -> Self {
        let mut names = vec!["Content-Length", "Cookie", "Host"];
        if automatic_referer {
            names.push("Referer");
        }

        Self { names }
    }

    pub fn is_filtered(&self, name: &str) -> bool {
        util::contains_header_name(self.names.iter().copied(), name)
    }
}

impl Default for HeaderFilter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Shared header definitions keyed by the id of the request that introduced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderGroups(BTreeMap<usize, HeaderList>);

impl HeaderGroups {
    pub fn get(&self, id: usize) -> Option<&HeaderList> {
        self.0.get(&id)
    }

    /// Groups in ascending id order.
    pub fn iter(&self) -> btree_map::Iter<'_, usize, HeaderList> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Headers of `request` that are neither filtered nor equal to the baseline, sorted by name
/// ignoring case.
pub fn extra_headers(
    request: &RequestElement,
    baseline: &Baseline,
    filter: &HeaderFilter,
) -> HeaderList {
    let mut headers: HeaderList = request
        .headers
        .iter()
        .filter(|(name, _)| !filter.is_filtered(name))
        .filter(|(name, value)| baseline.header(name) != Some(value.as_str()))
        .cloned()
        .collect();

    headers.sort_by_cached_key(|(name, value)| (name.to_ascii_lowercase(), value.clone()));
    headers
}

/// Lookup key under which equal header sets meet, whatever the spelling of their names.
fn group_key(headers: &[(String, String)]) -> HeaderList {
    headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect()
}

pub fn deduplicate_headers(
    elements: Vec<ScenarioElement<NormalizedRequest>>,
    baseline: &Baseline,
    filter: &HeaderFilter,
) -> (Vec<ScenarioElement<AnnotatedRequest>>, HeaderGroups) {
    let mut groups = BTreeMap::new();
    let mut holders: HashMap<HeaderList, usize> = HashMap::new();

    let elements = elements
        .into_iter()
        .map(|element| {
            element.map_request(|NormalizedRequest { id, request }| {
                let headers = extra_headers(&request, baseline, filter);

                let filtered_headers_id = if headers.is_empty() {
                    None
                } else {
                    let holder_id = *holders.entry(group_key(&headers)).or_insert(id);
                    if holder_id == id {
                        groups.insert(id, headers);
                    }
                    Some(holder_id)
                };

                AnnotatedRequest {
                    id,
                    request,
                    filtered_headers_id,
                }
            })
        })
        .collect();

    (elements, HeaderGroups(groups))
}
