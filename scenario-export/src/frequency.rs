//! Inference of the values most requests of a scenario share.

use crate::data::{RequestElement, ScenarioElement};
use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

/// Headers that the protocol definition of a simulation can carry.
pub const BASE_HEADERS: [&str; 10] = [
    "Accept",
    "Accept-Charset",
    "Accept-Encoding",
    "Accept-Language",
    "Authorization",
    "Connection",
    "Content-Type",
    "DNT",
    "Upgrade-Insecure-Requests",
    "User-Agent",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    pub base_url: Option<String>,
    /// Most frequent value per entry of [`BASE_HEADERS`], keyed by its canonical name.
    pub headers: BTreeMap<String, String>,
}

impl Baseline {
    /// Value of the baseline header `name` compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(baseline_name, _)| baseline_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub fn compute_baseline(elements: &[ScenarioElement]) -> Baseline {
    Baseline {
        base_url: most_frequent_base_url(elements),
        headers: most_frequent_headers(elements),
    }
}

pub fn most_frequent_base_url(elements: &[ScenarioElement]) -> Option<String> {
    most_frequent(requests(elements).map(|request| request.base_url.as_str())).map(String::from)
}

pub fn most_frequent_headers(elements: &[ScenarioElement]) -> BTreeMap<String, String> {
    BASE_HEADERS
        .iter()
        .filter_map(|&header_name| {
            let values = requests(elements).filter_map(|request| request.headers.get(header_name));
            most_frequent(values).map(|value| (String::from(header_name), String::from(value)))
        })
        .collect()
}

/// Returns the value seen the most times. Among equally frequent values the one seen first wins.
pub fn most_frequent<T: Eq + Hash, I: IntoIterator<Item = T>>(values: I) -> Option<T> {
    // value -> (count, position of first occurrence)
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();

    for (position, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (lhs_count, lhs_first)), (_, (rhs_count, rhs_first))| {
            lhs_count
                .cmp(rhs_count)
                .then_with(|| rhs_first.cmp(lhs_first))
        })
        .map(|(value, _)| value)
}

fn requests(elements: &[ScenarioElement]) -> impl Iterator<Item = &RequestElement> {
    elements.iter().filter_map(ScenarioElement::as_request)
}
