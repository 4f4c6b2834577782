use crate::data::{NormalizedRequest, RequestElement, ScenarioElement};

/// Makes every request targeting `base_url` relative to it and numbers the requests from 0 in
/// recorded order. Pauses are kept in place and left unnumbered.
pub fn normalize(
    elements: Vec<ScenarioElement>,
    base_url: Option<&str>,
) -> Vec<ScenarioElement<NormalizedRequest>> {
    let mut next_id = 0;

    elements
        .into_iter()
        .map(|element| {
            element.map_request(|request| {
                let id = next_id;
                next_id += 1;

                NormalizedRequest {
                    id,
                    request: make_relative_to(request, base_url),
                }
            })
        })
        .collect()
}

fn make_relative_to(mut request: RequestElement, base_url: Option<&str>) -> RequestElement {
    if let Some(base_url) = base_url {
        if request.base_url == base_url {
            if let Some(relative) = request.url.strip_prefix(base_url) {
                request.url = String::from(relative);
            }
        }
    }

    request
}
