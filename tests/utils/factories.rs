//! Canned service responses and source pages

use sauce_lens::SiteIndex;
use serde_json::{json, Value};

/// One `{header, data}` pair as the service sends it
#[allow(dead_code)]
pub fn result_pair(index: SiteIndex, similarity: &str, url: &str) -> Value {
    json!({
        "header": {
            "similarity": similarity,
            "thumbnail": format!("https://img.example/thumb/{}.jpg", index.id()),
            "index_id": index.id(),
            "index_name": format!("Index #{}: {}", index.id(), index.display_name()),
            "dupes": 0
        },
        "data": {
            "ext_urls": [url],
            "title": "untitled"
        }
    })
}

/// Full search body with a successful top-level header
#[allow(dead_code)]
pub fn search_body(pairs: Vec<Value>) -> String {
    json!({
        "header": {
            "status": 0,
            "results_requested": 6,
            "short_remaining": 11,
            "long_remaining": 299,
            "results_returned": pairs.len()
        },
        "results": pairs
    })
    .to_string()
}

#[allow(dead_code)]
pub fn booru_page(rating: &str) -> String {
    format!(
        r#"<html><body><section id="post-information"><ul>
<li id="post-info-id">ID: 1234</li>
<li id="post-info-rating">Rating: {}</li>
</ul></section></body></html>"#,
        rating
    )
}
