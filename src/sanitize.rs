use std::collections::{HashMap, HashSet};

use ammonia::Builder;

pub fn sanitize_answer_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "a", "sup", "p", "br", "strong", "em", "b", "i", "code", "pre", "ul", "ol", "li",
    ]
    .into_iter()
    .collect();

    let mut tag_attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    tag_attributes.insert("a", ["href"].into_iter().collect());

    let generic_attributes: HashSet<&str> = ["title"].into_iter().collect();
    let url_schemes: HashSet<&str> = ["http", "https", "mailto"].into_iter().collect();

    Builder::default()
        .tags(tags)
        .tag_attributes(tag_attributes)
        .generic_attributes(generic_attributes)
        .url_schemes(url_schemes)
        .link_rel(Some("noopener noreferrer"))
        .clean(html)
        .to_string()
}
