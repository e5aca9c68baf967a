//! Query-string encoding for filtered collection reads.
//!
//! Filters become repeated `key=value` pairs. A key appears once per value,
//! which the server reads as OR-of-values. Keys and values are
//! percent-encoded; a space becomes `%20`, never `+`.

use url::form_urlencoded;

/// A filter that can be rendered as query pairs.
pub trait QueryParams {
    /// Pairs in declared field order. Within a field, values keep their
    /// collection order. Values use their canonical textual form.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Encode `params` as a suffix for a collection URL.
///
/// Returns `""` when there are no pairs, so an unfiltered read hits the bare
/// collection URL. Otherwise returns `?k=v&k=v` with no leading or trailing
/// separator.
pub fn encode_query<Q: QueryParams + ?Sized>(params: &Q) -> String {
    let pairs = params.query_pairs();
    if pairs.is_empty() {
        return String::new();
    }
    let encoded: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect();
    format!("?{}", encoded.join("&"))
}

/// `form_urlencoded` escapes a literal `+` as `%2B`, so any `+` left in its
/// output stands for a space.
fn percent_encode(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
