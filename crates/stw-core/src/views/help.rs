use url::Url;

/// Query parameter carrying the help center's initial topic.
pub const HELP_TOPIC_PARAM: &str = "topic";

/// Extract the initial help topic from a navigational location.
///
/// Accepts a full URL (`https://host/help?topic=billing`), a path with a
/// query (`/help?topic=billing`), or a bare query string (`?topic=billing`).
/// Returns `None` when the parameter is missing or empty.
#[must_use]
pub fn initial_help_topic(location: &str) -> Option<String> {
    let parsed = Url::parse(location).or_else(|_| {
        // Relative locations need a base to parse.
        Url::parse("http://localhost/").and_then(|base| base.join(location))
    });

    let url = parsed.ok()?;
    url.query_pairs()
        .find(|(key, _)| key == HELP_TOPIC_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|topic| !topic.is_empty())
}
