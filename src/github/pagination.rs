// src/github/pagination.rs
// =============================================================================
// GitHub paginates large listings through the `Link` response header:
//
//   Link: <https://api.github.com/...?page=2>; rel="next",
//         <https://api.github.com/...?page=5>; rel="last"
//
// Each comma-separated part is a URL in angle brackets followed by
// `;`-separated parameters. We only care about the part whose `rel`
// includes "next".
// =============================================================================

/// Returns the URL tagged `rel="next"` in a `Link` header value, if any
pub fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;

        // rel may hold several space-separated relations: rel="next last"
        let is_next = pieces.any(|param| {
            let param = param.trim();
            match param.split_once('=') {
                Some((key, value)) if key.trim().eq_ignore_ascii_case("rel") => value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next")),
                _ => false,
            }
        });

        if is_next && !url.is_empty() {
            Some(url.to_string())
        } else {
            None
        }
    })
}
