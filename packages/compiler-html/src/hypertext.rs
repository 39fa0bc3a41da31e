//! Inline keyword substitution for `body` blocks.
//!
//! Keywords are matched case-sensitively as plain substrings, without word
//! boundaries, and processed in list order. Text already turned into a link
//! by an earlier entry is never matched again, so earlier entries win when
//! keywords overlap.

use folio_model::Hypertext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(String),
    Link(&'a Hypertext),
}

/// Split the joined body text into plain-text and link segments.
pub fn substitute_hypertext<'a>(text: &str, hypertext: &'a [Hypertext]) -> Vec<Segment<'a>> {
    let mut segments = vec![Segment::Text(text.to_string())];

    for entry in hypertext {
        // An empty keyword would match between every character.
        if entry.keyword.is_empty() {
            continue;
        }

        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Text(plain) => split_on_keyword(&plain, entry, &mut next),
                link @ Segment::Link(_) => next.push(link),
            }
        }
        segments = next;
    }

    segments.retain(|segment| !matches!(segment, Segment::Text(t) if t.is_empty()));
    segments
}

fn split_on_keyword<'a>(plain: &str, entry: &'a Hypertext, out: &mut Vec<Segment<'a>>) {
    let mut parts = plain.split(entry.keyword.as_str());
    if let Some(first) = parts.next() {
        out.push(Segment::Text(first.to_string()));
    }
    for part in parts {
        out.push(Segment::Link(entry));
        out.push(Segment::Text(part.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(keyword: &str, href: &str) -> Hypertext {
        Hypertext {
            keyword: keyword.to_string(),
            href: href.to_string(),
        }
    }

    #[test]
    fn test_single_keyword() {
        let links = vec![entry("World", "https://x")];
        let segments = substitute_hypertext("Hello World", &links);
        assert_eq!(
            segments,
            vec![Segment::Text("Hello ".to_string()), Segment::Link(&links[0])]
        );
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let links = vec![entry("cat", "https://cats")];
        let segments = substitute_hypertext("cat and concatenate", &links);
        let count = segments
            .iter()
            .filter(|s| matches!(s, Segment::Link(_)))
            .count();
        // Not word-bounded: "concatenate" matches too.
        assert_eq!(count, 2);
    }

    #[test]
    fn test_earlier_entry_wins_overlap() {
        let links = vec![entry("Hotcake App", "https://a"), entry("App", "https://b")];
        let segments = substitute_hypertext("Hotcake App is an App", &links);
        assert_eq!(
            segments,
            vec![
                Segment::Link(&links[0]),
                Segment::Text(" is an ".to_string()),
                Segment::Link(&links[1]),
            ]
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let links = vec![entry("world", "https://x")];
        let segments = substitute_hypertext("Hello World", &links);
        assert_eq!(segments, vec![Segment::Text("Hello World".to_string())]);
    }

    #[test]
    fn test_empty_keyword_is_ignored() {
        let links = vec![entry("", "https://x")];
        let segments = substitute_hypertext("abc", &links);
        assert_eq!(segments, vec![Segment::Text("abc".to_string())]);
    }
}
