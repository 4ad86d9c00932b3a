use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAnswer {
    pub html: String,
    pub cited: Vec<String>,
}

pub fn parse_answer(raw: &str, is_partial: bool) -> ParsedAnswer {
    // Trailing whitespace in a partial answer may still be followed by more
    // streamed text, so only the final form is trimmed on both ends.
    let text = if is_partial {
        raw.trim_start()
    } else {
        raw.trim()
    };

    let re = Regex::new(r"\[([A-Za-z0-9_.\-]+)\]").unwrap_or_else(|_| Regex::new("^$").unwrap());

    let mut html = String::with_capacity(text.len() + 64);
    let mut cited: Vec<String> = Vec::new();
    let mut last = 0usize;

    for captures in re.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let Some(token) = captures.get(1).map(|m| m.as_str()) else {
            continue;
        };

        push_escaped(&mut html, &text[last..whole.start()]);
        let index = match cited.iter().position(|marker| marker == token) {
            Some(position) => position + 1,
            None => {
                cited.push(token.to_string());
                cited.len()
            }
        };
        push_reference(&mut html, index, token);
        last = whole.end();
    }

    push_escaped(&mut html, &text[last..]);

    ParsedAnswer { html, cited }
}

fn push_reference(out: &mut String, index: usize, marker: &str) {
    out.push_str("<sup><a href=\"#doc-");
    push_escaped(out, marker);
    out.push_str("\" title=\"");
    push_escaped(out, marker);
    out.push_str("\">");
    out.push_str(&index.to_string());
    out.push_str("</a></sup>");
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(index: usize, marker: &str) -> String {
        format!("<sup><a href=\"#doc-{marker}\" title=\"{marker}\">{index}</a></sup>")
    }

    #[test]
    fn plain_text_passes_through_with_no_citations() {
        let parsed = parse_answer("Fees are due in week 3.", false);
        assert_eq!(parsed.html, "Fees are due in week 3.");
        assert!(parsed.cited.is_empty());
    }

    #[test]
    fn raw_markup_is_escaped() {
        let parsed = parse_answer("1 < 2 & <script>alert(\"x\")</script>", false);
        assert_eq!(
            parsed.html,
            "1 &lt; 2 &amp; &lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert!(parsed.cited.is_empty());
    }

    #[test]
    fn repeated_markers_share_one_display_index() {
        let parsed = parse_answer(
            "Fees are due in week 3 [doc7]. See also [doc7] and [doc9].",
            false,
        );
        assert_eq!(parsed.cited, vec!["doc7", "doc9"]);
        let expected = format!(
            "Fees are due in week 3 {r1}. See also {r1} and {r2}.",
            r1 = reference(1, "doc7"),
            r2 = reference(2, "doc9"),
        );
        assert_eq!(parsed.html, expected);
    }

    #[test]
    fn display_indexes_follow_first_occurrence_order() {
        let parsed = parse_answer("[a] then [b] then [a] then [c]", false);
        assert_eq!(parsed.cited, vec!["a", "b", "c"]);
        for (position, marker) in parsed.cited.iter().enumerate() {
            assert!(parsed.html.contains(&reference(position + 1, marker)));
        }
    }

    #[test]
    fn parse_is_idempotent() {
        let raw = "Week 3 [doc7], again [doc7] and [doc9].";
        let first = parse_answer(raw, false);
        let second = parse_answer(raw, false);
        assert_eq!(first, second);
    }

    #[test]
    fn incomplete_trailing_marker_stays_literal() {
        let partial = parse_answer("Fees are due [doc", true);
        assert_eq!(partial.html, "Fees are due [doc");
        assert!(partial.cited.is_empty());

        let final_form = parse_answer("Fees are due [doc", false);
        assert_eq!(final_form.html, "Fees are due [doc");
        assert!(final_form.cited.is_empty());
    }

    #[test]
    fn completed_marker_gets_next_index_after_streaming() {
        let before = parse_answer("Due in week 3 [doc7]. Also [doc", true);
        assert_eq!(before.cited, vec!["doc7"]);

        let after = parse_answer("Due in week 3 [doc7]. Also [doc9].", true);
        assert_eq!(after.cited, vec!["doc7", "doc9"]);
        assert!(after.html.contains(&reference(1, "doc7")));
        assert!(after.html.contains(&reference(2, "doc9")));
    }

    #[test]
    fn appending_text_never_reassigns_existing_indexes() {
        let prefix = "One [a] two [b]";
        let extended = "One [a] two [b] three [c] and [a] again";

        let first = parse_answer(prefix, true);
        let second = parse_answer(extended, true);

        for (position, marker) in first.cited.iter().enumerate() {
            assert_eq!(second.cited[position], *marker);
        }
    }

    #[test]
    fn bracketed_text_outside_marker_grammar_stays_literal() {
        let parsed = parse_answer("See [section two] and [] for details.", false);
        assert!(parsed.cited.is_empty());
        assert_eq!(parsed.html, "See [section two] and [] for details.");
    }

    #[test]
    fn partial_keeps_trailing_whitespace_final_trims_it() {
        let partial = parse_answer("  Fees [doc7]  ", true);
        assert!(partial.html.ends_with("  "));
        assert!(!partial.html.starts_with(' '));

        let final_form = parse_answer("  Fees [doc7]  ", false);
        assert!(!final_form.html.ends_with(' '));
    }
}
