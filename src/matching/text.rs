use regex::{Regex, RegexBuilder};

/// Case-insensitive whole-word pattern for a literal term.
/// The term is escaped; it is never interpreted as a pattern.
pub fn boundary_pattern(term: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
        .case_insensitive(true)
        .build()
}

/// True if `term` occurs in `text` starting and ending on a word boundary.
/// An empty term never matches.
pub fn word_boundary_match(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }

    match boundary_pattern(term) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}
