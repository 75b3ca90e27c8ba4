//! Negation compounding.
//!
//! Negation particles are short and frequent, so stopword lists tend to
//! contain them. Gluing each particle to the token that follows keeps the
//! negated phrase ("không_thích") alive through stopword removal.

use std::borrow::Cow;

/// Merges every negation particle with its successor token.
///
/// Tokens are scanned left to right. A particle followed by another token is
/// emitted as `particle_successor` and the scan skips both; a particle at the
/// end is emitted as-is. When no particle occurs, `text` is returned
/// borrowed and byte-identical, whitespace included.
///
/// ```rust
/// use canonical::compound_negations;
///
/// let particles = ["không".to_string()];
/// assert_eq!(compound_negations("không thích", &particles), "không_thích");
/// assert_eq!(compound_negations("không", &particles), "không");
/// ```
pub fn compound_negations<'a>(text: &'a str, particles: &[String]) -> Cow<'a, str> {
    let is_particle = |token: &str| particles.iter().any(|p| p == token);

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if !tokens.iter().any(|t| is_particle(t)) {
        return Cow::Borrowed(text);
    }

    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        match tokens.get(i + 1) {
            Some(next) if is_particle(token) => {
                out.push(format!("{token}_{next}"));
                i += 2;
            }
            _ => {
                out.push(token.to_string());
                i += 1;
            }
        }
    }

    Cow::Owned(out.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particles() -> Vec<String> {
        vec!["không".into(), "chẳng".into(), "chả".into()]
    }

    #[test]
    fn merges_particle_with_successor() {
        assert_eq!(compound_negations("không thích", &particles()), "không_thích");
        assert_eq!(
            compound_negations("áo chẳng đẹp chả bền", &particles()),
            "áo chẳng_đẹp chả_bền"
        );
    }

    #[test]
    fn trailing_particle_is_left_alone() {
        assert_eq!(compound_negations("không", &particles()), "không");
        assert_eq!(compound_negations("đẹp không", &particles()), "đẹp không");
    }

    #[test]
    fn consecutive_particles_merge_pairwise() {
        assert_eq!(
            compound_negations("không không đẹp", &particles()),
            "không_không đẹp"
        );
    }

    #[test]
    fn no_particle_is_byte_identical() {
        let input = "  áo   thun\tnam ";
        let out = compound_negations(input, &particles());
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, input);
    }

    #[test]
    fn particle_must_match_whole_token() {
        let input = "khôngthích chảy";
        assert_eq!(compound_negations(input, &particles()), input);
    }
}
