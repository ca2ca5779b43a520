//! Attribute and template resources for the bias probe.
//!
//! Templates contain a `[TTT]` slot (the target nationality, always
//! masked for the model to fill) and an `[AAA]` or `[AAAs]` slot (the
//! attribute, e.g. an occupation, pluralized for the `[AAAs]` form).

use std::error::Error;

/// BERT mask token literal.
pub const MASK_TOKEN: &str = "[MASK]";

/// Read nonempty trimmed lines from a resource file.
pub fn load_lines(path: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Could not read resource file {}: {}", path, e))?;
    Ok(content
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Substitute template slots: `[TTT]` becomes the mask, the attribute slot
/// becomes `token` (pluralized for `[AAAs]`).
///
/// Pass [`MASK_TOKEN`] as `token` to build the prior sentence where both
/// slots are masked.
pub fn fill_template(template: &str, token: &str) -> String {
    let template = template.replace("[TTT]", MASK_TOKEN);
    if template.contains("[AAA]") {
        template.replace("[AAA]", token)
    } else {
        template.replace("[AAAs]", &pluralize(token))
    }
}

/// Index of the `[TTT]` mask among the masks of the prior sentence.
///
/// The prior masks both slots; when the attribute slot precedes `[TTT]`
/// in the template, the target mask is the second one.
pub fn prior_target_mask_index(template: &str) -> usize {
    match (template.find("[AAA"), template.find("[TTT]")) {
        (Some(attr_pos), Some(target_pos)) if attr_pos < target_pos => 1,
        _ => 0,
    }
}

/// Rule-based English pluralizer, sufficient for the attribute lists
/// (common nouns like occupations).
pub fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        format!("{}es", word)
    } else if lower.ends_with('y')
        && !lower.ends_with("ay")
        && !lower.ends_with("ey")
        && !lower.ends_with("oy")
        && !lower.ends_with("uy")
    {
        format!("{}ies", &word[..word.len() - 1])
    } else if lower.ends_with("fe") {
        format!("{}ves", &word[..word.len() - 2])
    } else if lower.ends_with('f') {
        format!("{}ves", &word[..word.len() - 1])
    } else if word == MASK_TOKEN {
        // Masked attribute slots stay masked
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_singular() {
        let filled = fill_template("A person from [TTT] works as a [AAA].", "doctor");
        assert_eq!(filled, "A person from [MASK] works as a doctor.");
    }

    #[test]
    fn test_fill_template_plural() {
        let filled = fill_template("People from [TTT] are [AAAs].", "doctor");
        assert_eq!(filled, "People from [MASK] are doctors.");
    }

    #[test]
    fn test_fill_template_prior_masks_both_slots() {
        let filled = fill_template("A person from [TTT] works as a [AAA].", MASK_TOKEN);
        assert_eq!(filled, "A person from [MASK] works as a [MASK].");
    }

    #[test]
    fn test_prior_target_mask_index() {
        assert_eq!(
            prior_target_mask_index("A person from [TTT] works as a [AAA]."),
            0
        );
        assert_eq!(prior_target_mask_index("Many [AAAs] come from [TTT]."), 1);
    }

    #[test]
    fn test_pluralize_rules() {
        assert_eq!(pluralize("doctor"), "doctors");
        assert_eq!(pluralize("actress"), "actresses");
        assert_eq!(pluralize("coach"), "coaches");
        assert_eq!(pluralize("secretary"), "secretaries");
        assert_eq!(pluralize("boy"), "boys");
        assert_eq!(pluralize("thief"), "thieves");
        assert_eq!(pluralize("housewife"), "housewives");
        assert_eq!(pluralize(MASK_TOKEN), MASK_TOKEN);
    }
}
