/// `first [middle] last [suffix]`, single-spaced, empty parts skipped
pub fn full_name(first: &str, middle: Option<&str>, last: &str, suffix: Option<&str>) -> String {
    [Some(first), middle, Some(last), suffix]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Last, First M.` for class lists
pub fn sortable_name(first: &str, middle: Option<&str>, last: &str) -> String {
    let mut name = format!("{}, {}", last.trim(), first.trim());
    if let Some(initial) = middle
        .map(str::trim)
        .and_then(|m| m.chars().next())
    {
        name.push(' ');
        name.extend(initial.to_uppercase());
        name.push('.');
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_skips_blank_parts() {
        assert_eq!(
            full_name("Juan", Some("Reyes"), "Dela Cruz", Some("Jr.")),
            "Juan Reyes Dela Cruz Jr."
        );
        assert_eq!(full_name("Ana", Some("  "), "Lopez", None), "Ana Lopez");
    }

    #[test]
    fn sortable_name_uses_middle_initial() {
        assert_eq!(sortable_name("Juan", Some("reyes"), "Dela Cruz"), "Dela Cruz, Juan R.");
        assert_eq!(sortable_name("Ana", None, "Lopez"), "Lopez, Ana");
    }
}
