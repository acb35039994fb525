//! Filename derivation for generated posts.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;
const EXTENSION: &str = ".html";

/// Lowercases `topic`, replaces every run of characters outside `[a-z0-9]`
/// with one `-`, and trims `-` from both ends.
///
/// The result is ASCII and at most `NAME_MAX - ".html".len()` bytes.
pub fn slugify(topic: &str) -> String {
    let mut out = String::with_capacity(topic.len());
    let mut pending_dash = false;

    for c in topic.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    let max = NAME_MAX - EXTENSION.len();
    if out.len() > max {
        out.truncate(max);
        let trimmed = out.trim_end_matches('-').len();
        out.truncate(trimmed);
    }
    out
}

/// Derives the artifact filename for a topic, or `None` when the topic has
/// no `[a-z0-9]` characters at all.
///
/// # Examples
///
/// - `derive_filename("Top 5 tips to improve hotel WiFi speeds!")` → `Some("top-5-tips-to-improve-hotel-wifi-speeds.html")`
/// - `derive_filename("!!!")` → `None`
pub fn derive_filename(topic: &str) -> Option<String> {
    let slug = slugify(topic);
    if slug.is_empty() {
        None
    } else {
        Some(format!("{}{}", slug, EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_expected_filename() {
        assert_eq!(
            derive_filename("Top 5 tips to improve hotel WiFi speeds!").as_deref(),
            Some("top-5-tips-to-improve-hotel-wifi-speeds.html")
        );
        assert_eq!(
            derive_filename("Firewall vs UTM: what small hotels need to know").as_deref(),
            Some("firewall-vs-utm-what-small-hotels-need-to-know.html")
        );
    }

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(slugify("  --Hello,   World!!--  "), "hello-world");
        assert_eq!(slugify("a/b\\c..d"), "a-b-c-d");
    }

    #[test]
    fn non_ascii_letters_become_separators() {
        assert_eq!(slugify("Café Wi‑Fi für Hotels"), "caf-wi-fi-f-r-hotels");
    }

    #[test]
    fn empty_slug_has_no_filename() {
        assert_eq!(derive_filename(""), None);
        assert_eq!(derive_filename("!!! ???"), None);
    }

    #[test]
    fn long_topics_fit_name_max() {
        let topic = "word ".repeat(200);
        let name = derive_filename(&topic).unwrap();
        assert!(name.len() <= NAME_MAX);
        assert!(!name.trim_end_matches(EXTENSION).ends_with('-'));
    }

    #[test]
    fn deterministic() {
        let t = "How to choose the best WiFi hotspot solution for hotels";
        assert_eq!(derive_filename(t), derive_filename(t));
    }
}
