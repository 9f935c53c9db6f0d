// src/extract/infer.rs

//! Code and rule inference over requirement text.
//!
//! Derives explicitly required course codes, referenced subject codes, and
//! an elective level-floor from the concatenated node text, with union
//! semantics over all mentions.

use std::collections::{BTreeSet, HashSet};

use regex::Regex;

/// Course code: SUBJECT[/SUBJECT...] NUM[SUFFIX], matched on uppercased
/// text. Subject tokens need two or more characters so prose like "a 300"
/// never reads as a code.
const COURSE_CODE_PATTERN: &str =
    r"\b([A-Z][A-Z0-9_]+(?:/[A-Z][A-Z0-9_]+)*)\s+([0-9]{3,4})([A-Z]{0,3})\b";

/// Subject mentioned as "<SUBJECT> electives"; matched on the original text
/// so only tokens the catalog itself capitalizes qualify.
const SUBJECT_ELECTIVES_PATTERN: &str = r"\b([A-Z][A-Z0-9_]+)\s+(?i:electives?)\b";

/// Any "elective(s)" mention.
const ELECTIVE_PATTERN: &str = r"(?i)\belectives?\b";

/// Explicit "NNN-level elective(s)" phrase.
const LEVELED_ELECTIVE_PATTERN: &str = r"(?i)\b([0-9]{3})-level\s+(electives?)\b";

/// Machine-usable sets derived from a program's requirement text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseRules {
    /// Explicit course codes, deduplicated and sorted
    pub course_codes: Vec<String>,

    /// Referenced subject prefixes, deduplicated and sorted
    pub subject_codes: Vec<String>,

    /// Minimum level satisfying an unqualified electives requirement;
    /// `None` means any level qualifies
    pub elective_level_floor: Option<i64>,
}

/// Derive course codes, subject codes, and the elective floor from the
/// newline-joined text of all requirement nodes.
pub fn infer_rules(text: &str) -> CourseRules {
    let upper = text.to_uppercase();

    let mut course_codes: BTreeSet<String> = BTreeSet::new();
    let mut subject_codes: BTreeSet<String> = BTreeSet::new();

    let course_re = Regex::new(COURSE_CODE_PATTERN).unwrap();
    for caps in course_re.captures_iter(&upper) {
        let full = caps.get(0).unwrap();
        // "300-LEVEL" is a level phrase, not a course number.
        if upper[full.end()..].starts_with("-LEVEL") {
            continue;
        }
        let subjects = &caps[1];
        let code = format!("{}{}", &caps[2], &caps[3]);
        for subject in subjects.split('/') {
            course_codes.insert(format!("{subject} {code}"));
            subject_codes.insert(subject.to_string());
        }
    }

    let subject_electives_re = Regex::new(SUBJECT_ELECTIVES_PATTERN).unwrap();
    for caps in subject_electives_re.captures_iter(text) {
        let subject = caps.get(1).unwrap();
        // Reject the LEVEL of an uppercased "300-LEVEL ELECTIVES".
        if subject.start() > 0 && text.as_bytes()[subject.start() - 1] == b'-' {
            continue;
        }
        subject_codes.insert(subject.as_str().to_string());
    }

    CourseRules {
        course_codes: course_codes.into_iter().collect(),
        subject_codes: subject_codes.into_iter().collect(),
        elective_level_floor: infer_elective_floor(text),
    }
}

/// Union policy over elective mentions: an unqualified mention means any
/// level qualifies and overrides every explicit floor; otherwise the floor
/// is the minimum explicit level. No mention at all means no floor.
fn infer_elective_floor(text: &str) -> Option<i64> {
    let elective_re = Regex::new(ELECTIVE_PATTERN).unwrap();
    let leveled_re = Regex::new(LEVELED_ELECTIVE_PATTERN).unwrap();

    let mut levels: Vec<i64> = Vec::new();
    let mut leveled_word_starts: HashSet<usize> = HashSet::new();
    for caps in leveled_re.captures_iter(text) {
        if let Ok(level) = caps[1].parse::<i64>() {
            levels.push(level);
        }
        leveled_word_starts.insert(caps.get(2).unwrap().start());
    }

    let mut any_mention = false;
    let mut unspecified_mention = false;
    for m in elective_re.find_iter(text) {
        any_mention = true;
        if !leveled_word_starts.contains(&m.start()) {
            unspecified_mention = true;
        }
    }

    if !any_mention || unspecified_mention {
        return None;
    }
    levels.into_iter().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_codes_with_slash_subjects() {
        let rules =
            infer_rules("Students must take CS/MATH 170 and at least one of BIOL 141.");
        assert_eq!(rules.course_codes, vec!["BIOL 141", "CS 170", "MATH 170"]);
        assert_eq!(rules.subject_codes, vec!["BIOL", "CS", "MATH"]);
    }

    #[test]
    fn test_course_code_with_suffix_and_lowercase() {
        let rules = infer_rules("Take chem 202L and PHYS 151.");
        assert_eq!(rules.course_codes, vec!["CHEM 202L", "PHYS 151"]);
    }

    #[test]
    fn test_level_phrase_is_not_a_course_code() {
        let rules = infer_rules("Choose three 300-level electives.");
        assert!(rules.course_codes.is_empty());
        assert!(rules.subject_codes.is_empty());
    }

    #[test]
    fn test_subject_electives_mention() {
        let rules = infer_rules("Two CS electives and one additional elective course.");
        assert_eq!(rules.subject_codes, vec!["CS"]);
        // Lowercase prose never yields a subject.
        let rules = infer_rules("Take additional electives in any department.");
        assert!(rules.subject_codes.is_empty());
    }

    #[test]
    fn test_elective_floor_explicit_only() {
        let rules = infer_rules("Complete three 300-level electives.");
        assert_eq!(rules.elective_level_floor, Some(300));
    }

    #[test]
    fn test_elective_floor_minimum_of_levels() {
        let rules =
            infer_rules("Two 300-level electives and one 200-level elective.");
        assert_eq!(rules.elective_level_floor, Some(200));
    }

    #[test]
    fn test_unspecified_mention_dominates() {
        let rules = infer_rules(
            "Complete three 300-level electives and one elective of any level.",
        );
        assert_eq!(rules.elective_level_floor, None);
    }

    #[test]
    fn test_no_elective_mention_means_no_floor() {
        let rules = infer_rules("Take CS 170 and CS 171.");
        assert_eq!(rules.elective_level_floor, None);
    }

    #[test]
    fn test_uppercase_level_phrase_floor() {
        let rules = infer_rules("THREE 400-LEVEL ELECTIVES");
        assert_eq!(rules.elective_level_floor, Some(400));
        assert!(rules.subject_codes.is_empty());
    }

    #[test]
    fn test_dedup_repeated_codes() {
        let rules = infer_rules("CS 170, then CS 170 again, plus cs 170.");
        assert_eq!(rules.course_codes, vec!["CS 170"]);
        assert_eq!(rules.subject_codes, vec!["CS"]);
    }
}
