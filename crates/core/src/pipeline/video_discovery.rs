use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Lists the entries of `input_dir` whose file name matches `pattern`,
/// sorted by path.
///
/// No extension filtering happens here; entries that turn out not to be
/// videos produce zero frames later. A missing input directory has no
/// candidates.
pub fn discover(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let matcher = GlobPattern::parse(pattern)?;

    if !input_dir.is_dir() {
        log::warn!("Input directory {} does not exist", input_dir.display());
        return Ok(Vec::new());
    }

    let read_err = |source: std::io::Error| DiscoveryError::Read {
        path: input_dir.to_path_buf(),
        source,
    };

    let mut videos = Vec::new();
    for entry in std::fs::read_dir(input_dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name();
        if matcher.matches(&name.to_string_lossy()) {
            videos.push(entry.path());
        }
    }
    videos.sort();

    log::debug!(
        "Discovered {} candidate(s) in {} matching {pattern:?}",
        videos.len(),
        input_dir.display()
    );
    Ok(videos)
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Literal(char),
    AnyRun,
    AnyOne,
    Class {
        negated: bool,
        ranges: Vec<(char, char)>,
    },
}

impl Token {
    fn matches_char(&self, c: char) -> bool {
        match self {
            Token::Literal(l) => *l == c,
            Token::AnyRun | Token::AnyOne => true,
            Token::Class { negated, ranges } => {
                ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi) != *negated
            }
        }
    }
}

/// Shell-style file name pattern: `*` matches any run, `?` one character,
/// `[abc]`, `[a-z]` and `[!abc]` a character class.
///
/// As in the shell, a leading `.` is only matched by a literal `.`.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobPattern {
    tokens: Vec<Token>,
}

impl GlobPattern {
    pub fn parse(pattern: &str) -> Result<Self, DiscoveryError> {
        let invalid = |reason: &'static str| DiscoveryError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        if pattern.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if pattern.contains('/') || pattern.contains(std::path::MAIN_SEPARATOR) {
            return Err(invalid("pattern must match file names, not paths"));
        }

        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '*' => {
                    if tokens.last() != Some(&Token::AnyRun) {
                        tokens.push(Token::AnyRun);
                    }
                    i += 1;
                }
                '?' => {
                    tokens.push(Token::AnyOne);
                    i += 1;
                }
                '[' => {
                    let (token, next) =
                        parse_class(&chars, i + 1).ok_or_else(|| invalid("unclosed '['"))?;
                    tokens.push(token);
                    i = next;
                }
                c => {
                    tokens.push(Token::Literal(c));
                    i += 1;
                }
            }
        }

        Ok(Self { tokens })
    }

    pub fn matches(&self, name: &str) -> bool {
        let name: Vec<char> = name.chars().collect();
        if name.first() == Some(&'.') && self.tokens.first() != Some(&Token::Literal('.')) {
            return false;
        }

        // Greedy match with backtracking to the most recent `*`.
        let (mut t, mut n) = (0, 0);
        let mut star: Option<(usize, usize)> = None;
        while n < name.len() {
            match self.tokens.get(t) {
                Some(Token::AnyRun) => {
                    star = Some((t, n));
                    t += 1;
                }
                Some(token) if token.matches_char(name[n]) => {
                    t += 1;
                    n += 1;
                }
                _ => match star {
                    Some((star_t, star_n)) => {
                        t = star_t + 1;
                        n = star_n + 1;
                        star = Some((star_t, star_n + 1));
                    }
                    None => return false,
                },
            }
        }
        self.tokens[t..].iter().all(|token| *token == Token::AnyRun)
    }
}

/// Parses a class body starting after `[`. Returns the token and the index
/// just past the closing `]`. A `]` right after `[` or `[!` is literal.
fn parse_class(chars: &[char], start: usize) -> Option<(Token, usize)> {
    let mut i = start;
    let negated = chars.get(i) == Some(&'!');
    if negated {
        i += 1;
    }

    let mut ranges = Vec::new();
    let mut first = true;
    loop {
        let c = *chars.get(i)?;
        if c == ']' && !first {
            return Some((Token::Class { negated, ranges }, i + 1));
        }
        first = false;
        if chars.get(i + 1) == Some(&'-') && chars.get(i + 2).is_some_and(|&hi| hi != ']') {
            ranges.push((c, chars[i + 2]));
            i += 3;
        } else {
            ranges.push((c, c));
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::star_all("*", "clip.mp4", true)]
    #[case::star_suffix("*.mp4", "clip.mp4", true)]
    #[case::star_suffix_other_ext("*.mp4", "clip.avi", false)]
    #[case::star_middle("cam*_day.mov", "cam12_day.mov", true)]
    #[case::star_middle_needs_suffix("cam*_day.mov", "cam12_night.mov", false)]
    #[case::star_backtracks("*a*b", "xaxxab", true)]
    #[case::question_one_char("clip?.mp4", "clip7.mp4", true)]
    #[case::question_not_zero("clip?.mp4", "clip.mp4", false)]
    #[case::class_range("take[0-9].mp4", "take3.mp4", true)]
    #[case::class_range_miss("take[0-9].mp4", "takeX.mp4", false)]
    #[case::class_negated("take[!0-9].mp4", "takeX.mp4", true)]
    #[case::class_literal_bracket("[]x]", "]", true)]
    #[case::literal_exact("clip.mp4", "clip.mp4", true)]
    #[case::literal_prefix_only("clip", "clip.mp4", false)]
    #[case::hidden_skipped_by_star("*", ".DS_Store", false)]
    #[case::hidden_matched_by_dot(".*", ".DS_Store", true)]
    fn test_glob_matching(#[case] pattern: &str, #[case] name: &str, #[case] expected: bool) {
        let glob = GlobPattern::parse(pattern).unwrap();
        assert_eq!(glob.matches(name), expected, "{pattern} vs {name}");
    }

    #[rstest]
    #[case::empty("")]
    #[case::unclosed_class("clip[0-9")]
    #[case::path_separator("videos/*.mp4")]
    fn test_invalid_patterns(#[case] pattern: &str) {
        assert!(matches!(
            GlobPattern::parse(pattern),
            Err(DiscoveryError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_discover_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mp4", "a.mp4", "notes.txt", "c.mp4"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let found = discover(dir.path(), "*.mp4").unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("a.mp4"),
                dir.path().join("b.mp4"),
                dir.path().join("c.mp4"),
            ]
        );
    }

    #[test]
    fn test_discover_default_pattern_keeps_non_videos() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("clip.mp4"), b"").unwrap();
        std::fs::write(dir.path().join("readme.md"), b"").unwrap();

        assert_eq!(discover(dir.path(), "*").unwrap().len(), 2);
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path(), "*").unwrap().is_empty());
    }

    #[test]
    fn test_discover_missing_directory_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("all_videos");
        assert!(discover(&missing, "*").unwrap().is_empty());
    }

    #[test]
    fn test_discover_file_as_directory_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("all_videos");
        std::fs::write(&file, b"not a directory").unwrap();
        assert!(discover(&file, "*").unwrap().is_empty());
    }

    #[test]
    fn test_discover_rejects_pattern_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            discover(dir.path(), "[oops"),
            Err(DiscoveryError::InvalidPattern { .. })
        ));
    }
}
