//! Helpers for turning show metadata into file system names

/// Extension of the media files produced for a show.
pub const MEDIA_EXTENSION: &str = "mp4";

const MAX_FILE_NAME_CHARS: usize = 120;

/// Sanitizes a string for use as a directory name
///
/// - Path separators and reserved characters (`/ \ : * ? " < > |`) become `-`
/// - Control characters become `-`, whitespace runs collapse to one space
/// - Leading/trailing whitespace and dots are trimmed
pub fn path_name_cleaner(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_whitespace() => ' ',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}

/// Sanitizes a string for use inside a file name
///
/// Same rules as [`path_name_cleaner`], capped in length so the full name
/// with suffix and extension fits common file system limits.
pub fn file_name_cleaner(name: &str) -> String {
    let cleaned = path_name_cleaner(name);
    if cleaned.chars().count() <= MAX_FILE_NAME_CHARS {
        return cleaned;
    }

    let truncated: String = cleaned.chars().take(MAX_FILE_NAME_CHARS).collect();
    truncated
        .trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}

/// Zero-pads a numeric label to two digits; other labels are returned trimmed.
pub fn format_2_digits(label: &str) -> String {
    let label = label.trim();
    match label.parse::<u32>() {
        Ok(n) => format!("{n:02}"),
        Err(_) => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_name_cleaner() {
        assert_eq!(path_name_cleaner("Le Journal"), "Le Journal");
        assert_eq!(path_name_cleaner("Title: With Colon"), "Title- With Colon");
        assert_eq!(path_name_cleaner("Path/With\\Slashes"), "Path-With-Slashes");
        assert_eq!(path_name_cleaner("  Spaces   inside "), "Spaces inside");
        assert_eq!(path_name_cleaner("...dots..."), "dots");
        assert_eq!(path_name_cleaner("Tab\there"), "Tab here");
        assert_eq!(path_name_cleaner("Bell\u{7}"), "Bell-");
        assert_eq!(path_name_cleaner("Qui? Quoi!"), "Qui- Quoi!");
    }

    #[test]
    fn test_file_name_cleaner_truncates() {
        let long = "a".repeat(200);
        assert_eq!(file_name_cleaner(&long).chars().count(), 120);

        let accented = "é".repeat(130);
        assert_eq!(file_name_cleaner(&accented).chars().count(), 120);

        assert_eq!(file_name_cleaner("Pilot"), "Pilot");
    }

    #[test]
    fn test_format_2_digits() {
        assert_eq!(format_2_digits("2"), "02");
        assert_eq!(format_2_digits(" 5 "), "05");
        assert_eq!(format_2_digits("12"), "12");
        assert_eq!(format_2_digits("123"), "123");
        assert_eq!(format_2_digits("Spécial"), "Spécial");
        assert_eq!(format_2_digits(""), "");
    }
}
