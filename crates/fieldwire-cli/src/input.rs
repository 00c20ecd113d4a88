//! Input resolution: file paths (with glob support) and inline hex.

use std::path::{Path, PathBuf};

use glob::glob;

use crate::CliError;

/// Parse an inline hex string. Whitespace, `:` and `-` separators and an
/// optional `0x` prefix are accepted.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, CliError> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<char> = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    if digits.len() % 2 != 0 {
        return Err(CliError::new(
            format!("hex input has an odd number of digits ({})", digits.len()),
            Some("each byte needs two hex digits, e.g. 0a ff".to_string()),
        ));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let text: String = pair.iter().collect();
            u8::from_str_radix(&text, 16).map_err(|_| {
                CliError::new(
                    format!("invalid hex byte '{text}'"),
                    Some("use digits 0-9 and a-f".to_string()),
                )
            })
        })
        .collect()
}

pub fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a binary file, or use --hex for inline bytes".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a binary file, or use --hex for inline bytes".to_string()),
        ));
    }
    Ok(())
}

pub fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{pattern}'"),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{pattern}'"),
                Some(format!("pattern error: {err}")),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{pattern}'"),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{pattern}' ({} matches); matches: {listed}{more}",
                matches.len()
            ),
            Some("pass a single input file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::{is_glob_pattern, parse_hex};

    #[test]
    fn hex_accepts_separators_and_prefix() {
        assert_eq!(parse_hex("0x0a:ff-10 20").unwrap(), vec![0x0a, 0xff, 0x10, 0x20]);
    }

    #[test]
    fn hex_rejects_odd_digit_count() {
        let err = parse_hex("abc").unwrap_err();
        assert!(err.message.contains("odd number"));
        assert!(err.hint.is_some());
    }

    #[test]
    fn hex_rejects_non_hex_digits() {
        let err = parse_hex("zz").unwrap_err();
        assert_eq!(err.message, "invalid hex byte 'zz'");
    }

    #[test]
    fn empty_hex_is_empty_input() {
        assert!(parse_hex("  ").unwrap().is_empty());
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("dumps/*.bin"));
        assert!(!is_glob_pattern("dumps/a.bin"));
    }
}
