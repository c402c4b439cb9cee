use crate::board::search::MAX_EXTENDED_DEPTH;
use crate::engine::EngineSettings;

/// Largest table the `Hash` option accepts
pub const MAX_HASH_MB: usize = 65_536;

/// `option` lines advertised in reply to `uci`
#[must_use]
pub fn option_lines(settings: &EngineSettings) -> Vec<String> {
    vec![
        format!(
            "option name Hash type spin default {} min 1 max {MAX_HASH_MB}",
            settings.tt_megabytes
        ),
        format!(
            "option name ExtendedDepth type spin default {} min 0 max {MAX_EXTENDED_DEPTH}",
            settings.max_extended_depth
        ),
        format!(
            "option name NullMoveReduction type spin default {} min 1 max 4",
            settings.null_move_reduction
        ),
    ]
}

/// Apply one `setoption` to a copy of the settings.
///
/// Unknown names and unparsable values leave the settings untouched and
/// return `false`.
pub fn apply_setoption(settings: &mut EngineSettings, name: &str, value: Option<&str>) -> bool {
    let normalized = name.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "hash" => match value.and_then(|v| v.parse::<usize>().ok()) {
            Some(mb) => {
                settings.tt_megabytes = mb.clamp(1, MAX_HASH_MB);
                true
            }
            None => false,
        },
        "extendeddepth" | "extended depth" => match value.and_then(|v| v.parse::<u16>().ok()) {
            Some(depth) => {
                settings.max_extended_depth = depth.min(MAX_EXTENDED_DEPTH);
                true
            }
            None => false,
        },
        "nullmovereduction" | "null move reduction" => match value.and_then(|v| v.parse::<u16>().ok()) {
            Some(r) => {
                settings.null_move_reduction = r.clamp(1, 4);
                true
            }
            None => false,
        },
        _ => false,
    }
}

/// Split `setoption name <name...> [value <value...>]`
#[must_use]
pub fn parse_setoption<S: AsRef<str>>(parts: &[S]) -> Option<(String, Option<String>)> {
    if parts.first().map(AsRef::as_ref) != Some("setoption") {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut in_value = None;

    for part in parts.iter().skip(1).map(AsRef::as_ref) {
        match part {
            "name" => in_value = Some(false),
            "value" => in_value = Some(true),
            _ => match in_value {
                Some(false) => name_parts.push(part),
                Some(true) => value_parts.push(part),
                None => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some((name_parts.join(" "), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setoption() {
        let parts = ["setoption", "name", "Hash", "value", "128"];
        assert_eq!(
            parse_setoption(&parts),
            Some(("Hash".to_string(), Some("128".to_string())))
        );
        assert_eq!(parse_setoption(&["setoption", "value", "3"]), None);
        assert_eq!(parse_setoption(&["go"]), None);
    }

    #[test]
    fn test_apply_hash_and_extension() {
        let mut settings = EngineSettings::default();
        assert!(apply_setoption(&mut settings, "Hash", Some("16")));
        assert_eq!(settings.tt_megabytes, 16);
        assert!(apply_setoption(&mut settings, "hash", Some("0")));
        assert_eq!(settings.tt_megabytes, 1);

        assert!(apply_setoption(&mut settings, "ExtendedDepth", Some("40")));
        assert_eq!(settings.max_extended_depth, MAX_EXTENDED_DEPTH);
    }

    #[test]
    fn test_bad_options_change_nothing() {
        let mut settings = EngineSettings::default();
        assert!(!apply_setoption(&mut settings, "Hash", Some("lots")));
        assert!(!apply_setoption(&mut settings, "Ponder", Some("true")));
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_option_lines_show_current_values() {
        let lines = option_lines(&EngineSettings::default().with_tt_megabytes(8));
        assert!(lines[0].contains("default 8"));
        assert!(lines.iter().all(|line| line.starts_with("option name ")));
    }
}
