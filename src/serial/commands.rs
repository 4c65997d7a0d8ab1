// Command decoding - one ASCII byte per action

/// Actions reachable from the serial line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    ToggleTriangle,
    ToggleSine,
    StartDemo,
    TriangleStepsDown,
    TriangleStepsUp,
    ToggleOctave,
    ToggleRecording,
    StartPlayback,
}

/// Decode one received byte. Lowercase letters fold to uppercase;
/// anything unrecognized decodes to None and is ignored by the caller.
pub fn decode(byte: u8) -> Option<CommandAction> {
    match byte.to_ascii_uppercase() {
        b'T' => Some(CommandAction::ToggleTriangle),
        b'S' => Some(CommandAction::ToggleSine),
        b'D' => Some(CommandAction::StartDemo),
        b'<' => Some(CommandAction::TriangleStepsDown),
        b'>' => Some(CommandAction::TriangleStepsUp),
        b'U' => Some(CommandAction::ToggleOctave),
        b'R' => Some(CommandAction::ToggleRecording),
        b'P' => Some(CommandAction::StartPlayback),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_and_lowercase_decode_alike() {
        assert_eq!(decode(b'T'), Some(CommandAction::ToggleTriangle));
        assert_eq!(decode(b't'), Some(CommandAction::ToggleTriangle));
        assert_eq!(decode(b'R'), Some(CommandAction::ToggleRecording));
        assert_eq!(decode(b'r'), Some(CommandAction::ToggleRecording));
        assert_eq!(decode(b'p'), Some(CommandAction::StartPlayback));
        assert_eq!(decode(b'u'), Some(CommandAction::ToggleOctave));
        assert_eq!(decode(b'd'), Some(CommandAction::StartDemo));
        assert_eq!(decode(b's'), Some(CommandAction::ToggleSine));
    }

    #[test]
    fn test_angle_brackets_adjust_steps() {
        assert_eq!(decode(b'<'), Some(CommandAction::TriangleStepsDown));
        assert_eq!(decode(b'>'), Some(CommandAction::TriangleStepsUp));
    }

    #[test]
    fn test_unknown_bytes_decode_to_none() {
        assert_eq!(decode(b'X'), None);
        assert_eq!(decode(b'1'), None);
        assert_eq!(decode(b' '), None);
        assert_eq!(decode(b'\n'), None);
        assert_eq!(decode(0), None);
        assert_eq!(decode(255), None);
    }
}
