use artisan_shortcuts::*;

fn press_and_release(capture: &mut KeyCapture, keys: &[&str]) {
    for key in keys {
        capture.key_down(key);
    }
    for key in keys.iter().rev() {
        capture.key_up(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_order_does_not_matter() {
        let control_first = normalize_keys(["Control", "d"]).unwrap();
        let key_first = normalize_keys(["d", "Control"]).unwrap();

        assert_eq!(control_first, key_first);
        assert_eq!(control_first.to_string(), "CTRL+D");
        assert_eq!(key_first.to_string(), "D+CTRL");
    }

    #[test]
    fn test_modifier_aliases() {
        let combination = normalize_keys(["Meta", "Alt", "Shift", "k"]).unwrap();
        assert_eq!(combination.to_string(), "CMD+ALT+SHIFT+K");
        assert_eq!(
            combination.modifiers().collect::<Vec<_>>(),
            vec![Modifier::Cmd, Modifier::Alt, Modifier::Shift]
        );
    }

    #[test]
    fn test_no_keys_yields_nothing() {
        let capture = KeyCapture::new();
        assert!(capture.combination().is_none());
        assert_eq!(capture.display(), "");
        assert_eq!(
            capture.require_combination(),
            Err(ValidationError::EmptyCombination)
        );
        assert!(normalize_keys([]).is_none());
    }

    #[test]
    fn test_repeats_are_dropped() {
        let mut capture = KeyCapture::new();
        assert!(capture.key_down("Control"));
        assert!(!capture.key_down("Control"));
        assert!(capture.key_down("d"));
        assert!(!capture.key_down("D"));
        assert_eq!(capture.display(), "CTRL+D");
    }

    #[test]
    fn test_release_finalizes_session() {
        let mut capture = KeyCapture::new();
        capture.focus();
        capture.key_down("Control");
        capture.key_down("d");
        assert_eq!(capture.state(), CaptureState::Capturing);

        capture.key_up("d");
        assert_eq!(capture.state(), CaptureState::Capturing);
        capture.key_up("Control");
        assert_eq!(capture.state(), CaptureState::Finalized);
        assert_eq!(capture.display(), "CTRL+D");
    }

    #[test]
    fn test_new_press_after_release_starts_over() {
        let mut capture = KeyCapture::new();
        press_and_release(&mut capture, &["Control", "d"]);
        press_and_release(&mut capture, &["Alt", "x"]);
        assert_eq!(capture.display(), "ALT+X");
    }

    #[test]
    fn test_blur_ends_session() {
        let mut capture = KeyCapture::new();
        capture.focus();
        capture.key_down("Shift");
        capture.blur();

        assert!(!capture.is_focused());
        assert_eq!(capture.state(), CaptureState::Finalized);
        assert_eq!(capture.display(), "SHIFT");

        capture.key_down("a");
        assert_eq!(capture.display(), "A");
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let mut capture = KeyCapture::new();
        press_and_release(&mut capture, &["Control", "d"]);
        capture.clear();

        assert_eq!(capture.state(), CaptureState::Idle);
        assert!(capture.is_empty());
    }

    #[test]
    fn test_special_keys() {
        let combination = normalize_keys(["Control", "+"]).unwrap();
        assert_eq!(combination.to_string(), "CTRL+PLUS");

        let combination = normalize_keys(["Alt", " "]).unwrap();
        assert_eq!(combination.to_string(), "ALT+SPACE");
        assert!(normalize_keys([""]).is_none());
    }

    #[test]
    fn test_seeded_from_stored_combination() {
        let stored: KeyCombination = "CTRL+SHIFT+S".parse().unwrap();
        let mut capture = KeyCapture::from_combination(&stored);
        assert_eq!(capture.state(), CaptureState::Finalized);
        assert_eq!(capture.combination(), Some(stored));

        capture.key_down("F5");
        assert_eq!(capture.display(), "F5");
    }

    #[test]
    fn test_parse_rejects_malformed_combinations() {
        assert_eq!("".parse::<KeyCombination>(), Err(KeyParseError::Empty));
        assert!(matches!(
            "CTRL++D".parse::<KeyCombination>(),
            Err(KeyParseError::EmptySegment(_))
        ));
        assert!(matches!(
            "CTRL+D+Control".parse::<KeyCombination>(),
            Err(KeyParseError::DuplicateKey { .. })
        ));
    }
}
