mod tests {
    use embassy_time::{Duration, Instant};
    use emberwick::{
        ButtonEvent, LampConfig, LampEngine, ModeId, PwmChannel, Rgb, STRIP_LENGTH,
    };

    const SHORT: ButtonEvent = ButtonEvent::ShortPress(Duration::from_millis(100));
    const LONG: ButtonEvent = ButtonEvent::LongPress(Duration::from_millis(3500));

    fn engine() -> LampEngine<STRIP_LENGTH> {
        LampEngine::new(LampConfig::default(), 99, Instant::from_millis(0))
    }

    #[test]
    fn test_starts_powered_in_candle() {
        let engine = engine();
        assert!(engine.is_powered());
        assert_eq!(engine.mode_id(), ModeId::Candle);
    }

    #[test]
    fn test_short_press_cycles_all_four_modes() {
        let mut engine = engine();
        let expected = [ModeId::Color, ModeId::Magic, ModeId::Auto, ModeId::Candle];
        for (i, mode) in expected.into_iter().enumerate() {
            engine.handle_event(SHORT, Instant::from_millis((i as u64 + 1) * 1000));
            assert_eq!(engine.mode_id(), mode);
            assert_eq!(engine.last_active(), mode);
        }
    }

    #[test]
    fn test_long_press_zeroes_outputs_from_any_mode() {
        // Cycle 0..4 presses before powering off so every mode is covered.
        for presses in 0..4u64 {
            let mut engine = engine();
            for i in 0..presses {
                engine.handle_event(SHORT, Instant::from_millis((i + 1) * 1000));
            }
            engine.handle_event(LONG, Instant::from_millis(10_000));

            assert!(!engine.is_powered());
            for channel in PwmChannel::ALL {
                assert_eq!(engine.channels().get(channel), 0);
            }
            assert!(engine.pixels().iter().all(|p| *p == Rgb::default()));
        }
    }

    #[test]
    fn test_tick_is_ignored_while_powered_off() {
        let mut engine = engine();
        engine.handle_event(LONG, Instant::from_millis(1000));
        for i in 0..100u64 {
            engine.tick(Instant::from_millis(2000 + i * 20));
        }
        for channel in PwmChannel::ALL {
            assert_eq!(engine.channels().get(channel), 0);
        }
    }

    #[test]
    fn test_power_on_restores_last_active_mode() {
        let mut engine = engine();
        engine.handle_event(SHORT, Instant::from_millis(1000));
        engine.handle_event(SHORT, Instant::from_millis(2000));
        assert_eq!(engine.mode_id(), ModeId::Magic);

        engine.handle_event(LONG, Instant::from_millis(3000));
        assert!(!engine.is_powered());

        // Power-on restores Magic, not Candle, and does not cycle.
        engine.handle_event(SHORT, Instant::from_millis(4000));
        assert!(engine.is_powered());
        assert_eq!(engine.mode_id(), ModeId::Magic);
    }

    #[test]
    fn test_press_start_is_observational_only() {
        let mut engine = engine();
        engine.handle_event(
            ButtonEvent::PressStart(Instant::from_millis(500)),
            Instant::from_millis(500),
        );
        assert!(engine.is_powered());
        assert_eq!(engine.mode_id(), ModeId::Candle);
    }

    #[test]
    fn test_candle_enter_output_shape() {
        let engine = engine();
        assert!(engine.channels().get(PwmChannel::White1) > 0);
        assert!(engine.channels().get(PwmChannel::White2) > 0);
        assert!(engine.channels().get(PwmChannel::Red) > 0);
        assert_eq!(engine.channels().get(PwmChannel::Uv), 0);
    }
}
