mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use embassy_time::{Duration, Instant};
    use emberwick::{
        LampConfig, LampEngine, LampRunner, ModeId, OutputDriver, PwmChannel, Rgb,
        STRIP_LENGTH, runner::TICK_INTERVAL,
    };

    /// What a platform driver last saw.
    #[derive(Default)]
    struct DriverState {
        channels: [u8; PwmChannel::COUNT],
        pixels: Vec<Rgb>,
        presents: usize,
    }

    /// Records flushed frames into shared state the test can inspect.
    struct RecordingDriver {
        state: Rc<RefCell<DriverState>>,
    }

    impl OutputDriver for RecordingDriver {
        fn write_channel(&mut self, channel: PwmChannel, duty: u8) {
            self.state.borrow_mut().channels[channel as usize] = duty;
        }

        fn write_strip(&mut self, pixels: &[Rgb]) {
            self.state.borrow_mut().pixels = pixels.to_vec();
        }

        fn present(&mut self) {
            self.state.borrow_mut().presents += 1;
        }
    }

    fn runner() -> (LampRunner<RecordingDriver, STRIP_LENGTH>, Rc<RefCell<DriverState>>) {
        let state = Rc::new(RefCell::new(DriverState::default()));
        let driver = RecordingDriver {
            state: Rc::clone(&state),
        };
        let engine = LampEngine::new(LampConfig::default(), 77, Instant::from_millis(0));
        (LampRunner::new(engine, driver), state)
    }

    #[test]
    fn test_deadlines_advance_by_tick_interval() {
        let (mut runner, _state) = runner();
        let first = runner.tick(Instant::from_millis(0), false);
        assert_eq!(first.next_deadline, Instant::from_millis(20));
        assert_eq!(first.sleep_duration, Duration::from_millis(20));

        let second = runner.tick(Instant::from_millis(20), false);
        assert_eq!(second.next_deadline, Instant::from_millis(40));
        assert!(second.sleep_duration <= TICK_INTERVAL);
    }

    #[test]
    fn test_stall_resets_the_schedule() {
        let (mut runner, _state) = runner();
        runner.tick(Instant::from_millis(0), false);
        // Stall well past two intervals; the schedule restarts at now
        // instead of replaying the backlog.
        let result = runner.tick(Instant::from_millis(1000), false);
        assert_eq!(result.next_deadline, Instant::from_millis(1020));
    }

    #[test]
    fn test_every_tick_flushes_the_frame() {
        let (mut runner, state) = runner();
        for i in 0..50u64 {
            runner.tick(Instant::from_millis(i * 20), false);
        }

        let state = state.borrow();
        assert_eq!(state.presents, 50);
        assert_eq!(state.pixels.len(), STRIP_LENGTH);
        // Candle is active: the driver sees the flame duties.
        assert_eq!(
            state.channels,
            *runner.engine().channels().duties()
        );
    }

    #[test]
    fn test_long_press_then_short_press_end_to_end() {
        let (mut runner, state) = runner();
        let mut now = 0u64;

        // Run idle for a moment, then hold the button for 3.5 s.
        while now < 100 {
            runner.tick(Instant::from_millis(now), false);
            now += 20;
        }
        while now < 3600 {
            runner.tick(Instant::from_millis(now), true);
            now += 20;
        }
        runner.tick(Instant::from_millis(now), false);

        assert!(!runner.engine().is_powered());
        {
            let state = state.borrow();
            assert_eq!(state.channels, [0; PwmChannel::COUNT]);
            assert!(state.pixels.iter().all(|p| *p == Rgb::default()));
        }

        // A 100 ms press powers the lamp back on into Candle.
        runner.tick(Instant::from_millis(4000), true);
        runner.tick(Instant::from_millis(4100), false);

        assert!(runner.engine().is_powered());
        assert_eq!(runner.engine().mode_id(), ModeId::Candle);
        let state = state.borrow();
        assert!(state.channels[PwmChannel::White1 as usize] > 0);
        assert!(state.channels[PwmChannel::White2 as usize] > 0);
        assert!(state.channels[PwmChannel::Red as usize] > 0);
        assert_eq!(state.channels[PwmChannel::Uv as usize], 0);
    }
}
