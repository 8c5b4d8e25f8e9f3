//! Periodic tasks of the temperature display gadget
//!
//! Each task runs one iteration per call and returns how long to wait
//! before the next one. The same task values run under Embassy on the
//! device and under [`CooperativeScheduler`](super::CooperativeScheduler)
//! on the host.

use gizmo_hal::{InputPin, OutputPin};

use super::shared::{DisplaySnapshot, ReadingWriter, SharedDisplayState, UnitWriter};
use crate::config::ClimateConfig;
use crate::sensing::{format_humidity, format_temperature, Label, TemperatureUnit};
use crate::traits::{ClimateSensor, DisplayError, Font, PixelColor, SensorError, TextDisplay};

/// Left edge of the temperature value
pub const VALUE_X: i16 = 30;
/// Baseline of the temperature value and the unit letter
pub const VALUE_Y: i16 = 26;
/// Gap between the value's left edge plus width and the unit letter
pub const UNIT_OFFSET_X: i16 = 35;
/// Humidity line is centered on this column
pub const HUMIDITY_CENTER_X: i16 = 64;
/// Baseline of the humidity line
pub const HUMIDITY_Y: i16 = 50;

/// A unit of work that reschedules itself
pub trait PeriodicTask {
    /// Task name for logs
    fn name(&self) -> &'static str;

    /// Run one iteration at `now_ms`; returns the delay until the next run
    fn run(&mut self, now_ms: u64) -> u32;
}

impl<T: PeriodicTask + ?Sized> PeriodicTask for &mut T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn run(&mut self, now_ms: u64) -> u32 {
        (**self).run(now_ms)
    }
}

/// Button watcher that toggles the display unit
///
/// A press is accepted on the released-to-pressed edge. The indicator is
/// held on for the debounce hold after a press, and otherwise shows the
/// unit (lit for Celsius).
pub struct InputWatchTask<'a, B, L> {
    button: B,
    led: L,
    unit: UnitWriter<'a>,
    poll_ms: u32,
    hold_ms: u32,
    was_pressed: bool,
    toggled: Option<TemperatureUnit>,
}

impl<'a, B: InputPin, L: OutputPin> InputWatchTask<'a, B, L> {
    pub fn new(button: B, led: L, unit: UnitWriter<'a>, config: &ClimateConfig) -> Self {
        Self {
            button,
            led,
            unit,
            poll_ms: config.button_poll_ms,
            hold_ms: config.debounce_hold_ms,
            was_pressed: false,
            toggled: None,
        }
    }

    /// Unit chosen by the most recent press since the last call
    pub fn take_toggle(&mut self) -> Option<TemperatureUnit> {
        self.toggled.take()
    }
}

impl<B: InputPin, L: OutputPin> PeriodicTask for InputWatchTask<'_, B, L> {
    fn name(&self) -> &'static str {
        "input-watch"
    }

    fn run(&mut self, _now_ms: u64) -> u32 {
        let pressed = self.button.is_high();
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;

        if edge {
            self.toggled = Some(self.unit.toggle());
            self.led.set_high();
            return self.hold_ms;
        }

        self.led
            .set_level((self.unit.unit() == TemperatureUnit::Celsius).into());
        self.poll_ms
    }
}

/// Outcome of one sense/display iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SenseReport {
    /// Temperature read failure (stale value kept)
    pub temperature: Option<SensorError>,
    /// Humidity read failure (stale value kept)
    pub humidity: Option<SensorError>,
    /// Rendering failure
    pub display: Option<DisplayError>,
}

impl SenseReport {
    /// Check if everything succeeded
    pub fn is_ok(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none() && self.display.is_none()
    }
}

/// Reads the climate sensor and redraws the display
pub struct SenseDisplayTask<'a, S, D> {
    sensor: S,
    display: D,
    readings: ReadingWriter<'a>,
    state: &'a SharedDisplayState,
    period_ms: u32,
    last_report: SenseReport,
}

impl<'a, S: ClimateSensor, D: TextDisplay> SenseDisplayTask<'a, S, D> {
    pub fn new(
        sensor: S,
        display: D,
        readings: ReadingWriter<'a>,
        state: &'a SharedDisplayState,
        config: &ClimateConfig,
    ) -> Self {
        Self {
            sensor,
            display,
            readings,
            state,
            period_ms: config.sense_period_ms,
            last_report: SenseReport::default(),
        }
    }

    /// Report of the most recent iteration
    pub fn last_report(&self) -> SenseReport {
        self.last_report
    }

    /// The display driver
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Redraw from the shared state without reading the sensor
    pub fn refresh(&mut self) -> Result<(), DisplayError> {
        render_readings(&mut self.display, self.state.snapshot())
    }
}

impl<S: ClimateSensor, D: TextDisplay> PeriodicTask for SenseDisplayTask<'_, S, D> {
    fn name(&self) -> &'static str {
        "sense-display"
    }

    fn run(&mut self, _now_ms: u64) -> u32 {
        let mut report = SenseReport::default();

        match self.sensor.read_temperature_milli() {
            Ok(milli_c) => self.readings.store_temperature(milli_c),
            Err(e) => report.temperature = Some(e),
        }
        match self.sensor.read_humidity_milli() {
            Ok(milli_percent) => self.readings.store_humidity(milli_percent),
            Err(e) => report.humidity = Some(e),
        }

        report.display = self.refresh().err();
        self.last_report = report;
        self.period_ms
    }
}

/// Draw one frame: value, unit letter and humidity line
///
/// Missing readings render as `--`.
pub fn render_readings<D: TextDisplay>(
    display: &mut D,
    snapshot: DisplaySnapshot,
) -> Result<(), DisplayError> {
    display.clear_buffer()?;

    let value = match snapshot.temperature_milli {
        Some(milli_c) => {
            format_temperature(milli_c, snapshot.unit).map_err(|_| DisplayError::BufferOverflow)?
        }
        None => placeholder("--")?,
    };
    display.write_text(Font::Large, VALUE_X, VALUE_Y, &value, PixelColor::On)?;

    let value_width = pixels(display.text_width(Font::Large, &value));
    display.write_text(
        Font::Medium,
        value_width.saturating_add(UNIT_OFFSET_X),
        VALUE_Y,
        snapshot.unit.symbol(),
        PixelColor::On,
    )?;

    let humidity = match snapshot.humidity_milli {
        Some(milli_percent) => {
            format_humidity(milli_percent).map_err(|_| DisplayError::BufferOverflow)?
        }
        None => placeholder("--% H")?,
    };
    let half_width = pixels(display.text_width(Font::Small, &humidity) / 2);
    display.write_text(
        Font::Small,
        HUMIDITY_CENTER_X.saturating_sub(half_width),
        HUMIDITY_Y,
        &humidity,
        PixelColor::On,
    )?;

    display.flush()
}

/// Text width as a coordinate offset, saturating on absurd widths
fn pixels(width: u16) -> i16 {
    i16::try_from(width).unwrap_or(i16::MAX)
}

fn placeholder(text: &str) -> Result<Label, DisplayError> {
    let mut label = Label::new();
    label
        .push_str(text)
        .map_err(|_| DisplayError::BufferOverflow)?;
    Ok(label)
}

#[cfg(test)]
pub(crate) mod mocks {
    use super::*;

    /// Recorded `write_text` call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Written {
        pub font: Font,
        pub x: i16,
        pub y: i16,
        pub text: String,
    }

    /// Display that keeps the last flushed frame
    #[derive(Debug, Default)]
    pub struct FakeDisplay {
        pub buffer: Vec<Written>,
        pub frame: Vec<Written>,
        pub flushes: u32,
        pub fail_flush: bool,
    }

    impl FakeDisplay {
        /// Text drawn with `font` in the last flushed frame
        pub fn text(&self, font: Font) -> Option<&str> {
            self.frame
                .iter()
                .find(|w| w.font == font)
                .map(|w| w.text.as_str())
        }
    }

    impl TextDisplay for FakeDisplay {
        fn clear_buffer(&mut self) -> Result<(), DisplayError> {
            self.buffer.clear();
            Ok(())
        }

        fn write_text(
            &mut self,
            font: Font,
            x: i16,
            y: i16,
            text: &str,
            _color: PixelColor,
        ) -> Result<(), DisplayError> {
            self.buffer.push(Written {
                font,
                x,
                y,
                text: text.into(),
            });
            Ok(())
        }

        fn text_width(&self, font: Font, text: &str) -> u16 {
            let glyph = match font {
                Font::Large => 10,
                Font::Medium => 9,
                Font::Small => 6,
            };
            text.len() as u16 * glyph
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            if self.fail_flush {
                return Err(DisplayError::Bus);
            }
            self.frame = self.buffer.clone();
            self.flushes += 1;
            Ok(())
        }
    }

    /// Sensor returning scripted results, repeating the last one
    pub struct ScriptedSensor {
        pub temperature: Vec<Result<i32, SensorError>>,
        pub humidity: Vec<Result<i32, SensorError>>,
    }

    fn next(script: &mut Vec<Result<i32, SensorError>>) -> Result<i32, SensorError> {
        if script.len() > 1 {
            script.remove(0)
        } else {
            script.first().copied().unwrap_or(Err(SensorError::NotResponding))
        }
    }

    impl ClimateSensor for ScriptedSensor {
        fn connected(&mut self) -> bool {
            true
        }

        fn read_temperature_milli(&mut self) -> Result<i32, SensorError> {
            next(&mut self.temperature)
        }

        fn read_humidity_milli(&mut self) -> Result<i32, SensorError> {
            next(&mut self.humidity)
        }
    }

    /// Button replaying a press pattern, one entry per poll
    pub struct PatternButton {
        pub pattern: Vec<bool>,
        pub index: usize,
    }

    impl InputPin for PatternButton {
        fn is_high(&mut self) -> bool {
            let pressed = self.pattern.get(self.index).copied().unwrap_or(false);
            self.index += 1;
            pressed
        }
    }

    #[derive(Debug, Default)]
    pub struct FakeLed {
        pub on: bool,
    }

    impl OutputPin for FakeLed {
        fn set_high(&mut self) {
            self.on = true;
        }

        fn set_low(&mut self) {
            self.on = false;
        }

        fn is_set_high(&self) -> bool {
            self.on
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::*;
    use super::*;

    #[test]
    fn test_render_layout() {
        let mut display = FakeDisplay::default();
        let snapshot = DisplaySnapshot {
            unit: TemperatureUnit::Fahrenheit,
            temperature_milli: Some(25_000),
            humidity_milli: Some(55_230),
        };

        render_readings(&mut display, snapshot).unwrap();

        assert_eq!(
            display.frame,
            vec![
                Written {
                    font: Font::Large,
                    x: 30,
                    y: 26,
                    text: "77".into()
                },
                Written {
                    font: Font::Medium,
                    x: 20 + 35,
                    y: 26,
                    text: "F".into()
                },
                Written {
                    font: Font::Small,
                    x: 64 - 15,
                    y: 50,
                    text: "55% H".into()
                },
            ]
        );
    }

    #[test]
    fn test_render_saturates_on_huge_widths() {
        struct WideDisplay(FakeDisplay);

        impl TextDisplay for WideDisplay {
            fn clear_buffer(&mut self) -> Result<(), DisplayError> {
                self.0.clear_buffer()
            }

            fn write_text(
                &mut self,
                font: Font,
                x: i16,
                y: i16,
                text: &str,
                color: PixelColor,
            ) -> Result<(), DisplayError> {
                self.0.write_text(font, x, y, text, color)
            }

            fn text_width(&self, _font: Font, _text: &str) -> u16 {
                u16::MAX
            }

            fn flush(&mut self) -> Result<(), DisplayError> {
                self.0.flush()
            }
        }

        let mut display = WideDisplay(FakeDisplay::default());
        let snapshot = DisplaySnapshot {
            unit: TemperatureUnit::Celsius,
            temperature_milli: Some(20_000),
            humidity_milli: Some(50_000),
        };

        render_readings(&mut display, snapshot).unwrap();
        let frame = &display.0.frame;
        assert_eq!(frame[1].x, i16::MAX);
        assert_eq!(frame[2].x, HUMIDITY_CENTER_X - i16::MAX);
    }

    #[test]
    fn test_render_before_first_reading() {
        let mut display = FakeDisplay::default();
        let snapshot = DisplaySnapshot {
            unit: TemperatureUnit::Celsius,
            temperature_milli: None,
            humidity_milli: None,
        };

        render_readings(&mut display, snapshot).unwrap();
        assert_eq!(display.text(Font::Large), Some("--"));
        assert_eq!(display.text(Font::Medium), Some("C"));
        assert_eq!(display.text(Font::Small), Some("--% H"));
    }

    #[test]
    fn test_sense_keeps_stale_value_and_reports() {
        let state = SharedDisplayState::new(true);
        let (_, readings) = state.take_writers().unwrap();
        let sensor = ScriptedSensor {
            temperature: vec![Ok(21_000), Err(SensorError::Bus)],
            humidity: vec![Ok(40_000)],
        };
        let config = ClimateConfig::default();
        let mut task =
            SenseDisplayTask::new(sensor, FakeDisplay::default(), readings, &state, &config);

        assert_eq!(task.run(0), 500);
        assert!(task.last_report().is_ok());
        assert_eq!(task.display().text(Font::Large), Some("21"));

        task.run(500);
        let report = task.last_report();
        assert_eq!(report.temperature, Some(SensorError::Bus));
        assert_eq!(report.humidity, None);
        assert_eq!(state.snapshot().temperature_milli, Some(21_000));
        assert_eq!(task.display().text(Font::Large), Some("21"));
        assert_eq!(task.display().flushes, 2);
    }

    #[test]
    fn test_display_failure_reported() {
        let state = SharedDisplayState::new(false);
        let (_, readings) = state.take_writers().unwrap();
        let sensor = ScriptedSensor {
            temperature: vec![Ok(21_000)],
            humidity: vec![Ok(40_000)],
        };
        let display = FakeDisplay {
            fail_flush: true,
            ..Default::default()
        };
        let mut task =
            SenseDisplayTask::new(sensor, display, readings, &state, &ClimateConfig::default());

        task.run(0);
        assert_eq!(task.last_report().display, Some(DisplayError::Bus));
        assert_eq!(state.snapshot().temperature_milli, Some(21_000));
    }

    #[test]
    fn test_input_watch_toggles_on_edge_only() {
        let state = SharedDisplayState::new(false);
        let (unit, _) = state.take_writers().unwrap();
        let button = PatternButton {
            pattern: vec![false, true, true, true, false, true],
            index: 0,
        };
        let config = ClimateConfig::default();
        let mut task = InputWatchTask::new(button, FakeLed::default(), unit, &config);

        // Released: poll period, LED shows Fahrenheit (off)
        assert_eq!(task.run(0), 50);
        assert!(!task.led.on);
        assert_eq!(task.take_toggle(), None);

        // Press edge: toggle, LED held on
        assert_eq!(task.run(50), 500);
        assert!(task.led.on);
        assert_eq!(task.take_toggle(), Some(TemperatureUnit::Celsius));
        assert_eq!(state.unit(), TemperatureUnit::Celsius);

        // Still held: no second toggle
        assert_eq!(task.run(550), 50);
        assert_eq!(task.run(600), 50);
        assert_eq!(task.take_toggle(), None);
        assert_eq!(state.unit(), TemperatureUnit::Celsius);
        assert!(task.led.on);

        // Release then press again
        task.run(650);
        assert_eq!(task.run(700), 500);
        assert_eq!(state.unit(), TemperatureUnit::Fahrenheit);
        task.run(1200);
        assert!(!task.led.on);
    }
}
