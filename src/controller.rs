//! Session state and the events that drive re-rendering.

use crate::display::{render, show_content, PresentationSurface, Section};
use crate::error::{ParseDayError, SelectionError};
use crate::models::{DaySelector, RawWeatherRecord, UnitPreference};
use crate::selector;

/// User interactions the widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SelectUnit(UnitPreference),
    Reset,
    SelectDay(DaySelector),
    ToggleInfo,
}

/// A line of terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Quit,
}

impl Command {
    /// Parses a terminal command. Returns `Ok(None)` for blank or unknown input.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseDayError> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        let command = match word.to_ascii_lowercase().as_str() {
            "c" | "celsius" => Command::Event(Event::SelectUnit(UnitPreference::Celsius)),
            "f" | "fahrenheit" => Command::Event(Event::SelectUnit(UnitPreference::Fahrenheit)),
            "r" | "reset" => Command::Event(Event::Reset),
            "d" | "day" => Command::Event(Event::SelectDay(rest.parse()?)),
            "i" | "info" => Command::Event(Event::ToggleInfo),
            "q" | "quit" => Command::Quit,
            _ => return Ok(None),
        };
        Ok(Some(command))
    }
}

/// Everything the widget knows after startup
#[derive(Debug, Clone)]
pub struct Session {
    pub record: RawWeatherRecord,
    pub unit: UnitPreference,
    pub day: DaySelector,
    pub info_expanded: bool,
}

impl Session {
    pub fn new(record: RawWeatherRecord) -> Self {
        Self {
            record,
            unit: UnitPreference::default(),
            day: DaySelector::default(),
            info_expanded: false,
        }
    }
}

/// Owns the session and pushes it into a surface on every change
#[derive(Debug)]
pub struct InteractionController {
    session: Session,
}

impl InteractionController {
    pub fn new(record: RawWeatherRecord) -> Self {
        Self {
            session: Session::new(record),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reveals the content and performs the initial render
    pub fn start(&self, surface: &mut impl PresentationSurface) -> Result<(), SelectionError> {
        self.refresh(surface)?;
        show_content(surface);
        surface.set_visible(Section::AuxInfo, self.session.info_expanded);
        tracing::info!("Widget ready for {}", self.session.record.location.region);
        Ok(())
    }

    /// Applies `event` and re-renders. A failed event leaves the session and surface unchanged.
    pub fn handle(
        &mut self,
        event: Event,
        surface: &mut impl PresentationSurface,
    ) -> Result<(), SelectionError> {
        tracing::debug!("Handling {:?}", event);

        match event {
            Event::SelectUnit(unit) if unit == self.session.unit => Ok(()),
            Event::SelectUnit(unit) => self.show(unit, self.session.day, surface),
            Event::Reset => self.show(self.session.unit, DaySelector::Current, surface),
            Event::SelectDay(day) => self.show(self.session.unit, day, surface),
            Event::ToggleInfo => {
                self.session.info_expanded = !self.session.info_expanded;
                surface.set_visible(Section::AuxInfo, self.session.info_expanded);
                Ok(())
            }
        }
    }

    /// Selects first, commits `unit` and `day` only once the selection succeeded
    fn show(
        &mut self,
        unit: UnitPreference,
        day: DaySelector,
        surface: &mut impl PresentationSurface,
    ) -> Result<(), SelectionError> {
        let record = selector::select(&self.session.record, day)?;
        tracing::debug!("Showing {} in {}", day, unit.symbol());
        render(&record, unit, surface);
        self.session.unit = unit;
        self.session.day = day;
        Ok(())
    }

    fn refresh(&self, surface: &mut impl PresentationSurface) -> Result<(), SelectionError> {
        let record = selector::select(&self.session.record, self.session.day)?;
        render(&record, self.session.unit, surface);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{Slot, SlotMap};
    use crate::selector::fixtures;

    fn started() -> (InteractionController, SlotMap) {
        let controller = InteractionController::new(fixtures::berlin());
        let mut surface = SlotMap::new();
        controller.start(&mut surface).unwrap();
        (controller, surface)
    }

    #[test]
    fn test_start_shows_current_in_celsius() {
        let (controller, surface) = started();
        assert!(surface.is_visible(Section::Content));
        assert!(!surface.is_visible(Section::Loader));
        assert!(!surface.is_visible(Section::AuxInfo));
        assert_eq!(surface.get(Slot::Temp), Some("20\u{00b0}"));
        assert_eq!(controller.session().day, DaySelector::Current);
        assert_eq!(controller.session().unit, UnitPreference::Celsius);
    }

    #[test]
    fn test_unit_toggle_switches_temperatures() {
        let (mut controller, mut surface) = started();
        let before = surface.clone();

        controller
            .handle(Event::SelectUnit(UnitPreference::Fahrenheit), &mut surface)
            .unwrap();

        assert_eq!(surface.get(Slot::Temp), Some("68\u{00b0}"));
        assert_eq!(surface.get(Slot::Sky), before.get(Slot::Sky));
        assert_eq!(surface.get(Slot::Humidity), before.get(Slot::Humidity));
    }

    #[test]
    fn test_selecting_active_unit_is_noop() {
        let (mut controller, mut surface) = started();
        let before = surface.clone();
        controller
            .handle(Event::SelectUnit(UnitPreference::Celsius), &mut surface)
            .unwrap();
        assert_eq!(surface, before);
    }

    #[test]
    fn test_day_select_keeps_unit() {
        let (mut controller, mut surface) = started();
        controller
            .handle(Event::SelectUnit(UnitPreference::Fahrenheit), &mut surface)
            .unwrap();
        controller
            .handle(Event::SelectDay(DaySelector::Forecast(1)), &mut surface)
            .unwrap();

        assert_eq!(surface.get(Slot::Sky), Some("Light rain"));
        assert_eq!(surface.get(Slot::Temp), Some("60.8\u{00b0}"));
        assert_eq!(controller.session().unit, UnitPreference::Fahrenheit);
    }

    #[test]
    fn test_reset_returns_to_current() {
        let (mut controller, mut surface) = started();
        controller
            .handle(Event::SelectDay(DaySelector::Forecast(2)), &mut surface)
            .unwrap();
        assert_eq!(surface.get(Slot::Sky), Some("Sunny"));
        assert_eq!(surface.get(Slot::Temp), Some("22.1\u{00b0}"));

        controller.handle(Event::Reset, &mut surface).unwrap();
        assert_eq!(controller.session().day, DaySelector::Current);
        assert_eq!(surface.get(Slot::Temp), Some("20\u{00b0}"));
    }

    #[test]
    fn test_out_of_range_day_keeps_previous_state() {
        let (mut controller, mut surface) = started();
        controller
            .handle(Event::SelectDay(DaySelector::Forecast(1)), &mut surface)
            .unwrap();
        let before = surface.clone();

        let err = controller
            .handle(Event::SelectDay(DaySelector::Forecast(7)), &mut surface)
            .unwrap_err();

        assert!(matches!(err, SelectionError::DayOutOfRange { day: 7, .. }));
        assert_eq!(controller.session().day, DaySelector::Forecast(1));
        assert_eq!(surface, before);
    }

    #[test]
    fn test_failed_events_leave_session_unchanged() {
        let mut record = fixtures::berlin();
        record.forecast.forecastday.clear();
        let mut controller = InteractionController::new(record);
        let mut surface = SlotMap::new();

        let err = controller
            .handle(Event::SelectUnit(UnitPreference::Fahrenheit), &mut surface)
            .unwrap_err();
        assert_eq!(err, SelectionError::NoForecastDays);
        assert_eq!(controller.session().unit, UnitPreference::Celsius);

        assert!(controller.handle(Event::Reset, &mut surface).is_err());
        assert!(controller
            .handle(Event::SelectDay(DaySelector::Forecast(0)), &mut surface)
            .is_err());
        assert_eq!(controller.session().day, DaySelector::Current);
        assert_eq!(controller.session().unit, UnitPreference::Celsius);
        assert_eq!(surface, SlotMap::new());
    }

    #[test]
    fn test_toggle_info() {
        let (mut controller, mut surface) = started();
        controller.handle(Event::ToggleInfo, &mut surface).unwrap();
        assert!(surface.is_visible(Section::AuxInfo));
        controller.handle(Event::ToggleInfo, &mut surface).unwrap();
        assert!(!surface.is_visible(Section::AuxInfo));
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(
            Command::parse("f").unwrap(),
            Some(Command::Event(Event::SelectUnit(UnitPreference::Fahrenheit)))
        );
        assert_eq!(
            Command::parse("day 2").unwrap(),
            Some(Command::Event(Event::SelectDay(DaySelector::Forecast(2))))
        );
        assert_eq!(
            Command::parse("d").unwrap(),
            Some(Command::Event(Event::SelectDay(DaySelector::Current)))
        );
        assert_eq!(Command::parse("Q").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("hello").unwrap(), None);
        assert!(Command::parse("day x").is_err());
    }
}
