//! Presentation surface and the display updater that writes into it.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::constants::DEGREE_MARK;
use crate::models::{DisplayRecord, UnitPreference};

/// One named output field per display record value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Region,
    WeatherIcon,
    Sky,
    Temp,
    MinTemp,
    MaxTemp,
    Windspeed,
    Humidity,
    Sunrise,
    Sunset,
}

impl Slot {
    pub const ALL: [Slot; 10] = [
        Slot::Region,
        Slot::WeatherIcon,
        Slot::Sky,
        Slot::Temp,
        Slot::MinTemp,
        Slot::MaxTemp,
        Slot::Windspeed,
        Slot::Humidity,
        Slot::Sunrise,
        Slot::Sunset,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Slot::Region => "Region",
            Slot::WeatherIcon => "Icon",
            Slot::Sky => "Sky",
            Slot::Temp => "Temperature",
            Slot::MinTemp => "Min",
            Slot::MaxTemp => "Max",
            Slot::Windspeed => "Wind",
            Slot::Humidity => "Humidity",
            Slot::Sunrise => "Sunrise",
            Slot::Sunset => "Sunset",
        }
    }

    /// Slots hidden until the info section is expanded
    pub fn is_auxiliary(self) -> bool {
        matches!(
            self,
            Slot::Windspeed | Slot::Humidity | Slot::Sunrise | Slot::Sunset
        )
    }
}

/// Regions whose visibility the widget toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Loader,
    Content,
    AuxInfo,
}

/// Output-only view of the page template
pub trait PresentationSurface {
    fn set_slot(&mut self, slot: Slot, value: &str);
    fn set_visible(&mut self, section: Section, visible: bool);
    fn is_visible(&self, section: Section) -> bool;
}

/// In-memory surface; starts in the loading state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMap {
    slots: BTreeMap<Slot, String>,
    visible: BTreeMap<Section, bool>,
}

impl Default for SlotMap {
    fn default() -> Self {
        let visible = BTreeMap::from([
            (Section::Loader, true),
            (Section::Content, false),
            (Section::AuxInfo, false),
        ]);
        Self {
            slots: BTreeMap::new(),
            visible,
        }
    }
}

impl SlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }
}

impl PresentationSurface for SlotMap {
    fn set_slot(&mut self, slot: Slot, value: &str) {
        self.slots.insert(slot, value.to_string());
    }

    fn set_visible(&mut self, section: Section, visible: bool) {
        self.visible.insert(section, visible);
    }

    fn is_visible(&self, section: Section) -> bool {
        self.visible.get(&section).copied().unwrap_or(false)
    }
}

/// Renders a [`SlotMap`] as a text frame
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    slots: SlotMap,
    out: W,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            slots: SlotMap::new(),
            out,
        }
    }

    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes the current frame; call after each batch of updates
    pub fn flush_frame(&mut self, unit: UnitPreference) -> io::Result<()> {
        let frame = format_frame(&self.slots, unit);
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> PresentationSurface for TerminalSurface<W> {
    fn set_slot(&mut self, slot: Slot, value: &str) {
        self.slots.set_slot(slot, value);
    }

    fn set_visible(&mut self, section: Section, visible: bool) {
        self.slots.set_visible(section, visible);
    }

    fn is_visible(&self, section: Section) -> bool {
        self.slots.is_visible(section)
    }
}

/// Formats the visible part of a slot map into a human-readable block
pub fn format_frame(slots: &SlotMap, unit: UnitPreference) -> String {
    if slots.is_visible(Section::Loader) || !slots.is_visible(Section::Content) {
        return "Loading weather...\n".to_string();
    }

    let mut output = String::from("\n");
    for slot in Slot::ALL {
        if slot.is_auxiliary() && !slots.is_visible(Section::AuxInfo) {
            continue;
        }
        let value = slots.get(slot).unwrap_or("");
        output.push_str(&format!("  {:<12} {}\n", format!("{}:", slot.label()), value));
    }
    output.push_str(&format!(
        "  [{}] c/f unit  d <n> day  r reset  i info  q quit\n",
        unit.symbol()
    ));
    output
}

/// Hides the loading indicator and reveals the main content
pub fn show_content(surface: &mut impl PresentationSurface) {
    surface.set_visible(Section::Loader, false);
    surface.set_visible(Section::Content, true);
}

/// Writes every field of `record` into `surface`, picking temperatures by `unit`
pub fn render(
    record: &DisplayRecord,
    unit: UnitPreference,
    surface: &mut impl PresentationSurface,
) {
    let (temp, min_temp, max_temp) = record.temperatures(unit);

    surface.set_slot(Slot::Temp, &format_temperature(temp));
    surface.set_slot(Slot::MinTemp, &format_temperature(min_temp));
    surface.set_slot(Slot::MaxTemp, &format_temperature(max_temp));

    surface.set_slot(Slot::Region, &record.region);
    surface.set_slot(Slot::WeatherIcon, &record.weather_icon);
    surface.set_slot(Slot::Sky, &record.sky);
    surface.set_slot(Slot::Windspeed, &record.windspeed);
    surface.set_slot(Slot::Humidity, &record.humidity);
    surface.set_slot(Slot::Sunrise, &record.sunrise);
    surface.set_slot(Slot::Sunset, &record.sunset);

    tracing::debug!("Rendered {} in {:?}", record.region, unit);
}

fn format_temperature(value: f64) -> String {
    // -0.0 compares equal to 0.0; print it without the sign
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}{}", value, DEGREE_MARK)
}
