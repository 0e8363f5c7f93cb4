//! Logical events produced by the input mapper.
//!
//! The variant order is stable: `index()` and `from_index()` use it, and the
//! binding table and logs refer to events by their canonical snake_case name.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    LeftPressed,
    LeftReleased,
    RightPressed,
    RightReleased,
    UpPressed,
    UpReleased,
    DownPressed,
    DownReleased,
    SelectPressed,
    SelectReleased,
    StartPressed,
    StartReleased,
    Button1Pressed,
    Button1Released,
    Button2Pressed,
    Button2Released,
    /// Virtual console event: the application was asked to quit.
    TurnOff,
}

/// Raw event index outside the closed `Event` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutOfRange(pub u32);

impl std::fmt::Display for EventOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "event value {} is too big (max {})",
            self.0,
            Event::TurnOff.index()
        )
    }
}

impl std::error::Error for EventOutOfRange {}

impl Event {
    pub const COUNT: usize = 17;

    /// All events in index order.
    pub const ALL: [Event; Event::COUNT] = [
        Event::LeftPressed,
        Event::LeftReleased,
        Event::RightPressed,
        Event::RightReleased,
        Event::UpPressed,
        Event::UpReleased,
        Event::DownPressed,
        Event::DownReleased,
        Event::SelectPressed,
        Event::SelectReleased,
        Event::StartPressed,
        Event::StartReleased,
        Event::Button1Pressed,
        Event::Button1Released,
        Event::Button2Pressed,
        Event::Button2Released,
        Event::TurnOff,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::LeftPressed => "left_pressed",
            Self::LeftReleased => "left_released",
            Self::RightPressed => "right_pressed",
            Self::RightReleased => "right_released",
            Self::UpPressed => "up_pressed",
            Self::UpReleased => "up_released",
            Self::DownPressed => "down_pressed",
            Self::DownReleased => "down_released",
            Self::SelectPressed => "select_pressed",
            Self::SelectReleased => "select_released",
            Self::StartPressed => "start_pressed",
            Self::StartReleased => "start_released",
            Self::Button1Pressed => "button1_pressed",
            Self::Button1Released => "button1_released",
            Self::Button2Pressed => "button2_pressed",
            Self::Button2Released => "button2_released",
            Self::TurnOff => "turn_off",
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(value: u32) -> Result<Self, EventOutOfRange> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(EventOutOfRange(value))
    }

    /// True for the `*_pressed` half of a press/release pair.
    pub fn is_pressed(self) -> bool {
        matches!(
            self,
            Self::LeftPressed
                | Self::RightPressed
                | Self::UpPressed
                | Self::DownPressed
                | Self::SelectPressed
                | Self::StartPressed
                | Self::Button1Pressed
                | Self::Button2Pressed
        )
    }
}

impl TryFrom<u32> for Event {
    type Error = EventOutOfRange;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_index(value)
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn display_matches_canonical_names_in_order() {
        let expected = [
            "left_pressed",
            "left_released",
            "right_pressed",
            "right_released",
            "up_pressed",
            "up_released",
            "down_pressed",
            "down_released",
            "select_pressed",
            "select_released",
            "start_pressed",
            "start_released",
            "button1_pressed",
            "button1_released",
            "button2_pressed",
            "button2_released",
            "turn_off",
        ];
        for (event, name) in Event::ALL.iter().zip(expected) {
            assert_eq!(event.to_string(), name);
        }
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<&str> = Event::ALL.iter().map(|e| e.name()).collect();
        assert_eq!(names.len(), Event::COUNT);
    }

    #[test]
    fn index_round_trips_through_from_index() {
        for (i, event) in Event::ALL.iter().enumerate() {
            assert_eq!(event.index(), i as u32);
            assert_eq!(Event::from_index(i as u32), Ok(*event));
        }
    }

    #[test]
    fn turn_off_is_last() {
        assert_eq!(Event::TurnOff.index(), 16);
        assert_eq!(Event::ALL[Event::COUNT - 1], Event::TurnOff);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(Event::from_index(17), Err(EventOutOfRange(17)));
        assert_eq!(Event::try_from(u32::MAX), Err(EventOutOfRange(u32::MAX)));
        let msg = EventOutOfRange(42).to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("too big"));
    }

    #[test]
    fn pressed_and_released_alternate() {
        for pair in Event::ALL[..16].chunks(2) {
            assert!(pair[0].is_pressed());
            assert!(!pair[1].is_pressed());
        }
        assert!(!Event::TurnOff.is_pressed());
    }
}
