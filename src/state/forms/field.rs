//! Form field identifiers and input masks

/// One input of the dish form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    PreparationTime,
    DishType,
    SliceCount,
    Diameter,
    Spiciness,
    BreadSlices,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::PreparationTime,
        Field::DishType,
        Field::SliceCount,
        Field::Diameter,
        Field::Spiciness,
        Field::BreadSlices,
    ];

    /// Label shown on the field border
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Dish name",
            Field::PreparationTime => "Preparation Time",
            Field::DishType => "Dish type",
            Field::SliceCount => "Number of slices",
            Field::Diameter => "Diameter",
            Field::Spiciness => "Spiciness",
            Field::BreadSlices => "Number of slices of bread",
        }
    }

    /// Key of the field in the request payload
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::PreparationTime => "preparation_time",
            Field::DishType => "type",
            Field::SliceCount => "no_of_slices",
            Field::Diameter => "diameter",
            Field::Spiciness => "spiciness_scale",
            Field::BreadSlices => "slices_of_bread",
        }
    }

    /// Field sent under payload key `key`
    pub fn from_wire_name(key: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|f| f.wire_name() == key)
    }

    /// How keystrokes are applied to this field
    pub fn input_kind(self) -> InputKind {
        match self {
            Field::Name => InputKind::Text,
            Field::PreparationTime => InputKind::ClockTime,
            Field::DishType => InputKind::Choice,
            Field::SliceCount | Field::BreadSlices => InputKind::Integer,
            Field::Diameter => InputKind::Decimal,
            Field::Spiciness => InputKind::Slider,
        }
    }
}

/// Input mechanism of a field. Masks refuse characters instead of reporting
/// them later, so validation only ever sees well-formed partial input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    /// `HH:MM:SS` with the tens of minutes and seconds limited to `0-5`
    ClockTime,
    Integer,
    /// Non-negative decimal with at most two fractional digits
    Decimal,
    Choice,
    Slider,
}

/// Mask for the preparation time: `X` is any digit, `A` is `0-5`
const CLOCK_MASK: &[u8] = b"XX:AX:AX";

/// Longest integer input; every such value fits a `u32`
const MAX_INTEGER_DIGITS: usize = 9;

/// Fractional digits allowed by the 0.01 step of decimal fields
const DECIMAL_PLACES: usize = 2;

impl InputKind {
    /// Apply a typed character to `value`. Returns false if the mask refused it.
    ///
    /// Choice and slider fields are not edited as text and refuse everything.
    pub fn accept(self, value: &mut String, c: char) -> bool {
        match self {
            InputKind::Text => {
                value.push(c);
                true
            }
            InputKind::ClockTime => push_clock_char(value, c),
            InputKind::Integer => {
                if c.is_ascii_digit() && value.len() < MAX_INTEGER_DIGITS {
                    value.push(c);
                    true
                } else {
                    false
                }
            }
            InputKind::Decimal => push_decimal_char(value, c),
            InputKind::Choice | InputKind::Slider => false,
        }
    }

    /// Remove the last character of `value`
    pub fn backspace(self, value: &mut String) {
        value.pop();
        // Separators are re-inserted by the mask, never left dangling
        if self == InputKind::ClockTime && value.ends_with(':') {
            value.pop();
        }
    }
}

fn clock_slot_accepts(slot: u8, c: char) -> bool {
    match slot {
        b'X' => c.is_ascii_digit(),
        b'A' => matches!(c, '0'..='5'),
        _ => false,
    }
}

fn push_clock_char(value: &mut String, c: char) -> bool {
    let pos = value.len();
    let Some(&slot) = CLOCK_MASK.get(pos) else {
        return false;
    };

    if slot == b':' {
        if c == ':' {
            value.push(':');
            return true;
        }
        let next = CLOCK_MASK[pos + 1];
        if !clock_slot_accepts(next, c) {
            return false;
        }
        value.push(':');
        value.push(c);
        return true;
    }

    if clock_slot_accepts(slot, c) {
        value.push(c);
        true
    } else {
        false
    }
}

fn push_decimal_char(value: &mut String, c: char) -> bool {
    match c {
        '.' => {
            if value.contains('.') {
                return false;
            }
            if value.is_empty() {
                value.push('0');
            }
            value.push('.');
            true
        }
        d if d.is_ascii_digit() => {
            if let Some((_, fraction)) = value.split_once('.') {
                if fraction.len() >= DECIMAL_PLACES {
                    return false;
                }
            }
            value.push(d);
            true
        }
        _ => false,
    }
}
