//! models::units
//!
//! Unit vocabularies referenced by measurement fields.

use crate::define_vocabulary;

define_vocabulary! {
    /// Units of length
    pub enum SizeUnit as SIZE_UNIT {
        Millimeter = "MM" => "millimeter",
        Centimeter = "CM" => "centimeter",
        Micrometer = "UM" => "micrometer",
        Nanometer = "NM" => "nanometer",
        Inch = "IN" => "inch",
        Pixel = "PX" => "pixel",
    }
}

define_vocabulary! {
    /// Units of frequency
    pub enum FrequencyUnit as FREQUENCY_UNIT {
        Hertz = "HZ" => "hertz",
        Kilohertz = "KHZ" => "kilohertz",
    }
}

define_vocabulary! {
    /// Units of time
    pub enum TimeUnit as TIME_UNIT {
        Second = "S" => "second",
        Millisecond = "MS" => "millisecond",
        Microsecond = "US" => "microsecond",
        Nanosecond = "NS" => "nanosecond",
    }
}

define_vocabulary! {
    /// Units of power
    pub enum PowerUnit as POWER_UNIT {
        Watt = "W" => "watt",
        Milliwatt = "MW" => "milliwatt",
        Microwatt = "UW" => "microwatt",
    }
}

define_vocabulary! {
    /// Units of concentration
    pub enum ConcentrationUnit as CONCENTRATION_UNIT {
        Molar = "M" => "molar",
        Micromolar = "UM" => "micromolar",
        Nanomolar = "NM" => "nanomolar",
        MassPercent = "MASS_PERCENT" => "% mass",
        VolumePercent = "VOLUME_PERCENT" => "% volume",
    }
}

define_vocabulary! {
    /// Units of volume
    pub enum VolumeUnit as VOLUME_UNIT {
        Milliliter = "ML" => "milliliter",
        Microliter = "UL" => "microliter",
        Nanoliter = "NL" => "nanoliter",
    }
}

define_vocabulary! {
    /// Units of sound intensity
    pub enum SoundIntensityUnit as SOUND_INTENSITY_UNIT {
        Decibels = "DB" => "decibels",
    }
}

define_vocabulary! {
    /// Units of angle
    pub enum AngleUnit as ANGLE_UNIT {
        Degree = "DEG" => "degree",
        Radian = "RAD" => "radian",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_map_to_canonical_names() {
        assert_eq!(SIZE_UNIT.value_of("NM"), Some("nanometer"));
        assert_eq!(CONCENTRATION_UNIT.value_of("VOLUME_PERCENT"), Some("% volume"));
        assert_eq!(TimeUnit::Millisecond.as_str(), "millisecond");
        assert_eq!(PowerUnit::Milliwatt.symbol(), "MW");
    }

    #[test]
    fn same_symbol_in_different_vocabularies() {
        assert_eq!(SIZE_UNIT.value_of("UM"), Some("micrometer"));
        assert_eq!(CONCENTRATION_UNIT.value_of("UM"), Some("micromolar"));
    }

    #[test]
    fn parse_canonical_only() {
        assert_eq!("degree".parse::<AngleUnit>().unwrap(), AngleUnit::Degree);
        assert!("DEG".parse::<AngleUnit>().is_err());
    }
}
