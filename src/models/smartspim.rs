//! models::smartspim
//!
//! The SmartSPIM 1-3 light-sheet instrument, built through the ordinary
//! construction API. Used by `nmeta example smartspim` and as a realistic
//! fixture for tests.

use serde_json::{json, Value};

use super::instrument::Instrument;
use crate::core::schema::{construct_with, ValidationError};
use crate::core::types::Clock;

/// File name prefix the instrument is conventionally written under.
pub const SMARTSPIM_PREFIX: &str = "aind_smartspim";

fn objective(
    na: f64,
    magnification: f64,
    immersion: &str,
    manufacturer: &str,
    model: &str,
    notes: &str,
) -> Value {
    json!({
        "numerical_aperture": na,
        "magnification": magnification,
        "immersion": immersion,
        "manufacturer": manufacturer,
        "model": model,
        "serial_number": "Unknown",
        "notes": notes,
    })
}

fn laser(name: &str, wavelength: i64, max_power: f64) -> Value {
    json!({
        "name": name,
        "type": "laser",
        "coupling": "Single-mode fiber",
        "wavelength": wavelength,
        "max_power": max_power,
        "serial_number": "VL08223M03",
        "manufacturer": "Vortran",
        "model": "Stradus",
        "notes": "All lasers controlled via Vortran VersaLase System",
    })
}

fn filter(name: &str, filter_type: &str, manufacturer: &str, model: &str, index: i64) -> Value {
    json!({
        "name": name,
        "filter_type": filter_type,
        "manufacturer": manufacturer,
        "diameter": 25,
        "thickness": 2.0,
        "model": model,
        "filter_wheel_index": index,
        "serial_number": format!("Unknown-{index}"),
    })
}

/// Field values of the SmartSPIM instrument, without `modification_date`.
pub fn smartspim_fields() -> Value {
    let cylindrical_lenses: Vec<Value> = (1..=4)
        .map(|n| {
            json!({
                "model": "L12-20F-4",
                "manufacturer": "IR Robot Co",
                "serial_number": format!("Unknown-{n}"),
                "travel": 41,
                "notes": format!("Cylindrical lens #{n}"),
            })
        })
        .collect();

    let mut motorized_stages = vec![json!({
        "model": "LS-100",
        "manufacturer": "Applied Scientific Instrumentation",
        "serial_number": "Unknown-0",
        "travel": 100,
        "notes": "Focus stage",
    })];
    motorized_stages.extend(cylindrical_lenses);

    let scanning_stages: Vec<Value> = [
        ("Detection axis", "Z"),
        ("Illumination axis", "X"),
        ("Perpendicular axis", "Y"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (direction, axis))| {
        json!({
            "model": "LS-50",
            "manufacturer": "Applied Scientific Instrumentation",
            "serial_number": format!("Unknown-{i}"),
            "stage_axis_direction": direction,
            "stage_axis_name": axis,
            "travel": 50,
            "notes": format!("Sample stage {axis}"),
        })
    })
    .collect();

    json!({
        "instrument_id": "SmartSPIM1-3",
        "instrument_type": "SmartSPIM",
        "manufacturer": "LifeCanvas",
        "objectives": [
            objective(0.1, 1.6, "multi", "Thorlabs", "TL2X-SAP", ""),
            objective(
                0.2,
                3.6,
                "multi",
                "Thorlabs",
                "TL4X-SAP",
                "Thorlabs TL4X-SAP with LifeCanvas dipping cap and correction optics",
            ),
            objective(0.8, 16.0, "water", "Nikon", "MRP07220", ""),
            objective(1.1, 25.0, "water", "Nikon", "MRD77220", ""),
        ],
        "detectors": [{
            "type": "Camera",
            "data_interface": "USB",
            "cooling": "water",
            "manufacturer": "Hamamatsu",
            "model": "C14440-20UP",
            "serial_number": "220302-SYS-060443",
        }],
        "light_sources": [
            laser("Ex_445", 445, 150.0),
            laser("Ex_488", 488, 150.0),
            laser("Ex_561", 561, 150.0),
            laser("Ex_594", 594, 150.0),
            laser("Ex_639", 639, 160.0),
            laser("Ex_665", 665, 160.0),
        ],
        "motorized_stages": motorized_stages,
        "scanning_stages": scanning_stages,
        "optical_tables": [{
            "model": "VIS3648-PG4-325A",
            "length": 36,
            "width": 48,
            "vibration_control": true,
            "manufacturer": "MKS Newport",
            "serial_number": "Unknown",
        }],
        "humidity_control": false,
        "temperature_control": false,
        "com_ports": [
            {"hardware_name": "Laser Launch", "com_port": "COM3"},
            {"hardware_name": "ASI Tiger", "com_port": "COM5"},
            {"hardware_name": "MightyZap", "com_port": "COM10"},
        ],
        "fluorescence_filters": [
            filter("Em_469", "Band pass", "Semrock", "FF01-469/35-25", 0),
            filter("Em_525", "Band pass", "Semrock", "FF01-525/45-25", 1),
            filter("Em_593", "Band pass", "Semrock", "FF01-593/40-25", 2),
            filter("Em_624", "Band pass", "Semrock", "FF01-624/40-25", 3),
            filter("Em_667", "Band pass", "Chroma", "ET667/30m", 4),
            filter("Em_700", "Long pass", "Thorlabs", "FELH0700", 5),
        ],
        "additional_devices": [
            {
                "type": "Other",
                "manufacturer": "Julabo",
                "model": "200F",
                "serial_number": "10436130",
            },
            {
                "type": "Sample Chamber",
                "manufacturer": "LifeCanvas",
                "model": "Large-uncoated-glass",
                "serial_number": "Unknown-1",
            },
        ],
    })
}

/// Build the SmartSPIM instrument, stamping `modification_date` from `clock`.
pub fn smartspim_instrument(clock: &dyn Clock) -> Result<Instrument, ValidationError> {
    construct_with(smartspim_fields(), clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::{from_text, to_text};
    use crate::core::types::{FixedClock, UtcTimestamp};
    use crate::models::device::Manufacturer;
    use crate::models::instrument::{Immersion, StageAxisName};

    fn clock() -> FixedClock {
        FixedClock::new(UtcTimestamp::parse("2023-10-16T09:30:00Z").unwrap())
    }

    #[test]
    fn builds() {
        let instrument = smartspim_instrument(&clock()).unwrap();

        assert_eq!(instrument.manufacturer, Manufacturer::LifeCanvas);
        assert_eq!(instrument.objectives.len(), 4);
        assert_eq!(instrument.objectives[2].immersion, Immersion::Water);
        assert_eq!(instrument.light_sources.len(), 6);
        assert_eq!(instrument.motorized_stages.len(), 5);
        assert_eq!(instrument.motorized_stages[1].manufacturer, Manufacturer::MightyZap);
        assert_eq!(instrument.scanning_stages[0].stage_axis_name, StageAxisName::Z);
        assert_eq!(instrument.fluorescence_filters[5].filter_wheel_index, Some(5));
        assert_eq!(instrument.com_ports[2].com_port, "COM10");
        assert_eq!(instrument.modification_date, clock().now());
    }

    #[test]
    fn round_trips() {
        let instrument = smartspim_instrument(&clock()).unwrap();
        let text = to_text(&instrument).unwrap();
        assert_eq!(from_text::<Instrument>(&text).unwrap(), instrument);
    }
}
