//! models::device
//!
//! Generic devices and manufacturer vocabularies.

use serde::{Deserialize, Serialize};

use crate::core::schema::{FieldDescriptor, FieldKind, Record, RecordSchema};
use crate::core::types::SchemaVersion;
use crate::define_vocabulary;

define_vocabulary! {
    /// Device manufacturer name
    pub enum DeviceManufacturer as DEVICE_MANUFACTURER {
        Thorlabs = "THORLABS" => "Thorlabs",
        Optotune = "OPTOTUNE" => "Optotune",
        CambridgeTechnology = "CAMBRIDGE_TECHNOLOGY" => "Cambridge Technology",
        Nikon = "NIKON" => "Nikon",
        EdmundOptics = "EDMUND_OPTICS" => "Edmund Optics",
        Ealing = "EALING" => "Ealing",
        Hamamatsu = "HAMAMATSU" => "Hamamatsu",
        Other = "OTHER" => "Other",
    }
}

define_vocabulary! {
    /// Detector manufacturer name
    pub enum DetectorManufacturer as DETECTOR_MANUFACTURER {
        Hamamatsu = "HAMAMATSU" => "Hamamatsu",
        Pcos = "PCOS" => "PCOS",
        Other = "OTHER" => "other",
    }
}

define_vocabulary! {
    /// Device type name
    pub enum DeviceType as DEVICE_TYPE {
        Diffuser = "DIFFUSER" => "Diffuser",
        Galvo = "GALVO" => "Galvo",
        BeamExpander = "BEAM_EXPANDER" => "Beam expander",
        LaserCoupler = "LASER_COUPLER" => "Laser coupler",
        Prism = "PRISM" => "Prism",
        Objective = "OBJECTIVE" => "Objective",
        Slit = "SLIT" => "Slit",
        Other = "OTHER" => "Other",
    }
}

define_vocabulary! {
    /// Instrument and component vendors
    pub enum Manufacturer as MANUFACTURER {
        Asi = "ASI" => "Applied Scientific Instrumentation",
        Chroma = "CHROMA" => "Chroma",
        CoherentScientific = "COHERENT_SCIENTIFIC" => "Coherent Scientific",
        Hamamatsu = "HAMAMATSU" => "Hamamatsu",
        Julabo = "JULABO" => "Julabo",
        LifeCanvas = "LIFECANVAS" => "LifeCanvas",
        MightyZap = "MIGHTY_ZAP" => "IR Robot Co",
        MksNewport = "MKS_NEWPORT" => "MKS Newport",
        Nikon = "NIKON" => "Nikon",
        Oxxius = "OXXIUS" => "Oxxius",
        Semrock = "SEMROCK" => "Semrock",
        Thorlabs = "THORLABS" => "Thorlabs",
        Vortran = "VORTRAN" => "Vortran",
        Other = "OTHER" => "Other",
    }
}

pub static DEVICE: RecordSchema = RecordSchema {
    id: "device",
    version: SchemaVersion::new(0, 1, 0),
    title: "Device",
    description: "Description of a general device",
    fields: &[
        FieldDescriptor::required("type", "Type", FieldKind::Enum(&DEVICE_TYPE))
            .described("Type of device. If Other please describe in Notes."),
        FieldDescriptor::required(
            "manufacturer",
            "Manufacturer",
            FieldKind::Enum(&DEVICE_MANUFACTURER),
        ),
        FieldDescriptor::optional("model", "Model", FieldKind::String),
        FieldDescriptor::optional("serial_number", "Serial number", FieldKind::String),
        FieldDescriptor::optional("notes", "Notes", FieldKind::String),
    ],
};

/// Description of a general device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Device {
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub manufacturer: DeviceManufacturer,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
}

impl Record for Device {
    const SCHEMA: &'static RecordSchema = &DEVICE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn construct_with_required_only() {
        let device = Device::from_fields(json!({
            "type": "Galvo",
            "manufacturer": "Cambridge Technology",
        }))
        .unwrap();

        assert_eq!(device.device_type, DeviceType::Galvo);
        assert_eq!(device.manufacturer, DeviceManufacturer::CambridgeTechnology);
        assert!(device.model.is_none());
    }

    #[test]
    fn manufacturer_outside_vocabulary_rejected() {
        let err = Device::from_fields(json!({
            "type": "Galvo",
            "manufacturer": "Acme",
        }))
        .unwrap_err();

        assert_eq!(
            err.issues_at("manufacturer"),
            vec![&crate::core::schema::IssueKind::Enum {
                vocabulary: "DeviceManufacturer",
                value: "Acme".into()
            }]
        );
    }

    #[test]
    fn detector_other_is_lowercase() {
        assert_eq!(DetectorManufacturer::Other.as_str(), "other");
        assert!(!DETECTOR_MANUFACTURER.contains("Other"));
    }
}
