//! Property-based tests for the record framework.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;
use serde_json::{json, Value};

use neurometa::core::codec::{from_text, to_text};
use neurometa::core::schema::{ParamValue, Params, Record};
use neurometa::core::types::{FieldPath, SchemaVersion};
use neurometa::models::stimulus::Software;
use neurometa::models::tile::{Channel, CoordinateTransform};

fn channel_with(wavelength: i64, power: f64) -> Value {
    json!({
        "channel_name": "ch",
        "laser_wavelength": wavelength,
        "laser_power": power,
        "filter_wheel_index": 0,
    })
}

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// Strategy for parameter maps up to two levels deep.
fn params() -> impl Strategy<Value = Params> {
    let scalar = prop_oneof![
        any::<bool>().prop_map(ParamValue::Bool),
        any::<i64>().prop_map(ParamValue::Integer),
        any::<f64>()
            .prop_filter("finite", |x| x.is_finite())
            .prop_map(ParamValue::Number),
        "[ -~]{0,16}".prop_map(ParamValue::Text),
    ];
    let leaf = prop::collection::btree_map(key(), scalar, 0..4);
    prop::collection::btree_map(
        key(),
        prop_oneof![
            3 => any::<bool>().prop_map(ParamValue::Bool),
            3 => any::<i64>().prop_map(ParamValue::Integer),
            1 => leaf.prop_map(ParamValue::Nested),
        ],
        0..6,
    )
}

proptest! {
    /// Wavelengths inside the closed interval construct; everything else is a range issue.
    #[test]
    fn wavelength_bounds(wavelength in 0i64..2000) {
        let result = Channel::from_fields(channel_with(wavelength, 10.0));
        if (300..=1000).contains(&wavelength) {
            prop_assert_eq!(result.unwrap().laser_wavelength, wavelength);
        } else {
            prop_assert!(result.unwrap_err().has("laser_wavelength", "range"));
        }
    }

    /// Laser power has only an upper bound.
    #[test]
    fn power_upper_bound(power in -1000.0f64..=4000.0) {
        let result = Channel::from_fields(channel_with(488, power));
        prop_assert_eq!(result.is_ok(), power <= 2000.0);
    }

    /// Scale transforms need exactly three values.
    #[test]
    fn scale_length(values in prop::collection::vec(-100i32..100, 0..8)) {
        let len = values.len();
        let result = CoordinateTransform::from_fields(json!({"type": "scale", "scale": values}));
        if len == 3 {
            prop_assert_eq!(result.unwrap().values().len(), 3);
        } else {
            prop_assert!(result.unwrap_err().has("scale", "length"));
        }
    }

    /// Channels round-trip through interchange text.
    #[test]
    fn channel_roundtrip(wavelength in 300i64..=1000, power in 0.0f64..=2000.0, index in 0i64..8) {
        let mut fields = channel_with(wavelength, power);
        fields["filter_wheel_index"] = json!(index);

        let channel = Channel::from_fields(fields).unwrap();
        let parsed: Channel = from_text(&to_text(&channel).unwrap()).unwrap();
        prop_assert_eq!(parsed, channel);
    }

    /// Every finite number field value survives text bit for bit.
    #[test]
    fn number_roundtrip_is_exact(power in -1.0e6f64..=2000.0) {
        let channel = Channel::from_fields(channel_with(488, power)).unwrap();
        let parsed: Channel = from_text(&to_text(&channel).unwrap()).unwrap();
        prop_assert_eq!(parsed.laser_power.to_bits(), power.to_bits());
    }

    /// Open parameter maps round-trip with their value shapes intact.
    #[test]
    fn params_roundtrip(parameters in params()) {
        let software = Software::from_fields(json!({
            "name": "acquisition",
            "version": "1.0",
            "parameters": parameters,
        }))
        .unwrap();
        prop_assert_eq!(&software.parameters, &parameters);

        let parsed: Software = from_text(&to_text(&software).unwrap()).unwrap();
        prop_assert_eq!(parsed, software);
    }

    /// Schema versions round-trip through their text form.
    #[test]
    fn schema_version_roundtrip(major in 0u32..1000, minor in 0u32..1000, patch in 0u32..1000) {
        let version = SchemaVersion::new(major, minor, patch);
        prop_assert_eq!(version.to_string().parse::<SchemaVersion>().unwrap(), version);
    }

    /// Field paths render names joined by dots with bracketed indices.
    #[test]
    fn field_path_rendering(name in key(), index in 0usize..100, leaf in key()) {
        let path = FieldPath::root().field(name.as_str()).index(index).field(leaf.as_str());
        prop_assert_eq!(path.to_string(), format!("{name}[{index}].{leaf}"));
    }
}
