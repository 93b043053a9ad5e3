//! Laws every record type obeys, checked through the public API.
//!
//! Each section exercises one law across several record families rather
//! than one record family exhaustively.

use serde_json::{json, Value};

use neurometa::core::codec::{from_text, to_text, to_text_with, CodecError, TextOptions};
use neurometa::core::schema::{IssueKind, Record};
use neurometa::core::types::{FixedClock, UtcTimestamp};
use neurometa::models::device::Manufacturer;
use neurometa::models::instrument::{Instrument, Objective, INSTRUMENT};
use neurometa::models::processing::Processing;
use neurometa::models::smartspim::{smartspim_fields, smartspim_instrument};
use neurometa::models::stimulus::Software;
use neurometa::models::tile::{AcquisitionTile, Channel, CoordinateTransform, Tile};

// =============================================================================
// Fixtures
// =============================================================================

fn clock() -> FixedClock {
    FixedClock::new(UtcTimestamp::parse("2023-10-16T09:30:00Z").unwrap())
}

fn channel() -> Value {
    json!({
        "channel_name": "561",
        "laser_wavelength": 561,
        "laser_power": 200.0,
        "filter_wheel_index": 2,
    })
}

fn objective() -> Value {
    json!({
        "manufacturer": "Nikon",
        "numerical_aperture": 0.8,
        "magnification": 16.0,
        "immersion": "water",
    })
}

fn identity_rotation() -> Value {
    json!({
        "type": "rotation",
        "rotation": [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    })
}

fn processing() -> Value {
    json!({
        "processing_pipeline": {
            "person": "Jane Doe",
            "data_processes": [{
                "name": "Image tile fusing",
                "software_version": "1.4.0",
                "start_date_time": "2023-10-16T10:00:00Z",
                "end_date_time": "2023-10-16T12:30:00Z",
                "input_location": "s3://bucket/raw",
                "output_location": "s3://bucket/fused",
                "code_url": "https://example.org/fusion",
                "parameters": {"block_size": 256, "blend": "linear"},
            }],
        },
    })
}

fn with(mut base: Value, key: &str, value: Value) -> Value {
    base[key] = value;
    base
}

fn without(mut base: Value, key: &str) -> Value {
    if let Some(object) = base.as_object_mut() {
        object.remove(key);
    }
    base
}

// =============================================================================
// Construction
// =============================================================================

mod construction {
    use super::*;

    #[test]
    fn valid_fields_are_kept() {
        let channel = Channel::from_fields(channel()).unwrap();
        assert_eq!(channel.channel_name, "561");
        assert_eq!(channel.laser_wavelength, 561);
        assert_eq!(channel.laser_power, 200.0);
        assert_eq!(channel.filter_wheel_index, 2);

        let objective = Objective::from_fields(objective()).unwrap();
        assert_eq!(objective.manufacturer, Manufacturer::Nikon);
        assert_eq!(objective.magnification, 16.0);
        assert_eq!(objective.model, None);
    }

    #[test]
    fn each_missing_required_field_is_named() {
        for field in ["channel_name", "laser_wavelength", "laser_power", "filter_wheel_index"] {
            let err = Channel::from_fields(without(channel(), field)).unwrap_err();
            assert_eq!(err.paths(), vec![field.to_string()], "omitting {field}");
            assert!(err.has(field, "missing_field"));
        }
    }

    #[test]
    fn every_issue_is_reported_at_once() {
        let err = Channel::from_fields(json!({
            "laser_wavelength": 10,
            "laser_power": 5000.0,
            "filter_wheel_index": 0,
            "colour": "green",
        }))
        .unwrap_err();

        assert!(err.has("channel_name", "missing_field"));
        assert!(err.has("laser_wavelength", "range"));
        assert!(err.has("laser_power", "range"));
        assert!(err.has("colour", "unknown_field"));
        assert_eq!(err.issues.len(), 4);
    }

    #[test]
    fn struct_literals_are_rechecked() {
        let mut channel = Channel::from_fields(channel()).unwrap();
        assert!(channel.validate().is_ok());

        channel.laser_wavelength = 1200;
        let err = channel.validate().unwrap_err();
        assert!(err.has("laser_wavelength", "range"));
    }
}

// =============================================================================
// Numeric bounds
// =============================================================================

mod bounds {
    use super::*;

    #[test]
    fn inclusive_bounds_accept_the_boundary() {
        for wavelength in [300, 1000] {
            let fields = with(channel(), "laser_wavelength", json!(wavelength));
            assert!(Channel::from_fields(fields).is_ok(), "{wavelength}");
        }
        for wavelength in [299, 1001] {
            let fields = with(channel(), "laser_wavelength", json!(wavelength));
            let err = Channel::from_fields(fields).unwrap_err();
            assert!(err.has("laser_wavelength", "range"), "{wavelength}");
        }
    }

    #[test]
    fn exclusive_lower_bound_rejects_the_boundary() {
        let at_limit = with(objective(), "numerical_aperture", json!(2.0));
        assert!(Objective::from_fields(at_limit).is_ok());

        for na in [0.0, 2.01] {
            let fields = with(objective(), "numerical_aperture", json!(na));
            let err = Objective::from_fields(fields).unwrap_err();
            assert!(err.has("numerical_aperture", "range"), "{na}");
        }
    }

    #[test]
    fn integers_reject_fractions() {
        let fields = with(channel(), "laser_wavelength", json!(488.5));
        let err = Channel::from_fields(fields).unwrap_err();
        assert!(err.has("laser_wavelength", "type"));
    }

    #[test]
    fn integers_beyond_i64_are_range_issues_at_the_field() {
        let fields = with(channel(), "filter_wheel_index", json!(u64::MAX));
        let err = Channel::from_fields(fields).unwrap_err();
        assert!(err.has("filter_wheel_index", "range"));
        assert_eq!(err.paths(), vec!["filter_wheel_index"]);
    }
}

// =============================================================================
// Fixed-length sequences and unions
// =============================================================================

mod transforms {
    use super::*;

    #[test]
    fn declared_length_is_exact() {
        let ok = json!({"type": "scale", "scale": [0.5, 0.5, 2.0]});
        assert!(CoordinateTransform::from_fields(ok).is_ok());

        for values in [json!([1.0, 1.0]), json!([1.0, 1.0, 1.0, 1.0])] {
            let err = CoordinateTransform::from_fields(json!({"type": "scale", "scale": values}))
                .unwrap_err();
            assert!(err.has("scale", "length"));
        }
    }

    #[test]
    fn tag_selects_the_variant() {
        let rotation = CoordinateTransform::from_fields(identity_rotation()).unwrap();
        assert_eq!(rotation.tag(), "rotation");
        assert_eq!(rotation.values().len(), 9);

        let nine = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let err = CoordinateTransform::from_fields(json!({"type": "scale", "scale": nine}))
            .unwrap_err();
        assert!(matches!(
            err.issues_at("scale").as_slice(),
            [IssueKind::Length { expected: 3, found: 9 }]
        ));
    }

    #[test]
    fn untagged_payload_must_match_one_variant() {
        let affine = CoordinateTransform::from_fields(json!({
            "affinetransform": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0],
        }))
        .unwrap();
        assert_eq!(affine.tag(), "affine");

        let err = CoordinateTransform::from_fields(json!({"shear": [1.0]})).unwrap_err();
        assert!(err.has("$", "union_match"));
    }

    #[test]
    fn list_elements_resolve_independently() {
        let tile = Tile::from_fields(json!({
            "coordinate_transformations": [
                {"type": "translation", "translation": [10.0, 20.0, 0.0]},
                identity_rotation(),
                {"type": "scale", "scale": [1.8, 1.8, 2.0]},
            ],
        }))
        .unwrap();

        let tags: Vec<_> = tile.coordinate_transformations.iter().map(|t| t.tag()).collect();
        assert_eq!(tags, ["translation", "rotation", "scale"]);
    }
}

// =============================================================================
// Vocabularies
// =============================================================================

mod vocabularies {
    use super::*;

    #[test]
    fn manufacturer_must_be_listed() {
        let err = Objective::from_fields(with(objective(), "manufacturer", json!("Acme Optics")))
            .unwrap_err();
        assert!(matches!(
            err.issues_at("manufacturer").as_slice(),
            [IssueKind::Enum { value, .. }] if value == "Acme Optics"
        ));

        let asi = with(objective(), "manufacturer", json!("Applied Scientific Instrumentation"));
        assert_eq!(
            Objective::from_fields(asi).unwrap().manufacturer,
            Manufacturer::Asi
        );
    }

    #[test]
    fn serialized_form_is_the_canonical_value() {
        let objective = Objective::from_fields(objective()).unwrap();
        let value = serde_json::to_value(&objective).unwrap();
        assert_eq!(value["manufacturer"], "Nikon");
        assert_eq!(value["immersion"], "water");
    }
}

// =============================================================================
// Composite aggregation
// =============================================================================

mod composites {
    use super::*;

    #[test]
    fn nested_paths_are_reported() {
        let mut fields = smartspim_fields();
        fields["objectives"][1]["numerical_aperture"] = json!(3.5);
        fields["light_sources"][0]["wavelength"] = json!(250);

        let err = Instrument::from_fields(fields).unwrap_err();
        assert_eq!(err.record, "instrument");
        assert!(err.has("objectives[1].numerical_aperture", "range"));
        assert!(err.has("light_sources[0].wavelength", "range"));
    }

    #[test]
    fn nested_record_inside_tile() {
        let err = AcquisitionTile::from_fields(json!({
            "coordinate_transformations": [identity_rotation()],
            "channel": without(channel(), "laser_power"),
        }))
        .unwrap_err();
        assert_eq!(err.paths(), vec!["channel.laser_power".to_string()]);
    }

    #[test]
    fn defaults_fill_nested_records() {
        let tile = AcquisitionTile::from_fields(json!({
            "coordinate_transformations": [identity_rotation()],
            "channel": channel(),
        }))
        .unwrap();
        assert_eq!(tile.imaging_angle, 0);
        assert_eq!(tile.channel.laser_power_unit.as_str(), "milliwatt");
    }
}

// =============================================================================
// Round trips
// =============================================================================

mod round_trips {
    use super::*;

    #[test]
    fn instrument() {
        let instrument = smartspim_instrument(&clock()).unwrap();
        let text = to_text(&instrument).unwrap();
        let parsed: Instrument = from_text(&text).unwrap();
        assert_eq!(parsed, instrument);
    }

    #[test]
    fn shortest_float_text_reads_back_exactly() {
        for power in [961.1757480989835_f64, 110.34448250981299, 1542.6731677659777] {
            let channel = Channel::from_fields(with(channel(), "laser_power", json!(power))).unwrap();
            let parsed: Channel = from_text(&to_text(&channel).unwrap()).unwrap();
            assert_eq!(parsed.laser_power.to_bits(), power.to_bits(), "{power}");
        }
    }

    #[test]
    fn instrument_keys_follow_declaration_order() {
        let instrument = smartspim_instrument(&clock()).unwrap();
        let value: Value = serde_json::from_str(&to_text(&instrument).unwrap()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();

        let mut expected = vec!["kind", "schema_version", "described_by"];
        expected.extend(INSTRUMENT.field_names());
        assert_eq!(keys, expected);
    }

    #[test]
    fn processing_without_defaults() {
        let processing = Processing::from_fields(processing()).unwrap();
        let options = TextOptions {
            include_defaults: false,
            ..TextOptions::default()
        };
        let text = to_text_with(&processing, &options).unwrap();
        assert!(!text.contains("\"outputs\""));

        let parsed: Processing = from_text(&text).unwrap();
        assert_eq!(parsed, processing);
    }

    #[test]
    fn software_parameters() {
        let software = Software::from_fields(json!({
            "name": "Bonsai",
            "version": "2.7",
            "parameters": {"seed": 7, "nested": {"enabled": true}},
        }))
        .unwrap();
        let text = to_text(&software).unwrap();
        assert_eq!(from_text::<Software>(&text).unwrap(), software);
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let processing = Processing::from_fields(processing()).unwrap();
        let text = to_text(&processing).unwrap();

        match from_text::<Instrument>(&text) {
            Err(CodecError::Invalid(err)) => assert!(err.has("kind", "schema_kind")),
            other => panic!("expected kind mismatch, got {other:?}"),
        }
    }

    #[test]
    fn other_versions_are_rejected() {
        let instrument = smartspim_instrument(&clock()).unwrap();
        let text = to_text(&instrument)
            .unwrap()
            .replace("\"schema_version\": \"0.5.4\"", "\"schema_version\": \"0.5.3\"");

        match from_text::<Instrument>(&text) {
            Err(CodecError::Invalid(err)) => assert!(err.has("schema_version", "schema_version")),
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }
}
