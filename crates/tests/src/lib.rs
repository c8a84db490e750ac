//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 配置文件 -> 上下文 -> 载荷 全链路
//! - 线格式快照 (full / minimal)
//! - 边界与降级策略 (空帧、未配置传感器、对象上限)

#[cfg(test)]
mod fixtures {
    use contracts::{
        BoundingBox, EventMessageMeta, FrameObjectDescription, ObjectType, SimpleObjectMeta,
    };
    use std::io::Write;
    use tempfile::NamedTempFile;

    pub const TS: &str = "2018-04-11T04:59:59.828Z";

    pub const KEY_VALUE_CONFIG: &str = r#"
[sensor0]
enable=1
type=Camera
id=HWY_20_AND_LOCUST__EBA__4_11_2018_4_59_59_508_AM_UTC-07_00
location=45.293701447;-75.8303914499;48.1557479338
description=Aisle Camera
coordinate=5.2;10.1;11.2

[sensor1]
enable=0
type=Camera
id=DISABLED

[sensor2]
enable=1
type=Puck
id=PUCK_2
description=Entrance of Endeavor Garage Right Lane

[place0]
enable=1
id=0
type=intersection/road
name=HWY_20_AND_LOCUST
"#;

    pub const CSV_CONFIG: &str = "\
cameraId,id,description,lat,lon
C-100,cam-north,North entrance,45.1,-75.8
C-101,cam-south,South entrance,45.2,-75.9
C-102,cam-lobby,Lobby,45.3,-75.7
";

    pub fn write_config(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    pub fn detection(tracking_id: i32, label: &str) -> SimpleObjectMeta {
        SimpleObjectMeta {
            object_type: if label == "person" {
                ObjectType::Person
            } else {
                ObjectType::Vehicle
            },
            bbox: BoundingBox::new(100.0, 200.0, 50.5, 120.0),
            confidence: 0.92,
            tracking_id,
            label: label.into(),
        }
    }

    /// Frame event as the pipeline probe builds it
    pub fn frame_event(sensor_id: u32, frame_id: u32, labels: &[&str]) -> EventMessageMeta {
        let mut frame = FrameObjectDescription::new(frame_id, 1920, 1080);
        for (i, label) in labels.iter().enumerate() {
            frame.push_object(detection(i as i32, label));
        }
        let mut event = EventMessageMeta::for_frame(sensor_id, frame);
        event.sensor_label = Some("sensor-0".to_string());
        event.timestamp = TS.to_string();
        event
    }
}

#[cfg(test)]
mod config_tests {
    use super::fixtures::*;
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::ContractError;
    use msgconv::{MsgConvContext, MsgConvError, PayloadKind};

    #[test]
    fn test_key_value_round_trip_lookup() {
        let file = write_config(KEY_VALUE_CONFIG, ".txt");
        let ctx = MsgConvContext::create(Some(file.path()), PayloadKind::FullSchema).unwrap();
        let sensors = ctx.sensors().unwrap();

        assert_eq!(sensors.len(), 2);
        let s0 = sensors.resolve(0).unwrap();
        assert_eq!(
            s0.id,
            "HWY_20_AND_LOCUST__EBA__4_11_2018_4_59_59_508_AM_UTC-07_00"
        );
        assert_eq!(s0.sensor_type, "Camera");
        assert_eq!(s0.description, "Aisle Camera");

        let s2 = sensors.resolve(2).unwrap();
        assert_eq!(s2.id, "PUCK_2");
        assert_eq!(s2.sensor_type, "Puck");

        assert!(sensors.get(1).is_none());
    }

    #[test]
    fn test_csv_rows_map_to_indices() {
        let file = write_config(CSV_CONFIG, ".csv");
        let ctx = MsgConvContext::create(Some(file.path()), PayloadKind::FullSchema).unwrap();
        let sensors = ctx.sensors().unwrap();

        let expected = ["cam-north", "cam-south", "cam-lobby"];
        for (index, id) in expected.iter().enumerate() {
            let record = sensors.resolve(index as u32).unwrap();
            assert_eq!(record.id, *id);
            assert_eq!(record.sensor_type, "Camera");
        }
        assert!(sensors.get(3).is_none());
    }

    #[test]
    fn test_short_csv_row_aborts_context_creation() {
        let file = write_config("cameraId,id,description\nC0,a,b\nC1,only-two\n", ".csv");
        let err = MsgConvContext::create(Some(file.path()), PayloadKind::FullSchema).unwrap_err();
        assert!(matches!(
            err,
            MsgConvError::Config(ContractError::CsvRow { line: 3, .. })
        ));
    }

    #[test]
    fn test_duplicate_sensor_aborts_context_creation() {
        let file = write_config(
            "[sensor3]\nenable=true\nid=a\n[sensor03]\nenable=true\nid=b\n",
            ".txt",
        );
        let err =
            MsgConvContext::create(Some(file.path()), PayloadKind::MinimalSchema).unwrap_err();
        assert!(matches!(
            err,
            MsgConvError::Config(ContractError::DuplicateSensor { index: 3, .. })
        ));
    }

    #[test]
    fn test_serialized_table_reloads() {
        let table = ConfigLoader::load_from_str(KEY_VALUE_CONFIG, ConfigFormat::KeyValue).unwrap();
        let text = ConfigLoader::to_key_value(&table);
        let file = write_config(&text, ".txt");
        assert_eq!(ConfigLoader::load_from_path(file.path()).unwrap(), table);
    }
}

#[cfg(test)]
mod e2e_tests {
    use super::fixtures::*;
    use contracts::{
        ExtendedPayload, ObjectType, PersonAttributes, VehicleAttributes, MAX_OBJ_NUM,
    };
    use msgconv::{EventMessageMeta, MsgConvContext, PayloadKind};
    use serde_json::Value;

    fn full_context() -> MsgConvContext {
        let file = write_config(KEY_VALUE_CONFIG, ".txt");
        MsgConvContext::create(Some(file.path()), PayloadKind::FullSchema).unwrap()
    }

    /// Probe -> context -> payload -> release -> destroy
    #[test]
    fn test_e2e_full_schema() {
        let ctx = msgconv::create_context(None, PayloadKind::Custom).unwrap();
        msgconv::destroy_context(ctx);

        let ctx = full_context();
        let event = frame_event(2, 90, &["car", "person", "car"]);

        let payload = msgconv::generate(&ctx, &[event]).unwrap();
        let text = payload.as_str().unwrap().to_string();
        assert_eq!(payload.len(), text.len());
        assert!(!text.ends_with('\0'));
        msgconv::release(payload);

        let value: Value = serde_json::from_str(&text).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        // serde_json::Map sorts keys without preserve_order; check raw order instead
        assert_eq!(keys.len(), 6);
        let positions: Vec<usize> = [
            "\"messageid\"",
            "\"mdsversion\"",
            "\"@timestamp\"",
            "\"sensor\"",
            "\"objects\"",
            "\"frame\"",
        ]
        .iter()
        .map(|k| text.find(k).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(value["mdsversion"], "1.0");
        assert_eq!(value["@timestamp"], TS);
        assert_eq!(value["sensor"]["id"], "PUCK_2");
        assert_eq!(value["sensor"]["type"], "Puck");
        assert_eq!(
            value["sensor"]["description"],
            "Entrance of Endeavor Garage Right Lane"
        );

        let objects = value["objects"].as_array().unwrap();
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[1]["trackingId"], 1);
        assert_eq!(objects[1]["type"], "person");
        let bbox: Vec<f64> = objects[0]["bbox"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();
        assert_eq!(bbox, vec![100.0, 200.0, 50.5, 120.0]);

        assert_eq!(value["frame"]["width"], 1920);
        assert_eq!(value["frame"]["height"], 1080);
        assert_eq!(value["frame"]["frameId"], 90);

        msgconv::destroy_context(ctx);
    }

    #[test]
    fn test_full_schema_differs_only_in_messageid() {
        let ctx = full_context();
        let events = vec![frame_event(0, 30, &["car", "person"])];

        let a = ctx.generate(&events).unwrap();
        let b = ctx.generate(&events).unwrap();

        let mut va: Value = serde_json::from_slice(a.as_bytes()).unwrap();
        let mut vb: Value = serde_json::from_slice(b.as_bytes()).unwrap();
        let id_a = va["messageid"].take();
        let id_b = vb["messageid"].take();

        assert_ne!(id_a, id_b);
        assert!(uuid::Uuid::parse_str(id_a.as_str().unwrap()).is_ok());
        assert_eq!(va, vb);
    }

    #[test]
    fn test_empty_frame_yields_no_payload() {
        let ctx = full_context();
        let event = frame_event(0, 30, &[]);
        assert!(ctx.generate(&[event.clone()]).is_none());
        assert!(msgconv::generate_multiple(&ctx, &[event]).is_empty());
        assert_eq!(ctx.metrics().snapshot().generated_count, 0);
    }

    #[test]
    fn test_unresolved_sensor_yields_no_payload() {
        let ctx = full_context();
        // sensor1 is disabled in the config, sensor7 never existed
        assert!(ctx.generate(&[frame_event(1, 30, &["car"])]).is_none());
        assert!(ctx.generate(&[frame_event(7, 30, &["car"])]).is_none());

        // Next batch is unaffected
        assert!(ctx.generate(&[frame_event(0, 31, &["car"])]).is_some());
    }

    #[test]
    fn test_frame_bound_holds_through_generation() {
        let labels = vec!["car"; MAX_OBJ_NUM + 20];
        let event = frame_event(0, 1, &labels);
        assert_eq!(
            event.extended.frame_objects().unwrap().object_count(),
            MAX_OBJ_NUM
        );

        let ctx = full_context();
        let payload = ctx.generate(&[event]).unwrap();
        let value: Value = serde_json::from_slice(payload.as_bytes()).unwrap();
        assert_eq!(value["objects"].as_array().unwrap().len(), MAX_OBJ_NUM);
    }

    #[test]
    fn test_e2e_minimal_schema_with_attributes() {
        let file = write_config(KEY_VALUE_CONFIG, ".txt");
        let ctx = MsgConvContext::create(Some(file.path()), PayloadKind::MinimalSchema).unwrap();

        let mut vehicle = EventMessageMeta::new(0, 77);
        vehicle.timestamp = TS.to_string();
        vehicle.tracking_id = 957;
        vehicle.object_type = ObjectType::Vehicle;
        vehicle.bbox = contracts::BoundingBox::new(150.0, 1834.0, 84.0, 65.0);
        vehicle.confidence = 0.8;
        vehicle.extended = ExtendedPayload::Vehicle(VehicleAttributes {
            vehicle_type: Some("sedan".into()),
            make: Some("Bugatti".into()),
            model: Some("M".into()),
            color: Some("blue".into()),
            license: Some("CA 444".into()),
            region: Some("California".into()),
        });

        let mut person = vehicle.clone();
        person.tracking_id = 12;
        person.object_type = ObjectType::Person;
        person.bbox = contracts::BoundingBox::new(20.0, 10.0, 30.0, 40.0);
        person.confidence = 0.5;
        person.extended = ExtendedPayload::Person(PersonAttributes {
            gender: Some("female".into()),
            age: 31,
            ..Default::default()
        });

        let payload = ctx.generate(&[vehicle, person]).unwrap();
        assert_eq!(
            payload.as_str().unwrap(),
            concat!(
                r#"{"version":"4.0","id":77,"@timestamp":"2018-04-11T04:59:59.828Z","#,
                r#""sensorId":"HWY_20_AND_LOCUST__EBA__4_11_2018_4_59_59_508_AM_UTC-07_00","#,
                r#""objects":["957|1834|150|1918|215|Vehicle|#|sedan|Bugatti|M|blue|CA 444|California|0.8","#,
                r#""12|10|20|40|60|Person|#|female|31||||0.5"]}"#
            )
        );
    }

    #[test]
    fn test_custom_schema_placeholder() {
        let ctx = MsgConvContext::create(None, PayloadKind::Custom).unwrap();
        let payloads = ctx.generate_multiple(&[frame_event(0, 1, &["car"])]);
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].as_bytes(), b"CUSTOM Schema\0");
    }
}
