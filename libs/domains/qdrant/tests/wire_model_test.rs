//! Wire model tests
//!
//! These tests pin down the decode priority of the tagged unions and check
//! that encoding a decoded value reproduces an equivalent JSON document.

use domain_qdrant::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;

fn reencode<T: Serialize + DeserializeOwned>(raw: Value) -> Value {
    let decoded: T = serde_json::from_value(raw).unwrap();
    serde_json::to_value(&decoded).unwrap()
}

#[test]
fn test_point_id_integer_and_string_never_conflated() {
    let integer: ExtendedPointId = serde_json::from_value(json!(42)).unwrap();
    let string: ExtendedPointId = serde_json::from_value(json!("42")).unwrap();

    assert_eq!(integer, ExtendedPointId::Integer(42));
    assert_eq!(string, ExtendedPointId::String("42".to_string()));
    assert_ne!(integer, string);
    assert_eq!(serde_json::to_value(&integer).unwrap(), json!(42));
    assert_eq!(serde_json::to_value(&string).unwrap(), json!("42"));
}

#[test]
fn test_point_id_rejects_negative_and_float() {
    assert!(serde_json::from_value::<ExtendedPointId>(json!(-1)).is_err());
    let err = serde_json::from_value::<ExtendedPointId>(json!(1.5)).unwrap_err();
    assert!(err.to_string().contains("ExtendedPointId"));
}

#[test]
fn test_uuid_point_id_is_string_variant() {
    let uuid = TestDataBuilder::from_test_name("uuid_point_id").point_uuid(0);
    let id = ExtendedPointId::from(uuid);
    assert_eq!(id, ExtendedPointId::String(uuid.to_string()));
}

#[test]
fn test_match_disambiguation() {
    let value: FieldCondition =
        serde_json::from_value(json!({"key": "city", "match": {"value": "Berlin"}})).unwrap();
    assert_eq!(
        value.r#match,
        Some(Match::Value(ValueVariants::Keyword("Berlin".to_string())))
    );

    let any: FieldCondition = serde_json::from_value(
        json!({"key": "city", "match": {"any": ["Berlin", "London"]}}),
    )
    .unwrap();
    assert_eq!(
        any.r#match,
        Some(Match::Any(AnyVariants::Keywords(vec![
            "Berlin".to_string(),
            "London".to_string()
        ])))
    );

    let both = serde_json::from_value::<FieldCondition>(
        json!({"key": "city", "match": {"value": "x", "any": ["y"]}}),
    );
    assert!(both.is_err());

    let none = serde_json::from_value::<Match>(json!({}));
    assert!(none.is_err());
}

#[test]
fn test_condition_priority_order() {
    let field: Condition = serde_json::from_value(json!({"key": "n", "range": {"gte": 1.0}})).unwrap();
    assert!(matches!(field, Condition::Field(_)));

    let is_empty: Condition = serde_json::from_value(json!({"is_empty": {"key": "tags"}})).unwrap();
    assert!(matches!(is_empty, Condition::IsEmpty(_)));

    let has_id: Condition = serde_json::from_value(json!({"has_id": [1, "a"]})).unwrap();
    assert_eq!(has_id, Condition::has_id([ExtendedPointId::Integer(1), "a".into()]));

    let filter: Condition = serde_json::from_value(json!({"must_not": []})).unwrap();
    assert!(matches!(filter, Condition::Filter(_)));

    let unknown = serde_json::from_value::<Condition>(json!({"bogus": 1})).unwrap_err();
    assert!(unknown.to_string().contains("Condition"));
}

#[test]
fn test_nested_filter_round_trip_depth_four() {
    let leaf = Condition::matches("colour", "red");
    let mut filter = Filter::must([leaf]);
    for key in ["c", "b", "a"] {
        filter = Filter::must([Condition::nested(key, filter)]);
    }
    assert_eq!(filter.depth(), 3);

    let encoded = serde_json::to_value(&filter).unwrap();
    assert_eq!(
        encoded["must"][0]["nested"]["filter"]["must"][0]["nested"]["filter"]["must"][0]["nested"]
            ["key"],
        json!("c")
    );

    let decoded: Filter = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, filter);

    let wrapped = Filter::should([Condition::from(filter.clone())]);
    let decoded: Filter = serde_json::from_value(serde_json::to_value(&wrapped).unwrap()).unwrap();
    assert_eq!(decoded, wrapped);
    assert_eq!(decoded.depth(), 4);
}

#[test]
fn test_vector_struct_shapes() {
    let single: VectorStruct = serde_json::from_value(json!([0.5, 0.25])).unwrap();
    assert_eq!(single, VectorStruct::Single(vec![0.5, 0.25]));

    let named = json!({"image": [1.0], "text": [0.5, 0.5]});
    assert_eq!(reencode::<VectorStruct>(named.clone()), named);

    let err = serde_json::from_value::<VectorStruct>(json!("oops")).unwrap_err();
    assert!(err.to_string().contains("VectorStruct"));
}

#[test]
fn test_named_vector_struct_shapes() {
    let default: NamedVectorStruct = serde_json::from_value(json!([1.0, 0.0])).unwrap();
    assert_eq!(default, NamedVectorStruct::Default(vec![1.0, 0.0]));

    let named = json!({"name": "image", "vector": [1.0, 0.0]});
    let decoded: NamedVectorStruct = serde_json::from_value(named.clone()).unwrap();
    assert_eq!(decoded, NamedVectorStruct::named("image", vec![1.0, 0.0]));
    assert_eq!(serde_json::to_value(&decoded).unwrap(), named);
}

#[test]
fn test_quantization_config_round_trip() {
    let scalar = json!({"scalar": {"type": "int8", "quantile": 0.5, "always_ram": true}});
    assert_eq!(reencode::<QuantizationConfig>(scalar.clone()), scalar);

    let product = json!({"product": {"compression": "x16"}});
    assert_eq!(reencode::<QuantizationConfig>(product.clone()), product);

    assert!(serde_json::from_value::<QuantizationConfig>(json!({"binary": {}})).is_err());
}

#[test]
fn test_optimizer_status_union() {
    let ok: OptimizersStatus = serde_json::from_value(json!("ok")).unwrap();
    assert_eq!(ok, OptimizersStatus::Ok);

    let error: OptimizersStatus =
        serde_json::from_value(json!({"error": "segment corrupted"})).unwrap();
    assert_eq!(error, OptimizersStatus::Error("segment corrupted".to_string()));
    assert_eq!(
        serde_json::to_value(&error).unwrap(),
        json!({"error": "segment corrupted"})
    );
}

#[test]
fn test_collection_info_decodes_service_response() {
    let raw = json!({
        "status": "green",
        "optimizer_status": "ok",
        "vectors_count": 10,
        "indexed_vectors_count": 0,
        "points_count": 10,
        "segments_count": 2,
        "config": {
            "params": {
                "vectors": {"size": 4, "distance": "Dot"},
                "shard_number": 1,
                "replication_factor": 1,
                "write_consistency_factor": 1,
                "on_disk_payload": true
            },
            "hnsw_config": {"m": 16, "ef_construct": 100, "full_scan_threshold": 10000, "max_indexing_threads": 0, "on_disk": false},
            "optimizer_config": {
                "deleted_threshold": 0.2,
                "vacuum_min_vector_number": 1000,
                "default_segment_number": 0,
                "max_segment_size": null,
                "memmap_threshold": null,
                "indexing_threshold": 20000,
                "flush_interval_sec": 5,
                "max_optimization_threads": 1
            },
            "wal_config": {"wal_capacity_mb": 32, "wal_segments_ahead": 0},
            "quantization_config": null
        },
        "payload_schema": {"city": {"data_type": "keyword", "points": 7}}
    });

    let info: CollectionInfo = serde_json::from_value(raw).unwrap();
    assert_eq!(info.status, CollectionStatus::Green);
    assert_eq!(info.points_count, Some(10));
    assert_eq!(
        info.config.params.vectors,
        VectorsConfig::single(4, Distance::Dot)
    );
    assert_eq!(info.payload_schema["city"].data_type, PayloadSchemaType::Keyword);
}

#[test]
fn test_create_collection_full_body_round_trip() {
    let body = CreateCollection::new(VectorsConfig::single(768, Distance::Euclid))
        .with_shard_number(2)
        .with_on_disk_payload(true)
        .with_hnsw_config(HnswConfigDiff {
            m: Some(32),
            ..Default::default()
        })
        .with_quantization(QuantizationConfig::scalar_int8());

    let encoded = serde_json::to_value(&body).unwrap();
    assert_eq!(encoded["hnsw_config"], json!({"m": 32}));
    assert!(encoded.get("wal_config").is_none());

    let decoded: CreateCollection = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, body);
}

#[test]
fn test_negative_counts_rejected() {
    let raw = json!({"vectors": {"size": -4, "distance": "Cosine"}});
    assert!(serde_json::from_value::<CreateCollection>(raw).is_err());
    assert!(serde_json::from_value::<CountResult>(json!({"count": -1})).is_err());
}

#[test]
fn test_search_request_round_trip() {
    let builder = TestDataBuilder::from_test_name("search_request_round_trip");
    let request = SearchRequest::new(builder.vector(0, 8), 10)
        .with_filter(Filter::must([Condition::matches_any("tag", vec!["a", "b"])]))
        .with_payload(PayloadSelector::Exclude(vec!["secret".to_string()]))
        .with_vector(false)
        .with_score_threshold(0.5);

    let decoded: SearchRequest =
        serde_json::from_value(serde_json::to_value(&request).unwrap()).unwrap();
    assert_eq!(decoded, request);
}

#[test]
fn test_group_id_round_trip_for_every_variant() {
    for id in [
        GroupId::String("5".to_string()),
        GroupId::Unsigned(5),
        GroupId::Signed(5),
        GroupId::Signed(-5),
        GroupId::from(i64::MAX),
    ] {
        let decoded: GroupId = serde_json::from_value(serde_json::to_value(&id).unwrap()).unwrap();
        assert_eq!(decoded, id);
    }

    let decoded: GroupId = serde_json::from_value(json!(5)).unwrap();
    assert!(matches!(decoded, GroupId::Unsigned(5)));
}

#[test]
fn test_empty_match_sets_round_trip() {
    for any in [
        AnyVariants::Integers(vec![]),
        AnyVariants::Keywords(vec![]),
        AnyVariants::Integers(vec![-3, 4]),
    ] {
        let decoded: AnyVariants =
            serde_json::from_value(serde_json::to_value(&any).unwrap()).unwrap();
        assert_eq!(decoded, any);
    }

    let filter = Filter::must([
        Condition::matches_any("ids", AnyVariants::Integers(vec![])),
        Condition::matches_except("ids", AnyVariants::Integers(vec![])),
    ]);
    let encoded = serde_json::to_value(&filter).unwrap();
    assert_eq!(encoded["must"][0]["match"], json!({"any": []}));

    let decoded: Filter = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, filter);
}
