//! Points, payload and vectors client tests

mod common;

use domain_qdrant::*;
use http::Method;
use serde_json::json;
use test_utils::assertions::{assert_json_body, assert_some};
use test_utils::{TestDataBuilder, fixtures};

#[tokio::test]
async fn test_upsert_without_wait_or_ordering_has_no_query_string() {
    let (client, transport) = common::client();
    transport.respond(200, fixtures::ok_envelope(fixtures::update_result(1, "acknowledged")));

    let builder = TestDataBuilder::from_test_name("upsert_no_query");
    let operations = PointInsertOperations::from(vec![PointStruct::new(
        builder.point_uuid(0),
        builder.vector(0, 4),
    )]);
    let result = client
        .points("docs")
        .upsert(&operations, WriteParams::new())
        .await
        .unwrap();
    assert_eq!(result.status, UpdateStatus::Acknowledged);

    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert!(request.query.is_empty());
    assert_eq!(request.path_and_query(), "/collections/docs/points");
    assert!(!request.path_and_query().contains('?'));
}

#[tokio::test]
async fn test_envelope_error_short_circuits() {
    let (client, transport) = common::client();
    transport.respond(
        200,
        br#"{"time":0.001,"status":{"error":"not found"}}"#.to_vec(),
    );

    let err = client
        .points("docs")
        .count(&CountRequest::new())
        .await
        .unwrap_err();
    assert_eq!(err.remote_message(), Some("not found"));
}

#[tokio::test]
async fn test_batch_upsert_body() {
    let (client, transport) = common::client();
    transport.respond(200, fixtures::ok_envelope(fixtures::update_result(2, "completed")));

    let mut payload = Payload::new();
    payload.insert("lang".to_string(), json!("en"));
    let batch = Batch {
        ids: vec![1u64.into(), "b".into()],
        vectors: BatchVectorStruct::Single(vec![vec![0.5, 0.5], vec![1.0, 0.0]]),
        payloads: Some(vec![Some(payload), None]),
    };
    client
        .points("docs")
        .upsert(&batch.into(), WriteParams::new().wait(true))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(request.query.get("wait"), Some("true"));
    assert_json_body(
        request.body.as_deref(),
        &json!({"batch": {
            "ids": [1, "b"],
            "vectors": [[0.5, 0.5], [1.0, 0.0]],
            "payloads": [{"lang": "en"}, null]
        }}),
        "batch upsert",
    );
}

#[tokio::test]
async fn test_get_many_and_scroll_decode_records() {
    let (client, transport) = common::client();
    transport.respond(
        200,
        fixtures::ok_envelope(json!([
            {"id": 1, "payload": {"city": "Berlin"}, "vector": [0.5, 0.25]},
            {"id": "u-2", "vector": {"image": [1.0]}}
        ])),
    );
    transport.respond(
        200,
        fixtures::ok_envelope(json!({"points": [], "next_page_offset": null})),
    );

    let points = client.points("docs");
    let request = PointRequest::new([1u64])
        .with_payload(true)
        .with_vector(vec!["image".to_string()]);
    let records = points
        .get_many(&request, ReadParams::new().consistency(2u64))
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    let payload = assert_some(records[0].payload.as_ref(), "first record payload");
    assert_eq!(payload["city"], json!("Berlin"));
    assert!(matches!(records[1].vector, Some(VectorStruct::Named(_))));
    assert_eq!(
        transport.last_request().path_and_query(),
        "/collections/docs/points?consistency=2"
    );

    let page = points
        .scroll(
            &ScrollRequest {
                limit: Some(10),
                ..Default::default()
            },
            ReadParams::new(),
        )
        .await
        .unwrap();
    assert!(page.next_page_offset.is_none());
}

#[tokio::test]
async fn test_search_batch_returns_one_list_per_search() {
    let (client, transport) = common::client();
    transport.respond(
        200,
        fixtures::ok_envelope(json!([
            [{"id": 1, "version": 3, "score": 0.75}],
            []
        ])),
    );

    let batch = SearchRequestBatch {
        searches: vec![
            SearchRequest::new(vec![1.0, 0.0], 1),
            SearchRequest::new(NamedVectorStruct::named("image", vec![0.0, 1.0]), 1),
        ],
    };
    let results = client
        .points("docs")
        .search_batch(&batch, ReadParams::new())
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0][0].score, 0.75);
    assert!(results[1].is_empty());

    let request = transport.last_request();
    assert_eq!(request.path, "/collections/docs/points/search/batch");
    assert_json_body(
        request.body.as_deref(),
        &json!({"searches": [
            {"vector": [1.0, 0.0], "limit": 1},
            {"vector": {"name": "image", "vector": [0.0, 1.0]}, "limit": 1}
        ]}),
        "search batch",
    );
}

#[tokio::test]
async fn test_search_groups_with_lookup() {
    let (client, transport) = common::client();
    transport.respond(
        200,
        fixtures::ok_envelope(json!({"groups": [{
            "id": "doc-1",
            "hits": [{"id": 11, "version": 0, "score": 0.5}],
            "lookup": {"id": "doc-1", "payload": {"title": "Intro"}}
        }]})),
    );

    let request = SearchGroupsRequest::new(vec![0.5, 0.5], "document_id", 3, 10)
        .with_lookup("documents");
    let result = client
        .points("chunks")
        .search_groups(&request, ReadParams::new())
        .await
        .unwrap();
    assert_eq!(result.groups[0].id, GroupId::String("doc-1".to_string()));
    assert!(result.groups[0].lookup.is_some());

    assert_json_body(
        transport.last_request().body.as_deref(),
        &json!({
            "vector": [0.5, 0.5],
            "group_by": "document_id",
            "group_size": 3,
            "limit": 10,
            "with_lookup": "documents"
        }),
        "search groups",
    );
}

#[tokio::test]
async fn test_recommend_with_lookup_from() {
    let (client, transport) = common::client();
    transport.respond(200, fixtures::ok_envelope(json!([])));

    let request = RecommendRequest::new([1u64, 2], 5)
        .with_negative([3u64])
        .with_using("image")
        .with_lookup_from(LookupLocation {
            collection: "catalog".to_string(),
            vector: Some("image".to_string()),
        });
    client
        .points("docs")
        .recommend(&request, ReadParams::new().consistency(ReadConsistencyType::All))
        .await
        .unwrap();

    let sent = transport.last_request();
    assert_eq!(
        sent.path_and_query(),
        "/collections/docs/points/recommend?consistency=all"
    );
    assert_json_body(
        sent.body.as_deref(),
        &json!({
            "positive": [1, 2],
            "negative": [3],
            "limit": 5,
            "using": "image",
            "lookup_from": {"collection": "catalog", "vector": "image"}
        }),
        "recommend",
    );
}

#[tokio::test]
async fn test_payload_and_vectors_clients_are_bound_to_collection() {
    let (client, transport) = common::client();
    transport.respond(200, fixtures::ok_envelope(fixtures::update_result(1, "completed")));
    transport.respond(200, fixtures::ok_envelope(fixtures::update_result(2, "completed")));

    let points = client.points("articles");
    let mut payload = Payload::new();
    payload.insert("draft".to_string(), json!(false));
    points
        .payload()
        .set(
            &SetPayload::for_filter(payload, Filter::must([Condition::has_id([1u64])])),
            WriteParams::new(),
        )
        .await
        .unwrap();
    points
        .vectors()
        .delete(
            &DeleteVectors {
                points: None,
                filter: Some(Filter::must([Condition::is_empty("body")])),
                vector: vec!["text".to_string()],
            },
            WriteParams::new().ordering(WriteOrdering::Weak),
        )
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].path, "/collections/articles/points/payload");
    assert_eq!(
        requests[1].path_and_query(),
        "/collections/articles/points/vectors/delete?ordering=weak"
    );
}
