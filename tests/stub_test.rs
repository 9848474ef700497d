use regex::Regex;
use serde_json::json;
use vanilli::{MatchOptions, Method, RequestOptions, ResponseSpec, Stub, Times, VanilliError};

/// 只有必填字段时，所有可选字段都不出现
#[test]
fn test_required_fields_only_is_sparse() {
    for method in [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Head,
    ] {
        let stub = Stub::on_request(method, "/a", RequestOptions::new()).unwrap();
        let value = stub.to_value().unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1, "unexpected keys for {}", method);
        assert_eq!(value["criteria"], json!({"method": method.as_str(), "url": "/a"}));
    }
}

#[test]
fn test_body_without_content_type_fails_for_body_methods() {
    let attempts = [
        Stub::post("/a", RequestOptions::new().body("x")),
        Stub::put("/a", RequestOptions::new().body(json!({"a": 1}))),
        Stub::on_request(Method::Patch, "/a", RequestOptions::new().body("x")),
    ];
    for result in attempts {
        match result {
            Err(VanilliError::Validation(msg)) => {
                assert_eq!(msg, "Body was specified for but content-type was missing.")
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}

#[test]
fn test_regex_positions_in_criteria() {
    let stub = Stub::get(
        Regex::new(r"^/items/\d+$").unwrap(),
        MatchOptions::new()
            .query("page", Regex::new(r"\d+").unwrap())
            .query("sort", "asc")
            .header("Accept", "text/html")
            .header("X-Trace", Regex::new("^t-").unwrap()),
    )
    .unwrap();

    assert_eq!(
        stub.to_value().unwrap()["criteria"],
        json!({
            "method": "GET",
            "url": {"regex": r"^/items/\d+$"},
            "query": {"page": {"regex": r"\d+"}, "sort": "asc"},
            "headers": {"Accept": "text/html", "X-Trace": {"regex": "^t-"}}
        })
    );
}

#[test]
fn test_empty_mappings_are_sent() {
    let stub = Stub::get(
        "/a",
        MatchOptions::new()
            .queries(Vec::<(String, String)>::new())
            .headers(Vec::<(String, String)>::new()),
    )
    .unwrap();
    let json = stub.to_json().unwrap();
    assert_eq!(
        json,
        r#"{"criteria":{"method":"GET","url":"/a","query":{},"headers":{}}}"#
    );
}

#[test]
fn test_structured_body_encoding_depends_on_content_type() {
    let body = json!({"somefield": "somevalue"});

    let as_text = Stub::put(
        "/a",
        RequestOptions::new().content_type("text/plain").body(body.clone()),
    )
    .unwrap();
    assert_eq!(
        as_text.criteria().body,
        Some(json!(r#"{"somefield":"somevalue"}"#))
    );

    let as_json = Stub::put(
        "/a",
        RequestOptions::new()
            .content_type("application/json")
            .body(body.clone()),
    )
    .unwrap();
    assert_eq!(as_json.criteria().body, Some(body));
}

#[test]
fn test_times_serialization() {
    let any = Stub::get("/a", MatchOptions::new())
        .unwrap()
        .respond_with(ResponseSpec::with_status(200).times(Times::Any))
        .unwrap();
    assert!(any.to_value().unwrap().get("times").is_none());

    let three = Stub::get("/a", MatchOptions::new())
        .unwrap()
        .respond_with(ResponseSpec::with_status(200).times(3))
        .unwrap();
    assert_eq!(three.to_value().unwrap()["times"], json!(3));
}

#[test]
fn test_full_descriptor_wire_shape() {
    let stub = Stub::post(
        "/orders",
        RequestOptions::new()
            .content_type("application/json")
            .body(json!({"item": "tea"}))
            .priority(5),
    )
    .unwrap()
    .respond_with(
        ResponseSpec::with_status(201)
            .content_type("application/json")
            .body(json!({"id": 7}))
            .header("Location", "/orders/7")
            .times(2),
    )
    .unwrap()
    .wait(100)
    .capture("orders")
    .expected();

    assert_eq!(
        stub.to_json().unwrap(),
        concat!(
            r#"{"criteria":{"method":"POST","url":"/orders","contentType":"application/json","body":{"item":"tea"}},"#,
            r#""priority":5,"#,
            r#""response":{"status":201,"contentType":"application/json","body":{"id":7},"headers":{"Location":"/orders/7"},"wait":100},"#,
            r#""times":2,"captureId":"orders","expect":true}"#
        )
    );
}

/// null 的 body、query 和 header 值与未设置相同
#[test]
fn test_null_values_are_left_out() {
    let stub = Stub::post("/a", RequestOptions::new().body(None::<String>)).unwrap();
    assert_eq!(stub.to_value().unwrap(), json!({"criteria": {"method": "POST", "url": "/a"}}));

    let stub = Stub::get(
        "/a",
        MatchOptions::new()
            .query("q", serde_json::Value::Null)
            .header("h", "1"),
    )
    .unwrap()
    .respond_with(ResponseSpec::with_status(200).body(serde_json::Value::Null))
    .unwrap();
    assert_eq!(
        stub.to_value().unwrap(),
        json!({
            "criteria": {"method": "GET", "url": "/a", "headers": {"h": "1"}},
            "response": {"status": 200},
            "times": 1
        })
    );
}

#[test]
fn test_expected_descriptor_carries_flag() {
    let stub = Stub::get("/a", MatchOptions::new())
        .unwrap()
        .respond_with(ResponseSpec::with_status(200))
        .unwrap()
        .expected();
    assert!(stub.is_expectation());
    assert_eq!(stub.to_value().unwrap()["expect"], json!(true));
}
